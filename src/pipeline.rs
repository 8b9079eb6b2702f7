use std::collections::BTreeMap;

use serde_json::Value;
use tracing::{debug, info, instrument};

use crate::client::ReportApi;
use crate::error::Result;
use crate::extract::{column_labels, filter_description, folder_name, truncate_date};
use crate::model::{ReportRecord, ReportRow, UserRef};

/// Runs the full query → describe → transform pass and returns one row per
/// report whose describe call succeeded, preserving query order.
///
/// The report list and folder map are both fetched up front; each report is
/// then described one at a time. A report without a describe document is
/// skipped without surfacing an error.
#[instrument(level = "info", skip_all)]
pub fn extract_report_rows(api: &dyn ReportApi, where_clause: &str) -> Result<Vec<ReportRow>> {
    let records = api.query_report_records(where_clause)?;
    let folder_names_by_id = api.query_folder_names()?;
    info!(
        report_count = records.len(),
        folder_count = folder_names_by_id.len(),
        "queried report and folder lists"
    );

    let mut rows = Vec::with_capacity(records.len());
    for record in &records {
        let Some(document) = api.describe_report(&record.id)? else {
            debug!(report_id = %record.id, "no metadata for report, skipping");
            continue;
        };
        rows.push(build_row(api, record, &document, &folder_names_by_id)?);
    }

    Ok(rows)
}

fn build_row(
    api: &dyn ReportApi,
    record: &ReportRecord,
    document: &Value,
    folder_names_by_id: &BTreeMap<String, String>,
) -> Result<ReportRow> {
    let null = Value::Null;
    let metadata = document.get("reportMetadata").unwrap_or(&null);
    let extended_metadata = document.get("reportExtendedMetadata").unwrap_or(&null);

    let field_apis: Vec<String> = metadata
        .get("detailColumns")
        .and_then(Value::as_array)
        .map(|columns| {
            columns
                .iter()
                .filter_map(Value::as_str)
                .map(str::to_string)
                .collect()
        })
        .unwrap_or_default();

    let field_data = column_labels(extended_metadata, &field_apis)?;
    let (field_labels, field_api_names) = field_data.into_iter().unzip();

    let report_name = text(metadata, "/name");
    info!(report = %report_name, "processing report");

    Ok(ReportRow {
        report_url: format!("https://{}/{}", api.instance_host(), record.id),
        report_id: record.id.clone(),
        report_name,
        folder_name: folder_name(document, folder_names_by_id),
        report_type: text(metadata, "/reportType/label"),
        report_format: text(metadata, "/reportFormat"),
        field_labels,
        field_api_names,
        filters: filter_description(metadata),
        created_by: user_name(record.created_by.as_ref()),
        created_date: truncate_date(record.created_date.as_deref().unwrap_or_default()),
        last_modified_by: user_name(record.last_modified_by.as_ref()),
        last_modified_date: truncate_date(record.last_modified_date.as_deref().unwrap_or_default()),
        last_run_date: truncate_date(record.last_run_date.as_deref().unwrap_or_default()),
        last_view_date: truncate_date(record.last_viewed_date.as_deref().unwrap_or_default()),
    })
}

fn text(value: &Value, pointer: &str) -> String {
    value
        .pointer(pointer)
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string()
}

fn user_name(user: Option<&UserRef>) -> String {
    user.and_then(|user| user.name.clone()).unwrap_or_default()
}

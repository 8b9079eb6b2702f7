use std::collections::BTreeMap;

use serde_json::Value;

use crate::error::{ExtractError, Result};

/// Synthetic bucket for reports living under a user record (`005…` prefix).
pub const PERSONAL_FOLDER: &str = "My Personal Custom Reports";
/// Synthetic bucket for reports filed under the org record (`00D…` prefix).
pub const UNFILED_FOLDER: &str = "Unfiled Custom Reports";

/// Pairs each detail column with its display label.
///
/// `field_apis` holds dot-qualified API identifiers (e.g. `Account.Name`) in
/// the order the report displays them; each is looked up in the extended
/// metadata's `detailColumnInfo` map and paired with its last dot-segment.
/// The output preserves the input order. A column missing from the map is a
/// hard error rather than a defaulted value.
pub fn column_labels(
    extended_metadata: &Value,
    field_apis: &[String],
) -> Result<Vec<(String, String)>> {
    let column_info = extended_metadata
        .get("detailColumnInfo")
        .and_then(Value::as_object);

    field_apis
        .iter()
        .map(|api| {
            let label = column_info
                .and_then(|info| info.get(api))
                .and_then(|entry| entry.get("label"))
                .and_then(Value::as_str)
                .ok_or_else(|| ExtractError::MissingColumnInfo(api.clone()))?;
            Ok((label.to_string(), last_segment(api).to_string()))
        })
        .collect()
}

/// Resolves the display name of the folder holding the described report.
///
/// Resolution order: exact match in the folder map, then the synthetic
/// personal/unfiled buckets by identifier prefix, then the raw identifier.
pub fn folder_name(document: &Value, folder_names_by_id: &BTreeMap<String, String>) -> String {
    let folder_id = document
        .pointer("/reportMetadata/folderId")
        .and_then(Value::as_str)
        .unwrap_or_default();

    if let Some(name) = folder_names_by_id.get(folder_id) {
        return name.clone();
    }
    if folder_id.starts_with("005") {
        PERSONAL_FOLDER.to_string()
    } else if folder_id.starts_with("00D") {
        UNFILED_FOLDER.to_string()
    } else {
        folder_id.to_string()
    }
}

/// Builds the human-readable filter description for a `reportMetadata`
/// sub-document.
///
/// Multi-block (joined) reports keep their filters under `blocks`; each
/// block's filter list is formatted on its own and the blocks are joined
/// with `", "`. Single-block reports carry a top-level `reportFilters` list.
pub fn filter_description(report_metadata: &Value) -> String {
    if let Some(blocks) = report_metadata.get("blocks").and_then(Value::as_array) {
        blocks
            .iter()
            .filter_map(|block| block.get("reportFilters").and_then(Value::as_array))
            .map(|filters| format_filter_list(filters))
            .collect::<Vec<_>>()
            .join(", ")
    } else {
        let filters = report_metadata.get("reportFilters").and_then(Value::as_array);
        format_filter_list(filters.map(Vec::as_slice).unwrap_or(&[]))
    }
}

/// Renders one filter list as `"{column} {operator} {value}"` terms joined
/// with `" | "`, in list order. The column keeps only its last dot-segment;
/// missing parts default to the empty string.
pub fn format_filter_list(filters: &[Value]) -> String {
    filters
        .iter()
        .map(|filter| {
            let column = last_segment(text_field(filter, "column"));
            let operator = text_field(filter, "operator");
            let value = text_field(filter, "value");
            format!("{column} {operator} {value}")
        })
        .collect::<Vec<_>>()
        .join(" | ")
}

/// Truncates a Salesforce timestamp to its date-only prefix by dropping the
/// trailing 9 characters that encode time and zone offset. Empty input stays
/// empty, as do strings too short to carry a suffix.
pub fn truncate_date(value: &str) -> String {
    value
        .get(..value.len().saturating_sub(9))
        .unwrap_or_default()
        .to_string()
}

fn text_field<'a>(value: &'a Value, key: &str) -> &'a str {
    value.get(key).and_then(Value::as_str).unwrap_or_default()
}

fn last_segment(api: &str) -> &str {
    api.rsplit('.').next().unwrap_or(api)
}

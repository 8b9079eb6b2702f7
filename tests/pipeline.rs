use std::collections::BTreeMap;

use report_extractor::Result;
use report_extractor::client::ReportApi;
use report_extractor::model::{ReportRecord, UserRef};
use report_extractor::pipeline::extract_report_rows;
use serde_json::{Value, json};

/// In-memory stand-in for the Salesforce client. Reports without an entry in
/// `documents` behave like a 404 on the describe endpoint.
struct FakeApi {
    records: Vec<ReportRecord>,
    folders: BTreeMap<String, String>,
    documents: BTreeMap<String, Value>,
}

impl ReportApi for FakeApi {
    fn instance_host(&self) -> &str {
        "example.my.salesforce.com"
    }

    fn query_report_records(&self, _where_clause: &str) -> Result<Vec<ReportRecord>> {
        Ok(self.records.clone())
    }

    fn query_folder_names(&self) -> Result<BTreeMap<String, String>> {
        Ok(self.folders.clone())
    }

    fn describe_report(&self, report_id: &str) -> Result<Option<Value>> {
        Ok(self.documents.get(report_id).cloned())
    }
}

fn record(id: &str, name: &str) -> ReportRecord {
    ReportRecord {
        id: id.to_string(),
        name: Some(name.to_string()),
        created_date: Some("2023-05-01T12:00:00.000+0000".to_string()),
        created_by: Some(UserRef {
            name: Some("Ada Lovelace".to_string()),
        }),
        last_modified_date: Some("2024-02-29T08:15:00.000+0000".to_string()),
        last_modified_by: Some(UserRef {
            name: Some("Grace Hopper".to_string()),
        }),
        last_viewed_date: Some("2024-03-01T09:00:00.000+0000".to_string()),
        ..ReportRecord::default()
    }
}

fn describe_document(name: &str, folder_id: &str) -> Value {
    json!({
        "reportMetadata": {
            "name": name,
            "folderId": folder_id,
            "reportFormat": "TABULAR",
            "reportType": {"label": "Opportunities", "type": "Opportunity"},
            "detailColumns": ["Opportunity.Name", "Opportunity.Amount"],
            "reportFilters": [
                {"column": "Opportunity.StageName", "operator": "equals", "value": "Closed Won"}
            ]
        },
        "reportExtendedMetadata": {
            "detailColumnInfo": {
                "Opportunity.Name": {"label": "Opportunity Name"},
                "Opportunity.Amount": {"label": "Amount"}
            }
        }
    })
}

#[test]
fn undescribed_report_is_skipped_without_aborting_the_run() {
    let api = FakeApi {
        records: vec![
            record("00O000000000001", "First"),
            record("00O000000000002", "Gone"),
            record("00O000000000003", "Third"),
        ],
        folders: BTreeMap::new(),
        documents: BTreeMap::from([
            (
                "00O000000000001".to_string(),
                describe_document("First", "00l000000000001"),
            ),
            (
                "00O000000000003".to_string(),
                describe_document("Third", "00l000000000001"),
            ),
        ]),
    };

    let rows = extract_report_rows(&api, "").expect("pipeline run");
    let ids: Vec<&str> = rows.iter().map(|row| row.report_id.as_str()).collect();
    assert_eq!(ids, vec!["00O000000000001", "00O000000000003"]);
}

#[test]
fn row_joins_record_fields_with_describe_fields() {
    let api = FakeApi {
        records: vec![record("00O000000000001", "Quarterly Pipeline")],
        folders: BTreeMap::from([(
            "00l000000000001".to_string(),
            "Sales Reports".to_string(),
        )]),
        documents: BTreeMap::from([(
            "00O000000000001".to_string(),
            describe_document("Quarterly Pipeline", "00l000000000001"),
        )]),
    };

    let rows = extract_report_rows(&api, "").expect("pipeline run");
    assert_eq!(rows.len(), 1);
    let row = &rows[0];

    assert_eq!(
        row.report_url,
        "https://example.my.salesforce.com/00O000000000001"
    );
    assert_eq!(row.report_id, "00O000000000001");
    assert_eq!(row.report_name, "Quarterly Pipeline");
    assert_eq!(row.folder_name, "Sales Reports");
    assert_eq!(row.report_type, "Opportunities");
    assert_eq!(row.report_format, "TABULAR");
    assert_eq!(row.field_labels, vec!["Opportunity Name", "Amount"]);
    assert_eq!(row.field_api_names, vec!["Name", "Amount"]);
    assert_eq!(row.filters, "StageName equals Closed Won");
    assert_eq!(row.created_by, "Ada Lovelace");
    assert_eq!(row.created_date, "2023-05-01T12:00:00");
    assert_eq!(row.last_modified_by, "Grace Hopper");
    assert_eq!(row.last_modified_date, "2024-02-29T08:15:00");
    assert_eq!(row.last_run_date, "");
    assert_eq!(row.last_view_date, "2024-03-01T09:00:00");
}

#[test]
fn label_and_api_name_sequences_stay_aligned() {
    let api = FakeApi {
        records: vec![record("00O000000000001", "Aligned")],
        folders: BTreeMap::new(),
        documents: BTreeMap::from([(
            "00O000000000001".to_string(),
            describe_document("Aligned", "00l000000000001"),
        )]),
    };

    let rows = extract_report_rows(&api, "").expect("pipeline run");
    let row = &rows[0];
    assert_eq!(row.field_labels.len(), row.field_api_names.len());
}

#[test]
fn personal_folder_bucket_resolves_through_pipeline() {
    let api = FakeApi {
        records: vec![record("00O000000000001", "Mine")],
        folders: BTreeMap::new(),
        documents: BTreeMap::from([(
            "00O000000000001".to_string(),
            describe_document("Mine", "0055e000000AbCdAAK"),
        )]),
    };

    let rows = extract_report_rows(&api, "").expect("pipeline run");
    assert_eq!(rows[0].folder_name, "My Personal Custom Reports");
}

#[test]
fn missing_scalars_default_to_empty_strings() {
    let api = FakeApi {
        records: vec![ReportRecord {
            id: "00O000000000009".to_string(),
            ..ReportRecord::default()
        }],
        folders: BTreeMap::new(),
        documents: BTreeMap::from([(
            "00O000000000009".to_string(),
            json!({
                "reportMetadata": {"folderId": "00l000000000009"},
                "reportExtendedMetadata": {"detailColumnInfo": {}}
            }),
        )]),
    };

    let rows = extract_report_rows(&api, "").expect("pipeline run");
    let row = &rows[0];
    assert_eq!(row.report_name, "");
    assert_eq!(row.report_type, "");
    assert_eq!(row.report_format, "");
    assert_eq!(row.created_by, "");
    assert_eq!(row.created_date, "");
    assert!(row.field_labels.is_empty());
    assert!(row.field_api_names.is_empty());
    assert_eq!(row.filters, "");
}

#[test]
fn unknown_detail_column_aborts_the_run() {
    let mut document = describe_document("Broken", "00l000000000001");
    document["reportMetadata"]["detailColumns"] = json!(["Opportunity.MissingField"]);

    let api = FakeApi {
        records: vec![record("00O000000000001", "Broken")],
        folders: BTreeMap::new(),
        documents: BTreeMap::from([("00O000000000001".to_string(), document)]),
    };

    extract_report_rows(&api, "").expect_err("unknown detail column must be fatal");
}

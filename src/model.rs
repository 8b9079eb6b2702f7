use serde::Deserialize;

/// Envelope returned by the SOQL query endpoint. Large result sets arrive in
/// pages chained together through `nextRecordsUrl`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QueryResponse<T> {
    pub total_size: u64,
    pub done: bool,
    #[serde(default)]
    pub next_records_url: Option<String>,
    pub records: Vec<T>,
}

/// Summary record for one report, as returned by the report list query.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ReportRecord {
    pub id: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub developer_name: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub created_date: Option<String>,
    #[serde(default)]
    pub created_by: Option<UserRef>,
    #[serde(default)]
    pub last_modified_date: Option<String>,
    #[serde(default)]
    pub last_modified_by: Option<UserRef>,
    #[serde(default)]
    pub last_run_date: Option<String>,
    #[serde(default)]
    pub last_viewed_date: Option<String>,
}

/// Relationship sub-object carrying a user's display name, e.g. the
/// `CreatedBy.Name` part of the report query.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UserRef {
    #[serde(rename = "Name", default)]
    pub name: Option<String>,
}

/// Folder record from the folder list query.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct FolderRecord {
    pub id: String,
    #[serde(default)]
    pub name: Option<String>,
}

/// One flat output row: the join of a [`ReportRecord`] with the fields
/// derived from its describe document. `field_labels` and `field_api_names`
/// are positionally aligned, both following the order of the report's
/// detail columns.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ReportRow {
    pub report_url: String,
    pub report_id: String,
    pub report_name: String,
    pub folder_name: String,
    pub report_type: String,
    pub report_format: String,
    pub field_labels: Vec<String>,
    pub field_api_names: Vec<String>,
    pub filters: String,
    pub created_by: String,
    pub created_date: String,
    pub last_modified_by: String,
    pub last_modified_date: String,
    pub last_run_date: String,
    pub last_view_date: String,
}

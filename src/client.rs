use std::collections::BTreeMap;
use std::time::Duration;

use reqwest::StatusCode;
use reqwest::blocking::{Client, Response};
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::debug;

use crate::error::{ExtractError, Result};
use crate::model::{FolderRecord, QueryResponse, ReportRecord};

/// Fields fetched for every report summary record.
pub const REPORT_FIELDS: [&str; 10] = [
    "Id",
    "Name",
    "DeveloperName",
    "CreatedDate",
    "CreatedBy.Name",
    "LastRunDate",
    "LastModifiedBy.Name",
    "LastModifiedDate",
    "LastViewedDate",
    "Description",
];

/// Connection material for an already-authenticated Salesforce session.
/// Obtaining the token (OAuth flow, SOAP login, CLI session reuse) is the
/// caller's concern.
#[derive(Debug, Clone)]
pub struct Session {
    /// Org instance URL, e.g. `https://example.my.salesforce.com`.
    pub instance_url: String,
    /// Bearer token sent with every request.
    pub access_token: String,
    /// REST API version, e.g. `59.0`.
    pub api_version: String,
}

/// Read operations the pipeline needs from the reporting API. The trait
/// exists so the orchestrator can run against an in-memory fake in tests.
pub trait ReportApi {
    /// Hostname of the org instance, used to build report links.
    fn instance_host(&self) -> &str;

    /// Queries all report summary records, optionally narrowed by a SOQL
    /// WHERE clause, exhausting pagination fully.
    fn query_report_records(&self, where_clause: &str) -> Result<Vec<ReportRecord>>;

    /// Queries all folders into an identifier → display name map.
    fn query_folder_names(&self) -> Result<BTreeMap<String, String>>;

    /// Fetches the describe document for one report. A non-success status
    /// yields `None` rather than an error; only transport failures surface.
    fn describe_report(&self, report_id: &str) -> Result<Option<Value>>;
}

/// HTTP client for the Salesforce query and analytics endpoints. Wraps an
/// authenticated session by composition rather than extending any base
/// client type.
pub struct SalesforceClient {
    session: Session,
    http: Client,
}

impl SalesforceClient {
    pub fn new(session: Session) -> Result<Self> {
        let http = Client::builder()
            .timeout(Duration::from_secs(120))
            .user_agent(concat!("report-extractor/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self { session, http })
    }

    fn base_url(&self) -> &str {
        self.session.instance_url.trim_end_matches('/')
    }

    fn get(&self, url: &str) -> Result<Response> {
        Ok(self
            .http
            .get(url)
            .bearer_auth(&self.session.access_token)
            .send()?)
    }

    /// Runs one SOQL query and follows `nextRecordsUrl` until the result set
    /// is exhausted.
    fn query_all<T: DeserializeOwned>(&self, soql: &str, object: &str) -> Result<Vec<T>> {
        let mut records = Vec::new();
        let mut request = self
            .http
            .get(format!(
                "{}/services/data/v{}/query",
                self.base_url(),
                self.session.api_version
            ))
            .query(&[("q", soql)]);

        loop {
            let response = request
                .bearer_auth(&self.session.access_token)
                .send()?;
            let status = response.status();
            if status != StatusCode::OK {
                return Err(ExtractError::QueryFailed {
                    object: object.to_string(),
                    status,
                });
            }

            let page: QueryResponse<T> = response.json()?;
            records.extend(page.records);
            debug!(object, fetched = records.len(), total = page.total_size, "query page received");

            match page.next_records_url {
                Some(next) if !page.done => {
                    request = self.http.get(format!("{}{next}", self.base_url()));
                }
                _ => break,
            }
        }

        Ok(records)
    }
}

impl ReportApi for SalesforceClient {
    fn instance_host(&self) -> &str {
        let url = self.base_url();
        url.strip_prefix("https://")
            .or_else(|| url.strip_prefix("http://"))
            .unwrap_or(url)
    }

    fn query_report_records(&self, where_clause: &str) -> Result<Vec<ReportRecord>> {
        let mut soql = format!("SELECT {} FROM Report", REPORT_FIELDS.join(","));
        if !where_clause.is_empty() {
            soql.push(' ');
            soql.push_str(where_clause);
        }
        self.query_all(&soql, "Report")
    }

    fn query_folder_names(&self) -> Result<BTreeMap<String, String>> {
        let folders: Vec<FolderRecord> = self.query_all("SELECT Id, Name FROM Folder", "Folder")?;
        Ok(folders
            .into_iter()
            .map(|folder| (folder.id, folder.name.unwrap_or_default()))
            .collect())
    }

    fn describe_report(&self, report_id: &str) -> Result<Option<Value>> {
        let url = format!(
            "{}/services/data/v{}/analytics/reports/{report_id}/describe",
            self.base_url(),
            self.session.api_version
        );
        let response = self.get(&url)?;
        if response.status() == StatusCode::OK {
            Ok(Some(response.json()?))
        } else {
            debug!(report_id, status = %response.status(), "describe returned non-success");
            Ok(None)
        }
    }
}

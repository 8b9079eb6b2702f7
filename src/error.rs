use thiserror::Error;

/// Convenient alias for fallible results returned throughout the crate.
pub type Result<T> = std::result::Result<T, ExtractError>;

/// Error type covering the different failure cases that can occur while
/// querying the reporting API, transforming metadata, or writing the
/// workbook.
#[derive(Debug, Error)]
pub enum ExtractError {
    /// Wrapper for IO failures such as writing the output file.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Raised when JSON parsing or serialization fails.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Errors bubbled up from the HTTP client.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Errors bubbled up from the Excel writer implementation.
    #[error("Excel write error: {0}")]
    ExcelWrite(#[from] rust_xlsxwriter::XlsxError),

    /// Raised when a SOQL query returns a non-success status.
    #[error("query against {object} failed with status {status}")]
    QueryFailed {
        object: String,
        status: reqwest::StatusCode,
    },

    /// Raised when a detail column has no entry in the extended metadata.
    /// A describe document that references unknown columns is a
    /// data-integrity problem, not a recoverable condition.
    #[error("no column metadata for detail column '{0}'")]
    MissingColumnInfo(String),

    /// Raised when the tracing subscriber fails to initialise.
    #[error("failed to initialise logging: {0}")]
    Logging(String),
}

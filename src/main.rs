use std::path::PathBuf;

use clap::Parser;
use report_extractor::client::{SalesforceClient, Session};
use report_extractor::{ExtractError, Result, export, pipeline};
use tracing::info;
use tracing_subscriber::EnvFilter;

fn main() {
    let cli = Cli::parse();
    if let Err(error) = run(cli) {
        eprintln!("error: {error}");
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    init_tracing()?;

    let client = SalesforceClient::new(Session {
        instance_url: cli.instance_url,
        access_token: cli.access_token,
        api_version: cli.api_version,
    })?;

    let rows = pipeline::extract_report_rows(&client, &cli.where_clause)?;
    export::write_report_workbook(&cli.output, &rows)?;
    info!(row_count = rows.len(), output = %cli.output.display(), "report inventory written");
    Ok(())
}

fn init_tracing() -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .try_init()
        .map_err(|error| ExtractError::Logging(error.to_string()))
}

#[derive(Parser)]
#[command(
    author,
    version,
    about = "Export Salesforce report metadata to an Excel inventory workbook."
)]
struct Cli {
    /// Org instance URL, e.g. https://example.my.salesforce.com.
    #[arg(long, env = "SALESFORCE_INSTANCE_URL")]
    instance_url: String,

    /// Access token for an already-authenticated session.
    #[arg(long, env = "SALESFORCE_ACCESS_TOKEN", hide_env_values = true)]
    access_token: String,

    /// REST API version to call.
    #[arg(long, env = "SALESFORCE_API_VERSION", default_value = "59.0")]
    api_version: String,

    /// SOQL WHERE clause appended to the report list query.
    #[arg(long = "where", default_value = "")]
    where_clause: String,

    /// Path of the workbook to write.
    #[arg(long, default_value = "Report_Of_Reports.xlsx")]
    output: PathBuf,
}

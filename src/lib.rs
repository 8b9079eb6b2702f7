//! Core library for the report-extractor command line application.
//!
//! The library exposes the pieces of the extraction pipeline individually so
//! they can be exercised without a live Salesforce org: the HTTP client and
//! the [`client::ReportApi`] seam live in [`client`], typed records in
//! [`model`], the pure metadata extractors in [`extract`], the orchestration
//! in [`pipeline`], and the workbook writer in [`export`].

pub mod client;
pub mod error;
pub mod export;
pub mod extract;
pub mod model;
pub mod pipeline;

pub use error::{ExtractError, Result};

//! regex-report: how well do registry patterns fit the identifiers they describe?
//!
//! Every prefix in a bioinformatics registry may declare a regular expression
//! its identifiers are supposed to match. This crate checks every known
//! identifier of every such prefix against that pattern, then ranks the
//! prefixes by how many identifiers fail.
//!
//! # Pipeline
//!
//! 1. **Select** prefixes that have a pattern and are not excluded.
//! 2. **Validate** each prefix's identifiers with a strict full-string match.
//! 3. **Aggregate** the failures into a ranked table and a structured report.
//! 4. **Write** `_data/report_table.tsv`, `_data/report.yml` and one
//!    `results/<prefix>.tsv` per prefix that has failures.
//!
//! # Example
//!
//! ```no_run
//! use regex_report::{NullSink, RegexReport, ReportConfig};
//!
//! let report = RegexReport::from_config(ReportConfig::from_env()?)?;
//! let summary = report.run(None, &NullSink)?;
//!
//! for row in &summary.aggregate.rows {
//!     println!("{}: {} of {} invalid", row.prefix, row.invalid_count, row.total);
//! }
//! # Ok::<(), regex_report::ReportError>(())
//! ```

pub mod config;
pub mod error;
pub mod report;
pub mod selector;
pub mod source;
pub mod validation;

mod pipeline;

pub use crate::pipeline::{RegexReport, RunSummary};
pub use config::{RegistryLocation, ReportConfig, TableLayout};
pub use error::{ReportError, Result};
pub use report::{Aggregate, ReportEntry, ReportRow, ReportWriter};
pub use source::{
    DirectoryIdentifiers, IdentifierFetch, IdentifierSource, InMemoryIdentifiers,
    InMemoryRegistry, JsonRegistry, RegistrySource, Resource,
};
pub use validation::{
    AbsentReason, InvalidIdentifier, NullSink, PrefixOutcome, PrefixPattern, PrefixValidator,
    StatusColor, StatusKind, StatusLine, StatusSink, ValidationResult,
};

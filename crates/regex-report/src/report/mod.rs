//! Aggregating scored prefixes and writing the report.
//!
//! Two aggregate artifacts come out of a full run: a tab-separated table
//! ranking prefixes by how many identifiers fail their pattern, and a YAML
//! document with per-prefix detail and a sample of the failures. Each prefix
//! with failures also gets its own detail table.

mod aggregate;
mod writer;

pub use aggregate::{Aggregate, ReportEntry, ReportRow};
pub use writer::{
    DetailAction, ReportDocument, ReportMetadata, ReportWriter, DOCUMENT_FILE, TABLE_FILE,
};

//! CLI argument definitions using clap.

use clap::Parser;

/// Build the registry pattern consistency report
///
/// Sources and output locations come from the REGEX_REPORT_REGISTRY,
/// REGEX_REPORT_IDENTIFIERS, REGEX_REPORT_OUTPUT and REGEX_REPORT_TABLE
/// environment variables.
#[derive(Parser, Debug)]
#[command(name = "regex-report")]
#[command(version, about)]
pub struct Cli {
    /// Validate only this prefix and skip the aggregate report
    #[arg(long, value_name = "PREFIX")]
    pub single: Option<String>,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,
}

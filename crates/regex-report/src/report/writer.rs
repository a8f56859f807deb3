//! Writing report artifacts.
//!
//! ```text
//! <output>/
//! ├── _data/
//! │   ├── report_table.tsv     # ranked rows
//! │   └── report.yml           # metadata + ranked entries
//! └── results/
//!     └── <prefix>.tsv         # invalid identifiers, only while there are any
//! ```

use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use csv::WriterBuilder;
use serde::{Deserialize, Serialize};

use crate::config::{detail_path, is_plain_prefix, TableLayout};
use crate::error::{ReportError, Result};
use crate::validation::{InvalidIdentifier, PrefixOutcome};

use super::aggregate::{ReportEntry, ReportRow};

/// File name of the aggregate table.
pub const TABLE_FILE: &str = "report_table.tsv";
/// File name of the structured report.
pub const DOCUMENT_FILE: &str = "report.yml";

const FULL_COLUMNS: [&str; 4] = ["prefix", "invalid", "total", "percent_invalid"];
const LEGACY_COLUMNS: [&str; 3] = ["prefix", "invalid", "total"];
const DETAIL_COLUMNS: [&str; 3] = ["identifier", "name", "link"];

/// Provenance block of the structured report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportMetadata {
    /// When the report was generated (RFC 3339).
    pub date: String,
    pub identifiers_version: String,
    pub registry_version: String,
}

/// The structured report document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportDocument {
    pub metadata: ReportMetadata,
    pub data: Vec<ReportEntry>,
}

/// What happened to a prefix's detail file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DetailAction {
    Written(PathBuf),
    Removed(PathBuf),
    /// Nothing to write and nothing stale to remove.
    Unchanged,
}

/// Writes the report artifacts under one output root.
#[derive(Debug, Clone)]
pub struct ReportWriter {
    data_dir: PathBuf,
    results_dir: PathBuf,
    layout: TableLayout,
}

impl ReportWriter {
    pub fn new(data_dir: impl Into<PathBuf>, results_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
            results_dir: results_dir.into(),
            layout: TableLayout::default(),
        }
    }

    pub fn with_layout(mut self, layout: TableLayout) -> Self {
        self.layout = layout;
        self
    }

    pub fn table_path(&self) -> PathBuf {
        self.data_dir.join(TABLE_FILE)
    }

    pub fn document_path(&self) -> PathBuf {
        self.data_dir.join(DOCUMENT_FILE)
    }

    pub fn detail_path(&self, prefix: &str) -> PathBuf {
        detail_path(&self.results_dir, prefix)
    }

    /// Bring `results/<prefix>.tsv` in line with a prefix's outcome.
    ///
    /// Written when the prefix has invalid identifiers, removed otherwise.
    /// Removal of a file that does not exist is a no-op. Prefixes that are
    /// not plain file names are left alone.
    pub fn sync_detail(&self, prefix: &str, outcome: &PrefixOutcome) -> Result<DetailAction> {
        match outcome.as_scored() {
            Some(result) if !result.is_consistent() => self.write_detail(prefix, &result.invalid),
            _ => self.remove_detail(prefix),
        }
    }

    /// Write the invalid identifiers of one prefix.
    pub fn write_detail(&self, prefix: &str, invalid: &[InvalidIdentifier]) -> Result<DetailAction> {
        if !is_plain_prefix(prefix) {
            tracing::warn!(prefix, "prefix is not a file name, detail file not written");
            return Ok(DetailAction::Unchanged);
        }
        let path = self.detail_path(prefix);
        ensure_dir(&self.results_dir)?;

        let mut writer = tsv_writer(&path)?;
        writer.write_record(DETAIL_COLUMNS)?;
        for entry in invalid {
            writer.serialize(entry)?;
        }
        writer.flush().map_err(|e| ReportError::io(&path, e))?;

        tracing::debug!(prefix, path = %path.display(), rows = invalid.len(), "wrote detail file");
        Ok(DetailAction::Written(path))
    }

    /// Remove a prefix's detail file if present.
    pub fn remove_detail(&self, prefix: &str) -> Result<DetailAction> {
        if !is_plain_prefix(prefix) {
            tracing::warn!(prefix, "prefix is not a file name, detail file not removed");
            return Ok(DetailAction::Unchanged);
        }
        let path = self.detail_path(prefix);
        match fs::remove_file(&path) {
            Ok(()) => {
                tracing::info!(prefix, path = %path.display(), "removed stale detail file");
                Ok(DetailAction::Removed(path))
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(DetailAction::Unchanged),
            Err(e) => Err(ReportError::io(path, e)),
        }
    }

    /// Write the ranked table. The header is written even with no rows.
    pub fn write_table(&self, rows: &[ReportRow]) -> Result<PathBuf> {
        let path = self.table_path();
        ensure_dir(&self.data_dir)?;

        let mut writer = tsv_writer(&path)?;
        match self.layout {
            TableLayout::Full => {
                writer.write_record(FULL_COLUMNS)?;
                for row in rows {
                    writer.serialize(row)?;
                }
            }
            TableLayout::Legacy => {
                writer.write_record(LEGACY_COLUMNS)?;
                for row in rows {
                    writer.serialize((&row.prefix, row.invalid_count, row.total))?;
                }
            }
        }
        writer.flush().map_err(|e| ReportError::io(&path, e))?;

        tracing::info!(path = %path.display(), rows = rows.len(), "wrote report table");
        Ok(path)
    }

    /// Write the structured report.
    pub fn write_document(&self, document: &ReportDocument) -> Result<PathBuf> {
        let path = self.document_path();
        ensure_dir(&self.data_dir)?;

        let file = File::create(&path).map_err(|e| ReportError::io(&path, e))?;
        let mut writer = BufWriter::new(file);
        serde_yaml::to_writer(&mut writer, document)?;
        writer.flush().map_err(|e| ReportError::io(&path, e))?;

        tracing::info!(path = %path.display(), entries = document.data.len(), "wrote report document");
        Ok(path)
    }
}

fn ensure_dir(dir: &Path) -> Result<()> {
    fs::create_dir_all(dir).map_err(|e| ReportError::io(dir, e))
}

fn tsv_writer(path: &Path) -> Result<csv::Writer<File>> {
    let file = File::create(path).map_err(|e| ReportError::io(path, e))?;
    Ok(WriterBuilder::new()
        .delimiter(b'\t')
        .has_headers(false)
        .from_writer(file))
}

//! The report pipeline: select, validate, aggregate, write.

use std::path::PathBuf;

use chrono::Utc;

use crate::config::ReportConfig;
use crate::error::Result;
use crate::report::{Aggregate, DetailAction, ReportDocument, ReportMetadata, ReportWriter};
use crate::selector::select_prefixes;
use crate::source::{DirectoryIdentifiers, IdentifierSource, JsonRegistry, RegistrySource};
use crate::validation::{AbsentReason, PrefixOutcome, PrefixValidator, StatusSink, ValidationResult};

/// What a run did.
#[derive(Debug, Clone, Default)]
pub struct RunSummary {
    /// Number of prefixes validated.
    pub processed: usize,
    /// Prefixes with at least one invalid identifier, in processing order.
    pub scored: Vec<(String, ValidationResult)>,
    /// Number of prefixes scored with no invalid identifier.
    pub consistent: usize,
    /// Prefixes that could not be scored, and why.
    pub absent: Vec<(String, AbsentReason)>,
    /// Detail-file changes per prefix.
    pub details: Vec<(String, DetailAction)>,
    /// Ranked output; empty in single-prefix mode.
    pub aggregate: Aggregate,
    /// Aggregate table, when written.
    pub table: Option<PathBuf>,
    /// Structured report, when written.
    pub document: Option<PathBuf>,
}

/// The registry pattern consistency report.
pub struct RegexReport {
    config: ReportConfig,
    registry: Box<dyn RegistrySource>,
    identifiers: Box<dyn IdentifierSource>,
}

impl RegexReport {
    /// Create a report over explicit sources.
    pub fn new(
        config: ReportConfig,
        registry: impl RegistrySource + 'static,
        identifiers: impl IdentifierSource + 'static,
    ) -> Self {
        Self {
            config,
            registry: Box::new(registry),
            identifiers: Box::new(identifiers),
        }
    }

    /// Load the registry and identifier tables named by `config`.
    pub fn from_config(config: ReportConfig) -> Result<Self> {
        let registry = JsonRegistry::load(&config.registry)?;
        let identifiers = DirectoryIdentifiers::new(config.identifiers_dir.clone());
        Ok(Self::new(config, registry, identifiers))
    }

    pub fn config(&self) -> &ReportConfig {
        &self.config
    }

    pub fn registry(&self) -> &dyn RegistrySource {
        self.registry.as_ref()
    }

    /// Prefixes a run would process.
    pub fn select(&self, single: Option<&str>) -> Vec<String> {
        select_prefixes(
            self.registry.resources(),
            &self.config.skip,
            &self.config.skip_prefixes,
            single,
        )
    }

    fn writer(&self) -> ReportWriter {
        ReportWriter::new(self.config.data_dir(), self.config.results_dir())
            .with_layout(self.config.table_layout)
    }

    /// Run the report.
    ///
    /// With `single`, only that prefix is validated and only its detail file
    /// is touched; the aggregate table and document are left alone.
    /// Failures to write an artifact abort the run.
    pub fn run(&self, single: Option<&str>, sink: &dyn StatusSink) -> Result<RunSummary> {
        let prefixes = self.select(single);
        tracing::info!(prefixes = prefixes.len(), single = ?single, "starting report");

        sink.start(prefixes.len());
        let result = self.process(&prefixes, sink);
        sink.finish();
        let mut summary = result?;

        if single.is_some() {
            return Ok(summary);
        }

        let writer = self.writer();
        let aggregate = Aggregate::build(
            &summary.scored,
            self.registry.as_ref(),
            self.config.sample_size,
        );

        summary.table = Some(writer.write_table(&aggregate.rows)?);
        let document = ReportDocument {
            metadata: ReportMetadata {
                date: Utc::now().to_rfc3339(),
                identifiers_version: self.identifiers.source_version(),
                registry_version: self.registry.source_version(),
            },
            data: aggregate.entries.clone(),
        };
        summary.document = Some(writer.write_document(&document)?);
        summary.aggregate = aggregate;

        Ok(summary)
    }

    fn process(&self, prefixes: &[String], sink: &dyn StatusSink) -> Result<RunSummary> {
        let validator = PrefixValidator::new(self.registry.as_ref(), self.identifiers.as_ref());
        let writer = self.writer();
        let mut summary = RunSummary::default();

        for prefix in prefixes {
            sink.advance(prefix);
            let outcome = validator.validate(prefix, sink);
            let action = writer.sync_detail(prefix, &outcome)?;
            summary.details.push((prefix.clone(), action));
            summary.processed += 1;

            match outcome {
                PrefixOutcome::Scored(result) if result.is_consistent() => summary.consistent += 1,
                PrefixOutcome::Scored(result) => summary.scored.push((prefix.clone(), result)),
                PrefixOutcome::Absent(reason) => summary.absent.push((prefix.clone(), reason)),
            }
        }

        Ok(summary)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::{InMemoryIdentifiers, InMemoryRegistry, Resource};
    use crate::validation::NullSink;
    use tempfile::TempDir;

    fn report(dir: &TempDir) -> RegexReport {
        let registry = InMemoryRegistry::new()
            .with_resource("chebi", Resource::new().with_pattern("^\\d+$"))
            .with_resource("go", Resource::new().with_pattern("^GO:\\d{7}$"))
            .with_resource("kegg.pathway", Resource::new().with_pattern("^\\w+$"));
        let identifiers = InMemoryIdentifiers::new()
            .with_identifiers("chebi", ["123", "abc", "456"])
            .with_identifiers("go", ["GO:0008150"])
            .with_identifiers("kegg.pathway", ["!!"]);
        let config = ReportConfig::default().with_output_dir(dir.path());
        RegexReport::new(config, registry, identifiers)
    }

    #[test]
    fn test_run_counts() {
        let dir = TempDir::new().unwrap();
        let summary = report(&dir).run(None, &NullSink).unwrap();

        assert_eq!(summary.processed, 2);
        assert_eq!(summary.consistent, 1);
        assert_eq!(summary.scored.len(), 1);
        assert_eq!(summary.aggregate.rows.len(), 1);
        assert!(summary.table.is_some_and(|p| p.exists()));
        assert!(summary.document.is_some_and(|p| p.exists()));
    }

    #[test]
    fn test_single_skips_aggregate() {
        let dir = TempDir::new().unwrap();
        let summary = report(&dir).run(Some("kegg.pathway"), &NullSink).unwrap();

        assert_eq!(summary.processed, 1);
        assert!(summary.table.is_none());
        assert!(summary.document.is_none());
        assert!(dir.path().join("results/kegg.pathway.tsv").exists());
        assert!(!dir.path().join("_data").exists());
    }
}

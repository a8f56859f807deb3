//! Ranking scored prefixes.

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use crate::source::RegistrySource;
use crate::validation::{InvalidIdentifier, ValidationResult};

/// One line of the aggregate table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportRow {
    pub prefix: String,
    #[serde(rename = "invalid")]
    pub invalid_count: usize,
    pub total: usize,
    /// `invalid_count / total`, in `[0, 1]`.
    pub percent_invalid: Option<f64>,
}

/// One prefix in the structured report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportEntry {
    pub prefix: String,
    pub name: Option<String>,
    pub version: Option<String>,
    pub pattern: Option<String>,
    #[serde(rename = "invalid")]
    pub invalid_count: usize,
    /// Percentage in `[0, 100]`, rounded to two decimals.
    pub invalid_percent: Option<f64>,
    pub total: usize,
    pub invalid_sample: Vec<InvalidIdentifier>,
}

/// Ranked table rows and structured entries for one run.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Aggregate {
    /// Most invalid identifiers first, ties by prefix.
    pub rows: Vec<ReportRow>,
    /// Highest invalid percentage first, ties by fewer invalid identifiers.
    pub entries: Vec<ReportEntry>,
}

fn ratio(invalid: usize, total: usize) -> Option<f64> {
    (total > 0).then(|| invalid as f64 / total as f64)
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

impl Aggregate {
    /// Rank the scored prefixes.
    ///
    /// Prefixes without any invalid identifier are left out. `sample_size`
    /// caps how many invalid identifiers each entry lists; since results are
    /// sorted by identifier the sample holds the smallest ones.
    pub fn build(
        scored: &[(String, ValidationResult)],
        registry: &dyn RegistrySource,
        sample_size: usize,
    ) -> Self {
        let mut ranked: Vec<&(String, ValidationResult)> = scored
            .iter()
            .filter(|(_, result)| !result.is_consistent())
            .collect();
        ranked.sort_by(|(a_prefix, a), (b_prefix, b)| {
            b.invalid_count()
                .cmp(&a.invalid_count())
                .then_with(|| a_prefix.cmp(b_prefix))
        });

        let rows = ranked
            .iter()
            .map(|(prefix, result)| ReportRow {
                prefix: prefix.clone(),
                invalid_count: result.invalid_count(),
                total: result.total,
                percent_invalid: ratio(result.invalid_count(), result.total),
            })
            .collect();

        let mut entries: Vec<ReportEntry> = ranked
            .iter()
            .map(|(prefix, result)| ReportEntry {
                prefix: prefix.clone(),
                name: registry.name(prefix).map(str::to_string),
                version: registry.version(prefix).map(str::to_string),
                pattern: registry.pattern(prefix).map(str::to_string),
                invalid_count: result.invalid_count(),
                invalid_percent: ratio(result.invalid_count(), result.total)
                    .map(|r| round2(100.0 * r)),
                total: result.total,
                invalid_sample: result.invalid.iter().take(sample_size).cloned().collect(),
            })
            .collect();
        entries.sort_by(compare_entries);

        Self { rows, entries }
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

fn compare_entries(a: &ReportEntry, b: &ReportEntry) -> Ordering {
    let a_percent = a.invalid_percent.unwrap_or(f64::NEG_INFINITY);
    let b_percent = b.invalid_percent.unwrap_or(f64::NEG_INFINITY);
    b_percent
        .total_cmp(&a_percent)
        .then_with(|| a.invalid_count.cmp(&b.invalid_count))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::{InMemoryRegistry, Resource};

    fn result(invalid: usize, total: usize) -> ValidationResult {
        let invalid = (0..invalid)
            .map(|i| InvalidIdentifier::new(format!("bad{:03}", i)))
            .collect();
        ValidationResult::new(invalid, total)
    }

    fn scored(items: &[(&str, usize, usize)]) -> Vec<(String, ValidationResult)> {
        items
            .iter()
            .map(|(prefix, invalid, total)| (prefix.to_string(), result(*invalid, *total)))
            .collect()
    }

    #[test]
    fn test_rows_sorted_by_count_then_prefix() {
        let scored = scored(&[
            ("zfin", 2, 10),
            ("abc", 5, 100),
            ("mgi", 2, 4),
            ("clean", 0, 10),
            ("bto", 2, 50),
        ]);
        let aggregate = Aggregate::build(&scored, &InMemoryRegistry::new(), 25);

        let order: Vec<&str> = aggregate.rows.iter().map(|r| r.prefix.as_str()).collect();
        assert_eq!(order, vec!["abc", "bto", "mgi", "zfin"]);
        assert_eq!(aggregate.rows[0].percent_invalid, Some(0.05));
    }

    #[test]
    fn test_entries_sorted_by_percent_then_count() {
        let scored = scored(&[
            ("a", 1, 2),  // 50%
            ("b", 10, 20), // 50%
            ("c", 3, 3),  // 100%
            ("d", 1, 10), // 10%
        ]);
        let aggregate = Aggregate::build(&scored, &InMemoryRegistry::new(), 25);

        let order: Vec<&str> = aggregate.entries.iter().map(|e| e.prefix.as_str()).collect();
        assert_eq!(order, vec!["c", "a", "b", "d"]);
        assert_eq!(aggregate.entries[0].invalid_percent, Some(100.0));
    }

    #[test]
    fn test_percent_rounded_to_two_decimals() {
        let scored = scored(&[("chebi", 1, 3)]);
        let aggregate = Aggregate::build(&scored, &InMemoryRegistry::new(), 25);
        assert_eq!(aggregate.entries[0].invalid_percent, Some(33.33));
    }

    #[test]
    fn test_sample_capped() {
        let scored = scored(&[("big", 40, 50)]);
        let aggregate = Aggregate::build(&scored, &InMemoryRegistry::new(), 25);

        let sample = &aggregate.entries[0].invalid_sample;
        assert_eq!(sample.len(), 25);
        assert_eq!(sample[0].identifier, "bad000");
        assert_eq!(sample[24].identifier, "bad024");
        assert_eq!(aggregate.entries[0].invalid_count, 40);
    }

    #[test]
    fn test_entry_metadata_from_registry() {
        let registry = InMemoryRegistry::new().with_resource(
            "chebi",
            Resource::new()
                .with_name("ChEBI")
                .with_version("231")
                .with_pattern("^\\d+$"),
        );
        let aggregate = Aggregate::build(&scored(&[("chebi", 1, 3)]), &registry, 25);

        let entry = &aggregate.entries[0];
        assert_eq!(entry.name.as_deref(), Some("ChEBI"));
        assert_eq!(entry.version.as_deref(), Some("231"));
        assert_eq!(entry.pattern.as_deref(), Some("^\\d+$"));
    }

    #[test]
    fn test_zero_total_guarded() {
        assert_eq!(ratio(0, 0), None);
        assert_eq!(ratio(1, 4), Some(0.25));
        let aggregate = Aggregate::build(&[], &InMemoryRegistry::new(), 25);
        assert!(aggregate.is_empty());
    }
}

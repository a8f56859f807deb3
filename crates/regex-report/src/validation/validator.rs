//! The per-prefix validator.

use crate::source::{IdentifierFetch, IdentifierSource, RegistrySource};

use super::outcome::{AbsentReason, InvalidIdentifier, PrefixOutcome, ValidationResult};
use super::pattern::PrefixPattern;
use super::status::{StatusKind, StatusLine, StatusSink};

/// Identifiers that do not fully match `pattern`, in input order.
pub fn find_invalid<'i>(pattern: &PrefixPattern, identifiers: &'i [String]) -> Vec<&'i str> {
    identifiers
        .iter()
        .map(String::as_str)
        .filter(|identifier| !pattern.is_full_match(identifier))
        .collect()
}

/// Scores prefixes against their registry patterns.
pub struct PrefixValidator<'a> {
    registry: &'a dyn RegistrySource,
    identifiers: &'a dyn IdentifierSource,
}

impl<'a> PrefixValidator<'a> {
    pub fn new(registry: &'a dyn RegistrySource, identifiers: &'a dyn IdentifierSource) -> Self {
        Self {
            registry,
            identifiers,
        }
    }

    /// Validate every identifier of one prefix.
    ///
    /// Lookup failures are confined to this prefix: they come back as
    /// [`PrefixOutcome::Absent`] and never as errors. A status line is sent
    /// to `sink` for every prefix whose identifiers could be read.
    pub fn validate(&self, prefix: &str, sink: &dyn StatusSink) -> PrefixOutcome {
        let Some(raw_pattern) = self.registry.pattern(prefix) else {
            tracing::debug!(prefix, "no pattern registered");
            return PrefixOutcome::Absent(AbsentReason::NoPattern);
        };

        let pattern = match PrefixPattern::new(raw_pattern) {
            Ok(pattern) => pattern,
            Err(e) => {
                tracing::warn!(prefix, pattern = raw_pattern, error = %e, "pattern does not compile");
                return PrefixOutcome::Absent(AbsentReason::InvalidPattern(e.to_string()));
            }
        };

        let identifiers = match self.identifiers.identifiers(prefix) {
            IdentifierFetch::Found(identifiers) => identifiers,
            IdentifierFetch::NotFound => {
                tracing::warn!(prefix, "identifier source has no namespace");
                return PrefixOutcome::Absent(AbsentReason::NotFound);
            }
            IdentifierFetch::Unavailable(reason) => {
                tracing::warn!(prefix, %reason, "identifiers unavailable");
                return PrefixOutcome::Absent(AbsentReason::Unavailable(reason));
            }
        };

        if identifiers.is_empty() {
            sink.emit(StatusLine::new(prefix, StatusKind::NoIdentifiers));
            return PrefixOutcome::Absent(AbsentReason::NoIdentifiers);
        }

        let invalid = find_invalid(&pattern, &identifiers)
            .into_iter()
            .map(|identifier| InvalidIdentifier {
                identifier: identifier.to_string(),
                name: self.identifiers.name(prefix, identifier),
                link: self.registry.iri(prefix, identifier),
            })
            .collect();

        let result = ValidationResult::new(invalid, identifiers.len());
        tracing::debug!(
            prefix,
            invalid = result.invalid_count(),
            total = result.total,
            "validated"
        );

        sink.emit(StatusLine::new(prefix, result.status(pattern.as_str())));
        PrefixOutcome::Scored(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::{InMemoryIdentifiers, InMemoryRegistry, Resource};
    use std::cell::RefCell;

    #[derive(Default)]
    struct RecordingSink {
        lines: RefCell<Vec<StatusLine>>,
    }

    impl StatusSink for RecordingSink {
        fn emit(&self, line: StatusLine) {
            self.lines.borrow_mut().push(line);
        }
    }

    fn registry() -> InMemoryRegistry {
        InMemoryRegistry::new()
            .with_resource(
                "chebi",
                Resource::new()
                    .with_pattern("^\\d+$")
                    .with_uri_format("https://example.org/chebi/$1"),
            )
            .with_resource("empty", Resource::new().with_pattern("^\\d+$"))
            .with_resource("broken", Resource::new().with_pattern("^\\d+$"))
            .with_resource("lookahead", Resource::new().with_pattern("^(?!0)\\d+$"))
            .with_resource("freeform", Resource::new())
    }

    fn identifiers() -> InMemoryIdentifiers {
        InMemoryIdentifiers::new()
            .with_named(
                "chebi",
                [("123", None), ("abc", Some("alphabet")), ("456", None)],
            )
            .with_identifiers("empty", Vec::<String>::new())
            .with_unavailable("broken", "parse failure")
            .with_identifiers("lookahead", ["1", "0123", "x"])
            .with_identifiers("freeform", ["anything"])
    }

    #[test]
    fn test_chebi_example() {
        let (registry, identifiers) = (registry(), identifiers());
        let validator = PrefixValidator::new(&registry, &identifiers);
        let sink = RecordingSink::default();

        let outcome = validator.validate("chebi", &sink);
        let result = outcome.as_scored().expect("chebi should be scored");

        assert_eq!(result.total, 3);
        assert_eq!(
            result.invalid,
            vec![InvalidIdentifier {
                identifier: "abc".to_string(),
                name: Some("alphabet".to_string()),
                link: Some("https://example.org/chebi/abc".to_string()),
            }]
        );
        let fraction = result.fraction_invalid().unwrap();
        assert!((fraction - 1.0 / 3.0).abs() < 1e-9);

        let lines = sink.lines.borrow();
        assert_eq!(lines.len(), 1);
        assert_eq!(
            lines[0].kind,
            StatusKind::PartiallyInvalid { invalid: 1, total: 3 }
        );
    }

    #[test]
    fn test_empty_namespace_is_absent_with_status() {
        let (registry, identifiers) = (registry(), identifiers());
        let validator = PrefixValidator::new(&registry, &identifiers);
        let sink = RecordingSink::default();

        assert_eq!(
            validator.validate("empty", &sink),
            PrefixOutcome::Absent(AbsentReason::NoIdentifiers)
        );
        assert_eq!(
            *sink.lines.borrow(),
            vec![StatusLine::new("empty", StatusKind::NoIdentifiers)]
        );
    }

    #[test]
    fn test_lookup_failures_are_absent() {
        let (registry, identifiers) = (registry(), identifiers());
        let validator = PrefixValidator::new(&registry, &identifiers);
        let sink = RecordingSink::default();

        assert_eq!(
            validator.validate("broken", &sink),
            PrefixOutcome::Absent(AbsentReason::Unavailable("parse failure".to_string()))
        );
        assert_eq!(
            validator.validate("unknown", &sink),
            PrefixOutcome::Absent(AbsentReason::NoPattern)
        );
        assert_eq!(
            validator.validate("freeform", &sink),
            PrefixOutcome::Absent(AbsentReason::NoPattern)
        );
        assert!(sink.lines.borrow().is_empty());
    }

    #[test]
    fn test_lookahead_pattern_is_scored() {
        let (registry, identifiers) = (registry(), identifiers());
        let validator = PrefixValidator::new(&registry, &identifiers);
        let sink = RecordingSink::default();

        let outcome = validator.validate("lookahead", &sink);
        let result = outcome.as_scored().expect("lookahead should be scored");
        let invalid: Vec<_> = result.invalid.iter().map(|i| i.identifier.as_str()).collect();
        assert_eq!(invalid, vec!["0123", "x"]);
        assert_eq!(result.total, 3);
        assert_eq!(
            sink.lines.borrow()[0].kind,
            StatusKind::PartiallyInvalid { invalid: 2, total: 3 }
        );
    }

    #[test]
    fn test_malformed_pattern_is_absent() {
        let registry = InMemoryRegistry::new()
            .with_resource("broken", Resource::new().with_pattern("^(\\d+$"));
        let identifiers = InMemoryIdentifiers::new().with_identifiers("broken", ["1"]);
        let validator = PrefixValidator::new(&registry, &identifiers);

        assert!(matches!(
            validator.validate("broken", &crate::validation::NullSink),
            PrefixOutcome::Absent(AbsentReason::InvalidPattern(_))
        ));
    }

    #[test]
    fn test_not_found_in_identifier_source() {
        let registry = InMemoryRegistry::new()
            .with_resource("go", Resource::new().with_pattern("^GO:\\d{7}$"));
        let identifiers = InMemoryIdentifiers::new();
        let validator = PrefixValidator::new(&registry, &identifiers);

        assert_eq!(
            validator.validate("go", &crate::validation::NullSink),
            PrefixOutcome::Absent(AbsentReason::NotFound)
        );
    }

    #[test]
    fn test_consistent_and_fully_inconsistent() {
        let registry = InMemoryRegistry::new()
            .with_resource("good", Resource::new().with_pattern("^\\d+$"))
            .with_resource("bad", Resource::new().with_pattern("^\\d+$"));
        let identifiers = InMemoryIdentifiers::new()
            .with_identifiers("good", ["1", "2"])
            .with_identifiers("bad", ["x", "y"]);
        let validator = PrefixValidator::new(&registry, &identifiers);
        let sink = RecordingSink::default();

        let good = validator.validate("good", &sink);
        assert!(!good.has_invalid());
        assert_eq!(good.as_scored().map(|r| r.total), Some(2));

        let bad = validator.validate("bad", &sink);
        let bad = bad.as_scored().unwrap();
        assert!(bad.is_fully_inconsistent());
        assert_eq!(bad.invalid[0].name, None);
        assert_eq!(bad.invalid[0].link, None);

        let colors: Vec<_> = sink.lines.borrow().iter().map(StatusLine::color).collect();
        assert_eq!(
            colors,
            vec![
                crate::validation::StatusColor::Green,
                crate::validation::StatusColor::Red
            ]
        );
    }

    #[test]
    fn test_find_invalid_preserves_order() {
        let pattern = PrefixPattern::new("^[a-z]+$").unwrap();
        let ids: Vec<String> = ["b1", "ok", "A", "fine"].iter().map(|s| s.to_string()).collect();
        assert_eq!(find_invalid(&pattern, &ids), vec!["b1", "A"]);
    }
}

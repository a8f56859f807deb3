//! Per-prefix results.

use serde::{Deserialize, Serialize};

use super::status::StatusKind;

/// An identifier that failed its namespace's pattern.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InvalidIdentifier {
    pub identifier: String,
    pub name: Option<String>,
    pub link: Option<String>,
}

impl InvalidIdentifier {
    pub fn new(identifier: impl Into<String>) -> Self {
        Self {
            identifier: identifier.into(),
            name: None,
            link: None,
        }
    }
}

/// Invalid identifiers of a scored prefix and how many were examined.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidationResult {
    /// Mismatches, sorted by identifier, then name, then link.
    pub invalid: Vec<InvalidIdentifier>,
    /// Number of identifiers examined.
    pub total: usize,
}

impl ValidationResult {
    /// Build a result, sorting the mismatches by their full triple.
    pub fn new(mut invalid: Vec<InvalidIdentifier>, total: usize) -> Self {
        invalid.sort_by(|a, b| {
            (&a.identifier, &a.name, &a.link).cmp(&(&b.identifier, &b.name, &b.link))
        });
        debug_assert!(invalid.len() <= total);
        Self { invalid, total }
    }

    pub fn invalid_count(&self) -> usize {
        self.invalid.len()
    }

    /// `invalid / total`, or `None` when nothing was examined.
    pub fn fraction_invalid(&self) -> Option<f64> {
        if self.total == 0 {
            None
        } else {
            Some(self.invalid.len() as f64 / self.total as f64)
        }
    }

    pub fn is_consistent(&self) -> bool {
        self.invalid.is_empty()
    }

    pub fn is_fully_inconsistent(&self) -> bool {
        self.total > 0 && self.invalid.len() == self.total
    }

    /// Status line classification for this result.
    pub fn status(&self, pattern: &str) -> StatusKind {
        if self.is_consistent() {
            StatusKind::Consistent {
                pattern: pattern.to_string(),
            }
        } else if self.is_fully_inconsistent() {
            StatusKind::FullyInconsistent {
                pattern: pattern.to_string(),
            }
        } else {
            StatusKind::PartiallyInvalid {
                invalid: self.invalid.len(),
                total: self.total,
            }
        }
    }
}

/// Why a prefix produced no result.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AbsentReason {
    /// The registry has no pattern for the prefix.
    NoPattern,
    /// The pattern exists but cannot be compiled.
    InvalidPattern(String),
    /// The identifier source does not know the prefix.
    NotFound,
    /// The identifier source failed for the prefix.
    Unavailable(String),
    /// The namespace has no identifiers.
    NoIdentifiers,
}

impl std::fmt::Display for AbsentReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AbsentReason::NoPattern => write!(f, "no pattern"),
            AbsentReason::InvalidPattern(e) => write!(f, "invalid pattern: {}", e),
            AbsentReason::NotFound => write!(f, "identifiers not found"),
            AbsentReason::Unavailable(e) => write!(f, "identifiers unavailable: {}", e),
            AbsentReason::NoIdentifiers => write!(f, "no identifiers"),
        }
    }
}

/// What validating one prefix produced.
#[derive(Debug, Clone, PartialEq)]
pub enum PrefixOutcome {
    Scored(ValidationResult),
    Absent(AbsentReason),
}

impl PrefixOutcome {
    pub fn as_scored(&self) -> Option<&ValidationResult> {
        match self {
            PrefixOutcome::Scored(result) => Some(result),
            PrefixOutcome::Absent(_) => None,
        }
    }

    pub fn into_scored(self) -> Option<ValidationResult> {
        match self {
            PrefixOutcome::Scored(result) => Some(result),
            PrefixOutcome::Absent(_) => None,
        }
    }

    /// True when the prefix was scored and has at least one mismatch.
    pub fn has_invalid(&self) -> bool {
        self.as_scored().is_some_and(|result| !result.is_consistent())
    }
}

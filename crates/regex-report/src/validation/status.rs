//! Status lines and where they go.

/// Color a status line is shown in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusColor {
    Green,
    Yellow,
    Red,
}

/// How consistent a prefix turned out to be.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StatusKind {
    /// Every identifier matched.
    Consistent { pattern: String },
    /// No identifier matched.
    FullyInconsistent { pattern: String },
    /// Some identifiers did not match.
    PartiallyInvalid { invalid: usize, total: usize },
    /// The namespace was empty.
    NoIdentifiers,
}

impl StatusKind {
    pub fn color(&self) -> StatusColor {
        match self {
            StatusKind::Consistent { .. } => StatusColor::Green,
            StatusKind::FullyInconsistent { .. } => StatusColor::Red,
            StatusKind::PartiallyInvalid { .. } | StatusKind::NoIdentifiers => StatusColor::Yellow,
        }
    }
}

/// One human-readable line about one prefix.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusLine {
    pub prefix: String,
    pub kind: StatusKind,
}

impl StatusLine {
    pub fn new(prefix: impl Into<String>, kind: StatusKind) -> Self {
        Self {
            prefix: prefix.into(),
            kind,
        }
    }

    pub fn color(&self) -> StatusColor {
        self.kind.color()
    }
}

impl std::fmt::Display for StatusLine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.kind {
            StatusKind::Consistent { pattern } => {
                write!(f, "{} consistent pattern {}", self.prefix, pattern)
            }
            StatusKind::FullyInconsistent { pattern } => {
                write!(f, "{} fully inconsistent pattern {}", self.prefix, pattern)
            }
            StatusKind::PartiallyInvalid { invalid, total } => write!(
                f,
                "{} had {} ({:.2}%) invalid",
                self.prefix,
                invalid,
                100.0 * *invalid as f64 / *total as f64
            ),
            StatusKind::NoIdentifiers => write!(f, "{} no identifiers", self.prefix),
        }
    }
}

/// Receiver for status lines and run progress.
///
/// This is the only way the pipeline talks to a console. Implementations
/// that draw a progress indicator must write status lines through the same
/// serialized section so the two never interleave.
pub trait StatusSink {
    /// Report one prefix's status.
    fn emit(&self, line: StatusLine);

    /// A run over `total` prefixes is starting.
    fn start(&self, _total: usize) {}

    /// Work on `prefix` is starting.
    fn advance(&self, _prefix: &str) {}

    /// The run is over.
    fn finish(&self) {}
}

/// Sink that discards everything.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullSink;

impl StatusSink for NullSink {
    fn emit(&self, _line: StatusLine) {}
}

//! Scoring one prefix against its pattern.
//!
//! Every identifier in the namespace is tested for a full-string match. The
//! mismatches are collected with their names and links, and the prefix gets
//! one status line describing how consistent it was.

mod outcome;
mod pattern;
mod status;
mod validator;

pub use outcome::{AbsentReason, InvalidIdentifier, PrefixOutcome, ValidationResult};
pub use pattern::PrefixPattern;
pub use status::{NullSink, StatusColor, StatusKind, StatusLine, StatusSink};
pub use validator::{find_invalid, PrefixValidator};

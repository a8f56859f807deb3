//! Anchored identifier patterns.
//!
//! Registry patterns are written for backtracking engines. Most compile with
//! `regex`; those using look-around or backreferences fall back to
//! `fancy-regex`.

use regex::Regex;

use crate::error::Result;

#[derive(Debug, Clone)]
enum Matcher {
    Plain(Regex),
    Backtracking(fancy_regex::Regex),
}

/// A registry pattern compiled for full-string matching.
#[derive(Debug, Clone)]
pub struct PrefixPattern {
    source: String,
    matcher: Matcher,
}

impl PrefixPattern {
    /// Compile a pattern.
    ///
    /// The pattern is wrapped as `^(?:...)$` so a match must cover the whole
    /// identifier even when the registry pattern is unanchored.
    pub fn new(pattern: &str) -> Result<Self> {
        let anchored = format!("^(?:{})$", pattern);
        let matcher = match Regex::new(&anchored) {
            Ok(regex) => Matcher::Plain(regex),
            Err(regex::Error::Syntax(syntax)) => match fancy_regex::Regex::new(&anchored) {
                Ok(regex) => {
                    tracing::debug!(pattern, "compiled with backtracking engine");
                    Matcher::Backtracking(regex)
                }
                Err(_) => return Err(regex::Error::Syntax(syntax).into()),
            },
            Err(e) => return Err(e.into()),
        };
        Ok(Self {
            source: pattern.to_string(),
            matcher,
        })
    }

    /// Whether the identifier matches in full.
    ///
    /// A backtracking match that gives up counts as a mismatch.
    pub fn is_full_match(&self, identifier: &str) -> bool {
        match &self.matcher {
            Matcher::Plain(regex) => regex.is_match(identifier),
            Matcher::Backtracking(regex) => regex.is_match(identifier).unwrap_or_else(|e| {
                tracing::warn!(pattern = %self.source, identifier, error = %e, "match aborted");
                false
            }),
        }
    }

    /// Whether the pattern needed the backtracking engine.
    pub fn is_backtracking(&self) -> bool {
        matches!(self.matcher, Matcher::Backtracking(_))
    }

    /// The pattern as written in the registry.
    pub fn as_str(&self) -> &str {
        &self.source
    }
}

impl std::fmt::Display for PrefixPattern {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.source)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_full_match_only() {
        let pattern = PrefixPattern::new("\\d+").unwrap();
        assert!(pattern.is_full_match("123"));
        assert!(!pattern.is_full_match("123abc"));
        assert!(!pattern.is_full_match("abc123"));
        assert!(!pattern.is_full_match(""));
        assert!(!pattern.is_backtracking());
    }

    #[test]
    fn test_anchored_pattern() {
        let pattern = PrefixPattern::new("^\\d+$").unwrap();
        assert!(pattern.is_full_match("456"));
        assert!(!pattern.is_full_match("abc"));
        assert_eq!(pattern.as_str(), "^\\d+$");
    }

    #[test]
    fn test_alternation_is_grouped() {
        // Without grouping, `^a|b$` would accept "ax" via the first branch.
        let pattern = PrefixPattern::new("a|b").unwrap();
        assert!(pattern.is_full_match("a"));
        assert!(pattern.is_full_match("b"));
        assert!(!pattern.is_full_match("ax"));
        assert!(!pattern.is_full_match("xb"));
    }

    #[test]
    fn test_trailing_newline_rejected() {
        let pattern = PrefixPattern::new("^\\d+$").unwrap();
        assert!(!pattern.is_full_match("123\n"));
    }

    #[test]
    fn test_lookahead_uses_backtracking() {
        let pattern = PrefixPattern::new("^(?!0)\\d+$").unwrap();
        assert!(pattern.is_backtracking());
        assert!(pattern.is_full_match("1"));
        assert!(pattern.is_full_match("120"));
        assert!(!pattern.is_full_match("0123"));
        assert!(!pattern.is_full_match("x"));
        assert!(!pattern.is_full_match("1\n"));
    }

    #[test]
    fn test_backreference_is_full_match() {
        let pattern = PrefixPattern::new("(a+)b\\1").unwrap();
        assert!(pattern.is_full_match("aabaa"));
        assert!(!pattern.is_full_match("aaba"));
        assert!(!pattern.is_full_match("aabaax"));
    }

    #[test]
    fn test_malformed_pattern_is_an_error() {
        assert!(PrefixPattern::new("(").is_err());
        assert!(PrefixPattern::new("[a-").is_err());
    }
}

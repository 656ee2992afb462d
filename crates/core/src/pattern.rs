//! Snapshot identifier match rules

use regex::Regex;

use crate::error::{Error, Result};

/// Sentinel values that select every snapshot
pub const MATCH_ALL_SENTINELS: [&str; 2] = ["ALL_SNAPSHOTS", "ALL_INSTANCES"];

/// A compiled match rule, built once per invocation
#[derive(Debug, Clone)]
pub enum Pattern {
    /// Select every snapshot
    All,
    /// Unanchored regular expression searched in the identifier
    Regex(Regex),
}

impl Pattern {
    /// Compile a configured pattern value
    pub fn parse(value: &str) -> Result<Self> {
        let value = value.trim();
        if MATCH_ALL_SENTINELS.contains(&value) {
            return Ok(Self::All);
        }

        Regex::new(value)
            .map(Self::Regex)
            .map_err(|source| Error::InvalidPattern {
                pattern: value.to_string(),
                source,
            })
    }

    pub fn is_match(&self, identifier: &str) -> bool {
        match self {
            Self::All => true,
            Self::Regex(re) => re.is_match(identifier),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Self::All => MATCH_ALL_SENTINELS[0],
            Self::Regex(re) => re.as_str(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sentinels_match_everything() {
        for sentinel in MATCH_ALL_SENTINELS {
            let pattern = Pattern::parse(sentinel).unwrap();
            assert!(matches!(pattern, Pattern::All));
            assert!(pattern.is_match("anything-at-all"));
            assert!(pattern.is_match(""));
        }
    }

    #[test]
    fn test_regex_is_unanchored() {
        let pattern = Pattern::parse("db-prod-.*").unwrap();
        assert!(pattern.is_match("db-prod-01-2024-01-01-00-00"));
        assert!(pattern.is_match("old-db-prod-01"));
        assert!(!pattern.is_match("db-staging-01"));
    }

    #[test]
    fn test_invalid_regex() {
        let err = Pattern::parse("db-[prod").unwrap_err();
        assert!(matches!(err, Error::InvalidPattern { .. }));
    }
}

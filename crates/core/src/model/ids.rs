use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Unique identifier for a catalogue Pattern
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PatternId(u64);

impl PatternId {
    /// Creates a new `PatternId`
    #[must_use]
    pub fn new(id: u64) -> Self {
        Self(id)
    }

    /// Returns the underlying u64 value
    #[must_use]
    pub fn value(&self) -> u64 {
        self.0
    }
}

impl fmt::Debug for PatternId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "PatternId({})", self.0)
    }
}

impl fmt::Display for PatternId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Error type for parsing ID from string
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseIdError {
    raw: String,
}

impl fmt::Display for ParseIdError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "failed to parse PatternId from {:?}", self.raw)
    }
}

impl std::error::Error for ParseIdError {}

impl FromStr for PatternId {
    type Err = ParseIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim()
            .parse::<u64>()
            .map(PatternId::new)
            .map_err(|_| ParseIdError { raw: s.to_string() })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pattern_id_display() {
        let id = PatternId::new(7);
        assert_eq!(id.to_string(), "7");
        assert_eq!(format!("{id:?}"), "PatternId(7)");
    }

    #[test]
    fn test_pattern_id_from_str() {
        let id: PatternId = " 23 ".parse().unwrap();
        assert_eq!(id, PatternId::new(23));
    }

    #[test]
    fn test_pattern_id_from_str_invalid() {
        let err = "bridge".parse::<PatternId>().unwrap_err();
        assert_eq!(err.to_string(), "failed to parse PatternId from \"bridge\"");
    }

    #[test]
    fn test_pattern_id_serializes_as_number() {
        let json = serde_json::to_string(&PatternId::new(5)).unwrap();
        assert_eq!(json, "5");
    }
}

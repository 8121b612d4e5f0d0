use serde::{Deserialize, Serialize};

use crate::model::ids::PatternId;
use crate::model::pattern::Pattern;

/// Patterns the user has completed, in completion order, unique by id.
///
/// The first snapshot stored for an id wins; adding the same id again leaves
/// the existing entry untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Vec<Pattern>", into = "Vec<Pattern>")]
pub struct StudiedSet {
    patterns: Vec<Pattern>,
}

impl StudiedSet {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a set from an ordered list, keeping the first entry per id.
    #[must_use]
    pub fn from_patterns(patterns: impl IntoIterator<Item = Pattern>) -> Self {
        let mut set = Self::new();
        for pattern in patterns {
            set.insert(pattern);
        }
        set
    }

    /// Append a pattern unless its id is already present.
    ///
    /// Returns `true` if the pattern was added.
    pub fn insert(&mut self, pattern: Pattern) -> bool {
        if self.contains(pattern.id()) {
            return false;
        }
        self.patterns.push(pattern);
        true
    }

    #[must_use]
    pub fn contains(&self, id: PatternId) -> bool {
        self.patterns.iter().any(|p| p.id() == id)
    }

    #[must_use]
    pub fn get(&self, id: PatternId) -> Option<&Pattern> {
        self.patterns.iter().find(|p| p.id() == id)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.patterns.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Pattern> {
        self.patterns.iter()
    }

    #[must_use]
    pub fn ids(&self) -> Vec<PatternId> {
        self.patterns.iter().map(Pattern::id).collect()
    }

    #[must_use]
    pub fn as_slice(&self) -> &[Pattern] {
        &self.patterns
    }

    #[must_use]
    pub fn into_vec(self) -> Vec<Pattern> {
        self.patterns
    }
}

impl From<Vec<Pattern>> for StudiedSet {
    fn from(patterns: Vec<Pattern>) -> Self {
        Self::from_patterns(patterns)
    }
}

impl From<StudiedSet> for Vec<Pattern> {
    fn from(set: StudiedSet) -> Self {
        set.patterns
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{PatternCategory, PatternDraft};

    fn pattern(id: u64, title: &str) -> Pattern {
        PatternDraft::new(PatternId::new(id), title, PatternCategory::Creational)
            .validate()
            .unwrap()
    }

    #[test]
    fn keeps_insertion_order_without_duplicates() {
        let mut set = StudiedSet::new();
        assert!(set.insert(pattern(1, "A")));
        assert!(set.insert(pattern(2, "B")));
        assert!(!set.insert(pattern(1, "A")));
        assert_eq!(set.ids(), vec![PatternId::new(1), PatternId::new(2)]);
    }

    #[test]
    fn first_write_wins_on_same_id() {
        let mut set = StudiedSet::new();
        set.insert(pattern(5, "Singleton"));
        assert!(!set.insert(pattern(5, "changed")));
        assert_eq!(set.len(), 1);
        assert_eq!(set.get(PatternId::new(5)).unwrap().title(), "Singleton");
    }

    #[test]
    fn serializes_as_plain_array() {
        let set = StudiedSet::from_patterns([pattern(3, "Factory method")]);
        let json = serde_json::to_value(&set).unwrap();
        assert!(json.is_array());
        assert_eq!(json[0]["title"], "Factory method");
    }

    #[test]
    fn deserializing_duplicates_keeps_first() {
        let raw = r#"[
            {"id":2,"title":"Builder","category":"creational"},
            {"id":2,"title":"Builder again","category":"creational"},
            {"id":9,"title":"Decorator","category":"structural"}
        ]"#;
        let set: StudiedSet = serde_json::from_str(raw).unwrap();
        assert_eq!(set.len(), 2);
        assert_eq!(set.get(PatternId::new(2)).unwrap().title(), "Builder");
    }
}

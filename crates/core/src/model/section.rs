use std::fmt;
use std::str::FromStr;

use thiserror::Error;

/// Which row of tabs a section belongs to in the pattern detail view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SectionGroup {
    /// Top-level tabs: description, pros & cons, case.
    Primary,
    /// Sub-tabs shown under the case tab: code, task, result.
    Case,
}

/// A content section of the pattern detail view whose opening is tracked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Section {
    Description,
    ProsAndCons,
    Case,
    Code,
    Task,
    Result,
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("unknown section key: {raw}")]
pub struct ParseSectionError {
    raw: String,
}

impl Section {
    pub const ALL: [Section; 6] = [
        Section::Description,
        Section::ProsAndCons,
        Section::Case,
        Section::Code,
        Section::Task,
        Section::Result,
    ];

    #[must_use]
    pub fn group(self) -> SectionGroup {
        match self {
            Section::Description | Section::ProsAndCons | Section::Case => SectionGroup::Primary,
            Section::Code | Section::Task | Section::Result => SectionGroup::Case,
        }
    }

    /// Canonical key, also used as the field name in persisted view state.
    #[must_use]
    pub fn key(self) -> &'static str {
        match self {
            Section::Description => "description",
            Section::ProsAndCons => "prosAndCons",
            Section::Case => "case",
            Section::Code => "code",
            Section::Task => "task",
            Section::Result => "result",
        }
    }

    /// Resolve a section key, including the older spellings the detail view used.
    ///
    /// Returns `None` for anything not in the fixed set.
    #[must_use]
    pub fn parse(raw: &str) -> Option<Section> {
        let key = raw.trim().to_ascii_lowercase();
        let section = match key.as_str() {
            "description" => Section::Description,
            "prosandcons" | "pros & cons" | "proscons" | "pros-and-cons" => Section::ProsAndCons,
            "case" => Section::Case,
            "code" | "case:code" => Section::Code,
            "task" | "case:task" => Section::Task,
            "result" | "case:result" => Section::Result,
            _ => return None,
        };
        Some(section)
    }
}

impl fmt::Display for Section {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for Section {
    type Err = ParseSectionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Section::parse(s).ok_or_else(|| ParseSectionError { raw: s.to_string() })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn canonical_keys_round_trip() {
        for section in Section::ALL {
            assert_eq!(Section::parse(section.key()), Some(section));
        }
    }

    #[test]
    fn legacy_spellings_resolve() {
        assert_eq!(Section::parse("pros & cons"), Some(Section::ProsAndCons));
        assert_eq!(Section::parse("proscons"), Some(Section::ProsAndCons));
        assert_eq!(Section::parse(" case:result "), Some(Section::Result));
        assert_eq!(Section::parse("Case"), Some(Section::Case));
    }

    #[test]
    fn unknown_keys_are_rejected() {
        assert_eq!(Section::parse("images"), None);
        assert_eq!(Section::parse(""), None);
        assert!("summary".parse::<Section>().is_err());
    }

    #[test]
    fn groups_split_three_and_three() {
        let primary = Section::ALL
            .iter()
            .filter(|s| s.group() == SectionGroup::Primary)
            .count();
        assert_eq!(primary, 3);
        assert_eq!(Section::Task.group(), SectionGroup::Case);
    }
}

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::model::ids::PatternId;

//
// ─── ERRORS ────────────────────────────────────────────────────────────────────
//

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum PatternError {
    #[error("pattern id must be > 0")]
    InvalidId,

    #[error("pattern title cannot be empty")]
    EmptyTitle,
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("unknown pattern category: {raw}")]
pub struct ParseCategoryError {
    raw: String,
}

//
// ─── CATEGORY ──────────────────────────────────────────────────────────────────
//

/// The three families of the classic pattern catalogue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PatternCategory {
    Creational,
    Structural,
    Behavioral,
}

impl PatternCategory {
    pub const ALL: [PatternCategory; 3] = [
        PatternCategory::Creational,
        PatternCategory::Structural,
        PatternCategory::Behavioral,
    ];

    /// Lowercase name, as serialized.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            PatternCategory::Creational => "creational",
            PatternCategory::Structural => "structural",
            PatternCategory::Behavioral => "behavioral",
        }
    }

    /// Heading shown above a group of patterns.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            PatternCategory::Creational => "Creational patterns",
            PatternCategory::Structural => "Structural patterns",
            PatternCategory::Behavioral => "Behavioral patterns",
        }
    }
}

impl fmt::Display for PatternCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PatternCategory {
    type Err = ParseCategoryError;

    /// Accepts `creational`, `Structural`, `Behavioral patterns` and similar.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase();
        let name = normalized
            .strip_suffix(" patterns")
            .unwrap_or(normalized.as_str())
            .trim_end();
        match name {
            "creational" => Ok(PatternCategory::Creational),
            "structural" => Ok(PatternCategory::Structural),
            "behavioral" | "behavioural" => Ok(PatternCategory::Behavioral),
            _ => Err(ParseCategoryError { raw: s.to_string() }),
        }
    }
}

//
// ─── PATTERN ───────────────────────────────────────────────────────────────────
//

/// Unvalidated catalogue entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PatternDraft {
    pub id: PatternId,
    pub pre_title: String,
    pub title: String,
    pub category: PatternCategory,
    pub description: String,
    pub pros_cons: String,
    pub task: String,
    pub result: String,
    pub code: String,
    pub image: Option<String>,
    pub image_detail: Option<String>,
}

impl PatternDraft {
    /// Draft with only the identifying fields set; content fields start empty.
    #[must_use]
    pub fn new(id: PatternId, title: impl Into<String>, category: PatternCategory) -> Self {
        Self {
            id,
            pre_title: category.label().to_string(),
            title: title.into(),
            category,
            description: String::new(),
            pros_cons: String::new(),
            task: String::new(),
            result: String::new(),
            code: String::new(),
            image: None,
            image_detail: None,
        }
    }

    /// Validate the draft into an immutable `Pattern`.
    ///
    /// Titles are trimmed; content fields are kept verbatim so code samples
    /// keep their indentation.
    ///
    /// # Errors
    ///
    /// Returns `PatternError::InvalidId` for id 0 and `PatternError::EmptyTitle`
    /// if the title is blank.
    pub fn validate(self) -> Result<Pattern, PatternError> {
        if self.id.value() == 0 {
            return Err(PatternError::InvalidId);
        }
        let title = self.title.trim().to_string();
        if title.is_empty() {
            return Err(PatternError::EmptyTitle);
        }

        Ok(Pattern {
            id: self.id,
            pre_title: self.pre_title.trim().to_string(),
            title,
            category: self.category,
            description: self.description,
            pros_cons: self.pros_cons,
            task: self.task,
            result: self.result,
            code: self.code,
            image: self.image,
            image_detail: self.image_detail,
        })
    }
}

/// Immutable description of one design pattern.
///
/// The serialized form is the snapshot stored in the studied list, so the
/// field names are part of the persisted layout.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Pattern {
    id: PatternId,
    #[serde(default)]
    pre_title: String,
    title: String,
    category: PatternCategory,
    #[serde(default)]
    description: String,
    #[serde(default, rename = "proscons")]
    pros_cons: String,
    #[serde(default)]
    task: String,
    #[serde(default)]
    result: String,
    #[serde(default)]
    code: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    image: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    image_detail: Option<String>,
}

impl Pattern {
    #[must_use]
    pub fn id(&self) -> PatternId {
        self.id
    }

    #[must_use]
    pub fn pre_title(&self) -> &str {
        &self.pre_title
    }

    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    #[must_use]
    pub fn category(&self) -> PatternCategory {
        self.category
    }

    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    #[must_use]
    pub fn pros_cons(&self) -> &str {
        &self.pros_cons
    }

    #[must_use]
    pub fn task(&self) -> &str {
        &self.task
    }

    #[must_use]
    pub fn result(&self) -> &str {
        &self.result
    }

    #[must_use]
    pub fn code(&self) -> &str {
        &self.code
    }

    #[must_use]
    pub fn image(&self) -> Option<&str> {
        self.image.as_deref()
    }

    #[must_use]
    pub fn image_detail(&self) -> Option<&str> {
        self.image_detail.as_deref()
    }
}

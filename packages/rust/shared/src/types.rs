//! Core domain types shared by every curriculum crate.

use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::{CurriculumError, Result};

// ---------------------------------------------------------------------------
// Language
// ---------------------------------------------------------------------------

/// A curriculum language code (e.g. `pt`, `es`, `pt-BR`).
///
/// Passed explicitly into every construction and loading call; there is no
/// ambient "current language".
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Language(String);

impl Language {
    /// Parse and validate a language code.
    pub fn new(code: impl Into<String>) -> Result<Self> {
        static LANG_RE: LazyLock<Regex> = LazyLock::new(|| {
            Regex::new(r"^[a-z]{2,3}(-[A-Z]{2})?$").expect("valid regex")
        });

        let code = code.into();
        if !LANG_RE.is_match(&code) {
            return Err(CurriculumError::config(format!(
                "invalid language code `{code}` (expected e.g. `pt` or `pt-BR`)"
            )));
        }
        Ok(Self(code))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for Language {
    type Error = CurriculumError;

    fn try_from(value: String) -> Result<Self> {
        Self::new(value)
    }
}

impl From<Language> for String {
    fn from(lang: Language) -> Self {
        lang.0
    }
}

impl std::fmt::Display for Language {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl std::str::FromStr for Language {
    type Err = CurriculumError;

    fn from_str(s: &str) -> Result<Self> {
        Self::new(s)
    }
}

// ---------------------------------------------------------------------------
// Identifiers
// ---------------------------------------------------------------------------

/// Check that `id` is usable as a deep-link anchor (lowercase kebab-case slug).
pub fn validate_identifier(id: &str) -> Result<()> {
    static SLUG_RE: LazyLock<Regex> = LazyLock::new(|| {
        Regex::new(r"^[a-z0-9]+(?:[-_][a-z0-9]+)*$").expect("valid regex")
    });

    if id.is_empty() {
        return Err(CurriculumError::InvalidIdentifier {
            id: id.to_string(),
            reason: "identifier is empty".into(),
        });
    }
    if !SLUG_RE.is_match(id) {
        return Err(CurriculumError::InvalidIdentifier {
            id: id.to_string(),
            reason: "expected lowercase letters, digits, `-` or `_`".into(),
        });
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// BlockPosition
// ---------------------------------------------------------------------------

/// Location of a content block: owning topic plus zero-based index.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BlockPosition {
    pub topic: String,
    pub index: usize,
}

impl BlockPosition {
    pub fn new(topic: impl Into<String>, index: usize) -> Self {
        Self {
            topic: topic.into(),
            index,
        }
    }
}

impl std::fmt::Display for BlockPosition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}#{}", self.topic, self.index)
    }
}

// ---------------------------------------------------------------------------
// SingletonKind
// ---------------------------------------------------------------------------

/// Named top-level topics that sit outside any module.
///
/// Declaration order is the reading order after the modules.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SingletonKind {
    Objectives,
    Evaluations,
    Bibliography,
}

impl SingletonKind {
    pub const ALL: [SingletonKind; 3] = [Self::Objectives, Self::Evaluations, Self::Bibliography];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Objectives => "objectives",
            Self::Evaluations => "evaluations",
            Self::Bibliography => "bibliography",
        }
    }
}

impl std::fmt::Display for SingletonKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

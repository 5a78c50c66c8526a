//! Error types for the curriculum workspace.
//!
//! Library crates use [`CurriculumError`] via `thiserror`.
//! The CLI wraps this with `color-eyre` for rich diagnostics.

use std::path::PathBuf;

use crate::types::BlockPosition;

/// Top-level error type for all curriculum operations.
#[derive(Debug, thiserror::Error)]
pub enum CurriculumError {
    /// A block of a known kind is missing a field or carries an ill-typed one.
    #[error("malformed block at {position}: `{field}` {reason}")]
    MalformedBlock {
        position: BlockPosition,
        field: String,
        reason: String,
    },

    /// The block's kind tag is not part of the variant set.
    #[error("unknown block kind `{kind}` at {position}")]
    UnknownBlockKind { position: BlockPosition, kind: String },

    /// A module or topic identifier is used more than once in its scope.
    #[error("duplicate identifier `{id}` in {scope}")]
    DuplicateIdentifier { id: String, scope: String },

    /// An identifier cannot be used as a navigation anchor.
    #[error("invalid identifier `{id}`: {reason}")]
    InvalidIdentifier { id: String, reason: String },

    /// The question was already revealed; its outcome is final.
    #[error("question {question} has already been graded")]
    QuestionAlreadyGraded { question: usize },

    /// Reveal was requested before any option was selected.
    #[error("question {question} has no selected option")]
    NoSelection { question: usize },

    #[error("question {question} does not exist (quiz has {total})")]
    QuestionOutOfRange { question: usize, total: usize },

    #[error("option {option} does not exist for question {question} ({options} options)")]
    OptionOutOfRange {
        question: usize,
        option: usize,
        options: usize,
    },

    /// Two curricula diverge structurally. Details live in the consistency report.
    #[error("{count} structural mismatch(es) between curricula")]
    StructuralMismatch { count: usize },

    /// Configuration loading or validation error.
    #[error("config error: {message}")]
    Config { message: String },

    /// Filesystem I/O error.
    #[error("I/O error at {path:?}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    /// Content record could not be parsed.
    #[error("parse error: {message}")]
    Parse { message: String },
}

/// Convenience alias used throughout the codebase.
pub type Result<T> = std::result::Result<T, CurriculumError>;

impl CurriculumError {
    /// Create a config error from any displayable message.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config {
            message: msg.into(),
        }
    }

    /// Create a parse error from any displayable message.
    pub fn parse(msg: impl Into<String>) -> Self {
        Self::Parse {
            message: msg.into(),
        }
    }

    /// Wrap a `std::io::Error` with a path for context.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// Create a malformed-block error for `field` at `position`.
    pub fn malformed(
        position: &BlockPosition,
        field: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        Self::MalformedBlock {
            position: position.clone(),
            field: field.into(),
            reason: reason.into(),
        }
    }

    /// Create a duplicate-identifier error.
    pub fn duplicate(id: impl Into<String>, scope: impl Into<String>) -> Self {
        Self::DuplicateIdentifier {
            id: id.into(),
            scope: scope.into(),
        }
    }

    /// Whether tooling may skip the offending item instead of aborting.
    ///
    /// Only unknown block kinds qualify: they signal content written for a
    /// newer schema rather than broken content.
    pub fn is_skippable(&self) -> bool {
        matches!(self, Self::UnknownBlockKind { .. })
    }
}

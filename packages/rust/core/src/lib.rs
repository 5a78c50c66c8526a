//! Curriculum assembly, traversal, assessment, and cross-language checks.
//!
//! Construction is synchronous and pure: blocks are validated into
//! [`Topic`]s, topics grouped into [`Module`]s, and modules plus singleton
//! topics assembled into a per-language [`Curriculum`]. The result is
//! immutable. The only mutable runtime state is a [`QuizSession`].

pub mod consistency;
pub mod curriculum;
pub mod export;
pub mod lint;
pub mod module;
pub mod quiz;
pub mod skeleton;
pub mod topic;

#[cfg(test)]
mod fixtures;

pub use consistency::{ConsistencyReport, StructuralMismatch, check_consistency};
pub use curriculum::{Curriculum, CurriculumStats, TopicRef, TopicSlot, assemble_curriculum};
pub use export::{BUNDLE_VERSION, ExportBundle, write_bundle};
pub use lint::{LintWarning, lint_curriculum};
pub use module::{Module, assemble_module};
pub use quiz::{QuestionOutcome, QuestionState, QuizOutcome, QuizSession, Score, grade_selections};
pub use skeleton::{ModuleSkeleton, Skeleton, TopicSkeleton};
pub use topic::{Topic, TopicOptions, assemble_topic, assemble_topic_with};

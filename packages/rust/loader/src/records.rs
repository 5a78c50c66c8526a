//! On-disk record shapes.
//!
//! Records are plain data; validation happens when they are assembled.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use curriculum_shared::SingletonKind;

/// `<lang>/curriculum.json`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CurriculumIndex {
    /// Module ids in reading order.
    pub modules: Vec<String>,
    /// Singleton kind -> topic id (`<lang>/<topic-id>.json`).
    #[serde(default)]
    pub singletons: BTreeMap<SingletonKind, String>,
}

/// `<lang>/<module-id>/module.json`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModuleRecord {
    pub id: String,
    pub title: String,
    /// Topic id of the overview.
    pub overview: String,
    /// Lesson topic ids in pedagogical order.
    #[serde(default)]
    pub lessons: Vec<String>,
}

/// `<topic-id>.json`, inside a module directory or at the language root.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TopicRecord {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub blocks: Vec<Value>,
}

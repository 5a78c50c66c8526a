//! Publication bundle for renderers.
//!
//! A bundle is a single JSON file carrying one validated curriculum plus the
//! metadata a renderer needs to detect stale translations.

use std::path::Path;

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::{debug, info, instrument};

use curriculum_shared::{CurriculumError, Language, Result};

use crate::curriculum::{Curriculum, CurriculumStats};

/// Bundle format version.
pub const BUNDLE_VERSION: u32 = 1;

/// The `<lang>.json` structure emitted by `export`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportBundle<'a> {
    pub bundle_version: u32,
    pub language: &'a Language,
    pub generated_at: DateTime<Utc>,
    pub skeleton_digest: String,
    pub stats: CurriculumStats,
    pub curriculum: &'a Curriculum,
}

impl<'a> ExportBundle<'a> {
    pub fn new(curriculum: &'a Curriculum) -> Self {
        Self {
            bundle_version: BUNDLE_VERSION,
            language: curriculum.language(),
            generated_at: Utc::now(),
            skeleton_digest: curriculum.skeleton_digest(),
            stats: curriculum.stats(),
            curriculum,
        }
    }
}

/// Write the bundle for `curriculum` to `path` (write to temp, then rename).
#[instrument(skip_all, fields(language = %curriculum.language(), path = %path.display()))]
pub fn write_bundle(curriculum: &Curriculum, path: &Path) -> Result<()> {
    let bundle = ExportBundle::new(curriculum);
    let json = serde_json::to_string_pretty(&bundle)
        .map_err(|e| CurriculumError::parse(format!("JSON serialization failed: {e}")))?;

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(|e| CurriculumError::io(parent, e))?;
    }

    let file_name = path
        .file_name()
        .ok_or_else(|| CurriculumError::config(format!("{} is not a file path", path.display())))?;
    let temp = path.with_file_name(format!(".{}.tmp", file_name.to_string_lossy()));

    std::fs::write(&temp, &json).map_err(|e| CurriculumError::io(&temp, e))?;
    std::fs::rename(&temp, path).map_err(|e| CurriculumError::io(path, e))?;

    debug!(size = json.len(), "wrote bundle");
    info!(digest = %bundle.skeleton_digest, "curriculum exported");
    Ok(())
}

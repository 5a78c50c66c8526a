//! Lazy, per-language loading of curriculum content from a directory tree.
//!
//! Layout:
//! ```text
//! <root>/<lang>/curriculum.json
//! <root>/<lang>/<module-id>/module.json
//! <root>/<lang>/<module-id>/<topic-id>.json
//! <root>/<lang>/<singleton-topic-id>.json
//! ```
//!
//! Loading is async and one module at a time. Dropping a load future cancels
//! it; nothing is written, so there is nothing to unwind.

pub mod records;

use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use tracing::{debug, info, instrument};

use curriculum_core::{
    Curriculum, Module, Topic, TopicOptions, assemble_curriculum, assemble_module,
    assemble_topic_with,
};
use curriculum_shared::{AppConfig, CurriculumError, Language, Result, validate_identifier};

pub use records::{CurriculumIndex, ModuleRecord, TopicRecord};

const INDEX_FILE: &str = "curriculum.json";
const MODULE_FILE: &str = "module.json";

/// A content directory holding one sub-directory per language.
#[derive(Debug, Clone)]
pub struct ContentSource {
    root: PathBuf,
    languages: Vec<Language>,
    options: TopicOptions,
}

impl ContentSource {
    pub fn new(root: impl Into<PathBuf>, languages: Vec<Language>) -> Self {
        Self {
            root: root.into(),
            languages,
            options: TopicOptions::default(),
        }
    }

    /// Build from config; `root` overrides `defaults.content_dir` when given.
    pub fn from_config(config: &AppConfig, root: Option<&Path>) -> Self {
        let root = root
            .map(Path::to_path_buf)
            .unwrap_or_else(|| PathBuf::from(&config.defaults.content_dir));
        Self::new(root, config.defaults.languages.clone()).with_options(TopicOptions {
            skip_unknown_blocks: config.loader.skip_unknown_blocks,
        })
    }

    pub fn with_options(mut self, options: TopicOptions) -> Self {
        self.options = options;
        self
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn languages(&self) -> &[Language] {
        &self.languages
    }

    /// Read `<lang>/curriculum.json`.
    pub async fn load_index(&self, language: &Language) -> Result<CurriculumIndex> {
        let dir = self.language_dir(language)?;
        read_json(&dir.join(INDEX_FILE)).await
    }

    /// Load and assemble one module with all of its topics.
    #[instrument(skip_all, fields(language = %language, module = module_id))]
    pub async fn load_module(&self, language: &Language, module_id: &str) -> Result<Module> {
        validate_identifier(module_id)?;
        let dir = self.language_dir(language)?.join(module_id);

        let record: ModuleRecord = read_json(&dir.join(MODULE_FILE)).await?;
        if record.id != module_id {
            return Err(CurriculumError::parse(format!(
                "{}: declares id `{}` but lives in `{module_id}/`",
                dir.join(MODULE_FILE).display(),
                record.id
            )));
        }

        let overview = self.load_topic(&dir, &record.overview).await?;
        let mut lessons = Vec::with_capacity(record.lessons.len());
        for lesson in &record.lessons {
            lessons.push(self.load_topic(&dir, lesson).await?);
        }

        debug!(module = module_id, lessons = lessons.len(), "module loaded");
        assemble_module(record.id, record.title, overview, lessons)
    }

    /// Load every module listed in the index, then the singletons, and
    /// assemble the curriculum.
    #[instrument(skip_all, fields(language = %language))]
    pub async fn load_curriculum(&self, language: &Language) -> Result<Curriculum> {
        let index = self.load_index(language).await?;
        let dir = self.language_dir(language)?;

        let mut modules = Vec::with_capacity(index.modules.len());
        for module_id in &index.modules {
            modules.push(self.load_module(language, module_id).await?);
        }

        let mut singletons = Vec::with_capacity(index.singletons.len());
        for (kind, topic_id) in &index.singletons {
            singletons.push((*kind, self.load_topic(&dir, topic_id).await?));
        }

        let curriculum = assemble_curriculum(language.clone(), modules, singletons)?;
        info!(topics = curriculum.topic_count(), "curriculum loaded");
        Ok(curriculum)
    }

    async fn load_topic(&self, dir: &Path, topic_id: &str) -> Result<Topic> {
        validate_identifier(topic_id)?;
        let path = dir.join(format!("{topic_id}.json"));
        let record: TopicRecord = read_json(&path).await?;
        if record.id != topic_id {
            return Err(CurriculumError::parse(format!(
                "{}: declares id `{}` but is referenced as `{topic_id}`",
                path.display(),
                record.id
            )));
        }
        assemble_topic_with(record.id, record.title, &record.blocks, self.options)
    }

    fn language_dir(&self, language: &Language) -> Result<PathBuf> {
        if !self.languages.contains(language) {
            return Err(CurriculumError::config(format!(
                "language `{language}` is not configured (available: {})",
                self.languages
                    .iter()
                    .map(Language::as_str)
                    .collect::<Vec<_>>()
                    .join(", ")
            )));
        }
        Ok(self.root.join(language.as_str()))
    }
}

async fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let content = tokio::fs::read_to_string(path)
        .await
        .map_err(|e| CurriculumError::io(path, e))?;
    serde_json::from_str(&content)
        .map_err(|e| CurriculumError::parse(format!("{}: {e}", path.display())))
}

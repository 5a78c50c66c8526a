//! Application configuration for the curriculum tools.
//!
//! User config lives at `~/.curriculum/curriculum.toml`.
//! CLI flags override config file values, which override defaults.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{CurriculumError, Result};
use crate::types::Language;

/// Default configuration file name.
const CONFIG_FILE_NAME: &str = "curriculum.toml";

/// Default config directory name under the user's home.
const CONFIG_DIR_NAME: &str = ".curriculum";

// ---------------------------------------------------------------------------
// Config structs (matching curriculum.toml schema)
// ---------------------------------------------------------------------------

/// Top-level application config, deserialized from TOML.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Global defaults.
    #[serde(default)]
    pub defaults: DefaultsConfig,

    /// Lint pass toggles.
    #[serde(default)]
    pub lint: LintConfig,

    /// Content loading behavior.
    #[serde(default)]
    pub loader: LoaderConfig,
}

/// `[defaults]` section.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DefaultsConfig {
    /// Root directory holding one sub-directory per language.
    #[serde(default = "default_content_dir")]
    pub content_dir: String,

    /// Language other translations are checked against.
    #[serde(default = "default_reference_language")]
    pub reference_language: Language,

    /// Languages the curriculum is published in.
    #[serde(default = "default_languages")]
    pub languages: Vec<Language>,
}

impl Default for DefaultsConfig {
    fn default() -> Self {
        Self {
            content_dir: default_content_dir(),
            reference_language: default_reference_language(),
            languages: default_languages(),
        }
    }
}

fn default_content_dir() -> String {
    "content".into()
}
fn default_reference_language() -> Language {
    Language::new("pt").expect("built-in language code is valid")
}
fn default_languages() -> Vec<Language> {
    ["pt", "es"]
        .into_iter()
        .map(|code| Language::new(code).expect("built-in language code is valid"))
        .collect()
}

/// `[lint]` section.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LintConfig {
    /// Warn about topics without any content block.
    #[serde(default = "default_true")]
    pub empty_topics: bool,

    /// Warn about modules without lesson topics ("coming soon").
    #[serde(default = "default_true")]
    pub empty_modules: bool,

    /// Warn when two blocks in one topic share a deep-link anchor.
    #[serde(default = "default_true")]
    pub duplicate_anchors: bool,

    /// Treat any warning as a failure in `lint`.
    #[serde(default)]
    pub deny_warnings: bool,
}

impl Default for LintConfig {
    fn default() -> Self {
        Self {
            empty_topics: true,
            empty_modules: true,
            duplicate_anchors: true,
            deny_warnings: false,
        }
    }
}

fn default_true() -> bool {
    true
}

/// `[loader]` section.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LoaderConfig {
    /// Drop blocks with an unknown kind tag instead of failing the topic.
    #[serde(default)]
    pub skip_unknown_blocks: bool,
}

impl AppConfig {
    /// Ensure the configured languages are coherent.
    pub fn validate(&self) -> Result<()> {
        if self.defaults.languages.is_empty() {
            return Err(CurriculumError::config("`defaults.languages` must not be empty"));
        }
        if !self
            .defaults
            .languages
            .contains(&self.defaults.reference_language)
        {
            return Err(CurriculumError::config(format!(
                "reference language `{}` is not listed in `defaults.languages`",
                self.defaults.reference_language
            )));
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Config loading
// ---------------------------------------------------------------------------

/// Get the path to the config directory (`~/.curriculum/`).
pub fn config_dir() -> Result<PathBuf> {
    let home = dirs::home_dir()
        .ok_or_else(|| CurriculumError::config("could not determine home directory"))?;
    Ok(home.join(CONFIG_DIR_NAME))
}

/// Get the path to the config file (`~/.curriculum/curriculum.toml`).
pub fn config_file_path() -> Result<PathBuf> {
    Ok(config_dir()?.join(CONFIG_FILE_NAME))
}

/// Load the application config from disk. Returns defaults if the file does not exist.
pub fn load_config() -> Result<AppConfig> {
    let path = config_file_path()?;

    if !path.exists() {
        tracing::debug!(?path, "config file not found, using defaults");
        return Ok(AppConfig::default());
    }

    load_config_from(&path)
}

/// Load the application config from a specific file path.
pub fn load_config_from(path: &Path) -> Result<AppConfig> {
    let content = std::fs::read_to_string(path).map_err(|e| CurriculumError::io(path, e))?;

    let config: AppConfig = toml::from_str(&content).map_err(|e| {
        CurriculumError::config(format!("failed to parse {}: {e}", path.display()))
    })?;
    config.validate()?;
    Ok(config)
}

/// Create the config directory and write a default config file.
/// Returns the path to the created file.
pub fn init_config() -> Result<PathBuf> {
    let dir = config_dir()?;
    std::fs::create_dir_all(&dir).map_err(|e| CurriculumError::io(&dir, e))?;

    let path = dir.join(CONFIG_FILE_NAME);
    let config = AppConfig::default();
    let content =
        toml::to_string_pretty(&config).map_err(|e| CurriculumError::config(e.to_string()))?;

    std::fs::write(&path, content).map_err(|e| CurriculumError::io(&path, e))?;
    tracing::info!(?path, "created default config file");

    Ok(path)
}

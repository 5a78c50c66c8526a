//! Shared types, error model, and configuration for the curriculum workspace.
//!
//! This crate is the foundation depended on by all other curriculum crates.
//! It provides:
//! - [`CurriculumError`]: the unified error type
//! - Domain types ([`Language`], [`BlockPosition`], [`SingletonKind`])
//! - Configuration ([`AppConfig`], [`LintConfig`], config loading)

pub mod config;
pub mod error;
pub mod types;

// Re-export public API at crate root for ergonomic imports.
pub use config::{
    AppConfig, DefaultsConfig, LintConfig, LoaderConfig, config_dir, config_file_path,
    init_config, load_config, load_config_from,
};
pub use error::{CurriculumError, Result};
pub use types::{BlockPosition, Language, SingletonKind, validate_identifier};

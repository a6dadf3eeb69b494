//! Configuration module
//!
//! This module handles:
//! - Per-assignment configuration (classroom.toml)
//! - Built-in defaults for competence and rubric
//! - CLI defaults

mod project_config;

pub use project_config::{
    load_project_config, CliDefaults, ProjectConfig, CONFIG_FILE_NAME, DEFAULT_BAREME,
    DEFAULT_COMPETENCE, EXAMPLE_CONFIG, JSON_CONFIG_FILE_NAME,
};

//! YAML configuration file support for noteseek
//!
//! Callers that want file-based configuration load a [`NoteseekConfig`] and
//! hand the resulting crate configs to [`crate::SearchEngine`]. The engine
//! itself never reads files or the environment.
//!
//! ## Example YAML Configuration
//!
//! ```yaml
//! version: "1.0"
//! name: "notes"
//!
//! semantic:
//!   backend: "hash"
//!   model_name: "blake2b-hash-128"
//!
//! matcher:
//!   limit: 10
//!   min_similarity: 0.5
//!   fallback: "top_ranked"   # or "strict"
//! ```

use std::fs;
use std::path::Path;

use matcher::MatchConfig;
use semantic::{EMBEDDING_DIM, EmbeddingBackend, SemanticConfig};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors that can occur when loading YAML configuration files
#[derive(Debug, Error)]
pub enum ConfigLoadError {
    #[error("failed to read config file: {0}")]
    FileRead(#[from] std::io::Error),

    #[error("failed to parse YAML: {0}")]
    YamlParse(#[from] serde_yaml::Error),

    #[error("validation error: {0}")]
    Validation(String),

    #[error("unsupported config version: {0}")]
    UnsupportedVersion(String),
}

/// Top-level YAML configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "snake_case")]
pub struct NoteseekConfig {
    /// Configuration format version
    pub version: String,

    /// Optional configuration name/description
    #[serde(default)]
    pub name: Option<String>,

    #[serde(default)]
    pub semantic: SemanticConfig,

    #[serde(default)]
    pub matcher: MatchConfig,
}

impl NoteseekConfig {
    /// Load a YAML configuration file from the given path
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigLoadError> {
        let content = fs::read_to_string(path)?;
        Self::from_yaml(&content)
    }

    /// Parse YAML configuration from a string
    pub fn from_yaml(yaml: &str) -> Result<Self, ConfigLoadError> {
        let config: NoteseekConfig = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigLoadError> {
        match self.version.as_str() {
            "1.0" | "1" => Ok(()),
            v => Err(ConfigLoadError::UnsupportedVersion(v.to_string())),
        }?;

        self.semantic
            .validate()
            .map_err(|err| ConfigLoadError::Validation(format!("semantic: {err}")))?;
        self.matcher
            .validate()
            .map_err(|err| ConfigLoadError::Validation(format!("matcher: {err}")))?;

        // Stored vectors are 128 floats; the ranker has to agree.
        let expected = match self.semantic.backend {
            EmbeddingBackend::Hash => EMBEDDING_DIM,
        };
        if self.matcher.dimension != expected {
            return Err(ConfigLoadError::Validation(format!(
                "matcher.dimension must be {expected} for the {:?} backend",
                self.semantic.backend
            )));
        }

        Ok(())
    }
}

impl Default for NoteseekConfig {
    fn default() -> Self {
        Self {
            version: "1.0".to_string(),
            name: None,
            semantic: SemanticConfig::default(),
            matcher: MatchConfig::default(),
        }
    }
}

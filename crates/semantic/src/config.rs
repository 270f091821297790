use serde::{Deserialize, Serialize};

use crate::error::SemanticError;
use crate::hash::{HashEmbedder, HASH_MODEL_NAME};
use crate::Embedder;

/// Embedding backend, chosen once when the embedder is built.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum EmbeddingBackend {
    /// Seeded BLAKE2b sketch, see [`HashEmbedder`].
    #[default]
    Hash,
}

/// Runtime configuration describing which backend to construct.
///
/// # Example
/// ```
/// use semantic::{Embedder, SemanticConfig};
///
/// let embedder = SemanticConfig::default().build().unwrap();
/// assert_eq!(embedder.embed("hello").len(), 128);
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SemanticConfig {
    #[serde(default)]
    pub backend: EmbeddingBackend,
    /// Label surfaced on every `SemanticEmbedding`.
    #[serde(default = "SemanticConfig::default_model_name")]
    pub model_name: String,
}

impl SemanticConfig {
    pub(crate) fn default_model_name() -> String {
        HASH_MODEL_NAME.to_string()
    }

    pub fn validate(&self) -> Result<(), SemanticError> {
        if self.model_name.trim().is_empty() {
            return Err(SemanticError::InvalidConfig(
                "model_name must not be empty".into(),
            ));
        }
        Ok(())
    }

    /// Validate and construct the configured backend.
    pub fn build(&self) -> Result<Box<dyn Embedder>, SemanticError> {
        self.validate()?;
        let embedder: Box<dyn Embedder> = match self.backend {
            EmbeddingBackend::Hash => Box::new(HashEmbedder::with_model_name(&self.model_name)),
        };
        tracing::debug!(
            backend = ?self.backend,
            model_name = %self.model_name,
            dimension = embedder.dimension(),
            "semantic.build"
        );
        Ok(embedder)
    }
}

impl Default for SemanticConfig {
    fn default() -> Self {
        Self {
            backend: EmbeddingBackend::default(),
            model_name: Self::default_model_name(),
        }
    }
}

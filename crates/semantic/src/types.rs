use serde::{Deserialize, Serialize};

/// Embedding output with provenance.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SemanticEmbedding {
    /// Identifier of the embedded note/query, owned by the caller.
    pub doc_id: String,
    /// Embedding values.
    pub vector: Vec<f32>,
    /// Name of the backend that produced the vector. Vectors from different
    /// backends must not be compared.
    pub model_name: String,
    /// Dimension of `vector`.
    pub embedding_dim: usize,
    /// Whether [`vector`](Self::vector) has unit length. False only for the
    /// degenerate all-zero vector.
    pub normalized: bool,
}

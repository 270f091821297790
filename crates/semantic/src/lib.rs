//! noteseek semantic embeddings
//!
//! Turns note and query text into fixed-length vectors for cosine ranking.
//! The only backend today is a seeded BLAKE2b sketch ([`HashEmbedder`]): no
//! model files, no network, and the same text always produces the same
//! 128-float unit vector, bit for bit, in every process.
//!
//! That determinism is the point. Vectors are computed once at write time and
//! stored by the caller, then compared against freshly embedded queries, so the
//! sketch must never drift between releases. It is not a learned embedding and
//! makes no claim to semantic quality beyond exact and near-exact text.
//!
//! Backends sit behind the [`Embedder`] trait and are picked when the embedder
//! is constructed (see [`SemanticConfig::build`]); nothing is detected at
//! runtime.
//!
//! ## Quick example
//!
//! ```
//! use semantic::{embed, EMBEDDING_DIM};
//!
//! let a = embed("buy milk");
//! let b = embed("buy milk");
//! assert_eq!(a, b);
//! assert_eq!(a.len(), EMBEDDING_DIM);
//! ```
//!
//! ## Threading notes
//!
//! Everything here is pure. Share one embedder across threads freely. With the
//! `parallel` feature, [`HashEmbedder`]'s batch path fans out over rayon and
//! still returns vectors in input order.

pub mod config;
pub mod error;
pub mod types;

mod hash;
mod normalize;

pub use crate::config::{EmbeddingBackend, SemanticConfig};
pub use crate::error::SemanticError;
pub use crate::hash::{embed_bytes, HashEmbedder, EMBEDDING_DIM, HASH_MODEL_NAME, HASH_SEEDS};
pub use crate::types::SemanticEmbedding;

use crate::normalize::l2_norm;

/// Capability shared by every backend: text in, unit vector out.
pub trait Embedder: Send + Sync {
    /// Embed one text. Must be total and deterministic.
    fn embed(&self, text: &str) -> Vec<f32>;

    /// Embed each text independently, preserving order.
    fn embed_many(&self, texts: &[&str]) -> Vec<Vec<f32>> {
        texts.iter().map(|text| self.embed(text)).collect()
    }

    /// Length of every vector this backend returns.
    fn dimension(&self) -> usize;

    /// Provenance label stored alongside vectors.
    fn model_name(&self) -> &str;
}

/// Embed `text` with the default [`HashEmbedder`].
pub fn embed(text: &str) -> Vec<f32> {
    embed_bytes(text.as_bytes())
}

/// Batch variant of [`embed`]; no state is shared between texts.
pub fn embed_many<T: AsRef<str>>(texts: &[T]) -> Vec<Vec<f32>> {
    let refs: Vec<&str> = texts.iter().map(AsRef::as_ref).collect();
    HashEmbedder::new().embed_many(&refs)
}

/// Embed `text` and attach provenance for storage.
pub fn semanticize(doc_id: &str, text: &str, embedder: &dyn Embedder) -> SemanticEmbedding {
    let vector = embedder.embed(text);
    wrap(doc_id, vector, embedder)
}

/// Batch variant of [`semanticize`] that keeps `docs` order.
pub fn semanticize_batch<D, T>(docs: &[(D, T)], embedder: &dyn Embedder) -> Vec<SemanticEmbedding>
where
    D: AsRef<str>,
    T: AsRef<str>,
{
    if docs.is_empty() {
        return Vec::new();
    }
    let texts: Vec<&str> = docs.iter().map(|(_, text)| text.as_ref()).collect();
    let vectors = embedder.embed_many(&texts);
    docs.iter()
        .zip(vectors)
        .map(|((doc_id, _), vector)| wrap(doc_id.as_ref(), vector, embedder))
        .collect()
}

fn wrap(doc_id: &str, vector: Vec<f32>, embedder: &dyn Embedder) -> SemanticEmbedding {
    let normalized = l2_norm(&vector) > 0.0;
    SemanticEmbedding {
        doc_id: doc_id.to_string(),
        embedding_dim: vector.len(),
        vector,
        model_name: embedder.model_name().to_string(),
        normalized,
    }
}

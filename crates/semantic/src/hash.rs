//! Seeded BLAKE2b sketch behind [`HashEmbedder`].
//!
//! ```text
//! for seed in SEEDS:
//!     digest = BLAKE2b-256(text_bytes || seed)
//!     for (i, b) in digest: acc[i % DIM] += (b - 128) / 128
//! vector = acc / ||acc||   (left at zero when ||acc|| == 0)
//! ```
//!
//! The seeds and the digest algorithm are part of the stored-vector format.
//! Changing either invalidates every vector persisted by a caller.

use blake2::digest::consts::U32;
use blake2::{Blake2b, Digest};

use crate::normalize::l2_normalize_in_place;
use crate::Embedder;

type Blake2b256 = Blake2b<U32>;

/// Length of every vector produced by [`HashEmbedder`].
pub const EMBEDDING_DIM: usize = 128;

/// Salts mixed into the digest. Never reorder or edit.
pub const HASH_SEEDS: [&[u8]; 8] = [b"s1", b"s2", b"s3", b"s4", b"s5", b"s6", b"s7", b"s8"];

/// Label reported by [`HashEmbedder::model_name`] unless overridden.
pub const HASH_MODEL_NAME: &str = "blake2b-hash-128";

/// Deterministic, model-free embedder.
///
/// Stateless apart from its label, so one instance can be shared across
/// threads without synchronization.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HashEmbedder {
    model_name: String,
}

impl Default for HashEmbedder {
    fn default() -> Self {
        Self {
            model_name: HASH_MODEL_NAME.to_string(),
        }
    }
}

impl HashEmbedder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Same sketch, different provenance label.
    pub fn with_model_name(model_name: impl Into<String>) -> Self {
        Self {
            model_name: model_name.into(),
        }
    }
}

impl Embedder for HashEmbedder {
    fn embed(&self, text: &str) -> Vec<f32> {
        embed_bytes(text.as_bytes())
    }

    #[cfg(feature = "parallel")]
    fn embed_many(&self, texts: &[&str]) -> Vec<Vec<f32>> {
        use rayon::prelude::*;
        // Indexed collect keeps input order.
        texts.par_iter().map(|text| self.embed(text)).collect()
    }

    fn dimension(&self) -> usize {
        EMBEDDING_DIM
    }

    fn model_name(&self) -> &str {
        &self.model_name
    }
}

/// Embed raw bytes. Callers holding possibly-invalid UTF-8 should decode
/// lossily or drop invalid sequences before calling; the sketch itself
/// accepts any byte string.
pub fn embed_bytes(data: &[u8]) -> Vec<f32> {
    let mut acc = vec![0f32; EMBEDDING_DIM];
    for seed in HASH_SEEDS {
        let mut hasher = Blake2b256::new();
        hasher.update(data);
        hasher.update(seed);
        let digest = hasher.finalize();
        for (idx, &byte) in digest.iter().enumerate() {
            acc[idx % EMBEDDING_DIM] += (f32::from(byte) - 128.0) / 128.0;
        }
    }
    l2_normalize_in_place(&mut acc);
    acc
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::normalize::l2_norm;

    fn cosine(a: &[f32], b: &[f32]) -> f32 {
        let dot: f32 = a.iter().zip(b).map(|(x, y)| x * y).sum();
        dot / (l2_norm(a) * l2_norm(b))
    }

    #[test]
    fn embed_is_bit_identical_across_calls() {
        let e = HashEmbedder::new();
        let a = e.embed("hello");
        let b = e.embed("hello");
        let a_bits: Vec<u32> = a.iter().map(|x| x.to_bits()).collect();
        let b_bits: Vec<u32> = b.iter().map(|x| x.to_bits()).collect();
        assert_eq!(a_bits, b_bits);
    }

    #[test]
    fn embed_has_fixed_dimension_and_unit_norm() {
        let v = HashEmbedder::new().embed("hello");
        assert_eq!(v.len(), EMBEDDING_DIM);
        assert!((l2_norm(&v) - 1.0).abs() < 1e-5);
    }

    #[test]
    fn different_texts_point_in_different_directions() {
        let e = HashEmbedder::new();
        let hello = e.embed("hello");
        let goodbye = e.embed("goodbye");
        assert_ne!(hello, goodbye);
        assert!(cosine(&hello, &goodbye) < 1.0);
    }

    #[test]
    fn empty_text_still_hashes_the_seeds() {
        let v = embed_bytes(b"");
        assert_eq!(v.len(), EMBEDDING_DIM);
        assert!((l2_norm(&v) - 1.0).abs() < 1e-5);
        assert_eq!(v, embed_bytes(b""));
    }

    #[test]
    fn only_digest_width_slots_are_populated() {
        // 32-byte digests fold into the first 32 slots; the tail stays zero.
        let v = embed_bytes(b"note body");
        assert!(v[32..].iter().all(|&x| x == 0.0));
        assert!(v[..32].iter().any(|&x| x != 0.0));
    }

    #[test]
    fn values_stay_within_unit_range() {
        let v = HashEmbedder::new().embed("range check");
        assert!(v.iter().all(|x| (-1.0..=1.0).contains(x)));
    }

    #[test]
    fn embed_matches_embed_bytes() {
        let text = "Hello 世界 🌍";
        assert_eq!(HashEmbedder::new().embed(text), embed_bytes(text.as_bytes()));
    }

    #[test]
    fn single_seed_differs_from_full_sketch() {
        let mut acc = vec![0f32; EMBEDDING_DIM];
        let mut hasher = Blake2b256::new();
        hasher.update(b"abc");
        hasher.update(HASH_SEEDS[0]);
        for (idx, &byte) in hasher.finalize().iter().enumerate() {
            acc[idx] += (f32::from(byte) - 128.0) / 128.0;
        }
        l2_normalize_in_place(&mut acc);
        assert_ne!(acc, embed_bytes(b"abc"));
    }

    #[test]
    fn long_text_produces_unit_vector() {
        let long_text = "word ".repeat(10_000);
        let v = HashEmbedder::new().embed(&long_text);
        assert!((l2_norm(&v) - 1.0).abs() < 1e-5);
    }

    #[test]
    fn custom_model_name_is_reported() {
        let e = HashEmbedder::with_model_name("notes-v1");
        assert_eq!(e.model_name(), "notes-v1");
        assert_eq!(e.dimension(), EMBEDDING_DIM);
        assert_eq!(HashEmbedder::new().model_name(), HASH_MODEL_NAME);
    }

    #[test]
    fn embed_many_preserves_order() {
        let e = HashEmbedder::new();
        let texts = ["first", "second", "third"];
        let vectors = e.embed_many(&texts);
        assert_eq!(vectors.len(), 3);
        for (v, t) in vectors.iter().zip(texts) {
            assert_eq!(*v, e.embed(t));
        }
    }
}

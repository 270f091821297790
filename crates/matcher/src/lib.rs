//! # noteseek Matcher (`matcher`)
//!
//! ## Purpose
//!
//! `matcher` ranks a caller-supplied candidate set against a query vector. It
//! owns no storage and knows nothing about how vectors were produced: callers
//! hand in `(id, Option<vector>)` pairs and get back the best matches with
//! cosine scores.
//!
//! In a typical deployment you will:
//! - Embed notes with `semantic` at write time and persist the vectors.
//! - At query time, embed the query, load the stored vectors as
//!   [`Candidate`]s, and call [`Ranker::rank`].
//!
//! ## Core Types
//!
//! - [`MatchConfig`]: `limit`, `min_similarity`, [`FallbackPolicy`], and the
//!   expected vector `dimension`.
//! - [`Candidate`]: opaque id plus optional stored vector.
//! - [`RankedResult`]: [`ScoredCandidate`]s in descending score order, and
//!   whether the fallback policy supplied them.
//! - [`Ranker`]: validated config + the ranking algorithm.
//!
//! ## Threshold fallback
//!
//! When no candidate reaches `min_similarity`, the default
//! [`FallbackPolicy::TopRanked`] returns the top `limit` candidates anyway
//! rather than an empty list. [`FallbackPolicy::Strict`] turns that off.
//!
//! ## Example Usage
//!
//! ```
//! use matcher::{Candidate, MatchConfig, Ranker};
//!
//! let cfg = MatchConfig { dimension: 2, ..MatchConfig::default() };
//! let ranker = Ranker::new(cfg).expect("valid config");
//!
//! let candidates = vec![
//!     Candidate::new(1u64, vec![1.0, 0.0]),
//!     Candidate::without_vector(2u64),
//!     Candidate::new(3u64, vec![0.6, 0.8]),
//! ];
//! let result = ranker.rank(&[1.0, 0.0], &candidates).expect("dimensions match");
//! let ids: Vec<u64> = result.ids().copied().collect();
//! assert_eq!(ids, vec![1, 3]);
//! ```
//!
//! ## Observability
//!
//! Each call opens a `matcher.rank` tracing span. Fallbacks and rejected
//! inputs are logged at `warn`, the per-call summary at `debug`.

pub mod engine;
pub mod similarity;
pub mod types;

pub use crate::engine::{rank, Ranker};
pub use crate::similarity::cosine_similarity;
pub use crate::types::{
    Candidate, FallbackPolicy, MatchConfig, MatchError, RankedResult, ScoredCandidate,
    VectorRole, DEFAULT_DIMENSION,
};

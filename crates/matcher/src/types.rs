use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Vector length the ranker expects unless configured otherwise. Matches the
/// hashing embedder's output, but the ranker never depends on it directly.
pub const DEFAULT_DIMENSION: usize = 128;

/// What to do when no candidate reaches `min_similarity`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum FallbackPolicy {
    /// Ignore the threshold and return the top `limit` candidates anyway, so a
    /// miscalibrated threshold never turns a search into "nothing found".
    #[default]
    TopRanked,
    /// Honor the threshold; an empty filtered set yields an empty result.
    Strict,
}

/// Ranking knobs supplied by the caller per request.
///
/// Cheap to clone and serde-friendly so it can be embedded in higher-level
/// configs.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MatchConfig {
    /// Maximum number of results to return. Zero yields an empty result.
    #[serde(default = "MatchConfig::default_limit")]
    pub limit: usize,
    /// Minimum cosine similarity a candidate needs to pass the threshold.
    /// Values outside [-1.0, 1.0] are accepted and simply make the threshold
    /// unreachable or trivially satisfied.
    #[serde(default = "MatchConfig::default_min_similarity")]
    pub min_similarity: f32,
    #[serde(default)]
    pub fallback: FallbackPolicy,
    /// Required length of the query and every candidate vector.
    #[serde(default = "MatchConfig::default_dimension")]
    pub dimension: usize,
}

impl MatchConfig {
    pub(crate) fn default_limit() -> usize {
        10
    }

    pub(crate) fn default_min_similarity() -> f32 {
        0.5
    }

    pub(crate) fn default_dimension() -> usize {
        DEFAULT_DIMENSION
    }

    /// Defaults with an explicit limit and threshold.
    pub fn with_threshold(limit: usize, min_similarity: f32) -> Self {
        Self {
            limit,
            min_similarity,
            ..Self::default()
        }
    }

    pub fn validate(&self) -> Result<(), MatchError> {
        if self.min_similarity.is_nan() {
            return Err(MatchError::InvalidConfig(
                "min_similarity must not be NaN".into(),
            ));
        }
        if self.dimension == 0 {
            return Err(MatchError::InvalidConfig(
                "dimension must be greater than zero".into(),
            ));
        }
        Ok(())
    }
}

impl Default for MatchConfig {
    fn default() -> Self {
        Self {
            limit: Self::default_limit(),
            min_similarity: Self::default_min_similarity(),
            fallback: FallbackPolicy::default(),
            dimension: Self::default_dimension(),
        }
    }
}

/// A caller-owned identifier with its stored vector, if any.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Candidate<Id> {
    pub id: Id,
    /// Candidates without a vector are skipped, never scored as zero.
    pub vector: Option<Vec<f32>>,
}

impl<Id> Candidate<Id> {
    pub fn new(id: Id, vector: Vec<f32>) -> Self {
        Self {
            id,
            vector: Some(vector),
        }
    }

    pub fn without_vector(id: Id) -> Self {
        Self { id, vector: None }
    }
}

/// One ranked hit.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ScoredCandidate<Id> {
    pub id: Id,
    /// Cosine similarity in [-1.0, 1.0].
    pub score: f32,
}

/// Hits in descending score order, at most `limit` long.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RankedResult<Id> {
    pub hits: Vec<ScoredCandidate<Id>>,
    /// True when no candidate met the threshold and [`FallbackPolicy::TopRanked`]
    /// supplied the hits instead.
    #[serde(default)]
    pub fallback_applied: bool,
}

impl<Id> RankedResult<Id> {
    pub fn empty() -> Self {
        Self {
            hits: Vec::new(),
            fallback_applied: false,
        }
    }

    pub fn len(&self) -> usize {
        self.hits.len()
    }

    pub fn is_empty(&self) -> bool {
        self.hits.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ScoredCandidate<Id>> {
        self.hits.iter()
    }

    pub fn ids(&self) -> impl Iterator<Item = &Id> {
        self.hits.iter().map(|hit| &hit.id)
    }
}

impl<Id> IntoIterator for RankedResult<Id> {
    type Item = ScoredCandidate<Id>;
    type IntoIter = std::vec::IntoIter<ScoredCandidate<Id>>;

    fn into_iter(self) -> Self::IntoIter {
        self.hits.into_iter()
    }
}

/// Which vector failed a dimension check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VectorRole {
    Query,
    /// Candidate at this position in the caller's input.
    Candidate(usize),
    /// Right-hand operand of a standalone similarity call.
    Operand,
}

impl fmt::Display for VectorRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            VectorRole::Query => write!(f, "query"),
            VectorRole::Candidate(position) => write!(f, "candidate #{position}"),
            VectorRole::Operand => write!(f, "operand"),
        }
    }
}

/// Errors produced by the ranking layer. All of them are caller misuse.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum MatchError {
    /// A vector does not have the configured length.
    #[error("dimension mismatch for {vector}: expected {expected}, got {actual}")]
    DimensionMismatch {
        vector: VectorRole,
        expected: usize,
        actual: usize,
    },
    #[error("invalid match config: {0}")]
    InvalidConfig(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        let cfg = MatchConfig::default();
        assert!(cfg.validate().is_ok());
        assert_eq!(cfg.limit, 10);
        assert_eq!(cfg.min_similarity, 0.5);
        assert_eq!(cfg.fallback, FallbackPolicy::TopRanked);
        assert_eq!(cfg.dimension, DEFAULT_DIMENSION);
    }

    #[test]
    fn nan_threshold_rejected() {
        let cfg = MatchConfig::with_threshold(5, f32::NAN);
        match cfg.validate().expect_err("NaN threshold should be invalid") {
            MatchError::InvalidConfig(msg) => assert!(msg.contains("min_similarity")),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn zero_dimension_rejected() {
        let cfg = MatchConfig {
            dimension: 0,
            ..MatchConfig::default()
        };
        match cfg.validate().expect_err("zero dimension should be invalid") {
            MatchError::InvalidConfig(msg) => assert!(msg.contains("dimension")),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn out_of_range_threshold_is_accepted() {
        assert!(MatchConfig::with_threshold(3, 1.5).validate().is_ok());
        assert!(MatchConfig::with_threshold(3, -2.0).validate().is_ok());
    }

    #[test]
    fn config_deserializes_with_defaults() {
        let cfg: MatchConfig = serde_json::from_str(r#"{"limit": 3}"#).unwrap();
        assert_eq!(cfg.limit, 3);
        assert_eq!(cfg.min_similarity, 0.5);
        assert_eq!(cfg.fallback, FallbackPolicy::TopRanked);

        let cfg: MatchConfig = serde_json::from_str(r#"{"fallback": "strict"}"#).unwrap();
        assert_eq!(cfg.fallback, FallbackPolicy::Strict);
    }

    #[test]
    fn dimension_mismatch_message_names_the_vector() {
        let err = MatchError::DimensionMismatch {
            vector: VectorRole::Candidate(4),
            expected: 128,
            actual: 3,
        };
        let msg = err.to_string();
        assert!(msg.contains("candidate #4"));
        assert!(msg.contains("expected 128"));
        assert!(msg.contains("got 3"));
    }

    #[test]
    fn ranked_result_accessors() {
        let result = RankedResult {
            hits: vec![
                ScoredCandidate { id: 7, score: 0.9 },
                ScoredCandidate { id: 3, score: 0.4 },
            ],
            fallback_applied: false,
        };
        assert_eq!(result.len(), 2);
        assert_eq!(result.ids().copied().collect::<Vec<_>>(), vec![7, 3]);
        assert!(RankedResult::<u32>::empty().is_empty());
    }

    #[test]
    fn scored_candidate_serializes_for_api_boundary() {
        let hit = ScoredCandidate {
            id: "note-1".to_string(),
            score: 0.25,
        };
        let json = serde_json::to_value(&hit).unwrap();
        assert_eq!(json["id"], "note-1");
        assert_eq!(json["score"], 0.25);
    }
}

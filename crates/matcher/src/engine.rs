use std::cmp::Ordering;
use std::time::Instant;

use tracing::{debug, warn, Level};

use crate::similarity::{cosine_with_norm, l2_norm};
use crate::types::{
    Candidate, FallbackPolicy, MatchConfig, MatchError, RankedResult, ScoredCandidate, VectorRole,
};


/// Ranks caller-supplied candidates against a query vector.
///
/// Holds only its [`MatchConfig`]; every call is independent, so a single
/// `Ranker` can be shared across threads.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Ranker {
    cfg: MatchConfig,
}

impl Ranker {
    /// Validate `cfg` and build a ranker around it.
    pub fn new(cfg: MatchConfig) -> Result<Self, MatchError> {
        cfg.validate()?;
        Ok(Self { cfg })
    }

    pub fn config(&self) -> &MatchConfig {
        &self.cfg
    }

    /// Score, sort, threshold, and truncate.
    ///
    /// 1. Candidates with no vector are dropped; the rest get cosine scores.
    /// 2. Stable sort by descending score; equal scores keep input order.
    /// 3. Hits with `score >= min_similarity` are kept, up to `limit`.
    /// 4. If none pass, [`FallbackPolicy`] decides between the unfiltered
    ///    top `limit` and an empty result.
    pub fn rank<Id>(
        &self,
        query: &[f32],
        candidates: &[Candidate<Id>],
    ) -> Result<RankedResult<Id>, MatchError>
    where
        Id: Clone + Send + Sync,
    {
        let start = Instant::now();
        let span = tracing::span!(
            Level::DEBUG,
            "matcher.rank",
            candidates = candidates.len(),
            limit = self.cfg.limit,
            min_similarity = self.cfg.min_similarity
        );
        let _guard = span.enter();

        if query.len() != self.cfg.dimension {
            let err = MatchError::DimensionMismatch {
                vector: VectorRole::Query,
                expected: self.cfg.dimension,
                actual: query.len(),
            };
            warn!(error = %err, "rank_rejected");
            return Err(err);
        }

        let mut scored = match self.score_all(query, candidates) {
            Ok(scored) => scored,
            Err(err) => {
                warn!(error = %err, "rank_rejected");
                return Err(err);
            }
        };

        // `sort_by` is stable, which is what keeps ties in input order. Scores
        // are never NaN here, so the fallback arm is unreachable.
        scored.sort_by(|a, b| b.score.partial_cmp(&a.score).unwrap_or(Ordering::Equal));

        // Sorted descending, so the passing hits form a prefix.
        let passing = scored.partition_point(|hit| hit.score >= self.cfg.min_similarity);
        let scored_len = scored.len();

        let fallback_applied = passing == 0
            && !scored.is_empty()
            && self.cfg.fallback == FallbackPolicy::TopRanked;

        let keep = if passing > 0 {
            passing.min(self.cfg.limit)
        } else if fallback_applied {
            scored_len.min(self.cfg.limit)
        } else {
            0
        };
        scored.truncate(keep);

        if fallback_applied {
            warn!(
                scored = scored_len,
                min_similarity = self.cfg.min_similarity,
                returned = scored.len(),
                "rank_threshold_fallback"
            );
        }
        debug!(
            scored = scored_len,
            passing,
            returned = scored.len(),
            elapsed_micros = start.elapsed().as_micros() as u64,
            "rank_complete"
        );

        Ok(RankedResult {
            hits: scored,
            fallback_applied,
        })
    }

    #[cfg(not(feature = "parallel"))]
    fn score_all<Id: Clone>(
        &self,
        query: &[f32],
        candidates: &[Candidate<Id>],
    ) -> Result<Vec<ScoredCandidate<Id>>, MatchError> {
        let query_norm = l2_norm(query);
        candidates
            .iter()
            .enumerate()
            .filter_map(|(position, candidate)| {
                self.score_one(query, query_norm, position, candidate)
            })
            .collect()
    }

    #[cfg(feature = "parallel")]
    fn score_all<Id: Clone + Send + Sync>(
        &self,
        query: &[f32],
        candidates: &[Candidate<Id>],
    ) -> Result<Vec<ScoredCandidate<Id>>, MatchError> {
        use rayon::prelude::*;

        let query_norm = l2_norm(query);
        // Collecting into a Vec keeps input order, so the stable sort below
        // breaks ties exactly as the serial path does.
        candidates
            .par_iter()
            .enumerate()
            .filter_map(|(position, candidate)| {
                self.score_one(query, query_norm, position, candidate)
            })
            .collect()
    }

    fn score_one<Id: Clone>(
        &self,
        query: &[f32],
        query_norm: f32,
        position: usize,
        candidate: &Candidate<Id>,
    ) -> Option<Result<ScoredCandidate<Id>, MatchError>> {
        let vector = candidate.vector.as_deref()?;
        if vector.len() != self.cfg.dimension {
            return Some(Err(MatchError::DimensionMismatch {
                vector: VectorRole::Candidate(position),
                expected: self.cfg.dimension,
                actual: vector.len(),
            }));
        }
        Some(Ok(ScoredCandidate {
            id: candidate.id.clone(),
            score: cosine_with_norm(query, query_norm, vector),
        }))
    }
}

/// Rank `candidates` against `query` with the default dimension and the
/// [`FallbackPolicy::TopRanked`] policy.
pub fn rank<Id>(
    query: &[f32],
    candidates: &[Candidate<Id>],
    limit: usize,
    min_similarity: f32,
) -> Result<RankedResult<Id>, MatchError>
where
    Id: Clone + Send + Sync,
{
    Ranker::new(MatchConfig::with_threshold(limit, min_similarity))?.rank(query, candidates)
}

//! Workspace umbrella crate for noteseek.
//!
//! Stitches the deterministic embedder (`semantic`) and the ranker (`matcher`)
//! together so a note service can embed notes at write time and search them
//! at query time through one [`SearchEngine`]. Storage and transport stay with
//! the caller: the engine takes candidate vectors in and hands ranked ids back.

pub mod config;

pub use config::{ConfigLoadError, NoteseekConfig};
pub use matcher::{
    Candidate, FallbackPolicy, MatchConfig, MatchError, RankedResult, Ranker, ScoredCandidate,
    VectorRole, cosine_similarity, rank,
};
pub use semantic::{
    EMBEDDING_DIM, Embedder, EmbeddingBackend, HashEmbedder, SemanticConfig, SemanticEmbedding,
    SemanticError, embed, embed_many, semanticize, semanticize_batch,
};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info};

/// Errors surfaced by [`SearchEngine`].
#[derive(Debug, Error)]
pub enum SearchError {
    /// Query text was empty or whitespace only.
    #[error("query must not be empty")]
    EmptyQuery,
    #[error("semantic failure: {0}")]
    Semantic(#[from] SemanticError),
    #[error("ranking failure: {0}")]
    Match(#[from] MatchError),
    #[error("configuration failure: {0}")]
    Config(#[from] ConfigLoadError),
}

/// Text a note is embedded from: title and content on separate lines.
pub fn note_text(title: &str, content: &str) -> String {
    format!("{title}\n{content}")
}

/// A stored note as a caller might persist it.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Note {
    pub id: u64,
    pub title: String,
    pub content: String,
    /// Stored vector. `None` for notes written before embedding was enabled;
    /// such notes are never returned by a search.
    #[serde(default)]
    pub embedding: Option<Vec<f32>>,
}

impl Note {
    pub fn to_candidate(&self) -> Candidate<u64> {
        Candidate {
            id: self.id,
            vector: self.embedding.clone(),
        }
    }
}

/// Embedder and ranker composed for note search.
pub struct SearchEngine {
    embedder: Box<dyn Embedder>,
    ranker: Ranker,
}

impl SearchEngine {
    /// Pair an embedder with a ranking config. Their dimensions must agree.
    pub fn new(embedder: Box<dyn Embedder>, match_cfg: MatchConfig) -> Result<Self, SearchError> {
        if embedder.dimension() != match_cfg.dimension {
            return Err(MatchError::InvalidConfig(format!(
                "embedder `{}` produces {} floats but the ranker expects {}",
                embedder.model_name(),
                embedder.dimension(),
                match_cfg.dimension
            ))
            .into());
        }
        let ranker = Ranker::new(match_cfg)?;
        Ok(Self { embedder, ranker })
    }

    /// Build from a loaded YAML config.
    pub fn from_config(cfg: &NoteseekConfig) -> Result<Self, SearchError> {
        cfg.validate()?;
        let embedder = cfg.semantic.build()?;
        let engine = Self::new(embedder, cfg.matcher.clone())?;
        info!(
            model_name = %engine.embedder.model_name(),
            limit = engine.ranker.config().limit,
            min_similarity = engine.ranker.config().min_similarity,
            fallback = ?engine.ranker.config().fallback,
            "search_engine_ready"
        );
        Ok(engine)
    }

    pub fn embedder(&self) -> &dyn Embedder {
        self.embedder.as_ref()
    }

    pub fn ranker(&self) -> &Ranker {
        &self.ranker
    }

    /// Vector to store alongside a note.
    pub fn embed_note(&self, title: &str, content: &str) -> Vec<f32> {
        self.embedder.embed(&note_text(title, content))
    }

    /// Fill in missing embeddings; existing vectors are left as stored.
    pub fn backfill(&self, notes: &mut [Note]) -> usize {
        let missing: Vec<usize> = notes
            .iter()
            .enumerate()
            .filter(|(_, note)| note.embedding.is_none())
            .map(|(idx, _)| idx)
            .collect();
        if missing.is_empty() {
            return 0;
        }
        let texts: Vec<String> = missing
            .iter()
            .map(|&idx| note_text(&notes[idx].title, &notes[idx].content))
            .collect();
        let refs: Vec<&str> = texts.iter().map(String::as_str).collect();
        let vectors = self.embedder.embed_many(&refs);
        for (idx, vector) in missing.iter().zip(vectors) {
            notes[*idx].embedding = Some(vector);
        }
        debug!(backfilled = missing.len(), "notes_backfilled");
        missing.len()
    }

    pub fn embed_query(&self, query: &str) -> Result<Vec<f32>, SearchError> {
        if query.trim().is_empty() {
            return Err(SearchError::EmptyQuery);
        }
        Ok(self.embedder.embed(query))
    }

    /// Embed `query` and rank `candidates` against it.
    pub fn search<Id>(
        &self,
        query: &str,
        candidates: &[Candidate<Id>],
    ) -> Result<RankedResult<Id>, SearchError>
    where
        Id: Clone + Send + Sync,
    {
        let query_vector = self.embed_query(query)?;
        Ok(self.ranker.rank(&query_vector, candidates)?)
    }
}

impl Default for SearchEngine {
    fn default() -> Self {
        Self {
            embedder: Box::new(HashEmbedder::new()),
            ranker: Ranker::default(),
        }
    }
}

//! Offline job index builder.
//!
//! An operator-triggered batch job, not part of the request-serving path:
//! load and clean the raw corpus, encode every description through the
//! dense tower in one batched call, and persist the augmented table. Runs
//! to completion or fails outright; there is no timeout.

use super::manifest::IndexManifest;
use super::store::JobIndex;
use crate::corpus::JobCorpus;
use crate::embedding::Embedder;
use crate::error::IndexError;
use std::path::Path;
use std::sync::Arc;
use tracing::info;

/// Builds [`JobIndex`] artifacts from raw corpus files.
pub struct IndexBuilder {
    embedder: Arc<dyn Embedder>,
}

impl IndexBuilder {
    /// Creates a builder around an encoder.
    pub fn new(embedder: Arc<dyn Embedder>) -> Self {
        Self { embedder }
    }

    /// Builds an in-memory index from a raw CSV corpus.
    ///
    /// # Errors
    ///
    /// Returns [`IndexError::Corpus`] if the source is missing or
    /// malformed, [`IndexError::Embedding`] if encoding fails (including
    /// an unavailable model).
    pub fn build(&self, corpus_path: &Path) -> Result<JobIndex, IndexError> {
        let corpus = JobCorpus::load(corpus_path)?;
        info!(
            "Encoding {} descriptions with '{}'",
            corpus.len(),
            self.embedder.model_id()
        );

        let descriptions = corpus.descriptions();
        let embeddings = self.embedder.embed_batch(&descriptions)?;

        let manifest = IndexManifest::new(
            self.embedder.model_id().to_string(),
            self.embedder.embedding_dim(),
            corpus.len(),
        );
        JobIndex::from_parts(manifest, corpus.postings().to_vec(), embeddings)
    }

    /// Builds an index from `corpus_path` and persists it into `out_dir`.
    pub fn build_and_save(&self, corpus_path: &Path, out_dir: &Path) -> Result<JobIndex, IndexError> {
        let index = self.build(corpus_path)?;
        index.save(out_dir)?;
        Ok(index)
    }
}

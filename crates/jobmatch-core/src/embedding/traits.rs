//! Traits for the dense encoder seam.
//!
//! Both towers of the recommender (resume side and job side) pass through
//! the same encoder, so a single trait covers the whole dense path. The
//! trait also lets tests substitute a deterministic embedder without model
//! weights.

use crate::error::EmbeddingError;

/// Text-to-vector encoder interface.
///
/// Implementations must be `Send + Sync` so a single loaded model can be
/// shared by concurrent readers; encoding is a pure function of the text
/// given fixed weights.
pub trait Embedder: Send + Sync {
    /// Identifier of the underlying model (recorded in index manifests).
    fn model_id(&self) -> &str;

    /// Output vector dimension. Every embedding from this encoder has this
    /// length.
    fn embedding_dim(&self) -> usize;

    /// Maximum sequence length; longer inputs are truncated.
    fn max_sequence_length(&self) -> usize;

    /// Encodes a single text into a fixed-length vector.
    fn embed(&self, text: &str) -> Result<Vec<f32>, EmbeddingError>;

    /// Encodes a batch of texts, order-preserving: `output[i]` corresponds
    /// to `texts[i]`. Splitting the input into smaller batches must produce
    /// identical embeddings up to numerical tolerance.
    fn embed_batch(&self, texts: &[String]) -> Result<Vec<Vec<f32>>, EmbeddingError>;
}

//! Configuration for the MiniLM sentence encoder.

use serde::{Deserialize, Serialize};

/// Configuration for MiniLM-class sentence encoders.
///
/// The default matches `sentence-transformers/all-MiniLM-L6-v2`: a 6-layer
/// BERT encoder with 384-dimensional hidden states, mean pooling, and L2
/// normalization, truncating input at 256 tokens.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct MiniLmConfig {
    /// Model identifier (e.g. "sentence-transformers/all-MiniLM-L6-v2")
    pub model_id: String,

    /// Whether to apply L2 normalization to pooled embeddings
    pub normalize_embeddings: bool,

    /// Hidden dimension size (embedding output dimension)
    pub hidden_size: usize,

    /// Maximum tokens per input; longer texts are truncated
    pub max_sequence_tokens: usize,
}

impl Default for MiniLmConfig {
    fn default() -> Self {
        Self {
            model_id: "sentence-transformers/all-MiniLM-L6-v2".to_string(),
            normalize_embeddings: true,
            hidden_size: crate::config::EMBEDDING_DIM,
            max_sequence_tokens: crate::config::MAX_SEQUENCE_TOKENS,
        }
    }
}

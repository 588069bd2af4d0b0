//! Production configuration constants.
//!
//! Constants that define the production configuration for jobmatch. These
//! values are used throughout the codebase and in tests to keep the two
//! ranking modes consistent.

// =============================================================================
// Dense Tower Configuration
// =============================================================================

/// Embedding vector dimension (MiniLM hidden_size).
///
/// The all-MiniLM-L6-v2 sentence encoder produces 384-dimensional
/// embeddings. This must match the model's `hidden_size` configuration;
/// the job index records the dimension it was built with and rejects
/// mismatches on load.
pub const EMBEDDING_DIM: usize = 384;

/// Whether dense embeddings are L2-normalized.
///
/// The tower emits unit vectors, so the dot product of two embeddings
/// already equals their cosine similarity. The ranker still divides by the
/// norms so that unnormalized vectors (e.g. lexical ones) score correctly.
pub const EMBEDDINGS_NORMALIZED: bool = true;

/// Maximum tokens fed to the dense tower per text.
///
/// Longer resumes and descriptions are truncated at this limit, matching
/// the sequence limit the tower was trained with.
pub const MAX_SEQUENCE_TOKENS: usize = 256;

// =============================================================================
// Recommendation Defaults
// =============================================================================

/// Default number of recommendations returned when the caller does not ask
/// for a specific top-n.
pub const DEFAULT_TOP_N: usize = 5;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_embedding_dim_matches_minilm() {
        // all-MiniLM-L6-v2 produces 384-dimensional embeddings
        assert_eq!(EMBEDDING_DIM, 384);
    }

    #[test]
    fn test_sequence_limit_reasonable() {
        let max_tokens = MAX_SEQUENCE_TOKENS;
        assert!(max_tokens <= 512, "MAX_SEQUENCE_TOKENS exceeds model limit");
        assert!(max_tokens >= 64, "MAX_SEQUENCE_TOKENS too small to be useful");
    }
}

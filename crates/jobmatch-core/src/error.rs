//! Error types for jobmatch-core.
//!
//! This module defines error types used across the core library: corpus
//! loading, embedding inference, ranking, and index persistence errors.

use thiserror::Error;

/// Errors that can occur while loading or cleaning a job corpus.
#[derive(Debug, Error)]
pub enum CorpusError {
    /// Source table missing or unreadable
    #[error("Failed to read job corpus {path}: {reason}")]
    Read {
        /// Path of the offending source file
        path: String,
        /// Underlying I/O failure
        reason: String,
    },
    /// Source table present but rows could not be decoded
    #[error("Malformed job corpus {path}: {reason}")]
    Parse {
        /// Path of the offending source file
        path: String,
        /// Underlying decode failure
        reason: String,
    },
}

/// Errors that can occur during embedding operations.
#[derive(Debug, Clone, Error)]
pub enum EmbeddingError {
    /// Model weights unreachable (missing from disk, no way to fetch)
    #[error("Model unavailable: {0}")]
    ModelUnavailable(String),
    /// Weights present but could not be loaded into a model
    #[error("Failed to load model: {0}")]
    ModelLoad(String),
    /// Tokenizer definition unreachable or invalid
    #[error("Tokenizer unavailable: {0}")]
    TokenizerUnavailable(String),
    /// Failed to tokenize text
    #[error("Tokenization failed: {0}")]
    TokenizationFailed(String),
    /// Failed to create tensor during inference
    #[error("Failed to create tensor: {0}")]
    TensorCreation(String),
    /// Forward pass through the model failed
    #[error("Inference failed: {0}")]
    InferenceFailed(String),
    /// Invalid model configuration
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

/// Errors that can occur while vectorizing or ranking candidates.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum RankingError {
    /// No candidates to rank against
    #[error("Corpus is empty, nothing to rank against")]
    EmptyCorpus,
    /// Caller asked for a top-k of zero
    #[error("Invalid top-k: {0} (must be at least 1)")]
    InvalidTopK(usize),
    /// Query and candidate vectors come from different spaces
    #[error("Dimension mismatch: expected {expected}, got {actual}")]
    DimensionMismatch {
        /// Expected vector dimension
        expected: usize,
        /// Actual vector dimension received
        actual: usize,
    },
}

/// Errors that can occur while building, saving, or opening a job index.
#[derive(Debug, Error)]
pub enum IndexError {
    /// Filesystem failure while reading or writing an index artifact
    #[error("Index I/O error at {path}: {reason}")]
    Io {
        /// Path of the offending artifact file
        path: String,
        /// Underlying I/O failure
        reason: String,
    },
    /// Manifest or posting table could not be encoded/decoded
    #[error("Index serialization error: {0}")]
    Serialization(String),
    /// Index was written by an incompatible schema version
    #[error("Unsupported index schema version {found} (supported: {supported})")]
    SchemaVersion {
        /// Version found in the manifest
        found: u32,
        /// Highest version this build can read
        supported: u32,
    },
    /// Embedding column width disagrees with the manifest
    #[error("Index dimension mismatch: manifest says {expected}, embeddings have {actual}")]
    DimensionMismatch {
        /// Dimension recorded in the manifest
        expected: usize,
        /// Dimension implied by the embedding file
        actual: usize,
    },
    /// Embedding file does not cover every posting row
    #[error("Truncated embedding column: {rows} rows require {expected} bytes, found {actual}")]
    TruncatedEmbeddings {
        /// Number of posting rows in the index
        rows: usize,
        /// Bytes required for `rows` embeddings
        expected: usize,
        /// Bytes actually present
        actual: usize,
    },
    /// Corpus loading failed during an index build
    #[error(transparent)]
    Corpus(#[from] CorpusError),
    /// Embedding failed during an index build
    #[error(transparent)]
    Embedding(#[from] EmbeddingError),
}

/// Errors surfaced by the online recommendation path.
///
/// A thin union over ranking and embedding failures so both recommendation
/// modes share one result surface. The lexical path can only ever produce
/// the `Ranking` variant.
#[derive(Debug, Error)]
pub enum RecommendError {
    #[error(transparent)]
    Ranking(#[from] RankingError),
    #[error(transparent)]
    Embedding(#[from] EmbeddingError),
}

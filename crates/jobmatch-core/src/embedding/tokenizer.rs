//! Tokenizer wrapper for the dense encoder.

use crate::error::EmbeddingError;
use tokenizers::tokenizer::{Tokenizer, TruncationDirection, TruncationParams, TruncationStrategy};

/// Handle for a configured WordPiece tokenizer.
///
/// Wraps a HuggingFace tokenizer with right-side truncation at the model's
/// sequence limit. Owned by the embedder; clone to share across threads.
pub struct TokenizerHandle {
    tokenizer: Tokenizer,
    max_length: usize,
}

impl TokenizerHandle {
    /// Creates a tokenizer from serialized JSON bytes with truncation
    /// configured at `max_length` tokens.
    ///
    /// # Errors
    ///
    /// Returns [`EmbeddingError::TokenizerUnavailable`] if the bytes do not
    /// deserialize, [`EmbeddingError::InvalidConfig`] if truncation cannot
    /// be applied.
    pub fn from_bytes(tokenizer_bytes: Vec<u8>, max_length: usize) -> Result<Self, EmbeddingError> {
        let mut tokenizer = Tokenizer::from_bytes(tokenizer_bytes).map_err(|e| {
            EmbeddingError::TokenizerUnavailable(format!("Failed to deserialize tokenizer: {}", e))
        })?;

        tokenizer
            .with_truncation(Some(TruncationParams {
                max_length,
                stride: 0,
                strategy: TruncationStrategy::LongestFirst,
                direction: TruncationDirection::Right,
            }))
            .map_err(|e| {
                EmbeddingError::InvalidConfig(format!("Failed to configure truncation: {}", e))
            })?;

        Ok(Self {
            tokenizer,
            max_length,
        })
    }

    /// Returns the configured maximum sequence length.
    pub fn max_length(&self) -> usize {
        self.max_length
    }

    /// Tokenizes text into token IDs, including special tokens.
    ///
    /// # Errors
    ///
    /// Returns [`EmbeddingError::TokenizationFailed`] if encoding fails or
    /// produces no tokens.
    pub fn tokenize(&self, text: &str) -> Result<Vec<u32>, EmbeddingError> {
        let encoding = self
            .tokenizer
            .encode(text, true)
            .map_err(|e| EmbeddingError::TokenizationFailed(format!("Encoding failed: {}", e)))?;

        let ids = encoding.get_ids();
        if ids.is_empty() {
            return Err(EmbeddingError::TokenizationFailed(
                "Tokenizer returned no tokens".to_string(),
            ));
        }
        Ok(ids.to_vec())
    }
}

impl Clone for TokenizerHandle {
    fn clone(&self) -> Self {
        Self {
            tokenizer: self.tokenizer.clone(),
            max_length: self.max_length,
        }
    }
}

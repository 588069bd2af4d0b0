//! Dense sentence-encoder tower.
//!
//! Both the resume and job sides of the recommender pass through the same
//! frozen MiniLM encoder (a "two-tower" design with shared weights). The
//! module provides:
//!
//! - [`Embedder`] - the encoder seam, implementable by test fakes
//! - [`MiniLmConfig`] - model configuration (all-MiniLM-L6-v2 defaults)
//! - [`MiniLmEmbedder`] - Candle-based production implementation
//! - [`TokenizerHandle`] - WordPiece tokenizer with truncation
//! - [`SharedEncoder`] / [`EncoderSources`] - once-only lazy process init

mod traits;

pub mod config;
pub mod model;
pub mod shared;
pub mod tokenizer;

pub use config::MiniLmConfig;
pub use model::MiniLmEmbedder;
pub use shared::{EncoderSources, SharedEncoder};
pub use tokenizer::TokenizerHandle;
pub use traits::Embedder;

//! Process-wide lazy encoder initialization.
//!
//! Loading the MiniLM weights is expensive, so a process holds exactly one
//! encoder, created on first use. The cell below guards the load: if
//! several threads hit an uninitialized encoder at once, one performs the
//! load and the rest block until it finishes; a failed load is cached and
//! surfaced identically to every caller rather than retried implicitly.

use super::config::MiniLmConfig;
use super::model::MiniLmEmbedder;
use crate::error::EmbeddingError;
use std::path::{Path, PathBuf};
use std::sync::{Arc, OnceLock};

/// File locations of the encoder artifacts.
///
/// The conventional layout is a single model directory containing
/// `model.safetensors`, `config.json`, and `tokenizer.json` (the upstream
/// snapshot layout).
#[derive(Debug, Clone)]
pub struct EncoderSources {
    pub model_path: PathBuf,
    pub config_path: PathBuf,
    pub tokenizer_path: PathBuf,
}

impl EncoderSources {
    /// Sources for the conventional model-directory layout.
    pub fn from_dir(dir: &Path) -> Self {
        Self {
            model_path: dir.join("model.safetensors"),
            config_path: dir.join("config.json"),
            tokenizer_path: dir.join("tokenizer.json"),
        }
    }
}

/// Once-initialized shared handle to the process's encoder.
pub struct SharedEncoder {
    sources: EncoderSources,
    config: MiniLmConfig,
    cell: OnceLock<Result<Arc<MiniLmEmbedder>, EmbeddingError>>,
}

impl SharedEncoder {
    /// Creates an uninitialized handle; no file is touched until
    /// [`get`](Self::get) is first called.
    pub fn new(sources: EncoderSources, config: MiniLmConfig) -> Self {
        Self {
            sources,
            config,
            cell: OnceLock::new(),
        }
    }

    /// Returns the encoder, loading it on first use.
    ///
    /// # Errors
    ///
    /// Returns [`EmbeddingError::ModelUnavailable`] (or the underlying load
    /// failure) if the artifacts cannot be read; the same error is returned
    /// on every subsequent call without re-reading the filesystem.
    pub fn get(&self) -> Result<Arc<MiniLmEmbedder>, EmbeddingError> {
        self.cell
            .get_or_init(|| load_encoder(&self.sources, self.config.clone()).map(Arc::new))
            .clone()
    }
}

/// Reads the artifact files and constructs the encoder.
fn load_encoder(
    sources: &EncoderSources,
    config: MiniLmConfig,
) -> Result<MiniLmEmbedder, EmbeddingError> {
    let model_bytes = std::fs::read(&sources.model_path).map_err(|e| {
        EmbeddingError::ModelUnavailable(format!(
            "{}: {}",
            sources.model_path.display(),
            e
        ))
    })?;
    let config_bytes = std::fs::read(&sources.config_path).map_err(|e| {
        EmbeddingError::ModelUnavailable(format!(
            "{}: {}",
            sources.config_path.display(),
            e
        ))
    })?;
    let tokenizer_bytes = std::fs::read(&sources.tokenizer_path).map_err(|e| {
        EmbeddingError::TokenizerUnavailable(format!(
            "{}: {}",
            sources.tokenizer_path.display(),
            e
        ))
    })?;

    MiniLmEmbedder::from_bytes(model_bytes, &config_bytes, tokenizer_bytes, config)
}

//! Build-index command: offline corpus encoding.

use crate::config;
use anyhow::{Context, Result};
use jobmatch_core::embedding::{EncoderSources, MiniLmConfig, SharedEncoder};
use jobmatch_core::index::IndexBuilder;
use std::path::Path;
use tracing::info;

/// Builds a dense job index from a raw corpus CSV and writes it to `out`.
pub fn execute(corpus: &Path, out: &Path, model_dir: Option<&Path>) -> Result<()> {
    let model_dir = config::find_model_dir(model_dir)?;
    info!("Using model directory {}", model_dir.display());

    let encoder = SharedEncoder::new(
        EncoderSources::from_dir(&model_dir),
        MiniLmConfig::default(),
    );
    let embedder = encoder
        .get()
        .with_context(|| format!("Failed to load encoder from {}", model_dir.display()))?;

    let builder = IndexBuilder::new(embedder);
    let index = builder
        .build_and_save(corpus, out)
        .with_context(|| format!("Failed to build index from {}", corpus.display()))?;

    println!(
        "Indexed {} postings ({}d embeddings) into {}",
        index.len(),
        index.dimension(),
        out.display()
    );
    Ok(())
}

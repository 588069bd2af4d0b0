//! Recommend command: rank jobs for a resume in either mode.

use crate::config;
use anyhow::{anyhow, Context, Result};
use jobmatch_core::corpus::JobCorpus;
use jobmatch_core::embedding::{EncoderSources, MiniLmConfig, SharedEncoder};
use jobmatch_core::index::JobIndex;
use jobmatch_core::recommend::{recommend_dense, recommend_lexical, Recommendation};
use std::path::Path;
use tracing::info;

/// Runs one recommendation request.
///
/// Exactly one of `corpus` (lexical mode) or `index` (dense mode) must be
/// given; the clap definition enforces that before we get here.
pub fn execute(
    resume: &Path,
    corpus: Option<&Path>,
    index: Option<&Path>,
    top_n: usize,
    profession: Option<&str>,
    model_dir: Option<&Path>,
) -> Result<Vec<Recommendation>> {
    let resume_text = read_resume(resume)?;

    if let Some(index_dir) = index {
        let index = JobIndex::open(index_dir)
            .with_context(|| format!("Failed to open index {}", index_dir.display()))?;

        let model_dir = config::find_model_dir(model_dir)?;
        let encoder = SharedEncoder::new(
            EncoderSources::from_dir(&model_dir),
            MiniLmConfig::default(),
        );
        let embedder = encoder
            .get()
            .with_context(|| format!("Failed to load encoder from {}", model_dir.display()))?;

        info!("Dense ranking against {} postings", index.len());
        let recs = recommend_dense(&resume_text, &index, embedder.as_ref(), top_n, profession)?;
        Ok(recs)
    } else {
        let corpus_path =
            corpus.ok_or_else(|| anyhow!("Either --corpus or --index must be given"))?;
        let corpus = JobCorpus::load(corpus_path)?;

        info!("Lexical ranking against {} postings", corpus.len());
        let recs = recommend_lexical(&resume_text, &corpus, top_n, profession)?;
        Ok(recs)
    }
}

/// Reads a plain-text resume file.
///
/// Byte decoding only (lossy UTF-8); an unreadable or empty file is an
/// error. No fallback text is ever substituted.
fn read_resume(path: &Path) -> Result<String> {
    let bytes = std::fs::read(path)
        .with_context(|| format!("Failed to read resume file {}", path.display()))?;
    let text = String::from_utf8_lossy(&bytes).into_owned();

    if text.trim().is_empty() {
        return Err(anyhow!("Resume file {} is empty", path.display()));
    }
    Ok(text)
}

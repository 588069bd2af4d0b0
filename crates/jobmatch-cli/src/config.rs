//! Model path resolution for the CLI.
//!
//! Finds the encoder artifacts (`model.safetensors`, `config.json`,
//! `tokenizer.json`) across environments:
//! - Custom: `--model-dir` flag or `$JOBMATCH_MODEL_DIR`
//! - Installed: platform data directory (`<data dir>/models`)
//! - Development: workspace `assets/models/` directory

use anyhow::{anyhow, Result};
use directories::ProjectDirs;
use std::path::{Path, PathBuf};

const MODEL_FILENAME: &str = "model.safetensors";

/// Environment variable overriding the model directory
const MODEL_DIR_ENV: &str = "JOBMATCH_MODEL_DIR";

/// Finds the directory containing the encoder artifacts.
///
/// Search order: explicit flag, `$JOBMATCH_MODEL_DIR`, the platform data
/// directory, then the workspace assets directory (development checkout).
pub fn find_model_dir(custom_dir: Option<&Path>) -> Result<PathBuf> {
    if let Some(dir) = custom_dir {
        return Ok(dir.to_path_buf());
    }

    if let Ok(dir) = std::env::var(MODEL_DIR_ENV) {
        let path = PathBuf::from(dir);
        if path.join(MODEL_FILENAME).exists() {
            return Ok(path);
        }
    }

    if let Some(dirs) = ProjectDirs::from("dev", "jobmatch", "Jobmatch") {
        let path = dirs.data_dir().join("models");
        if path.join(MODEL_FILENAME).exists() {
            return Ok(path);
        }
    }

    // Workspace assets (development). CARGO_MANIFEST_DIR points to
    // crates/jobmatch-cli.
    let workspace_path = PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .parent()
        .and_then(|p| p.parent())
        .map(|p| p.join("assets/models"));
    if let Some(ref path) = workspace_path {
        if path.join(MODEL_FILENAME).exists() {
            return Ok(path.clone());
        }
    }

    Err(anyhow!(
        "Model files not found. Place {} (with config.json and tokenizer.json) \
         in a directory and point ${} or --model-dir at it.",
        MODEL_FILENAME,
        MODEL_DIR_ENV
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_custom_dir_wins() {
        let custom = PathBuf::from("/tmp/custom-models");
        let dir = find_model_dir(Some(&custom)).unwrap();
        assert_eq!(dir, custom);
    }
}

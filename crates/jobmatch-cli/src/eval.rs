//! Eval command: Precision@K against labeled data.

use anyhow::{Context, Result};
use jobmatch_core::evaluation::precision_at_k;
use std::collections::HashSet;
use std::path::Path;

/// Computes and prints Precision@K for a ranked id list.
pub fn execute(relevant: &Path, recommended: &Path, k: usize) -> Result<()> {
    let relevant: HashSet<String> = read_ids(relevant)?.into_iter().collect();
    let recommended = read_ids(recommended)?;

    let precision = precision_at_k(&relevant, &recommended, k)?;
    println!("P@{}: {:.3}", k, precision);
    Ok(())
}

/// Reads one id per line, skipping blanks.
fn read_ids(path: &Path) -> Result<Vec<String>> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read id file {}", path.display()))?;
    Ok(content
        .lines()
        .map(|l| l.trim())
        .filter(|l| !l.is_empty())
        .map(|l| l.to_string())
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_read_ids_skips_blank_lines() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "job1\n\n job2 \njob3").unwrap();
        file.flush().unwrap();

        let ids = read_ids(file.path()).unwrap();
        assert_eq!(ids, vec!["job1", "job2", "job3"]);
    }
}

//! Index manifest: version and compatibility metadata.

use serde::{Deserialize, Serialize};
use std::time::{SystemTime, UNIX_EPOCH};

/// Current schema version for the index format.
///
/// Increment when making breaking changes to the persistence format.
/// Version history:
/// - v1: manifest.json + jobs.json + embeddings.bin (row-major f32-LE)
pub const CURRENT_SCHEMA_VERSION: u32 = 1;

/// Manifest stored as `manifest.json` in the index directory.
///
/// Records what the index was built from so readers can refuse
/// incompatible artifacts: the index must be rebuilt whenever the encoder
/// model or the corpus changes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IndexManifest {
    /// Schema version of this index
    pub schema_version: u32,
    /// Minimum schema version required to read this index
    pub min_compatible_version: u32,
    /// Identifier of the encoder the embeddings came from
    pub model_id: String,
    /// Embedding dimension (e.g. 384 for MiniLM)
    pub embedding_dimension: usize,
    /// Number of posting rows in the index
    pub posting_count: usize,
    /// Unix timestamp (seconds) when the index was built
    pub created_at: u64,
}

impl IndexManifest {
    /// Creates a manifest for a freshly built index.
    pub fn new(model_id: String, embedding_dimension: usize, posting_count: usize) -> Self {
        Self {
            schema_version: CURRENT_SCHEMA_VERSION,
            min_compatible_version: 1,
            model_id,
            embedding_dimension,
            posting_count,
            created_at: current_timestamp(),
        }
    }

    /// Checks whether this build can read the index.
    pub fn is_compatible(&self) -> bool {
        CURRENT_SCHEMA_VERSION >= self.min_compatible_version
    }
}

/// Current Unix timestamp in seconds; 0 if the clock is before the epoch.
fn current_timestamp() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_manifest_is_compatible() {
        let manifest = IndexManifest::new("test-model".to_string(), 384, 10);
        assert!(manifest.is_compatible());
        assert_eq!(manifest.schema_version, CURRENT_SCHEMA_VERSION);
        assert_eq!(manifest.embedding_dimension, 384);
        assert_eq!(manifest.posting_count, 10);
    }

    #[test]
    fn test_future_version_is_incompatible() {
        let mut manifest = IndexManifest::new("test-model".to_string(), 384, 0);
        manifest.min_compatible_version = CURRENT_SCHEMA_VERSION + 1;
        assert!(!manifest.is_compatible());
    }
}

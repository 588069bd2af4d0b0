//! Persisted job index: postings with their precomputed embeddings.
//!
//! The on-disk artifact is a directory of three files:
//!
//! - `manifest.json` - schema version, model id, dimension, row count
//! - `jobs.json` - the cleaned postings, in index order
//! - `embeddings.bin` - row-major little-endian f32, one row per posting
//!
//! The explicit layout (rather than an opaque serialized object) keeps the
//! artifact readable by other tools and lets loading validate every
//! invariant: compatible schema, matching dimensionality, and an embedding
//! for every row.

use super::manifest::{IndexManifest, CURRENT_SCHEMA_VERSION};
use crate::corpus::JobPosting;
use crate::error::IndexError;
use std::fs;
use std::path::Path;
use tracing::info;

const MANIFEST_FILE: &str = "manifest.json";
const POSTINGS_FILE: &str = "jobs.json";
const EMBEDDINGS_FILE: &str = "embeddings.bin";

/// A job corpus where every posting carries a dense embedding.
///
/// Built offline by [`IndexBuilder`](super::IndexBuilder); consumed
/// read-only by the online ranking path. Row `i` of `embeddings()`
/// corresponds to posting `i`.
#[derive(Debug, Clone)]
pub struct JobIndex {
    manifest: IndexManifest,
    postings: Vec<JobPosting>,
    embeddings: Vec<Vec<f32>>,
}

impl JobIndex {
    /// Assembles an index from parts, validating row correspondence.
    pub(crate) fn from_parts(
        manifest: IndexManifest,
        postings: Vec<JobPosting>,
        embeddings: Vec<Vec<f32>>,
    ) -> Result<Self, IndexError> {
        if postings.len() != embeddings.len() {
            return Err(IndexError::TruncatedEmbeddings {
                rows: postings.len(),
                expected: postings.len() * manifest.embedding_dimension * 4,
                actual: embeddings.len() * manifest.embedding_dimension * 4,
            });
        }
        for row in &embeddings {
            if row.len() != manifest.embedding_dimension {
                return Err(IndexError::DimensionMismatch {
                    expected: manifest.embedding_dimension,
                    actual: row.len(),
                });
            }
        }
        Ok(Self {
            manifest,
            postings,
            embeddings,
        })
    }

    /// Opens an index directory, validating schema and shape.
    ///
    /// # Errors
    ///
    /// Returns [`IndexError::SchemaVersion`] for artifacts written by an
    /// incompatible version, [`IndexError::DimensionMismatch`] /
    /// [`IndexError::TruncatedEmbeddings`] for corrupted embedding columns,
    /// and I/O or serialization errors for unreadable files.
    pub fn open(dir: &Path) -> Result<Self, IndexError> {
        let manifest_path = dir.join(MANIFEST_FILE);
        let manifest_bytes = fs::read(&manifest_path).map_err(|e| IndexError::Io {
            path: manifest_path.display().to_string(),
            reason: e.to_string(),
        })?;
        let manifest: IndexManifest = serde_json::from_slice(&manifest_bytes)
            .map_err(|e| IndexError::Serialization(e.to_string()))?;

        if !manifest.is_compatible() {
            return Err(IndexError::SchemaVersion {
                found: manifest.schema_version,
                supported: CURRENT_SCHEMA_VERSION,
            });
        }

        let postings_path = dir.join(POSTINGS_FILE);
        let postings_bytes = fs::read(&postings_path).map_err(|e| IndexError::Io {
            path: postings_path.display().to_string(),
            reason: e.to_string(),
        })?;
        let postings: Vec<JobPosting> = serde_json::from_slice(&postings_bytes)
            .map_err(|e| IndexError::Serialization(e.to_string()))?;

        let embeddings_path = dir.join(EMBEDDINGS_FILE);
        let embedding_bytes = fs::read(&embeddings_path).map_err(|e| IndexError::Io {
            path: embeddings_path.display().to_string(),
            reason: e.to_string(),
        })?;
        let embeddings =
            decode_embeddings(&embedding_bytes, postings.len(), manifest.embedding_dimension)?;

        info!(
            "Opened job index with {} postings ({}d embeddings) from {}",
            postings.len(),
            manifest.embedding_dimension,
            dir.display()
        );
        Self::from_parts(manifest, postings, embeddings)
    }

    /// Writes the index artifact into `dir`, creating it if needed.
    pub fn save(&self, dir: &Path) -> Result<(), IndexError> {
        fs::create_dir_all(dir).map_err(|e| IndexError::Io {
            path: dir.display().to_string(),
            reason: e.to_string(),
        })?;

        let manifest_json = serde_json::to_vec_pretty(&self.manifest)
            .map_err(|e| IndexError::Serialization(e.to_string()))?;
        write_file(&dir.join(MANIFEST_FILE), &manifest_json)?;

        let postings_json = serde_json::to_vec(&self.postings)
            .map_err(|e| IndexError::Serialization(e.to_string()))?;
        write_file(&dir.join(POSTINGS_FILE), &postings_json)?;

        write_file(&dir.join(EMBEDDINGS_FILE), &encode_embeddings(&self.embeddings))?;

        info!(
            "Saved job index with {} postings to {}",
            self.postings.len(),
            dir.display()
        );
        Ok(())
    }

    /// Returns the manifest.
    pub fn manifest(&self) -> &IndexManifest {
        &self.manifest
    }

    /// Returns the postings in index order.
    pub fn postings(&self) -> &[JobPosting] {
        &self.postings
    }

    /// Returns the embedding rows, aligned with [`postings`](Self::postings).
    pub fn embeddings(&self) -> &[Vec<f32>] {
        &self.embeddings
    }

    /// Returns the embedding dimensionality.
    pub fn dimension(&self) -> usize {
        self.manifest.embedding_dimension
    }

    /// Returns the number of indexed postings.
    pub fn len(&self) -> usize {
        self.postings.len()
    }

    /// Returns `true` if the index holds no postings.
    pub fn is_empty(&self) -> bool {
        self.postings.is_empty()
    }
}

/// Writes `bytes` to `path`, mapping I/O failures to [`IndexError::Io`].
fn write_file(path: &Path, bytes: &[u8]) -> Result<(), IndexError> {
    fs::write(path, bytes).map_err(|e| IndexError::Io {
        path: path.display().to_string(),
        reason: e.to_string(),
    })
}

/// Serializes embedding rows as row-major little-endian f32.
fn encode_embeddings(rows: &[Vec<f32>]) -> Vec<u8> {
    let mut buf = Vec::with_capacity(rows.iter().map(|r| r.len() * 4).sum());
    for row in rows {
        for value in row {
            buf.extend_from_slice(&value.to_le_bytes());
        }
    }
    buf
}

/// Deserializes the embedding column, checking that it covers every row.
fn decode_embeddings(
    bytes: &[u8],
    rows: usize,
    dimension: usize,
) -> Result<Vec<Vec<f32>>, IndexError> {
    let expected = rows * dimension * 4;
    if bytes.len() != expected {
        return Err(IndexError::TruncatedEmbeddings {
            rows,
            expected,
            actual: bytes.len(),
        });
    }

    let mut values = bytes
        .chunks_exact(4)
        .map(|c| f32::from_le_bytes([c[0], c[1], c[2], c[3]]));
    let mut embeddings = Vec::with_capacity(rows);
    for _ in 0..rows {
        embeddings.push(values.by_ref().take(dimension).collect());
    }
    Ok(embeddings)
}

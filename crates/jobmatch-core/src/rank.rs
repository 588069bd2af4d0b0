//! Cosine similarity ranking over candidate vectors.
//!
//! Both ranking modes funnel through this module: one query vector against
//! N candidate vectors from the same space, scored by exact cosine
//! similarity and cut down to the top k with deterministic tie-breaking.
//!
//! Zero-vector policy: cosine similarity involving a zero vector is defined
//! as `0.0` rather than an error, in both modes, so degenerate inputs (an
//! empty description, a resume with no vocabulary overlap) rank last
//! instead of aborting the request.

use crate::error::RankingError;

/// Computes the cosine similarity of two equal-length vectors.
///
/// `dot(a, b) / (norm(a) * norm(b))`; if either vector is the zero vector
/// the result is `0.0` (see module docs).
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> f32 {
    let dot: f32 = a.iter().zip(b.iter()).map(|(&x, &y)| x * y).sum();
    let norm_a: f32 = a.iter().map(|x| x * x).sum::<f32>().sqrt();
    let norm_b: f32 = b.iter().map(|y| y * y).sum::<f32>().sqrt();

    if norm_a == 0.0 || norm_b == 0.0 {
        return 0.0;
    }
    dot / (norm_a * norm_b)
}

/// Scores every candidate against the query.
///
/// Returns one cosine-similarity score per candidate, in input order.
///
/// # Errors
///
/// Returns [`RankingError::EmptyCorpus`] if `candidates` is empty and
/// [`RankingError::DimensionMismatch`] if any candidate's width differs
/// from the query's — vectors produced by different ranking modes are
/// never comparable.
pub fn rank<C: AsRef<[f32]>>(query: &[f32], candidates: &[C]) -> Result<Vec<f32>, RankingError> {
    if candidates.is_empty() {
        return Err(RankingError::EmptyCorpus);
    }

    let mut scores = Vec::with_capacity(candidates.len());
    for candidate in candidates {
        let candidate = candidate.as_ref();
        if candidate.len() != query.len() {
            return Err(RankingError::DimensionMismatch {
                expected: query.len(),
                actual: candidate.len(),
            });
        }
        scores.push(cosine_similarity(query, candidate));
    }
    Ok(scores)
}

/// Returns the indices of the `k` highest scores, descending.
///
/// Ties keep original corpus order (stable sort), which guarantees
/// reproducible output when multiple postings carry identical text. A `k`
/// larger than the candidate count returns every index.
///
/// # Errors
///
/// Returns [`RankingError::InvalidTopK`] if `k` is zero.
pub fn top_k(scores: &[f32], k: usize) -> Result<Vec<usize>, RankingError> {
    if k == 0 {
        return Err(RankingError::InvalidTopK(k));
    }

    let mut indices: Vec<usize> = (0..scores.len()).collect();
    // Stable sort: equal scores preserve ascending index order
    indices.sort_by(|&a, &b| scores[b].total_cmp(&scores[a]));
    indices.truncate(k.min(scores.len()));
    Ok(indices)
}

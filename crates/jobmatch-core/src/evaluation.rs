//! Offline ranking-quality evaluation.
//!
//! Validates recommendation quality against labeled data; not part of the
//! online path.

use crate::error::RankingError;
use std::collections::HashSet;

/// Computes Precision@K for a ranked recommendation list.
///
/// Takes the first `k` entries of `recommended` and counts how many appear
/// in `relevant`. The denominator is the fixed `k`: if fewer than `k`
/// recommendations are available, the missing slots count as misses. This
/// is the strict Precision@K definition — one matching recommendation out
/// of one returned still scores `1/k`, not `1.0`.
///
/// # Errors
///
/// Returns [`RankingError::InvalidTopK`] if `k` is zero.
///
/// # Examples
///
/// ```
/// use jobmatch_core::evaluation::precision_at_k;
/// use std::collections::HashSet;
///
/// let relevant: HashSet<String> =
///     ["job1", "job2", "job3"].iter().map(|s| s.to_string()).collect();
/// let recommended: Vec<String> =
///     ["job2", "job4", "job1", "job5"].iter().map(|s| s.to_string()).collect();
///
/// let p = precision_at_k(&relevant, &recommended, 3).unwrap();
/// assert!((p - 2.0 / 3.0).abs() < 1e-9);
/// ```
pub fn precision_at_k(
    relevant: &HashSet<String>,
    recommended: &[String],
    k: usize,
) -> Result<f64, RankingError> {
    if k == 0 {
        return Err(RankingError::InvalidTopK(0));
    }

    let hits = recommended
        .iter()
        .take(k)
        .filter(|id| relevant.contains(*id))
        .count();
    Ok(hits as f64 / k as f64)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ids(values: &[&str]) -> Vec<String> {
        values.iter().map(|s| s.to_string()).collect()
    }

    fn id_set(values: &[&str]) -> HashSet<String> {
        values.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_precision_at_3() {
        let relevant = id_set(&["job1", "job2", "job3"]);
        let recommended = ids(&["job2", "job4", "job1", "job5"]);
        let p = precision_at_k(&relevant, &recommended, 3).unwrap();
        assert!((p - 2.0 / 3.0).abs() < 1e-9);
    }

    #[test]
    fn test_short_list_divides_by_fixed_k() {
        // One matching recommendation with k=3 is 1/3, not 1/1
        let relevant = id_set(&["job1"]);
        let recommended = ids(&["job1"]);
        let p = precision_at_k(&relevant, &recommended, 3).unwrap();
        assert!((p - 1.0 / 3.0).abs() < 1e-9);
    }

    #[test]
    fn test_no_hits() {
        let relevant = id_set(&["job1"]);
        let recommended = ids(&["job7", "job8"]);
        assert_eq!(precision_at_k(&relevant, &recommended, 2).unwrap(), 0.0);
    }

    #[test]
    fn test_all_hits() {
        let relevant = id_set(&["job1", "job2"]);
        let recommended = ids(&["job1", "job2"]);
        assert_eq!(precision_at_k(&relevant, &recommended, 2).unwrap(), 1.0);
    }

    #[test]
    fn test_only_first_k_count() {
        // A hit beyond position k is ignored
        let relevant = id_set(&["job9"]);
        let recommended = ids(&["job1", "job2", "job9"]);
        assert_eq!(precision_at_k(&relevant, &recommended, 2).unwrap(), 0.0);
    }

    #[test]
    fn test_k_zero_is_an_error() {
        let result = precision_at_k(&id_set(&["job1"]), &ids(&["job1"]), 0);
        assert_eq!(result.unwrap_err(), RankingError::InvalidTopK(0));
    }

    #[test]
    fn test_empty_recommendations() {
        let p = precision_at_k(&id_set(&["job1"]), &[], 3).unwrap();
        assert_eq!(p, 0.0);
    }
}

//! Online recommendation path.
//!
//! Ties the two ranking modes together: turn the resume and the candidate
//! descriptions into comparable vectors, score with cosine similarity, cut
//! to the top n. The lexical mode refits TF-IDF per request over the
//! corpus; the dense mode encodes the resume against a precomputed
//! [`JobIndex`]. Scores are carried at full precision here; display
//! rounding happens at the output layer.

use crate::corpus::{JobCorpus, JobPosting};
use crate::embedding::Embedder;
use crate::error::{RankingError, RecommendError};
use crate::index::JobIndex;
use crate::lexical;
use crate::rank::{rank, top_k};
use serde::Serialize;
use tracing::debug;

/// One ranked job match.
#[derive(Debug, Clone, Serialize)]
pub struct Recommendation {
    pub title: String,
    pub company: String,
    pub location: String,
    #[serde(rename = "jobUrl")]
    pub job_url: String,
    /// Cosine similarity against the resume, full precision
    pub score: f32,
}

impl Recommendation {
    fn new(posting: &JobPosting, score: f32) -> Self {
        Self {
            title: posting.title.clone(),
            company: posting.company.clone(),
            location: posting.location.clone(),
            job_url: posting.job_url.clone(),
            score,
        }
    }
}

/// Recommends jobs by per-request TF-IDF over the resume and corpus.
///
/// When `profession` is given, only postings scraped under that profession
/// are considered (subset keeps corpus order).
///
/// # Errors
///
/// Returns [`RankingError::InvalidTopK`] for `top_n == 0` and
/// [`RankingError::EmptyCorpus`] when no postings survive the filter.
pub fn recommend_lexical(
    resume_text: &str,
    corpus: &JobCorpus,
    top_n: usize,
    profession: Option<&str>,
) -> Result<Vec<Recommendation>, RecommendError> {
    if top_n == 0 {
        return Err(RankingError::InvalidTopK(0).into());
    }

    let candidates = filter_postings(corpus.postings(), profession);
    if candidates.is_empty() {
        return Err(RankingError::EmptyCorpus.into());
    }

    let descriptions: Vec<String> = candidates.iter().map(|p| p.description.clone()).collect();
    let (resume_vector, job_vectors) = lexical::vectorize(resume_text, &descriptions)?;
    let scores = rank(&resume_vector, &job_vectors)?;
    let order = top_k(&scores, top_n)?;

    debug!(
        "Lexical ranking over {} postings, returning {}",
        candidates.len(),
        order.len()
    );
    Ok(order
        .into_iter()
        .map(|i| Recommendation::new(candidates[i], scores[i]))
        .collect())
}

/// Recommends jobs by dense embeddings against a prebuilt index.
///
/// The resume passes through the same tower the index was built with; a
/// dimension mismatch (index built by a different model) is rejected
/// rather than scored.
///
/// # Errors
///
/// Ranking errors as in [`recommend_lexical`], plus
/// [`crate::error::EmbeddingError`] when the resume cannot be encoded.
pub fn recommend_dense(
    resume_text: &str,
    index: &JobIndex,
    embedder: &dyn Embedder,
    top_n: usize,
    profession: Option<&str>,
) -> Result<Vec<Recommendation>, RecommendError> {
    if top_n == 0 {
        return Err(RankingError::InvalidTopK(0).into());
    }

    let rows: Vec<(&JobPosting, &Vec<f32>)> = index
        .postings()
        .iter()
        .zip(index.embeddings())
        .filter(|(p, _)| matches_profession(p, profession))
        .collect();
    if rows.is_empty() {
        return Err(RankingError::EmptyCorpus.into());
    }

    let resume_vector = embedder.embed(resume_text)?;
    let job_vectors: Vec<&Vec<f32>> = rows.iter().map(|(_, e)| *e).collect();
    let scores = rank(&resume_vector, &job_vectors)?;
    let order = top_k(&scores, top_n)?;

    debug!(
        "Dense ranking over {} postings, returning {}",
        rows.len(),
        order.len()
    );
    Ok(order
        .into_iter()
        .map(|i| Recommendation::new(rows[i].0, scores[i]))
        .collect())
}

fn filter_postings<'a>(postings: &'a [JobPosting], profession: Option<&str>) -> Vec<&'a JobPosting> {
    postings
        .iter()
        .filter(|p| matches_profession(p, profession))
        .collect()
}

fn matches_profession(posting: &JobPosting, profession: Option<&str>) -> bool {
    match profession {
        Some(wanted) => posting.profession.as_deref() == Some(wanted),
        None => true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn posting(title: &str, description: &str, profession: &str) -> JobPosting {
        JobPosting {
            title: title.to_string(),
            company: "Acme".to_string(),
            location: "Remote".to_string(),
            description: description.to_string(),
            job_url: format!("https://jobs.example/{}", title.replace(' ', "-")),
            profession: Some(profession.to_string()),
            job_type: None,
            company_logo_url: None,
            company_rating: None,
            date_published: None,
            source: None,
        }
    }

    fn sample_corpus() -> JobCorpus {
        JobCorpus::from_postings(vec![
            posting(
                "Backend Engineer",
                "rust backend services and distributed systems",
                "software engineer",
            ),
            posting(
                "Math Teacher",
                "classroom teaching algebra geometry students",
                "teacher",
            ),
            posting(
                "Platform Engineer",
                "rust kubernetes infrastructure platform",
                "software engineer",
            ),
        ])
    }

    #[test]
    fn test_lexical_returns_min_of_top_n_and_corpus() {
        let corpus = sample_corpus();
        let recs = recommend_lexical("rust systems", &corpus, 10, None).unwrap();
        assert_eq!(recs.len(), 3);

        let recs = recommend_lexical("rust systems", &corpus, 2, None).unwrap();
        assert_eq!(recs.len(), 2);
    }

    #[test]
    fn test_lexical_scores_non_increasing() {
        let corpus = sample_corpus();
        let recs = recommend_lexical("rust backend services", &corpus, 3, None).unwrap();
        for pair in recs.windows(2) {
            assert!(pair[0].score >= pair[1].score);
        }
        assert_eq!(recs[0].title, "Backend Engineer");
    }

    #[test]
    fn test_lexical_is_deterministic() {
        let corpus = sample_corpus();
        let a = recommend_lexical("rust infrastructure", &corpus, 3, None).unwrap();
        let b = recommend_lexical("rust infrastructure", &corpus, 3, None).unwrap();
        let urls_a: Vec<_> = a.iter().map(|r| r.job_url.clone()).collect();
        let urls_b: Vec<_> = b.iter().map(|r| r.job_url.clone()).collect();
        assert_eq!(urls_a, urls_b);
        for (x, y) in a.iter().zip(&b) {
            assert_eq!(x.score, y.score);
        }
    }

    #[test]
    fn test_lexical_empty_corpus() {
        let corpus = JobCorpus::from_postings(vec![]);
        let result = recommend_lexical("rust", &corpus, 5, None);
        assert!(matches!(
            result,
            Err(RecommendError::Ranking(RankingError::EmptyCorpus))
        ));
    }

    #[test]
    fn test_lexical_top_n_zero() {
        let corpus = sample_corpus();
        let result = recommend_lexical("rust", &corpus, 0, None);
        assert!(matches!(
            result,
            Err(RecommendError::Ranking(RankingError::InvalidTopK(0)))
        ));
    }

    #[test]
    fn test_profession_filter_restricts_candidates() {
        let corpus = sample_corpus();
        let recs = recommend_lexical("rust systems", &corpus, 10, Some("teacher")).unwrap();
        assert_eq!(recs.len(), 1);
        assert_eq!(recs[0].title, "Math Teacher");
    }

    #[test]
    fn test_profession_filter_with_no_matches() {
        let corpus = sample_corpus();
        let result = recommend_lexical("rust", &corpus, 5, Some("chartered accountant"));
        assert!(matches!(
            result,
            Err(RecommendError::Ranking(RankingError::EmptyCorpus))
        ));
    }
}

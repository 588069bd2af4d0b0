//! Lexical TF-IDF vectorizer for the lightweight ranking mode.
//!
//! The vectorizer is fit jointly over `[resume] + descriptions` on every
//! ranking call: the vocabulary and document frequencies are derived purely
//! from that joint set, with no persisted state between requests. The same
//! job corpus can therefore score slightly differently depending on which
//! resume is queried, because the query contributes to the document
//! frequency denominator. This per-request refit is deliberate (see
//! DESIGN.md).
//!
//! Weighting: raw term counts scaled by smoothed IDF
//! `ln((1 + n) / (1 + df)) + 1`, rows L2-normalized so cosine similarity
//! reduces to a dot product of unit vectors.

use crate::error::RankingError;
use std::collections::HashMap;

/// English stopwords excluded from the vocabulary.
const STOP_WORDS: &[&str] = &[
    "a", "about", "above", "after", "again", "against", "all", "am", "an", "and", "any", "are",
    "as", "at", "be", "because", "been", "before", "being", "below", "between", "both", "but",
    "by", "can", "cannot", "could", "did", "do", "does", "doing", "down", "during", "each",
    "few", "for", "from", "further", "had", "has", "have", "having", "he", "her", "here",
    "hers", "herself", "him", "himself", "his", "how", "i", "if", "in", "into", "is", "it",
    "its", "itself", "me", "more", "most", "my", "myself", "no", "nor", "not", "of", "off",
    "on", "once", "only", "or", "other", "our", "ours", "ourselves", "out", "over", "own",
    "same", "shall", "she", "should", "so", "some", "such", "than", "that", "the", "their",
    "theirs", "them", "themselves", "then", "there", "these", "they", "this", "those",
    "through", "to", "too", "under", "until", "up", "very", "was", "we", "were", "what",
    "when", "where", "which", "while", "who", "whom", "why", "will", "with", "would", "you",
    "your", "yours", "yourself", "yourselves",
];

/// Vectorizes a query against a corpus in one joint TF-IDF space.
///
/// Builds the joint document set `[query] + corpus`, fits vocabulary and
/// document frequencies over it, and returns the query's weight vector
/// plus one vector per corpus document, all in the same vocabulary space.
/// Vocabulary indices follow first-seen token order, so for a fixed query
/// and corpus (including order) the output is fully deterministic.
///
/// # Errors
///
/// Returns [`RankingError::EmptyCorpus`] if `corpus` is empty.
pub fn vectorize(
    query: &str,
    corpus: &[String],
) -> Result<(Vec<f32>, Vec<Vec<f32>>), RankingError> {
    if corpus.is_empty() {
        return Err(RankingError::EmptyCorpus);
    }

    let mut documents = Vec::with_capacity(corpus.len() + 1);
    documents.push(tokenize(query));
    for text in corpus {
        documents.push(tokenize(text));
    }

    // Vocabulary in first-seen order, document frequency per term
    let mut vocabulary: HashMap<String, usize> = HashMap::new();
    let mut doc_freq: Vec<usize> = Vec::new();
    for tokens in &documents {
        let mut seen = std::collections::HashSet::new();
        for token in tokens {
            let idx = *vocabulary.entry(token.clone()).or_insert_with(|| {
                doc_freq.push(0);
                doc_freq.len() - 1
            });
            if seen.insert(idx) {
                doc_freq[idx] += 1;
            }
        }
    }

    let n = documents.len() as f32;
    let idf: Vec<f32> = doc_freq
        .iter()
        .map(|&df| ((1.0 + n) / (1.0 + df as f32)).ln() + 1.0)
        .collect();

    let dims = vocabulary.len();
    let mut vectors: Vec<Vec<f32>> = documents
        .iter()
        .map(|tokens| weigh(tokens, &vocabulary, &idf, dims))
        .collect();

    let query_vector = vectors.remove(0);
    Ok((query_vector, vectors))
}

/// Builds one L2-normalized TF-IDF row.
fn weigh(
    tokens: &[String],
    vocabulary: &HashMap<String, usize>,
    idf: &[f32],
    dims: usize,
) -> Vec<f32> {
    let mut vector = vec![0.0f32; dims];
    for token in tokens {
        if let Some(&idx) = vocabulary.get(token) {
            vector[idx] += idf[idx];
        }
    }

    let norm: f32 = vector.iter().map(|x| x * x).sum::<f32>().sqrt();
    if norm > 0.0 {
        for x in vector.iter_mut() {
            *x /= norm;
        }
    }
    vector
}

/// Tokenizes text: lowercase, split on non-alphanumeric runs, drop tokens
/// shorter than two characters and stopwords.
fn tokenize(text: &str) -> Vec<String> {
    text.to_lowercase()
        .split(|c: char| !c.is_alphanumeric())
        .filter(|w| w.len() >= 2)
        .filter(|w| !STOP_WORDS.contains(w))
        .map(|w| w.to_string())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rank::cosine_similarity;

    fn corpus(docs: &[&str]) -> Vec<String> {
        docs.iter().map(|d| d.to_string()).collect()
    }

    #[test]
    fn test_empty_corpus_is_an_error() {
        let result = vectorize("python developer", &[]);
        assert_eq!(result.unwrap_err(), RankingError::EmptyCorpus);
    }

    #[test]
    fn test_vector_count_and_shared_space() {
        let docs = corpus(&["rust systems programming", "python data science"]);
        let (query, candidates) = vectorize("rust programming", &docs).unwrap();

        assert_eq!(candidates.len(), 2);
        assert_eq!(candidates[0].len(), query.len());
        assert_eq!(candidates[1].len(), query.len());
    }

    #[test]
    fn test_matching_document_scores_higher() {
        let docs = corpus(&[
            "rust systems programming and backend services",
            "kindergarten teacher with classroom experience",
        ]);
        let (query, candidates) = vectorize("rust backend programming", &docs).unwrap();

        let rust_score = cosine_similarity(&query, &candidates[0]);
        let teacher_score = cosine_similarity(&query, &candidates[1]);
        assert!(rust_score > teacher_score);
        assert!(rust_score > 0.0);
        assert_eq!(teacher_score, 0.0);
    }

    #[test]
    fn test_deterministic_for_fixed_inputs() {
        let docs = corpus(&["sql analytics dashboards", "embedded c firmware"]);
        let first = vectorize("sql dashboards", &docs).unwrap();
        let second = vectorize("sql dashboards", &docs).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_rows_are_unit_length() {
        let docs = corpus(&["rust rust rust services"]);
        let (query, candidates) = vectorize("rust services", &docs).unwrap();

        for v in std::iter::once(&query).chain(candidates.iter()) {
            let norm: f32 = v.iter().map(|x| x * x).sum::<f32>().sqrt();
            assert!((norm - 1.0).abs() < 1e-5, "row norm {} not unit", norm);
        }
    }

    #[test]
    fn test_stopwords_and_short_tokens_excluded() {
        let docs = corpus(&["the a an is to of x y"]);
        let (query, candidates) = vectorize("the of", &docs).unwrap();
        // Nothing survives tokenization, so both rows are empty-vocabulary
        assert!(query.is_empty());
        assert!(candidates[0].is_empty());
    }

    #[test]
    fn test_query_only_terms_stay_in_vocabulary() {
        let docs = corpus(&["warehouse logistics"]);
        let (query, candidates) = vectorize("kubernetes", &docs).unwrap();
        // Disjoint vocabularies: query token occupies a dimension the
        // corpus never touches, so similarity is zero but defined
        assert_eq!(query.len(), candidates[0].len());
        assert_eq!(cosine_similarity(&query, &candidates[0]), 0.0);
    }
}

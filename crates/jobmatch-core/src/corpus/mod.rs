//! Job corpus model: postings, loading, and cleaning.
//!
//! The corpus is a CSV table of scraped job postings. Loading deduplicates
//! rows and normalizes description text; afterwards the corpus is treated
//! as immutable, and row order is stable so that vector index and posting
//! always correspond during a ranking call.

mod normalize;

pub use normalize::{normalize, normalize_opt};

use crate::error::CorpusError;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;
use tracing::info;

/// A single job posting row.
///
/// Field names follow the scraper's camelCase CSV headers on the wire.
/// `description` tolerates a missing column or empty cell (normalizes to
/// the empty string); the provenance fields are optional throughout.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JobPosting {
    pub title: String,
    pub company: String,
    pub location: String,
    #[serde(default)]
    pub description: String,
    #[serde(rename = "jobUrl")]
    pub job_url: String,
    /// Search term used when this posting was scraped
    #[serde(default)]
    pub profession: Option<String>,
    #[serde(rename = "jobType", default)]
    pub job_type: Option<String>,
    #[serde(rename = "companyLogoUrl", default)]
    pub company_logo_url: Option<String>,
    #[serde(rename = "companyRating", default)]
    pub company_rating: Option<f32>,
    #[serde(rename = "datePublished", default)]
    pub date_published: Option<String>,
    #[serde(default)]
    pub source: Option<String>,
}

impl JobPosting {
    /// Key used for duplicate detection during corpus cleaning.
    fn dedup_key(&self) -> (String, String, String, String) {
        (
            self.profession.clone().unwrap_or_default(),
            self.title.clone(),
            self.company.clone(),
            self.description.clone(),
        )
    }
}

/// An ordered, cleaned collection of job postings.
///
/// Loaded once per process and immutable for the duration of a ranking
/// request. Cleaning drops exact duplicates on the
/// (profession, title, company, description) tuple, keeping the first
/// occurrence, then normalizes every description.
#[derive(Debug, Clone, Default)]
pub struct JobCorpus {
    postings: Vec<JobPosting>,
}

impl JobCorpus {
    /// Loads and cleans a corpus from a CSV file.
    ///
    /// # Errors
    ///
    /// Returns [`CorpusError::Read`] if the file is missing or unreadable,
    /// [`CorpusError::Parse`] if a row cannot be decoded.
    pub fn load(path: &Path) -> Result<Self, CorpusError> {
        let mut reader = csv::Reader::from_path(path).map_err(|e| CorpusError::Read {
            path: path.display().to_string(),
            reason: e.to_string(),
        })?;

        let mut raw = Vec::new();
        for row in reader.deserialize::<JobPosting>() {
            let posting = row.map_err(|e| CorpusError::Parse {
                path: path.display().to_string(),
                reason: e.to_string(),
            })?;
            raw.push(posting);
        }

        let corpus = Self::from_postings(raw);
        info!(
            "Loaded {} postings from {}",
            corpus.len(),
            path.display()
        );
        Ok(corpus)
    }

    /// Cleans an in-memory set of postings: dedup first, then normalize
    /// descriptions (duplicates are detected on the raw description text,
    /// matching the acquisition pipeline's cleaning order).
    pub fn from_postings(raw: Vec<JobPosting>) -> Self {
        let mut seen = HashSet::new();
        let mut postings = Vec::with_capacity(raw.len());

        for mut posting in raw {
            if !seen.insert(posting.dedup_key()) {
                continue;
            }
            posting.description = normalize(&posting.description);
            postings.push(posting);
        }

        Self { postings }
    }

    /// Returns the cleaned postings in stable order.
    pub fn postings(&self) -> &[JobPosting] {
        &self.postings
    }

    /// Returns the number of postings.
    pub fn len(&self) -> usize {
        self.postings.len()
    }

    /// Returns `true` if the corpus holds no postings.
    pub fn is_empty(&self) -> bool {
        self.postings.is_empty()
    }

    /// Returns every description, in posting order.
    pub fn descriptions(&self) -> Vec<String> {
        self.postings.iter().map(|p| p.description.clone()).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn posting(title: &str, company: &str, description: &str) -> JobPosting {
        JobPosting {
            title: title.to_string(),
            company: company.to_string(),
            location: "Remote".to_string(),
            description: description.to_string(),
            job_url: format!("https://jobs.example/{}", title.replace(' ', "-")),
            profession: Some("software engineer".to_string()),
            job_type: None,
            company_logo_url: None,
            company_rating: None,
            date_published: None,
            source: None,
        }
    }

    #[test]
    fn test_dedup_keeps_first_occurrence() {
        let corpus = JobCorpus::from_postings(vec![
            posting("Backend Engineer", "Acme", "Rust services"),
            posting("Backend Engineer", "Acme", "Rust services"),
            posting("Backend Engineer", "Other", "Rust services"),
        ]);
        assert_eq!(corpus.len(), 2);
        assert_eq!(corpus.postings()[0].company, "Acme");
        assert_eq!(corpus.postings()[1].company, "Other");
    }

    #[test]
    fn test_descriptions_are_normalized() {
        let corpus = JobCorpus::from_postings(vec![posting(
            "Data Engineer",
            "Acme",
            "<p>Build   pipelines</p>",
        )]);
        assert_eq!(corpus.postings()[0].description, "Build pipelines");
    }

    #[test]
    fn test_row_order_is_stable() {
        let corpus = JobCorpus::from_postings(vec![
            posting("A", "c1", "first"),
            posting("B", "c2", "second"),
            posting("C", "c3", "third"),
        ]);
        let titles: Vec<_> = corpus.postings().iter().map(|p| p.title.as_str()).collect();
        assert_eq!(titles, vec!["A", "B", "C"]);
    }

    #[test]
    fn test_load_missing_file() {
        let result = JobCorpus::load(Path::new("/nonexistent/jobs.csv"));
        assert!(matches!(result, Err(CorpusError::Read { .. })));
    }

    #[test]
    fn test_load_csv_with_missing_description() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "title,company,location,jobUrl,description").unwrap();
        writeln!(file, "Engineer,Acme,Remote,https://jobs.example/1,").unwrap();
        file.flush().unwrap();

        let corpus = JobCorpus::load(file.path()).unwrap();
        assert_eq!(corpus.len(), 1);
        assert_eq!(corpus.postings()[0].description, "");
    }

    #[test]
    fn test_load_csv_with_optional_columns() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            "profession,title,company,location,description,jobUrl,jobType,companyRating"
        )
        .unwrap();
        writeln!(
            file,
            "teacher,Math Teacher,Springfield High,\"Springfield, IL\",<b>Algebra</b>,https://jobs.example/6,full-time,4.2"
        )
        .unwrap();
        file.flush().unwrap();

        let corpus = JobCorpus::load(file.path()).unwrap();
        let p = &corpus.postings()[0];
        assert_eq!(p.profession.as_deref(), Some("teacher"));
        assert_eq!(p.description, "Algebra");
        assert_eq!(p.company_rating, Some(4.2));
    }
}

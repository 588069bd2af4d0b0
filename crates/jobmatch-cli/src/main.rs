//! Jobmatch CLI - resume to job recommendations from the command line.
//!
//! # Usage
//!
//! ```bash
//! # Build a dense job index from a scraped corpus (offline, needs model files)
//! jobmatch build-index --corpus data/all_jobs.csv --out data/index
//!
//! # Lexical recommendations straight from the corpus
//! jobmatch recommend --resume resume.txt --corpus data/all_jobs.csv
//!
//! # Dense recommendations against a prebuilt index
//! jobmatch recommend --resume resume.txt --index data/index --top-n 10 --json
//!
//! # Precision@K against labeled data
//! jobmatch eval --relevant relevant.txt --recommended recs.txt -k 5
//! ```

mod build_index;
mod config;
mod eval;
mod output;
mod recommend;

use anyhow::Result;
use clap::{Parser, Subcommand};
use jobmatch_core::config::DEFAULT_TOP_N;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Jobmatch: match a resume against scraped job postings.
#[derive(Parser)]
#[command(name = "jobmatch", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Command {
    /// Build a dense job index from a raw corpus CSV (offline batch job)
    BuildIndex {
        /// Raw job corpus CSV
        #[arg(long)]
        corpus: PathBuf,

        /// Output index directory
        #[arg(long)]
        out: PathBuf,

        /// Custom model directory (default: $JOBMATCH_MODEL_DIR, then
        /// platform data dir, then workspace assets)
        #[arg(long)]
        model_dir: Option<PathBuf>,
    },

    /// Recommend jobs for a plain-text resume
    Recommend {
        /// Plain-text resume file
        #[arg(long)]
        resume: PathBuf,

        /// Raw corpus CSV: rank lexically, refitting TF-IDF per request
        #[arg(long, conflicts_with = "index", required_unless_present = "index")]
        corpus: Option<PathBuf>,

        /// Prebuilt index directory: rank with dense embeddings
        #[arg(long)]
        index: Option<PathBuf>,

        /// Number of recommendations to return
        #[arg(long, default_value_t = DEFAULT_TOP_N)]
        top_n: usize,

        /// Only consider postings scraped under this profession
        #[arg(long)]
        profession: Option<String>,

        /// Custom model directory (dense mode only)
        #[arg(long)]
        model_dir: Option<PathBuf>,

        /// Output results as JSON (full-precision scores)
        #[arg(long)]
        json: bool,
    },

    /// Compute Precision@K for a ranked recommendation list
    Eval {
        /// File of relevant job ids, one per line
        #[arg(long)]
        relevant: PathBuf,

        /// File of recommended job ids, ranked best-first, one per line
        #[arg(long)]
        recommended: PathBuf,

        /// Cutoff position
        #[arg(short, long)]
        k: usize,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose {
        EnvFilter::new("info")
    } else {
        EnvFilter::new("warn")
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();

    match cli.command {
        Command::BuildIndex {
            corpus,
            out,
            model_dir,
        } => build_index::execute(&corpus, &out, model_dir.as_deref()),
        Command::Recommend {
            resume,
            corpus,
            index,
            top_n,
            profession,
            model_dir,
            json,
        } => {
            let results = recommend::execute(
                &resume,
                corpus.as_deref(),
                index.as_deref(),
                top_n,
                profession.as_deref(),
                model_dir.as_deref(),
            )?;

            let rendered = if json {
                output::format_json(&results)?
            } else {
                output::format_human(&results)
            };
            println!("{}", rendered);
            Ok(())
        }
        Command::Eval {
            relevant,
            recommended,
            k,
        } => eval::execute(&relevant, &recommended, k),
    }
}

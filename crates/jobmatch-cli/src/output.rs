//! Output formatting for recommendations.
//!
//! Human output rounds scores to two decimals for display; JSON carries the
//! full-precision floats for scripting.

use anyhow::Result;
use jobmatch_core::recommend::Recommendation;
use serde::Serialize;

/// JSON output structure for recommendations.
#[derive(Serialize)]
struct JsonOutput<'a> {
    results: &'a [Recommendation],
}

/// Formats recommendations as pretty-printed JSON.
pub fn format_json(results: &[Recommendation]) -> Result<String> {
    let output = JsonOutput { results };
    Ok(serde_json::to_string_pretty(&output)?)
}

/// Formats recommendations for human-readable terminal output.
pub fn format_human(results: &[Recommendation]) -> String {
    if results.is_empty() {
        return "No matches found.".to_string();
    }

    let mut output = String::new();
    output.push_str(&format!(
        "Top {} job match{}:\n\n",
        results.len(),
        if results.len() == 1 { "" } else { "es" }
    ));

    for (i, rec) in results.iter().enumerate() {
        output.push_str(&format!(
            "{}. {} at {} ({}) [score: {:.2}]\n",
            i + 1,
            rec.title,
            rec.company,
            rec.location,
            rec.score
        ));
        output.push_str(&format!("   {}\n", rec.job_url));
    }

    output.trim_end().to_string()
}

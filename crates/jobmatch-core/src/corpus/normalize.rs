//! Description text normalization.
//!
//! Job descriptions arrive from scrapers as HTML fragments with irregular
//! whitespace. Normalization strips the markup down to its plain textual
//! content and collapses whitespace so that both ranking modes see the same
//! clean text.

use scraper::Html;

/// Normalizes a raw description string.
///
/// Strips markup tags (keeping their textual content), replaces every run
/// of whitespace (spaces, newlines, tabs) with a single space, and trims.
/// Plain text without markup passes through unchanged apart from the
/// whitespace collapse.
///
/// # Examples
///
/// ```
/// use jobmatch_core::corpus::normalize;
///
/// assert_eq!(normalize("<p>Hello   \n  world</p>"), "Hello world");
/// assert_eq!(normalize("  plain   text "), "plain text");
/// ```
pub fn normalize(raw: &str) -> String {
    let fragment = Html::parse_fragment(raw);
    let text: String = fragment
        .root_element()
        .text()
        .collect::<Vec<_>>()
        .join(" ");

    collapse_whitespace(&text)
}

/// Normalizes an optional description; an absent value becomes the empty
/// string rather than propagating into downstream text handling.
pub fn normalize_opt(raw: Option<&str>) -> String {
    raw.map(normalize).unwrap_or_default()
}

/// Replaces every whitespace run with a single space and trims the ends.
fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strips_tags_and_collapses_whitespace() {
        assert_eq!(normalize("<p>Hello   \n  world</p>"), "Hello world");
    }

    #[test]
    fn test_nested_markup() {
        let html = "<div><h1>Data Engineer</h1><ul><li>SQL</li><li>Python</li></ul></div>";
        let text = normalize(html);
        assert!(text.contains("Data Engineer"));
        assert!(text.contains("SQL"));
        assert!(text.contains("Python"));
    }

    #[test]
    fn test_plain_text_passthrough() {
        assert_eq!(normalize("plain text"), "plain text");
    }

    #[test]
    fn test_whitespace_only() {
        assert_eq!(normalize("  \n\t  "), "");
    }

    #[test]
    fn test_empty_string() {
        assert_eq!(normalize(""), "");
    }

    #[test]
    fn test_none_normalizes_to_empty() {
        assert_eq!(normalize_opt(None), "");
        assert_eq!(normalize_opt(Some("<b>bold</b>")), "bold");
    }

    #[test]
    fn test_entities_decoded() {
        assert_eq!(normalize("R&amp;D engineer"), "R&D engineer");
    }
}

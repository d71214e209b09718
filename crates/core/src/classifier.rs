//! Keyword classifier.
//!
//! Picks the labels whose text occurs in a book's title and description.
//! Matching is a case-insensitive substring test, nothing smarter.

/// Number of leading candidates returned when nothing matches.
pub const FALLBACK_LABELS: usize = 3;

/// Select the candidates that appear (case-insensitively) in `text`.
///
/// Candidate order is preserved. If no candidate matches, the first
/// [`FALLBACK_LABELS`] candidates are returned instead, so the result is
/// only empty when `candidates` is.
pub fn classify(text: &str, candidates: &[String]) -> Vec<String> {
    let haystack = text.to_lowercase();

    let picks: Vec<String> = candidates
        .iter()
        .filter(|c| haystack.contains(&c.to_lowercase()))
        .cloned()
        .collect();

    if picks.is_empty() {
        candidates.iter().take(FALLBACK_LABELS).cloned().collect()
    } else {
        picks
    }
}

/// Text a book is classified on: title and description separated by a blank line.
pub fn book_text(title: &str, description: &str) -> String {
    format!("{}\n\n{}", title, description)
}

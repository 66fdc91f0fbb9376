//! Insight text sanitization.
//!
//! The report uses the standard Helvetica faces with WinAnsi encoding, which
//! cannot show emoji or scripts beyond Latin-1. Insights are reduced to what the
//! fonts can draw. The reduction is lossy: Latin Extended-A letters (ł, ő, š...)
//! are dropped along with everything else outside U+0000..=U+00FF.

use once_cell::sync::Lazy;
use regex::Regex;

/// Pictographs and emoji (Miscellaneous Symbols and Pictographs through
/// Supplemental Symbols and Pictographs)
static PICTOGRAPHS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[\x{1F300}-\x{1F9FF}]").expect("pictograph pattern is valid"));

static WHITESPACE_RUN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\s+").expect("whitespace pattern is valid"));

/// Basic Latin and Latin-1 Supplement.
pub fn is_latin1(ch: char) -> bool {
    (ch as u32) <= 0xFF
}

/// Strip pictographs, drop non-Latin-1 characters, collapse whitespace and trim.
pub fn sanitize_insight(text: &str) -> String {
    let without_pictographs = PICTOGRAPHS.replace_all(text, "");
    let latin: String = without_pictographs.chars().filter(|c| is_latin1(*c)).collect();
    WHITESPACE_RUN.replace_all(&latin, " ").trim().to_string()
}

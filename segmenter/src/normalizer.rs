//! Cleanup of extracted text ahead of sentence splitting.

use once_cell::sync::Lazy;
use regex::Regex;

/// Anything outside word characters, whitespace and the punctuation TTS engines handle.
static DISALLOWED_CHARS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"[^\w\s.,!?;:()'"-]"#).expect("valid disallowed-chars regex"));

static WHITESPACE_RUN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\s+").expect("valid whitespace regex"));

static SPACE_BEFORE_PUNCT: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\s+([.,!?;:])").expect("valid punctuation spacing regex"));

/// Punctuation glued to the next sentence's capital, e.g. `end.Next`.
static RUN_TOGETHER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"([.,!?;:])\s*([A-Z])").expect("valid run-together regex"));

/// Normalize raw extracted text for segmentation.
///
/// This function:
/// - Strips characters outside `\w`, whitespace and `. , ! ? ; : ( ) ' " -`
/// - Collapses whitespace runs (including newlines) into one space
/// - Removes whitespace before `. , ! ? ; :`
/// - Puts exactly one space between such punctuation and a following capital
/// - Trims the result
///
/// Never fails; empty or all-noise input yields an empty string.
/// Character filtering runs first so that `normalize(normalize(x)) == normalize(x)`.
pub fn normalize(text: &str) -> String {
    let text = DISALLOWED_CHARS.replace_all(text, "");
    let text = WHITESPACE_RUN.replace_all(&text, " ");
    let text = SPACE_BEFORE_PUNCT.replace_all(&text, "$1");
    let text = RUN_TOGETHER.replace_all(&text, "$1 $2");

    text.trim().to_string()
}

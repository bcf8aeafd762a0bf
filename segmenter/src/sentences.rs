//! Sentence splitting behind a pluggable trait.

use crate::error::Result;
use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::HashSet;

/// Splits normalized text into ordered, trimmed, non-empty sentences.
pub trait SentenceSplitter: Send + Sync {
    /// Split `text` into sentences.
    fn split(&self, text: &str) -> Result<Vec<String>>;

    /// Short identifier used in logs and reports.
    fn name(&self) -> &'static str;
}

impl<T: SentenceSplitter + ?Sized> SentenceSplitter for Box<T> {
    fn split(&self, text: &str) -> Result<Vec<String>> {
        (**self).split(text)
    }

    fn name(&self) -> &'static str {
        (**self).name()
    }
}

/// Terminal punctuation, optional closers, then the whitespace that separates sentences.
static BOUNDARY: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"[.!?]+["')\]]*\s+"#).expect("valid sentence boundary regex"));

/// Words that take a trailing period without ending the sentence.
static ABBREVIATIONS: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    [
        "mr", "mrs", "ms", "dr", "prof", "rev", "hon", "capt", "col", "gen", "lt", "sgt", "sr",
        "jr", "st", "mt", "ft", "vs", "cf", "e.g", "i.e", "approx", "dept", "fig", "vol", "jan",
        "feb", "mar", "apr", "aug", "sep", "sept", "oct", "nov", "dec",
    ]
    .into_iter()
    .collect()
});

/// Rule-based splitter: a boundary is terminal punctuation followed by whitespace
/// and a capital letter (optionally behind an opening quote or parenthesis),
/// unless the word before the period is a known abbreviation.
#[derive(Debug, Clone, Copy, Default)]
pub struct RuleSplitter;

impl RuleSplitter {
    pub fn new() -> Self {
        Self
    }
}

impl SentenceSplitter for RuleSplitter {
    fn split(&self, text: &str) -> Result<Vec<String>> {
        let mut sentences = Vec::new();
        let mut start = 0;

        for boundary in BOUNDARY.find_iter(text) {
            if !starts_sentence(&text[boundary.end()..]) {
                continue;
            }
            if boundary.as_str().starts_with('.')
                && ends_with_abbreviation(&text[start..boundary.start()])
            {
                continue;
            }

            push_sentence(&mut sentences, &text[start..boundary.end()]);
            start = boundary.end();
        }

        push_sentence(&mut sentences, &text[start..]);
        Ok(sentences)
    }

    fn name(&self) -> &'static str {
        "rules"
    }
}

/// Does the text after a boundary open a new sentence?
fn starts_sentence(rest: &str) -> bool {
    let mut chars = rest.chars();
    match chars.next() {
        Some(c) if c.is_uppercase() => true,
        Some('"' | '\'' | '(') => chars.next().is_some_and(char::is_uppercase),
        _ => false,
    }
}

fn ends_with_abbreviation(before_period: &str) -> bool {
    let Some(word) = before_period.split_whitespace().last() else {
        return false;
    };
    let word = word
        .trim_start_matches(|c: char| !c.is_alphanumeric())
        .to_lowercase();

    ABBREVIATIONS.contains(word.as_str())
}

fn push_sentence(sentences: &mut Vec<String>, candidate: &str) {
    let trimmed = candidate.trim();
    if !trimmed.is_empty() {
        sentences.push(trimmed.to_string());
    }
}

//! Story pagination: grouping sentences into storybook pages.

use crate::error::Result;
use crate::normalizer::normalize;
use crate::sentences::SentenceSplitter;
use log::debug;

/// A page closes once it holds this many sentences.
pub const MAX_SENTENCES_PER_PAGE: usize = 4;

/// A page of at least [`MIN_SENTENCES_FOR_LENGTH_BREAK`] sentences closes past this many characters.
pub const LENGTH_BREAK_CHARS: usize = 300;
pub const MIN_SENTENCES_FOR_LENGTH_BREAK: usize = 2;

/// Past this many characters, a page of at least [`MIN_SENTENCES_FOR_MARKER_BREAK`]
/// sentences closes when its last sentence contains a discourse marker.
pub const MARKER_BREAK_CHARS: usize = 200;
pub const MIN_SENTENCES_FOR_MARKER_BREAK: usize = 3;

/// Signal words for a natural page break, matched as plain substrings of the
/// lowercased sentence ("or" also matches "forest").
pub const DISCOURSE_MARKERS: &[&str] = &[
    "but", "however", "then", "so", "and", "or", "finally", "suddenly",
];

/// Default sentences-per-page hint offered to callers.
pub const DEFAULT_SENTENCES_PER_PAGE: usize = 3;

/// Why a page was closed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageBreak {
    SentenceCount,
    Length,
    DiscourseMarker,
}

/// Closing thresholds for story pages.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PagePolicy {
    pub max_sentences: usize,
    pub length_break_chars: usize,
    pub min_sentences_for_length_break: usize,
    pub marker_break_chars: usize,
    pub min_sentences_for_marker_break: usize,
    pub markers: &'static [&'static str],
}

impl Default for PagePolicy {
    fn default() -> Self {
        Self {
            max_sentences: MAX_SENTENCES_PER_PAGE,
            length_break_chars: LENGTH_BREAK_CHARS,
            min_sentences_for_length_break: MIN_SENTENCES_FOR_LENGTH_BREAK,
            marker_break_chars: MARKER_BREAK_CHARS,
            min_sentences_for_marker_break: MIN_SENTENCES_FOR_MARKER_BREAK,
            markers: DISCOURSE_MARKERS,
        }
    }
}

impl PagePolicy {
    /// Decide whether a page should close right after `last_sentence` was added.
    ///
    /// `sentences` and `length` describe the page including that sentence;
    /// `length` is the sum of sentence lengths in characters, separators excluded.
    /// Rules are checked in priority order: count, then length, then marker.
    pub fn page_break(&self, sentences: usize, length: usize, last_sentence: &str) -> Option<PageBreak> {
        if sentences >= self.max_sentences {
            return Some(PageBreak::SentenceCount);
        }

        if length > self.length_break_chars && sentences >= self.min_sentences_for_length_break {
            return Some(PageBreak::Length);
        }

        if sentences >= self.min_sentences_for_marker_break
            && length > self.marker_break_chars
            && self.has_marker(last_sentence)
        {
            return Some(PageBreak::DiscourseMarker);
        }

        None
    }

    fn has_marker(&self, sentence: &str) -> bool {
        let lowered = sentence.to_lowercase();
        self.markers.iter().any(|marker| lowered.contains(marker))
    }
}

/// Normalize and split `text`, then group the sentences into pages.
///
/// `sentences_per_page_hint` is accepted for callers' defaults but does not
/// influence where pages close; `policy` alone decides that.
pub fn paginate_story<S: SentenceSplitter + ?Sized>(
    splitter: &S,
    policy: &PagePolicy,
    text: &str,
    sentences_per_page_hint: usize,
) -> Result<Vec<String>> {
    let text = normalize(text);
    if text.is_empty() {
        return Ok(Vec::new());
    }

    let sentences = splitter.split(&text)?;
    let pages: Vec<String> = group_into_pages(&sentences, policy)
        .into_iter()
        .map(|page| page.join(" "))
        .collect();

    debug!(
        "{} sentences paginated into {} pages (hint {} not applied, splitter {})",
        sentences.len(),
        pages.len(),
        sentences_per_page_hint,
        splitter.name()
    );

    Ok(pages)
}

/// Group consecutive sentences into pages. Sentences left over at the end form
/// a final page whatever its size.
pub fn group_into_pages<'a>(sentences: &'a [String], policy: &PagePolicy) -> Vec<&'a [String]> {
    let mut pages = Vec::new();
    let mut start = 0;
    let mut length = 0;

    for (i, sentence) in sentences.iter().enumerate() {
        length += sentence.chars().count();

        if let Some(reason) = policy.page_break(i + 1 - start, length, sentence) {
            debug!("page {} closed by {:?} at {} chars", pages.len() + 1, reason, length);
            pages.push(&sentences[start..=i]);
            start = i + 1;
            length = 0;
        }
    }

    if start < sentences.len() {
        pages.push(&sentences[start..]);
    }

    pages
}

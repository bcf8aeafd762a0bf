//! Text chunking for TTS processing.

use crate::error::{Result, SegmentationError};
use crate::sentences::SentenceSplitter;
use log::{debug, warn};

/// Default chunk budget in characters.
pub const DEFAULT_CHUNK_SIZE: usize = 500;

/// Outcome of [`segment_for_audio`]: sentence-aware chunks, or the degraded
/// fixed-width slicing used when the splitter failed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AudioSegmentation {
    Sentences(Vec<String>),
    FixedWidth {
        chunks: Vec<String>,
        reason: SegmentationError,
    },
}

impl AudioSegmentation {
    pub fn chunks(&self) -> &[String] {
        match self {
            Self::Sentences(chunks) | Self::FixedWidth { chunks, .. } => chunks,
        }
    }

    pub fn into_chunks(self) -> Vec<String> {
        match self {
            Self::Sentences(chunks) | Self::FixedWidth { chunks, .. } => chunks,
        }
    }

    pub fn is_degraded(&self) -> bool {
        matches!(self, Self::FixedWidth { .. })
    }

    /// Why sentence splitting was abandoned, if it was.
    pub fn fallback_reason(&self) -> Option<&SegmentationError> {
        match self {
            Self::Sentences(_) => None,
            Self::FixedWidth { reason, .. } => Some(reason),
        }
    }
}

/// Split text into chunks of whole sentences, each at most `max_chunk_size`
/// characters unless a single sentence is longer on its own.
///
/// The text is expected to be normalized already.
pub fn chunk_for_audio<S: SentenceSplitter + ?Sized>(
    splitter: &S,
    text: &str,
    max_chunk_size: usize,
) -> Result<Vec<String>> {
    check_budget(max_chunk_size)?;

    if text.trim().is_empty() {
        return Ok(Vec::new());
    }

    let sentences = splitter.split(text)?;
    let chunks: Vec<String> = group_into_chunks(&sentences, max_chunk_size)
        .into_iter()
        .map(|group| group.join(" "))
        .collect();

    debug!(
        "{} sentences packed into {} chunks (budget {}, splitter {})",
        sentences.len(),
        chunks.len(),
        max_chunk_size,
        splitter.name()
    );

    Ok(chunks)
}

/// Like [`chunk_for_audio`], but falls back to fixed-width slicing of the raw
/// text when sentence splitting fails. Only an invalid budget is an error.
pub fn segment_for_audio<S: SentenceSplitter + ?Sized>(
    splitter: &S,
    text: &str,
    max_chunk_size: usize,
) -> Result<AudioSegmentation> {
    match chunk_for_audio(splitter, text, max_chunk_size) {
        Ok(chunks) => Ok(AudioSegmentation::Sentences(chunks)),
        Err(SegmentationError::InvalidBudget(size)) => Err(SegmentationError::InvalidBudget(size)),
        Err(reason) => {
            warn!("{}; falling back to {}-character slices", reason, max_chunk_size);
            Ok(AudioSegmentation::FixedWidth {
                chunks: slice_fixed_width(text, max_chunk_size),
                reason,
            })
        }
    }
}

/// Group consecutive sentences greedily under the character budget.
///
/// A sentence joins the current group only if the group plus a separating
/// space plus the sentence still fits; a sentence that fits nowhere gets a
/// group of its own.
pub fn group_into_chunks(sentences: &[String], max_chunk_size: usize) -> Vec<&[String]> {
    let mut groups = Vec::new();
    let mut start = 0;
    let mut current_len = 0;

    for (i, sentence) in sentences.iter().enumerate() {
        let sentence_len = sentence.chars().count();

        if i > start && current_len + 1 + sentence_len > max_chunk_size {
            groups.push(&sentences[start..i]);
            start = i;
            current_len = 0;
        }

        current_len += if i > start { 1 + sentence_len } else { sentence_len };
    }

    if start < sentences.len() {
        groups.push(&sentences[start..]);
    }

    groups
}

/// Hard split text into windows of `width` characters (degraded mode).
pub fn slice_fixed_width(text: &str, width: usize) -> Vec<String> {
    let chars: Vec<char> = text.chars().collect();
    chars
        .chunks(width.max(1))
        .map(|window| window.iter().collect())
        .collect()
}

fn check_budget(max_chunk_size: usize) -> Result<()> {
    if max_chunk_size == 0 {
        return Err(SegmentationError::InvalidBudget(max_chunk_size));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sentences::RuleSplitter;
    use crate::testing::FailingSplitter;
    use proptest::prelude::*;

    fn words(parts: &[String]) -> Vec<String> {
        parts
            .iter()
            .flat_map(|p| p.split_whitespace().map(str::to_string))
            .collect()
    }

    #[test]
    fn test_chunk_scenario() {
        let text = "Hello world. This is a test. It works well. Another sentence here.";
        let chunks = chunk_for_audio(&RuleSplitter, text, 30).unwrap();
        assert_eq!(
            chunks,
            vec!["Hello world. This is a test.", "It works well.", "Another sentence here."]
        );
        assert!(chunks.iter().all(|c| c.chars().count() <= 30));
    }

    #[test]
    fn test_chunk_short_text() {
        let text = "Hello world. How are you?";
        let chunks = chunk_for_audio(&RuleSplitter, text, 500).unwrap();
        assert_eq!(chunks, vec!["Hello world. How are you?"]);
    }

    #[test]
    fn test_separator_counts_toward_budget() {
        // 5 + 1 + 5 = 11 characters: fits in 11, not in 10
        let text = "Aaaa. Bbbb.";
        assert_eq!(chunk_for_audio(&RuleSplitter, text, 11).unwrap().len(), 1);
        assert_eq!(chunk_for_audio(&RuleSplitter, text, 10).unwrap().len(), 2);
    }

    #[test]
    fn test_single_sentence_overflow() {
        let text = "Short one. This sentence is definitely longer than the budget. End.";
        let chunks = chunk_for_audio(&RuleSplitter, text, 12).unwrap();
        assert_eq!(
            chunks,
            vec![
                "Short one.",
                "This sentence is definitely longer than the budget.",
                "End."
            ]
        );
    }

    #[test]
    fn test_chunk_empty_text() {
        assert!(chunk_for_audio(&RuleSplitter, "", 500).unwrap().is_empty());
        assert!(chunk_for_audio(&RuleSplitter, "   ", 500).unwrap().is_empty());
    }

    #[test]
    fn test_zero_budget_rejected() {
        let err = chunk_for_audio(&RuleSplitter, "Some text.", 0).unwrap_err();
        assert_eq!(err, SegmentationError::InvalidBudget(0));

        let err = segment_for_audio(&FailingSplitter, "Some text.", 0).unwrap_err();
        assert_eq!(err, SegmentationError::InvalidBudget(0));
    }

    #[test]
    fn test_splitter_failure_propagates_from_chunk_for_audio() {
        let err = chunk_for_audio(&FailingSplitter, "Some text.", 100).unwrap_err();
        assert!(matches!(err, SegmentationError::Split(_)));
    }

    #[test]
    fn test_segment_uses_sentences_when_splitter_works() {
        let text = "First sentence. Second sentence.";
        let result = segment_for_audio(&RuleSplitter, text, 20).unwrap();
        assert!(!result.is_degraded());
        assert!(result.fallback_reason().is_none());
        assert_eq!(result.chunks(), ["First sentence.", "Second sentence."]);
    }

    #[test]
    fn test_segment_falls_back_to_fixed_width() {
        let result = segment_for_audio(&FailingSplitter, "abcdefghij", 3).unwrap();
        assert!(result.is_degraded());
        assert!(matches!(
            result.fallback_reason(),
            Some(SegmentationError::Split(_))
        ));
        assert_eq!(result.into_chunks(), vec!["abc", "def", "ghi", "j"]);
    }

    #[test]
    fn test_segment_empty_text_never_degrades() {
        let result = segment_for_audio(&FailingSplitter, "", 10).unwrap();
        assert_eq!(result, AudioSegmentation::Sentences(Vec::new()));
    }

    #[test]
    fn test_slice_fixed_width_counts_chars() {
        let parts = slice_fixed_width("héllo wörld", 4);
        assert_eq!(parts, vec!["héll", "o wö", "rld"]);
    }

    #[test]
    fn test_group_into_chunks_keeps_order() {
        let sentences: Vec<String> = ["One.", "Two.", "Three.", "Four."]
            .iter()
            .map(|s| s.to_string())
            .collect();
        let groups = group_into_chunks(&sentences, 9);
        assert_eq!(groups.len(), 3);
        assert_eq!(groups[0], ["One.", "Two."]);
        assert_eq!(groups[1], ["Three."]);
        assert_eq!(groups[2], ["Four."]);
    }

    fn sentence_strategy() -> impl Strategy<Value = String> {
        prop::collection::vec("[a-z]{1,9}", 1..10).prop_map(|mut words| {
            let mut first = words[0].clone();
            first[..1].make_ascii_uppercase();
            words[0] = first;
            format!("{}.", words.join(" "))
        })
    }

    proptest! {
        #[test]
        fn prop_chunks_cover_every_word_once(
            sentences in prop::collection::vec(sentence_strategy(), 0..25),
            budget in 1usize..200,
        ) {
            let text = sentences.join(" ");
            let split = RuleSplitter.split(&text).unwrap();
            let chunks = chunk_for_audio(&RuleSplitter, &text, budget).unwrap();
            prop_assert_eq!(words(&chunks), words(&split));
        }

        #[test]
        fn prop_budget_holds_except_single_sentence_overflow(
            sentences in prop::collection::vec(sentence_strategy(), 0..25),
            budget in 1usize..200,
        ) {
            let text = sentences.join(" ");
            let split = RuleSplitter.split(&text).unwrap();
            for group in group_into_chunks(&split, budget) {
                let chunk = group.join(" ");
                prop_assert!(chunk.chars().count() <= budget || group.len() == 1);
            }
        }

        #[test]
        fn prop_sentences_never_split(
            sentences in prop::collection::vec(sentence_strategy(), 1..25),
            budget in 1usize..200,
        ) {
            let text = sentences.join(" ");
            let split = RuleSplitter.split(&text).unwrap();
            let regrouped: Vec<String> = group_into_chunks(&split, budget)
                .into_iter()
                .flat_map(|group| group.to_vec())
                .collect();
            prop_assert_eq!(regrouped, split);
        }
    }
}

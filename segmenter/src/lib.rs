//! Text segmentation shared by the audio and storybook pipelines
//!
//! - Normalization of extracted text ([`normalize`])
//! - Sentence splitting behind [`SentenceSplitter`] (rule-based or dialog-aware)
//! - Audio chunking under a character budget ([`chunk_for_audio`])
//! - Story pagination by count, length and discourse markers ([`paginate_story`])
//! - Storybook helpers: keywords, line wrapping, illustration prompts

pub mod audio;
pub mod error;
pub mod illustration;
pub mod keywords;
pub mod layout;
pub mod normalizer;
mod seams;
pub mod sentences;
pub mod story;

pub use audio::{AudioSegmentation, DEFAULT_CHUNK_SIZE};
pub use error::{Result, SegmentationError};
pub use illustration::{ImageStyle, image_prompt};
pub use keywords::{DEFAULT_MAX_KEYWORDS, extract_keywords};
pub use layout::{DEFAULT_LINE_WIDTH, wrap_lines};
pub use normalizer::normalize;
pub use self::seams::DialogSplitter;
pub use sentences::{RuleSplitter, SentenceSplitter};
pub use story::{DEFAULT_SENTENCES_PER_PAGE, PageBreak, PagePolicy};

/// Segmentation entry point pairing a sentence splitter with a page policy.
///
/// Holds no per-call state; one value can serve any number of documents.
#[derive(Debug, Clone, Default)]
pub struct Segmenter<S = RuleSplitter> {
    splitter: S,
    policy: PagePolicy,
}

impl Segmenter<RuleSplitter> {
    /// Create a segmenter using the rule-based splitter and default page policy.
    pub fn new() -> Self {
        Self::default()
    }
}

impl<S: SentenceSplitter> Segmenter<S> {
    /// Create a segmenter around a specific splitter.
    pub fn with_splitter(splitter: S) -> Self {
        Self {
            splitter,
            policy: PagePolicy::default(),
        }
    }

    /// Replace the page closing policy.
    pub fn with_policy(mut self, policy: PagePolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn splitter(&self) -> &S {
        &self.splitter
    }

    pub fn policy(&self) -> &PagePolicy {
        &self.policy
    }

    /// See [`audio::chunk_for_audio`].
    pub fn chunk_for_audio(&self, text: &str, max_chunk_size: usize) -> Result<Vec<String>> {
        audio::chunk_for_audio(&self.splitter, text, max_chunk_size)
    }

    /// See [`audio::segment_for_audio`].
    pub fn segment_for_audio(&self, text: &str, max_chunk_size: usize) -> Result<AudioSegmentation> {
        audio::segment_for_audio(&self.splitter, text, max_chunk_size)
    }

    /// See [`story::paginate_story`].
    pub fn paginate_story(&self, text: &str, sentences_per_page_hint: usize) -> Result<Vec<String>> {
        story::paginate_story(&self.splitter, &self.policy, text, sentences_per_page_hint)
    }
}

/// Chunk normalized text for TTS with the rule-based splitter.
pub fn chunk_for_audio(text: &str, max_chunk_size: usize) -> Result<Vec<String>> {
    Segmenter::new().chunk_for_audio(text, max_chunk_size)
}

/// Paginate a story with the rule-based splitter and default thresholds.
pub fn paginate_story(text: &str, sentences_per_page_hint: usize) -> Result<Vec<String>> {
    Segmenter::new().paginate_story(text, sentences_per_page_hint)
}


#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::FailingSplitter;

    #[test]
    fn test_empty_input() {
        assert!(chunk_for_audio("", 500).unwrap().is_empty());
        assert!(paginate_story("", 3).unwrap().is_empty());
    }

    #[test]
    fn test_free_functions_match_segmenter() {
        let text = "Leo loved the color red. Not just any red, but the bright, bold red of a fire engine. More than anything, Leo dreamed of becoming a firefighter. He would spend hours in his room, pretending his stuffed animals were in trouble.";
        let segmenter = Segmenter::new();
        assert_eq!(
            chunk_for_audio(text, 100).unwrap(),
            segmenter.chunk_for_audio(text, 100).unwrap()
        );
        assert_eq!(
            paginate_story(text, 2).unwrap(),
            segmenter.paginate_story(text, 2).unwrap()
        );
    }

    #[test]
    fn test_leo_story_pages() {
        let text = "Leo loved the color red. Not just any red, but the bright, bold red of a fire engine. More than anything, Leo dreamed of becoming a firefighter. He would spend hours in his room, pretending his stuffed animals were in trouble.";
        let pages = paginate_story(text, 2).unwrap();
        assert_eq!(pages.len(), 1);
        assert_eq!(pages[0], text);
    }

    #[test]
    fn test_custom_policy() {
        let policy = PagePolicy {
            max_sentences: 2,
            ..PagePolicy::default()
        };
        let segmenter = Segmenter::new().with_policy(policy);
        let pages = segmenter.paginate_story("A. B. C.", 3).unwrap();
        assert_eq!(pages, vec!["A. B.", "C."]);
    }

    #[test]
    fn test_segmenter_with_failing_splitter() {
        let segmenter = Segmenter::with_splitter(FailingSplitter);
        assert_eq!(segmenter.splitter().name(), "failing");
        assert!(segmenter.paginate_story("A story.", 3).is_err());
        let result = segmenter.segment_for_audio("A story.", 4).unwrap();
        assert!(result.is_degraded());
        assert_eq!(result.chunks(), ["A st", "ory."]);
    }

    #[test]
    fn test_shared_segmenter_across_threads() {
        let segmenter = Segmenter::new();
        let segmenter = &segmenter;
        let stories = ["A. B. C. D. E.", "One. Two.", ""];

        let results: Vec<Vec<String>> = std::thread::scope(|scope| {
            let handles: Vec<_> = stories
                .iter()
                .map(|story| scope.spawn(move || segmenter.paginate_story(story, 3).unwrap()))
                .collect();
            handles.into_iter().map(|h| h.join().unwrap()).collect()
        });

        assert_eq!(results[0], vec!["A. B. C. D.", "E."]);
        assert_eq!(results[1], vec!["One. Two."]);
        assert!(results[2].is_empty());
    }

    #[test]
    fn test_boxed_dialog_splitter() {
        let splitter: Box<dyn SentenceSplitter> = Box::new(DialogSplitter::new().unwrap());
        let segmenter = Segmenter::with_splitter(splitter);
        let pages = segmenter.paginate_story("First sentence. Second sentence.", 3).unwrap();
        assert_eq!(pages.len(), 1);
        assert!(pages[0].contains("First"));
        assert!(pages[0].contains("Second"));
    }
}

//! Sentence splitting using the seams library (dialog-aware).

use crate::error::{Result, SegmentationError};
use crate::sentences::SentenceSplitter;
use seams::sentence_detector::dialog_detector::SentenceDetectorDialog;

/// Splitter backed by the seams dialog state machine.
///
/// Keeps quoted dialog together with its attribution, at the cost of less
/// predictable boundaries than [`crate::RuleSplitter`].
pub struct DialogSplitter {
    detector: SentenceDetectorDialog,
}

impl DialogSplitter {
    /// Build the detector. Pattern compilation happens here, so reuse the value.
    pub fn new() -> Result<Self> {
        let detector = SentenceDetectorDialog::new()
            .map_err(|e| SegmentationError::DetectorInit(e.to_string()))?;
        Ok(Self { detector })
    }
}

impl SentenceSplitter for DialogSplitter {
    fn split(&self, text: &str) -> Result<Vec<String>> {
        if text.trim().is_empty() {
            return Ok(Vec::new());
        }

        let sentences = self
            .detector
            .detect_sentences_borrowed(text)
            .map_err(|e| SegmentationError::Split(e.to_string()))?;

        Ok(sentences
            .iter()
            .map(|s| s.normalize().trim().to_string())
            .filter(|s| !s.is_empty())
            .collect())
    }

    fn name(&self) -> &'static str {
        "dialog"
    }
}

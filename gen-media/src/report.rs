//! Serializable results of the audio and story commands.

use chrono::{DateTime, Utc};
use serde::Serialize;
use text_segmenter::{AudioSegmentation, ImageStyle, image_prompt, wrap_lines};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ChunkMode {
    Sentences,
    FixedWidth,
}

/// Chunk list handed to a TTS engine, in playback order.
#[derive(Debug, Serialize)]
pub struct AudioManifest {
    pub source: String,
    pub generated_at: DateTime<Utc>,
    pub max_chunk_size: usize,
    pub splitter: String,
    pub mode: ChunkMode,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fallback_reason: Option<String>,
    pub chunks: Vec<ManifestChunk>,
}

#[derive(Debug, Serialize)]
pub struct ManifestChunk {
    pub index: usize,
    pub characters: usize,
    pub text: String,
}

impl AudioManifest {
    pub fn new(
        source: String,
        max_chunk_size: usize,
        splitter: &str,
        segmentation: AudioSegmentation,
    ) -> Self {
        let mode = if segmentation.is_degraded() {
            ChunkMode::FixedWidth
        } else {
            ChunkMode::Sentences
        };
        let fallback_reason = segmentation.fallback_reason().map(|e| e.to_string());

        let chunks = segmentation
            .into_chunks()
            .into_iter()
            .enumerate()
            .map(|(index, text)| ManifestChunk {
                index,
                characters: text.chars().count(),
                text,
            })
            .collect();

        Self {
            source,
            generated_at: Utc::now(),
            max_chunk_size,
            splitter: splitter.to_string(),
            mode,
            fallback_reason,
            chunks,
        }
    }

    pub fn total_characters(&self) -> usize {
        self.chunks.iter().map(|c| c.characters).sum()
    }
}

/// Pages paired with their illustration prompts, in document order.
#[derive(Debug, Serialize)]
pub struct Storybook {
    pub source: String,
    pub generated_at: DateTime<Utc>,
    pub style: ImageStyle,
    pub pages: Vec<StoryPage>,
}

#[derive(Debug, Serialize)]
pub struct StoryPage {
    /// 1-based page number
    pub number: usize,
    pub text: String,
    /// Text wrapped for print layout
    pub wrapped: String,
    pub image_prompt: String,
}

impl Storybook {
    pub fn new(source: String, pages: Vec<String>, style: ImageStyle, line_width: usize) -> Self {
        let pages = pages
            .into_iter()
            .enumerate()
            .map(|(i, text)| StoryPage {
                number: i + 1,
                wrapped: wrap_lines(&text, line_width),
                image_prompt: image_prompt(&text, style),
                text,
            })
            .collect();

        Self {
            source,
            generated_at: Utc::now(),
            style,
            pages,
        }
    }
}

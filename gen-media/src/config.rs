//! gen-media configuration management.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use text_segmenter::{
    DEFAULT_CHUNK_SIZE, DEFAULT_LINE_WIDTH, DEFAULT_MAX_KEYWORDS, DEFAULT_SENTENCES_PER_PAGE,
    DialogSplitter, ImageStyle, RuleSplitter, SentenceSplitter,
};

/// Chunk sizes accepted from the command line.
pub const CHUNK_SIZE_RANGE: (usize, usize) = (200, 1000);

/// Sentences-per-page hints accepted from the command line.
pub const SENTENCES_PER_PAGE_RANGE: (usize, usize) = (2, 5);

/// Which sentence splitter to segment with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SplitterKind {
    /// Deterministic punctuation and abbreviation rules
    #[default]
    Rules,
    /// Dialog-aware detection from the seams library
    Dialog,
}

impl SplitterKind {
    /// Construct the splitter this kind names.
    pub fn build(&self) -> Result<Box<dyn SentenceSplitter>> {
        Ok(match self {
            Self::Rules => Box::new(RuleSplitter::new()),
            Self::Dialog => {
                Box::new(DialogSplitter::new().context("Failed to initialize dialog splitter")?)
            }
        })
    }
}

impl fmt::Display for SplitterKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Rules => f.write_str("rules"),
            Self::Dialog => f.write_str("dialog"),
        }
    }
}

impl FromStr for SplitterKind {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "rules" => Ok(Self::Rules),
            "dialog" => Ok(Self::Dialog),
            other => Err(format!("unknown splitter '{}' (expected rules or dialog)", other)),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenMediaConfig {
    /// Character budget per audio chunk
    #[serde(default = "default_chunk_size")]
    pub chunk_size: usize,

    /// Sentences-per-page hint for stories
    #[serde(default = "default_sentences_per_page")]
    pub sentences_per_page: usize,

    /// Illustration style for storybook prompts
    #[serde(default)]
    pub image_style: ImageStyle,

    /// Characters per printed storybook line
    #[serde(default = "default_line_width")]
    pub line_width: usize,

    /// Keywords listed by the keywords command
    #[serde(default = "default_max_keywords")]
    pub max_keywords: usize,

    /// Sentence splitter used by all commands
    #[serde(default)]
    pub splitter: SplitterKind,
}

fn default_chunk_size() -> usize {
    DEFAULT_CHUNK_SIZE
}

fn default_sentences_per_page() -> usize {
    DEFAULT_SENTENCES_PER_PAGE
}

fn default_line_width() -> usize {
    DEFAULT_LINE_WIDTH
}

fn default_max_keywords() -> usize {
    DEFAULT_MAX_KEYWORDS
}

impl Default for GenMediaConfig {
    fn default() -> Self {
        Self {
            chunk_size: default_chunk_size(),
            sentences_per_page: default_sentences_per_page(),
            image_style: ImageStyle::default(),
            line_width: default_line_width(),
            max_keywords: default_max_keywords(),
            splitter: SplitterKind::default(),
        }
    }
}

impl GenMediaConfig {
    /// Get the config file path: <config dir>/cli-programs/gen-media.toml
    pub fn config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("cli-programs")
            .join("gen-media.toml")
    }

    /// Load config from the default location, returning defaults if the file doesn't exist.
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path())
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;

        toml::from_str(&content).with_context(|| format!("Failed to parse {}", path.display()))
    }

    /// Save config to the default location.
    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path())
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create {}", parent.display()))?;
        }

        let content = toml::to_string_pretty(self).context("Failed to serialize configuration")?;

        std::fs::write(path, content).with_context(|| format!("Failed to write {}", path.display()))
    }

    pub fn set_chunk_size(&mut self, value: usize) {
        self.chunk_size = clamp_chunk_size(value);
    }

    pub fn set_sentences_per_page(&mut self, value: usize) {
        self.sentences_per_page = clamp_sentences_per_page(value);
    }
}

pub fn clamp_chunk_size(value: usize) -> usize {
    value.clamp(CHUNK_SIZE_RANGE.0, CHUNK_SIZE_RANGE.1)
}

pub fn clamp_sentences_per_page(value: usize) -> usize {
    value.clamp(SENTENCES_PER_PAGE_RANGE.0, SENTENCES_PER_PAGE_RANGE.1)
}

//! Illustration prompts derived from page text.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Page text beyond this many characters is ignored when building a prompt.
const PROMPT_SOURCE_CHARS: usize = 200;

/// Number of theme words taken from the page.
const THEME_WORDS: usize = 5;

/// Theme words have at least this many characters.
const MIN_THEME_WORD_CHARS: usize = 4;

const FILLER_WORDS: &[&str] = &[
    "the", "and", "was", "had", "her", "his", "they", "with", "from", "that", "this", "were",
    "been", "have", "said", "will", "could", "would",
];

/// Visual style requested from the image generator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ImageStyle {
    #[default]
    Storybook,
    Modern,
    Fantasy,
}

impl ImageStyle {
    /// Style modifiers appended to every prompt.
    pub fn descriptor(&self) -> &'static str {
        match self {
            Self::Storybook => "children's book illustration, warm colors, friendly, detailed",
            Self::Modern => "modern digital art, clean lines, contemporary, vibrant",
            Self::Fantasy => "fantasy art, magical, vibrant colors, whimsical",
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Storybook => "storybook",
            Self::Modern => "modern",
            Self::Fantasy => "fantasy",
        }
    }
}

impl fmt::Display for ImageStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ImageStyle {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "storybook" => Ok(Self::Storybook),
            "modern" => Ok(Self::Modern),
            "fantasy" => Ok(Self::Fantasy),
            other => Err(format!(
                "unknown image style '{}' (expected storybook, modern or fantasy)",
                other
            )),
        }
    }
}

/// Build a short text-to-image prompt for one page.
///
/// Takes the first five longer, non-filler words of the page (lowercased,
/// punctuation left attached) and appends the style descriptor.
pub fn image_prompt(page_text: &str, style: ImageStyle) -> String {
    let source: String = page_text.trim().chars().take(PROMPT_SOURCE_CHARS).collect();
    let lowered = source.to_lowercase();

    let theme: Vec<&str> = lowered
        .split_whitespace()
        .filter(|w| w.chars().count() >= MIN_THEME_WORD_CHARS && !FILLER_WORDS.contains(w))
        .take(THEME_WORDS)
        .collect();

    if theme.is_empty() {
        format!("storybook illustration {}", style.descriptor())
    } else {
        format!("{} {}", theme.join(" "), style.descriptor())
    }
}

//! gen-media - Segment extracted text into TTS chunks and illustrated storybook pages

mod config;
mod report;
mod source;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use config::{GenMediaConfig, SplitterKind, clamp_chunk_size, clamp_sentences_per_page};
use log::debug;
use report::{AudioManifest, Storybook};
use std::path::{Path, PathBuf};
use text_segmenter::{ImageStyle, Segmenter, SentenceSplitter, extract_keywords, normalize};

/// Cleaned text shorter than this is treated as a failed extraction.
const MIN_EXTRACTED_CHARS: usize = 10;

#[derive(Parser, Debug)]
#[command(name = "gen-media")]
#[command(about = "Segment extracted text into TTS chunks and illustrated storybook pages", long_about = None)]
#[command(version)]
struct Args {
    /// Enable debug output
    #[arg(short, long, global = true, default_value_t = false)]
    debug: bool,

    /// Sentence splitter override (rules or dialog)
    #[arg(long, global = true)]
    splitter: Option<SplitterKind>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Split extracted document text into chunks for text-to-speech
    Audio {
        /// Text file extracted from the document ("-" for stdin)
        input: PathBuf,

        /// Character budget per chunk (200-1000)
        #[arg(long)]
        chunk_size: Option<usize>,

        /// Print a JSON manifest instead of plain chunks
        #[arg(long)]
        json: bool,
    },
    /// Split a story into storybook pages with illustration prompts
    Story {
        /// Story text file ("-" for stdin)
        input: PathBuf,

        /// Sentences-per-page hint (2-5)
        #[arg(long)]
        sentences_per_page: Option<usize>,

        /// Illustration style (storybook, modern, fantasy)
        #[arg(long)]
        style: Option<ImageStyle>,

        /// Characters per printed line
        #[arg(long)]
        line_width: Option<usize>,

        /// Print the storybook as JSON
        #[arg(long)]
        json: bool,
    },
    /// List the most frequent keywords of a text
    Keywords {
        /// Text file ("-" for stdin)
        input: PathBuf,

        /// Number of keywords to list
        #[arg(long)]
        max: Option<usize>,
    },
    /// Configuration management
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand, Debug)]
enum ConfigAction {
    /// Show current configuration
    Show,
    /// Set default audio chunk size
    SetChunkSize {
        /// Characters (200-1000)
        value: usize,
    },
    /// Set default sentences-per-page hint
    SetSentencesPerPage {
        /// Sentences (2-5)
        value: usize,
    },
    /// Set default illustration style
    SetStyle {
        /// storybook, modern or fantasy
        style: ImageStyle,
    },
    /// Set default sentence splitter
    SetSplitter {
        /// rules or dialog
        splitter: SplitterKind,
    },
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(args.debug);

    match &args.command {
        Commands::Config { action } => handle_config_command(action),
        Commands::Audio {
            input,
            chunk_size,
            json,
        } => {
            let config = load_config(args.splitter)?;
            let chunk_size = clamp_chunk_size(chunk_size.unwrap_or(config.chunk_size));
            run_audio(input, chunk_size, *json, &config)
        }
        Commands::Story {
            input,
            sentences_per_page,
            style,
            line_width,
            json,
        } => {
            let config = load_config(args.splitter)?;
            run_story(
                input,
                clamp_sentences_per_page(sentences_per_page.unwrap_or(config.sentences_per_page)),
                style.unwrap_or(config.image_style),
                line_width.unwrap_or(config.line_width),
                *json,
                &config,
            )
        }
        Commands::Keywords { input, max } => {
            let config = load_config(args.splitter)?;
            run_keywords(input, max.unwrap_or(config.max_keywords))
        }
    }
}

/// Load the saved configuration and apply command-line overrides.
fn load_config(splitter: Option<SplitterKind>) -> Result<GenMediaConfig> {
    let mut config = GenMediaConfig::load().context("Failed to load configuration")?;
    if let Some(splitter) = splitter {
        config.splitter = splitter;
    }
    debug!("Configuration: {:?}", config);
    Ok(config)
}

fn init_logging(debug: bool) {
    let default_filter = if debug { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .format_timestamp(None)
        .init();
}

fn run_audio(input: &Path, chunk_size: usize, json: bool, config: &GenMediaConfig) -> Result<()> {
    let raw = source::read_text(input)?;
    let segmenter = Segmenter::with_splitter(config.splitter.build()?);
    let manifest = build_audio_manifest(&segmenter, &raw, source::display_name(input), chunk_size)?;

    eprintln!(
        "Text segmented into {} chunks ({} characters)",
        manifest.chunks.len(),
        manifest.total_characters()
    );

    if json {
        println!("{}", serde_json::to_string_pretty(&manifest)?);
    } else {
        for chunk in &manifest.chunks {
            println!("[{}] {}", chunk.index + 1, chunk.text);
        }
    }

    Ok(())
}

/// Clean extracted text and cut it into TTS chunks.
fn build_audio_manifest<S: SentenceSplitter>(
    segmenter: &Segmenter<S>,
    raw: &str,
    source: String,
    chunk_size: usize,
) -> Result<AudioManifest> {
    let text = normalize(raw);

    let characters = text.chars().count();
    if characters < MIN_EXTRACTED_CHARS {
        anyhow::bail!(
            "No meaningful text in {} after cleaning ({} characters)",
            source,
            characters
        );
    }
    eprintln!("Extracted {} characters", characters);

    let segmentation = segmenter
        .segment_for_audio(&text, chunk_size)
        .context("Failed to segment text for audio")?;

    if let Some(reason) = segmentation.fallback_reason() {
        eprintln!("Warning: {}; using fixed-width chunks", reason);
    }

    Ok(AudioManifest::new(
        source,
        chunk_size,
        segmenter.splitter().name(),
        segmentation,
    ))
}

fn run_story(
    input: &Path,
    sentences_per_page: usize,
    style: ImageStyle,
    line_width: usize,
    json: bool,
    config: &GenMediaConfig,
) -> Result<()> {
    let raw = source::read_text(input)?;
    let segmenter = Segmenter::with_splitter(config.splitter.build()?);
    let book = build_storybook(
        &segmenter,
        &raw,
        source::display_name(input),
        sentences_per_page,
        style,
        line_width,
    )?;
    eprintln!("Created {} pages", book.pages.len());

    if json {
        println!("{}", serde_json::to_string_pretty(&book)?);
    } else {
        for page in &book.pages {
            println!("--- Page {} ---", page.number);
            println!("{}", page.wrapped);
            println!("[illustration: {}]", page.image_prompt);
            println!();
        }
    }

    Ok(())
}

/// Paginate a story and attach wrapped text and illustration prompts.
fn build_storybook<S: SentenceSplitter>(
    segmenter: &Segmenter<S>,
    raw: &str,
    source: String,
    sentences_per_page: usize,
    style: ImageStyle,
    line_width: usize,
) -> Result<Storybook> {
    let pages = segmenter
        .paginate_story(raw, sentences_per_page)
        .context("Failed to split story into pages")?;

    if pages.is_empty() {
        anyhow::bail!("No story text found in {}", source);
    }

    Ok(Storybook::new(source, pages, style, line_width))
}

fn run_keywords(input: &Path, max: usize) -> Result<()> {
    let raw = source::read_text(input)?;
    let keywords = extract_keywords(&normalize(&raw), max);

    if keywords.is_empty() {
        eprintln!("No keywords found");
    }
    for keyword in keywords {
        println!("{}", keyword);
    }

    Ok(())
}

fn handle_config_command(action: &ConfigAction) -> Result<()> {
    match action {
        ConfigAction::Show => {
            let config = GenMediaConfig::load()?;
            println!("Configuration file: {:?}", GenMediaConfig::config_path());
            println!();
            println!("chunk_size = {}", config.chunk_size);
            println!("sentences_per_page = {}", config.sentences_per_page);
            println!("image_style = \"{}\"", config.image_style);
            println!("line_width = {}", config.line_width);
            println!("max_keywords = {}", config.max_keywords);
            println!("splitter = \"{}\"", config.splitter);
        }
        ConfigAction::SetChunkSize { value } => {
            let mut config = GenMediaConfig::load()?;
            config.set_chunk_size(*value);
            config.save()?;
            println!("Default chunk size set to: {}", config.chunk_size);
        }
        ConfigAction::SetSentencesPerPage { value } => {
            let mut config = GenMediaConfig::load()?;
            config.set_sentences_per_page(*value);
            config.save()?;
            println!("Default sentences per page set to: {}", config.sentences_per_page);
        }
        ConfigAction::SetStyle { style } => {
            let mut config = GenMediaConfig::load()?;
            config.image_style = *style;
            config.save()?;
            println!("Default image style set to: {}", config.image_style);
        }
        ConfigAction::SetSplitter { splitter } => {
            let mut config = GenMediaConfig::load()?;
            config.splitter = *splitter;
            config.save()?;
            println!("Default splitter set to: {}", config.splitter);
        }
    }
    Ok(())
}

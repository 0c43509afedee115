//! CLI tool for converting text files into slide decks.

use anyhow::{bail, Context, Result};
use clap::Parser;
use deckgen_core::DeckStyle;
use deckgen_llm::{request_outline, OpenAiClient, OutlineParams};
use deckgen_pptx::DeckWriter;
use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};

/// Convert a text or document file into a .pptx presentation.
#[derive(Parser, Debug)]
#[command(name = "deckgen")]
#[command(version, about, long_about = None)]
struct Args {
    /// Input file (.txt, .md, .docx, .pptx); omit when using --text
    input: Option<PathBuf>,

    /// Use this text directly instead of reading a file
    #[arg(short, long, conflicts_with = "input")]
    text: Option<String>,

    /// Presentation title
    #[arg(short = 'T', long, default_value = "Generated Presentation")]
    title: String,

    /// Presentation style (professional, creative, minimal)
    #[arg(short, long, default_value = "professional")]
    style: String,

    /// Output file (default: input stem + .pptx, or deck.pptx with --text)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Chat model to use
    #[arg(short, long)]
    model: Option<String>,

    /// Verbose output
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    // Initialize logging
    if args.verbose {
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("debug")).init();
    } else {
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    }

    // A missing credential is fatal before any network call.
    let api_key = match std::env::var("OPENAI_API_KEY") {
        Ok(key) if !key.trim().is_empty() => key,
        _ => bail!("OPENAI_API_KEY is not set"),
    };

    let text = match (&args.text, &args.input) {
        (Some(text), _) => text.clone(),
        (None, Some(path)) => read_input(path)?,
        (None, None) => bail!("provide an input file or --text"),
    };
    if text.trim().is_empty() {
        bail!("input text is empty");
    }

    let style = DeckStyle::from_name(&args.style);

    let mut params = OutlineParams::from_env();
    if let Some(model) = &args.model {
        params.model = model.clone();
    }

    let mut client = OpenAiClient::new(api_key);
    if let Ok(base_url) = std::env::var("OPENAI_BASE_URL") {
        client = client.with_base_url(base_url);
    }

    if args.verbose {
        eprintln!("Requesting outline ({} chars of input)", text.len());
    }

    // Provider failures resolve to the fallback deck; conversion
    // always proceeds.
    let slides = request_outline(&client, &text, &args.title, style, &params).await;

    if args.verbose {
        eprintln!("Outline has {} content slides", slides.len());
    }

    let output_path = output_path(&args);
    let bytes = DeckWriter::new(style)
        .to_bytes(&args.title, &slides)
        .context("Failed to render deck")?;
    write_output(&output_path, &bytes)?;

    println!("Written to: {}", output_path.display());

    Ok(())
}

/// Read and extract text from the input file.
fn read_input(path: &Path) -> Result<String> {
    let bytes =
        std::fs::read(path).with_context(|| format!("Failed to open {}", path.display()))?;

    let filename = path
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or("input");

    log::debug!("extracting text from {} ({} bytes)", filename, bytes.len());

    deckgen_extract::extract_text(&bytes, filename)
        .with_context(|| format!("Failed to extract text from {}", path.display()))
}

/// Determine the output path: explicit flag, input stem, or deck.pptx.
fn output_path(args: &Args) -> PathBuf {
    if let Some(path) = &args.output {
        return path.clone();
    }

    match &args.input {
        Some(input) => {
            let stem = input
                .file_stem()
                .and_then(|s| s.to_str())
                .unwrap_or("deck");
            let filename = format!("{}.pptx", stem);
            match input.parent() {
                Some(parent) if parent != Path::new("") => parent.join(filename),
                _ => PathBuf::from(filename),
            }
        }
        None => PathBuf::from("deck.pptx"),
    }
}

/// Write the rendered deck to a file.
fn write_output(path: &Path, bytes: &[u8]) -> Result<()> {
    let mut file =
        File::create(path).with_context(|| format!("Failed to create {}", path.display()))?;

    file.write_all(bytes)
        .with_context(|| format!("Failed to write to {}", path.display()))?;

    Ok(())
}

//! CLI binary for doc2text.
//!
//! A thin shim over the library crate that maps CLI flags to
//! `ExtractionConfig`, resolves a vision provider, and prints results.

use anyhow::{Context, Result};
use clap::Parser;
use doc2text::{
    extract, extract_to_file, ExtractionConfig, ProcessingMode, VisionLlmEngine,
};
use std::io::{self, Write};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

const AFTER_HELP: &str = r#"EXAMPLES:
  # Extract a scanned image to stdout
  doc2text scan.png

  # Extract a PDF to a file
  doc2text report.pdf -o report.txt

  # Plain transcription with a specific model
  doc2text --mode plain --model gpt-4.1 --provider openai scan.jpg

  # Use a pdfium library in a non-standard location
  doc2text --rasterizer-path /opt/pdfium report.pdf -o report.txt

  # Stats and text as JSON
  doc2text --json report.pdf > report.json

ENVIRONMENT VARIABLES:
  OPENAI_API_KEY        OpenAI API key (preferred when several keys are set)
  ANTHROPIC_API_KEY     Anthropic API key
  GEMINI_API_KEY        Google Gemini API key
  DOC2TEXT_PROVIDER     Override provider (openai, anthropic, gemini, ollama)
  DOC2TEXT_MODEL        Override model ID

SETUP:
  1. Set API key:   export OPENAI_API_KEY=sk-...
  2. Extract:       doc2text document.pdf -o document.txt

  PDF inputs need the pdfium shared library on the system, or pass
  --rasterizer-path pointing at the directory containing it.
"#;

/// Extract plain text from scanned documents and PDFs using Vision LLMs.
#[derive(Parser, Debug)]
#[command(
    name = "doc2text",
    version,
    about = "Extract plain text from images and PDFs using Vision LLMs",
    arg_required_else_help = true,
    color = clap::ColorChoice::Auto,
    after_long_help = AFTER_HELP
)]
struct Cli {
    /// Input file: jpg, jpeg, png, tif, tiff, webp, or pdf.
    input: PathBuf,

    /// Write text to this file instead of stdout.
    #[arg(short, long, env = "DOC2TEXT_OUTPUT")]
    output: Option<PathBuf>,

    /// Vision LLM model ID (e.g. gpt-4.1-nano, claude-sonnet-4-20250514).
    #[arg(long, env = "DOC2TEXT_MODEL")]
    model: Option<String>,

    /// LLM provider: openai, anthropic, gemini, ollama, azure.
    #[arg(long, env = "DOC2TEXT_PROVIDER")]
    provider: Option<String>,

    /// Rasterisation DPI for PDF pages (72–600).
    #[arg(long, env = "DOC2TEXT_DPI", default_value_t = 300,
          value_parser = clap::value_parser!(u32).range(72..=600))]
    dpi: u32,

    /// OCR behaviour: layout (layout-aware) or plain.
    #[arg(long, env = "DOC2TEXT_MODE", value_enum, default_value = "layout")]
    mode: ModeArg,

    /// Directory containing the pdfium shared library.
    #[arg(long, env = "DOC2TEXT_RASTERIZER_PATH")]
    rasterizer_path: Option<PathBuf>,

    /// Number of in-flight page requests inside the engine.
    #[arg(short, long, env = "DOC2TEXT_CONCURRENCY", default_value_t = 4)]
    concurrency: usize,

    /// Retries per page on transient engine failures.
    #[arg(long, env = "DOC2TEXT_MAX_RETRIES", default_value_t = 3)]
    max_retries: u32,

    /// Max LLM output tokens per page.
    #[arg(long, env = "DOC2TEXT_MAX_TOKENS", default_value_t = 4096)]
    max_tokens: usize,

    /// LLM temperature (0.0–2.0).
    #[arg(long, env = "DOC2TEXT_TEMPERATURE", default_value_t = 0.1)]
    temperature: f32,

    /// Output structured JSON (text + stats) instead of plain text.
    #[arg(long, env = "DOC2TEXT_JSON")]
    json: bool,

    /// Enable DEBUG-level tracing logs.
    #[arg(short, long, env = "DOC2TEXT_VERBOSE")]
    verbose: bool,

    /// Suppress all output except errors.
    #[arg(short, long, env = "DOC2TEXT_QUIET")]
    quiet: bool,
}

#[derive(clap::ValueEnum, Clone, Debug)]
enum ModeArg {
    Layout,
    Plain,
}

impl From<ModeArg> for ProcessingMode {
    fn from(v: ModeArg) -> Self {
        match v {
            ModeArg::Layout => ProcessingMode::LayoutAware,
            ModeArg::Plain => ProcessingMode::Plain,
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // ── Logging setup ────────────────────────────────────────────────────
    let filter = if cli.quiet {
        "error"
    } else if cli.verbose {
        "debug"
    } else {
        "info"
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)),
        )
        .with_writer(io::stderr)
        .init();

    // ── Build config and engine ──────────────────────────────────────────
    let mut builder = ExtractionConfig::builder()
        .dpi(cli.dpi)
        .mode(cli.mode.clone().into());
    if let Some(ref path) = cli.rasterizer_path {
        builder = builder.rasterizer_path(path);
    }
    let config = builder.build().context("Invalid configuration")?;

    let engine = resolve_engine(&cli)?
        .with_concurrency(cli.concurrency)
        .with_max_retries(cli.max_retries)
        .with_max_tokens(cli.max_tokens)
        .with_temperature(cli.temperature);

    // ── Run extraction ───────────────────────────────────────────────────
    if let Some(ref output_path) = cli.output {
        let stats = extract_to_file(&cli.input, output_path, &engine, &config)
            .await
            .context("Extraction failed")?;

        if !cli.quiet {
            eprintln!(
                "{} pages  {}ms  →  {}",
                stats.page_count,
                stats.total_duration_ms,
                output_path.display(),
            );
            eprintln!(
                "   {} tokens in  /  {} tokens out",
                stats.total_input_tokens, stats.total_output_tokens,
            );
        }
    } else {
        let output = extract(&cli.input, &engine, &config)
            .await
            .context("Extraction failed")?;

        if cli.json {
            let json =
                serde_json::to_string_pretty(&output).context("Failed to serialise output")?;
            println!("{json}");
        } else {
            let stdout = io::stdout();
            let mut handle = stdout.lock();
            handle
                .write_all(output.text.as_bytes())
                .context("Failed to write to stdout")?;
            if !output.text.ends_with('\n') {
                handle.write_all(b"\n").ok();
            }
        }

        if !cli.quiet && !cli.json {
            eprintln!(
                "   {} pages  —  {} tokens in / {} tokens out  —  {}ms total",
                output.stats.page_count,
                output.stats.total_input_tokens,
                output.stats.total_output_tokens,
                output.stats.total_duration_ms,
            );
        }
    }

    Ok(())
}

/// Resolve the OCR engine, from most-specific to least-specific.
///
/// 1. **Named provider** (`--provider`, optional `--model`) — instantiated
///    directly; the factory reads the matching API key from the environment.
/// 2. **Full auto-detection** — scans known API key variables, preferring
///    OpenAI when `OPENAI_API_KEY` is present.
fn resolve_engine(cli: &Cli) -> Result<VisionLlmEngine> {
    let engine = if let Some(ref name) = cli.provider {
        let model = cli.model.as_deref().unwrap_or("gpt-4.1-nano");
        VisionLlmEngine::from_provider_name(name, model)
    } else {
        VisionLlmEngine::from_env(cli.model.as_deref())
    };
    engine.context("No vision provider available")
}

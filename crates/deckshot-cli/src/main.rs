//! deckshot - export a web slide deck to PDF
//!
//! Usage:
//!   deckshot [MODE] <URL> <OUTPUT> <TIMEOUT_MS>
//!
//! Modes:
//!   print        Wait for the deck's print-ready marker, then use Chrome's PDF export (default)
//!   screenshot   Screenshot every slide and assemble the images with an external converter

use anyhow::{Context, Result};
use clap::Parser;
use deckshot_browser::run_export;
use deckshot_core::{
    CommandConverter, ExportConfig, ExportOutcome, PaperFormat, Settings, TokioClock,
};
use std::path::{Path, PathBuf};
use tracing::info;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

#[derive(Parser, Debug)]
#[command(name = "deckshot")]
#[command(author, version, about = "Export a web slide deck to PDF with a headless browser")]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    /// Settings file (defaults to ./deckshot.toml when present)
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Pause between slides in screenshot mode, in milliseconds
    #[arg(long, value_name = "MS")]
    delay: Option<u64>,

    /// Print-ready marker selector
    #[arg(long, value_name = "CSS")]
    selector: Option<String>,

    /// Directory for slide screenshots
    #[arg(long, value_name = "DIR")]
    image_dir: Option<PathBuf>,

    /// Image-to-PDF converter program
    #[arg(long, value_name = "PROGRAM")]
    converter: Option<String>,

    /// Stop after this many slides
    #[arg(long, value_name = "N")]
    max_slides: Option<usize>,

    /// Paper size for print mode (a4, letter)
    #[arg(long)]
    paper: Option<String>,

    /// Landscape orientation for print mode
    #[arg(long)]
    landscape: bool,

    /// Show the browser window
    #[arg(long)]
    show_browser: bool,

    /// Keep Chrome's sandbox enabled
    #[arg(long)]
    sandbox: bool,

    /// Chrome/Chromium executable
    #[arg(long, value_name = "PATH")]
    chrome: Option<PathBuf>,

    /// [MODE] URL OUTPUT TIMEOUT_MS
    #[arg(value_name = "ARGS", num_args = 3..=4, required = true)]
    args: Vec<String>,
}

impl Cli {
    /// Validate positional arguments and merge flags over file settings
    fn prepare(&self, settings_dir: &Path) -> Result<(ExportConfig, Settings)> {
        let config = ExportConfig::from_args(&self.args)
            .with_context(|| format!("Usage: deckshot {}", ExportConfig::USAGE))?;

        let mut settings = match &self.config {
            Some(path) => Settings::load(path)
                .with_context(|| format!("Failed to load settings from {}", path.display()))?,
            None => Settings::load_or_default(settings_dir)?,
        };
        self.apply_overrides(&mut settings)?;
        settings.validate()?;

        Ok((config, settings))
    }

    fn apply_overrides(&self, settings: &mut Settings) -> Result<()> {
        if let Some(delay) = self.delay {
            settings.slide_delay_ms = delay;
        }
        if let Some(selector) = &self.selector {
            settings.ready_selector = selector.clone();
        }
        if let Some(dir) = &self.image_dir {
            settings.image_dir = dir.clone();
        }
        if let Some(converter) = &self.converter {
            settings.converter = converter.clone();
        }
        if let Some(max) = self.max_slides {
            settings.max_slides = max;
        }
        if let Some(paper) = &self.paper {
            settings.paper = paper.parse::<PaperFormat>()?;
        }
        if self.landscape {
            settings.landscape = true;
        }
        if self.show_browser {
            settings.browser.headless = false;
        }
        if self.sandbox {
            settings.browser.sandbox = true;
        }
        if let Some(chrome) = &self.chrome {
            settings.browser.chrome_path = Some(chrome.clone());
        }
        Ok(())
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Setup logging (RUST_LOG takes precedence over --verbose)
    let level = if cli.verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_target(false)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let (config, settings) = cli.prepare(Path::new("."))?;

    info!("Processing {} to {}", config.url, config.output.display());

    let converter = CommandConverter::new(settings.converter.clone());
    let outcome = run_export(&config, &settings, &converter, &TokioClock::new())
        .await
        .with_context(|| format!("Failed to export {}", config.url))?;

    match outcome {
        ExportOutcome::Printed { output, bytes } => {
            println!("Wrote {} ({} bytes)", output.display(), bytes);
        }
        ExportOutcome::Assembled { output, images } => {
            println!("Wrote {} ({} slides)", output.display(), images.len());
        }
    }

    Ok(())
}

//! Unified error types for deckshot

use std::path::PathBuf;
use thiserror::Error;

/// Unified error type for all deckshot operations
#[derive(Error, Debug)]
pub enum DeckError {
    // Configuration errors
    #[error("Invalid arguments: {0}")]
    InvalidArguments(String),

    #[error("Invalid mode '{0}' (expected 'print' or 'screenshot')")]
    InvalidMode(String),

    #[error("Invalid URL '{url}': {reason}")]
    InvalidUrl { url: String, reason: String },

    #[error("Invalid timeout '{0}': expected a positive number of milliseconds")]
    InvalidTimeout(String),

    #[error("Settings error: {0}")]
    Settings(String),

    // Browser errors
    #[error("Browser error: {0}")]
    Browser(String),

    #[error("Navigation failed for {url}: {reason}")]
    Navigation { url: String, reason: String },

    #[error("Timed out after {timeout_ms}ms waiting for {condition}")]
    Timeout { condition: String, timeout_ms: u64 },

    #[error("Deck script error: {0}")]
    Script(String),

    #[error("Screenshot failed: {0}")]
    Screenshot(String),

    #[error("PDF rendering failed: {0}")]
    Pdf(String),

    // Export errors
    #[error("Slide limit of {0} reached before the deck reported its last slide")]
    SlideLimit(usize),

    #[error("No images to convert")]
    NoImages,

    #[error("Image not found: {}", .0.display())]
    MissingImage(PathBuf),

    #[error("Failed to start image converter '{program}': {source}")]
    ConverterSpawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Image converter '{program}' failed ({}): {}", status_text(.status), .stderr.trim())]
    ConverterFailed {
        program: String,
        status: Option<i32>,
        stdout: String,
        stderr: String,
    },

    // I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

fn status_text(status: &Option<i32>) -> String {
    match status {
        Some(code) => format!("exit code {}", code),
        None => "terminated by signal".to_string(),
    }
}

/// Result type alias using DeckError
pub type Result<T> = std::result::Result<T, DeckError>;

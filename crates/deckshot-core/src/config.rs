//! Invocation configuration
//!
//! The command line carries up to four positional values:
//! `[mode] url output timeoutMs`. They are validated eagerly into an
//! [`ExportConfig`] so that a malformed invocation fails before any browser
//! is launched.

use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;
use url::Url;

use crate::{DeckError, Result};

/// Export strategy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExportMode {
    /// Wait for the print-ready marker and use the browser's built-in PDF export
    #[default]
    Print,
    /// Screenshot each slide and assemble the images with an external converter
    Screenshot,
}

impl ExportMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            ExportMode::Print => "print",
            ExportMode::Screenshot => "screenshot",
        }
    }
}

impl fmt::Display for ExportMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ExportMode {
    type Err = DeckError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "print" | "pdf" => Ok(ExportMode::Print),
            "screenshot" | "screenshots" => Ok(ExportMode::Screenshot),
            _ => Err(DeckError::InvalidMode(s.to_string())),
        }
    }
}

/// Validated positional configuration for one export run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportConfig {
    /// Export strategy
    pub mode: ExportMode,
    /// Deck URL (http, https or file)
    pub url: Url,
    /// Destination PDF path
    pub output: PathBuf,
    /// Navigation and print-ready marker timeout
    pub timeout: Duration,
}

impl ExportConfig {
    pub const USAGE: &'static str = "[mode] <url> <output> <timeoutMs>";

    /// Build a configuration from positional arguments.
    ///
    /// Three values are `url output timeoutMs` with the mode defaulting to
    /// [`ExportMode::Print`]; four values put the mode first.
    pub fn from_args<I, S>(args: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let args: Vec<String> = args.into_iter().map(|a| a.as_ref().to_string()).collect();

        let (mode, rest) = match args.len() {
            3 => (ExportMode::default(), &args[..]),
            4 => (args[0].parse::<ExportMode>()?, &args[1..]),
            n => {
                return Err(DeckError::InvalidArguments(format!(
                    "expected {} but got {} argument{}",
                    Self::USAGE,
                    n,
                    if n == 1 { "" } else { "s" }
                )))
            }
        };

        Ok(Self {
            mode,
            url: parse_url(&rest[0])?,
            output: parse_output(&rest[1])?,
            timeout: parse_timeout(&rest[2])?,
        })
    }

    /// Timeout in whole milliseconds, for error reporting
    pub fn timeout_ms(&self) -> u64 {
        self.timeout.as_millis() as u64
    }
}

fn parse_url(raw: &str) -> Result<Url> {
    let url = Url::parse(raw).map_err(|e| DeckError::InvalidUrl {
        url: raw.to_string(),
        reason: e.to_string(),
    })?;

    match url.scheme() {
        "http" | "https" | "file" => Ok(url),
        other => Err(DeckError::InvalidUrl {
            url: raw.to_string(),
            reason: format!("unsupported scheme '{}'", other),
        }),
    }
}

fn parse_output(raw: &str) -> Result<PathBuf> {
    if raw.trim().is_empty() {
        return Err(DeckError::InvalidArguments(
            "output path must not be empty".to_string(),
        ));
    }
    Ok(PathBuf::from(raw))
}

fn parse_timeout(raw: &str) -> Result<Duration> {
    match raw.trim().parse::<u64>() {
        Ok(ms) if ms > 0 => Ok(Duration::from_millis(ms)),
        _ => Err(DeckError::InvalidTimeout(raw.to_string())),
    }
}

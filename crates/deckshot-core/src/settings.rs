//! Tunable export settings
//!
//! Loaded from `deckshot.toml` when present; every field has a default so an
//! empty or missing file is valid. Command-line flags override file values.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::{DeckError, Result};

/// File name looked up by [`Settings::load_or_default`]
pub const SETTINGS_FILE: &str = "deckshot.toml";

/// Export settings shared by both strategies
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Settings {
    /// Selector the deck applies once it is ready for built-in PDF export
    pub ready_selector: String,

    /// Pause between advancing a slide and capturing it
    pub slide_delay_ms: u64,

    /// Directory receiving slide screenshots
    pub image_dir: PathBuf,

    /// File name prefix for slide screenshots
    pub image_prefix: String,

    /// Upper bound on captured slides
    pub max_slides: usize,

    /// Image-to-PDF converter program
    pub converter: String,

    /// Paper size for print mode
    pub paper: PaperFormat,

    /// Landscape orientation for print mode
    pub landscape: bool,

    /// Print CSS backgrounds in print mode
    pub print_background: bool,

    /// Browser launch options
    pub browser: BrowserSettings,
}

/// Browser launch options
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct BrowserSettings {
    /// Run without a visible window
    pub headless: bool,

    /// Keep Chrome's sandbox enabled (disable for containers without SYS_ADMIN)
    pub sandbox: bool,

    pub window_width: u32,
    pub window_height: u32,

    /// Explicit Chrome/Chromium executable
    pub chrome_path: Option<PathBuf>,
}

/// Paper size for print mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaperFormat {
    #[default]
    A4,
    Letter,
}

impl PaperFormat {
    /// Paper width and height in inches
    pub fn inches(&self) -> (f64, f64) {
        match self {
            PaperFormat::A4 => (8.27, 11.69),
            PaperFormat::Letter => (8.5, 11.0),
        }
    }
}

impl std::str::FromStr for PaperFormat {
    type Err = DeckError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "a4" => Ok(PaperFormat::A4),
            "letter" => Ok(PaperFormat::Letter),
            _ => Err(DeckError::Settings(format!("unknown paper format '{}'", s))),
        }
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            ready_selector: ".print-pdf".to_string(),
            slide_delay_ms: 1000,
            image_dir: PathBuf::from("."),
            image_prefix: "slide-".to_string(),
            max_slides: 500,
            converter: "convert".to_string(),
            paper: PaperFormat::default(),
            landscape: false,
            print_background: false,
            browser: BrowserSettings::default(),
        }
    }
}

impl Default for BrowserSettings {
    fn default() -> Self {
        Self {
            headless: true,
            sandbox: false,
            window_width: 1920,
            window_height: 1080,
            chrome_path: None,
        }
    }
}

impl Settings {
    /// Load settings from a TOML file
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let settings: Self = toml::from_str(&content).map_err(|e| {
            DeckError::Settings(format!("Failed to parse {}: {}", path.display(), e))
        })?;
        settings.validate()?;
        Ok(settings)
    }

    /// Load `deckshot.toml` from `dir` or use defaults
    pub fn load_or_default(dir: &Path) -> Result<Self> {
        let path = dir.join(SETTINGS_FILE);
        if path.exists() {
            Self::load(&path)
        } else {
            Ok(Self::default())
        }
    }

    /// Serialize to TOML
    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self)
            .map_err(|e| DeckError::Settings(format!("Failed to serialize settings: {}", e)))
    }

    /// Check values that serde cannot
    pub fn validate(&self) -> Result<()> {
        if self.max_slides == 0 {
            return Err(DeckError::Settings("max_slides must be at least 1".to_string()));
        }
        if self.converter.trim().is_empty() {
            return Err(DeckError::Settings("converter must not be empty".to_string()));
        }
        if self.ready_selector.trim().is_empty() {
            return Err(DeckError::Settings("ready_selector must not be empty".to_string()));
        }
        if self.browser.window_width == 0 || self.browser.window_height == 0 {
            return Err(DeckError::Settings(
                "browser window dimensions must be non-zero".to_string(),
            ));
        }
        Ok(())
    }

    pub fn slide_delay(&self) -> Duration {
        Duration::from_millis(self.slide_delay_ms)
    }

    /// Screenshot path for the slide at `index`
    pub fn image_path(&self, index: usize) -> PathBuf {
        self.image_dir
            .join(format!("{}{:03}.png", self.image_prefix, index))
    }
}

//! Headless browser side of deckshot
//!
//! Renders a reveal.js slide deck in Chrome/Chromium and exports it to PDF,
//! either through the deck's print stylesheet or by screenshotting each slide
//! and handing the images to an external converter.
//!
//! # Example
//!
//! ```no_run
//! use deckshot_browser::run_export;
//! use deckshot_core::{CommandConverter, ExportConfig, Settings, TokioClock};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = ExportConfig::from_args([
//!         "screenshot",
//!         "http://localhost:8000/",
//!         "talk.pdf",
//!         "30000",
//!     ])?;
//!     let settings = Settings::default();
//!     let converter = CommandConverter::new(settings.converter.clone());
//!
//!     let outcome = run_export(&config, &settings, &converter, &TokioClock::new()).await?;
//!     println!("{:?} slides", outcome.slide_count());
//!     Ok(())
//! }
//! ```
//!
//! # Requirements
//!
//! - Chrome or Chromium installed (or `chrome_path` set)
//! - For screenshot mode, ImageMagick `convert` or another converter on `PATH`

pub mod browser;
pub mod print;
pub mod reveal;
pub mod run;

pub use browser::{BrowserConfig, BrowserSession};
pub use print::{export_print, pdf_options, PrintablePage};
pub use reveal::RevealDeck;
pub use run::{export_with_session, run_export};

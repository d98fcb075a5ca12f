//! # deckshot-core
//!
//! Core pieces of the deckshot slide exporter that do not need a browser.
//!
//! - [`config`]: positional `[mode] url output timeoutMs` parsing and validation
//! - [`settings`]: tunables loaded from `deckshot.toml`
//! - [`cursor`]: the `HasMore`/`Exhausted` slide cursor
//! - [`deck`]: the [`SlideDeck`] capability a browser page provides
//! - [`convert`]: the [`ImageToPdfConverter`] capability and its process-backed implementation
//! - [`export`]: the screenshot loop tying them together
//! - [`clock`]: injectable time source for slide pacing
//! - [`wait`]: deadline-bounded polling shared by the browser waits

pub mod clock;
pub mod config;
pub mod convert;
pub mod cursor;
pub mod deck;
mod error;
pub mod export;
pub mod settings;
pub mod wait;

pub use clock::{Clock, ManualClock, TokioClock};
pub use config::{ExportConfig, ExportMode};
pub use convert::{CommandConverter, ImageToPdfConverter, RecordingConverter};
pub use cursor::{CursorState, DeckProbe};
pub use deck::{SlideDeck, SlidePosition};
pub use error::{DeckError, Result};
pub use export::{export_slides, ExportOutcome};
pub use settings::{BrowserSettings, PaperFormat, Settings};
pub use wait::wait_until;

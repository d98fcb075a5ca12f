//! Slide deck capability used by the screenshot loop

use async_trait::async_trait;
use std::path::Path;

use crate::cursor::DeckProbe;
use crate::Result;

/// Slide indices as reported by the deck framework
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SlidePosition {
    /// Horizontal slide index
    pub h: u32,
    /// Vertical slide index
    pub v: u32,
    /// Fragment index, if the slide has fragments
    pub f: Option<i32>,
}

/// A slide deck loaded in a page
///
/// Implemented against a live browser in `deckshot-browser`; tests use an
/// in-memory deck.
#[async_trait]
pub trait SlideDeck: Send + Sync {
    /// Write a PNG of the current slide to `path`
    async fn capture(&self, path: &Path) -> Result<()>;

    /// Report whether anything remains after the current slide
    async fn probe(&self) -> Result<DeckProbe>;

    /// Move to the next fragment or slide
    async fn advance(&self) -> Result<()>;

    /// Current position, used for logging only
    async fn position(&self) -> Result<SlidePosition>;
}

//! Screenshot export loop
//!
//! Captures the current slide, probes the deck, advances and pauses until the
//! cursor reports every slide captured, then hands the images to the
//! converter.

use std::path::{Path, PathBuf};
use tracing::{debug, info};

use crate::clock::Clock;
use crate::convert::ImageToPdfConverter;
use crate::cursor::{step, CursorState};
use crate::deck::SlideDeck;
use crate::settings::Settings;
use crate::{DeckError, Result};

/// Result of a completed export
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExportOutcome {
    /// Built-in PDF export wrote `bytes` to `output`
    Printed { output: PathBuf, bytes: usize },
    /// Screenshots were assembled into `output`
    Assembled { output: PathBuf, images: Vec<PathBuf> },
}

impl ExportOutcome {
    pub fn output(&self) -> &Path {
        match self {
            ExportOutcome::Printed { output, .. } | ExportOutcome::Assembled { output, .. } => {
                output
            }
        }
    }

    /// Number of captured slides (screenshot exports only)
    pub fn slide_count(&self) -> Option<usize> {
        match self {
            ExportOutcome::Printed { .. } => None,
            ExportOutcome::Assembled { images, .. } => Some(images.len()),
        }
    }
}

/// Capture every slide of `deck` and assemble the images into `output`
///
/// Successive captures are separated by at least `settings.slide_delay()`.
pub async fn export_slides<D, C, K>(
    deck: &D,
    converter: &C,
    clock: &K,
    settings: &Settings,
    output: &Path,
) -> Result<ExportOutcome>
where
    D: SlideDeck + ?Sized,
    C: ImageToPdfConverter + ?Sized,
    K: Clock + ?Sized,
{
    if !settings.image_dir.as_os_str().is_empty() {
        tokio::fs::create_dir_all(&settings.image_dir).await?;
    }

    let delay = settings.slide_delay();
    let mut images = Vec::new();
    let mut state = CursorState::start();

    let captured = loop {
        match state {
            CursorState::HasMore { index } => {
                if index >= settings.max_slides {
                    return Err(DeckError::SlideLimit(settings.max_slides));
                }

                let path = settings.image_path(index);
                deck.capture(&path).await?;
                debug!(
                    "Captured slide {} at {:?} -> {}",
                    index,
                    clock.elapsed(),
                    path.display()
                );
                images.push(path);

                let probe = deck.probe().await?;
                state = step(state, probe);

                if !state.is_exhausted() {
                    deck.advance().await?;
                    let position = deck.position().await?;
                    debug!(
                        "Advanced to h={} v={} f={:?}",
                        position.h, position.v, position.f
                    );
                    clock.sleep(delay).await;
                }
            }
            CursorState::Exhausted { captured } => break captured,
        }
    };

    info!("Captured {} slides", captured);

    converter.convert(&images, output).await?;

    Ok(ExportOutcome::Assembled {
        output: output.to_path_buf(),
        images,
    })
}

//! reveal.js in-page API adapter

use async_trait::async_trait;
use deckshot_core::{DeckError, DeckProbe, Result, SlideDeck, SlidePosition};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::path::Path;
use std::time::Duration;
use tracing::debug;

use crate::browser::BrowserSession;

const PROBE_SCRIPT: &str = r#"(() => {
    if (typeof Reveal === 'undefined') return null;
    return JSON.stringify({
        is_last_slide: Reveal.isLastSlide(),
        has_next_fragment: !!Reveal.availableFragments().next
    });
})()"#;

const READY_SCRIPT: &str = "typeof Reveal !== 'undefined' \
    && (typeof Reveal.isReady !== 'function' || Reveal.isReady() === true)";

const ADVANCE_SCRIPT: &str =
    "(() => { if (typeof Reveal === 'undefined') return false; Reveal.next(); return true; })()";

const INDICES_SCRIPT: &str = r#"(() => {
    if (typeof Reveal === 'undefined') return null;
    const i = Reveal.getIndices();
    return JSON.stringify({ h: i.h, v: i.v || 0, f: (typeof i.f === 'number') ? i.f : null });
})()"#;

/// Slide deck driven through the page's `Reveal` global
pub struct RevealDeck<'a> {
    session: &'a BrowserSession,
}

impl<'a> RevealDeck<'a> {
    pub fn new(session: &'a BrowserSession) -> Self {
        Self { session }
    }

    /// Wait until the page defines `Reveal` and the deck reports itself ready
    ///
    /// Decks load plugins, fonts and images after the load event, so slides
    /// are not read or captured before `Reveal.isReady()` holds.
    pub async fn wait_ready(&self, timeout: Duration) -> Result<()> {
        self.session
            .wait_for_script("the Reveal deck to become ready", READY_SCRIPT, timeout)
            .await?;
        debug!("Reveal deck ready");
        Ok(())
    }

    /// Run a script that returns a JSON string, or `null` without a deck
    async fn query<T: DeserializeOwned>(&self, script: &str) -> Result<T> {
        let value = self.session.evaluate_script(script).await?;
        let raw = value.as_str().ok_or_else(missing_reveal)?;
        serde_json::from_str(raw)
            .map_err(|e| DeckError::Script(format!("Unexpected deck response '{}': {}", raw, e)))
    }
}

fn missing_reveal() -> DeckError {
    DeckError::Script("page does not expose a Reveal deck".to_string())
}

#[async_trait]
impl SlideDeck for RevealDeck<'_> {
    async fn capture(&self, path: &Path) -> Result<()> {
        let bytes = self.session.capture_png(path).await?;
        debug!("Wrote {} ({} bytes)", path.display(), bytes);
        Ok(())
    }

    async fn probe(&self) -> Result<DeckProbe> {
        #[derive(Deserialize)]
        struct Probe {
            is_last_slide: bool,
            has_next_fragment: bool,
        }

        let probe: Probe = self.query(PROBE_SCRIPT).await?;
        Ok(DeckProbe {
            is_last_slide: probe.is_last_slide,
            has_next_fragment: probe.has_next_fragment,
        })
    }

    async fn advance(&self) -> Result<()> {
        match self.session.evaluate_script(ADVANCE_SCRIPT).await?.as_bool() {
            Some(true) => Ok(()),
            _ => Err(missing_reveal()),
        }
    }

    async fn position(&self) -> Result<SlidePosition> {
        #[derive(Deserialize)]
        struct Indices {
            h: u32,
            v: u32,
            f: Option<i32>,
        }

        let indices: Indices = self.query(INDICES_SCRIPT).await?;
        Ok(SlidePosition {
            h: indices.h,
            v: indices.v,
            f: indices.f,
        })
    }
}

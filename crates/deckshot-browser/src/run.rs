//! One export run: launch, navigate, export, close

use deckshot_core::{
    export_slides, Clock, ExportConfig, ExportMode, ExportOutcome, ImageToPdfConverter, Result,
    Settings,
};
use tracing::{info, instrument};

use crate::browser::{close_quietly, BrowserConfig, BrowserSession};
use crate::print::export_print;
use crate::reveal::RevealDeck;

/// Export the deck at `config.url` to `config.output`
///
/// The browser is closed on every exit path. When both the export and the
/// close fail, the export error is returned.
#[instrument(skip_all, fields(mode = %config.mode, url = %config.url))]
pub async fn run_export<C, K>(
    config: &ExportConfig,
    settings: &Settings,
    converter: &C,
    clock: &K,
) -> Result<ExportOutcome>
where
    C: ImageToPdfConverter + ?Sized,
    K: Clock + ?Sized,
{
    settings.validate()?;

    let browser_config =
        BrowserConfig::from_settings(&settings.browser, config.timeout, settings.slide_delay());
    let session = BrowserSession::launch_with_config(browser_config).await?;

    let outcome = export_with_session(&session, config, settings, converter, clock).await;

    match outcome {
        Ok(outcome) => {
            session.close().await?;
            info!("Export finished: {}", outcome.output().display());
            Ok(outcome)
        }
        Err(e) => {
            close_quietly(session).await;
            Err(e)
        }
    }
}

/// Run the configured export against an already launched session
pub async fn export_with_session<C, K>(
    session: &BrowserSession,
    config: &ExportConfig,
    settings: &Settings,
    converter: &C,
    clock: &K,
) -> Result<ExportOutcome>
where
    C: ImageToPdfConverter + ?Sized,
    K: Clock + ?Sized,
{
    session.navigate(config.url.as_str()).await?;

    match config.mode {
        ExportMode::Print => export_print(session, settings, &config.output, config.timeout).await,
        ExportMode::Screenshot => {
            let deck = RevealDeck::new(session);
            deck.wait_ready(config.timeout).await?;
            export_slides(&deck, converter, clock, settings, &config.output).await
        }
    }
}

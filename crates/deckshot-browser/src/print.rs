//! Built-in PDF export through the deck's print stylesheet

use async_trait::async_trait;
use deckshot_core::{ExportOutcome, PaperFormat, Result, Settings};
use headless_chrome::types::PrintToPdfOptions;
use std::path::Path;
use std::time::Duration;
use tracing::info;

use crate::browser::BrowserSession;

/// Page operations needed for built-in PDF export (allows mocking in tests)
#[async_trait]
pub trait PrintablePage: Send + Sync {
    /// Wait until `selector` matches a visible element
    async fn wait_for_visible(&self, selector: &str, timeout: Duration) -> Result<()>;

    /// Render the page to PDF bytes
    async fn print_pdf(&self, options: PrintToPdfOptions) -> Result<Vec<u8>>;
}

#[async_trait]
impl PrintablePage for BrowserSession {
    async fn wait_for_visible(&self, selector: &str, timeout: Duration) -> Result<()> {
        BrowserSession::wait_for_visible(self, selector, timeout).await
    }

    async fn print_pdf(&self, options: PrintToPdfOptions) -> Result<Vec<u8>> {
        BrowserSession::print_pdf(self, options).await
    }
}

/// PDF options for the configured paper and orientation
pub fn pdf_options(settings: &Settings) -> PrintToPdfOptions {
    let (width, height) = settings.paper.inches();
    PrintToPdfOptions {
        landscape: Some(settings.landscape),
        print_background: Some(settings.print_background),
        paper_width: Some(width),
        paper_height: Some(height),
        ..Default::default()
    }
}

/// Wait for the print-ready marker, then write the page as PDF to `output`
///
/// Nothing is written when the marker does not become visible within
/// `timeout`.
pub async fn export_print<P: PrintablePage + ?Sized>(
    page: &P,
    settings: &Settings,
    output: &Path,
    timeout: Duration,
) -> Result<ExportOutcome> {
    page.wait_for_visible(&settings.ready_selector, timeout)
        .await?;

    let pdf = page.print_pdf(pdf_options(settings)).await?;
    tokio::fs::write(output, &pdf).await?;

    info!(
        "Wrote {} ({} bytes, {})",
        output.display(),
        pdf.len(),
        paper_name(settings.paper)
    );

    Ok(ExportOutcome::Printed {
        output: output.to_path_buf(),
        bytes: pdf.len(),
    })
}

fn paper_name(paper: PaperFormat) -> &'static str {
    match paper {
        PaperFormat::A4 => "A4",
        PaperFormat::Letter => "Letter",
    }
}

//! Browser lifecycle management using Chrome DevTools Protocol

use deckshot_core::{wait_until, BrowserSettings, DeckError, Result, TokioClock};
use headless_chrome::protocol::cdp::Page::CaptureScreenshotFormatOption;
use headless_chrome::types::PrintToPdfOptions;
use headless_chrome::{Browser, LaunchOptions, Tab};
use std::ffi::OsStr;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info, warn};

/// Interval between in-page condition checks
const POLL_INTERVAL: Duration = Duration::from_millis(100);

/// Extra time the CDP connection may stay silent beyond the longest wait
const IDLE_GRACE: Duration = Duration::from_secs(60);

const DOCUMENT_READY_SCRIPT: &str = "document.readyState === 'complete'";

/// Configuration for browser launch
#[derive(Debug, Clone)]
pub struct BrowserConfig {
    /// Run in headless mode (default: true)
    pub headless: bool,
    /// Keep Chrome's sandbox (default: false, for containers)
    pub sandbox: bool,
    /// Browser window width
    pub window_width: u32,
    /// Browser window height
    pub window_height: u32,
    /// Chrome/Chromium executable; auto-detected when None
    pub chrome_path: Option<PathBuf>,
    /// Navigation timeout
    pub timeout: Duration,
    /// Pause between slides, during which nothing is sent to the browser
    pub slide_delay: Duration,
}

impl BrowserConfig {
    pub fn from_settings(
        settings: &BrowserSettings,
        timeout: Duration,
        slide_delay: Duration,
    ) -> Self {
        Self {
            headless: settings.headless,
            sandbox: settings.sandbox,
            window_width: settings.window_width,
            window_height: settings.window_height,
            chrome_path: settings.chrome_path.clone(),
            timeout,
            slide_delay,
        }
    }

    /// How long the CDP connection may stay silent before it is dropped
    ///
    /// Must outlast both the longest single wait and the slide pause.
    pub fn idle_timeout(&self) -> Duration {
        self.timeout.max(self.slide_delay) + IDLE_GRACE
    }
}

/// Active browser session with Chrome DevTools Protocol
///
/// Dropping the session terminates the browser process.
pub struct BrowserSession {
    /// Underlying browser instance (kept alive for tab lifetime)
    #[allow(dead_code)]
    browser: Browser,
    /// Current active tab
    tab: Arc<Tab>,
    /// Configuration
    config: BrowserConfig,
}

impl BrowserSession {
    /// Launch browser with custom configuration
    pub async fn launch_with_config(config: BrowserConfig) -> Result<Self> {
        info!(
            "Launching browser (headless: {}, sandbox: {}, size: {}x{})",
            config.headless, config.sandbox, config.window_width, config.window_height
        );

        let mut launch_options = LaunchOptions::default_builder()
            .headless(config.headless)
            .sandbox(config.sandbox)
            .window_size(Some((config.window_width, config.window_height)))
            .path(config.chrome_path.clone())
            .idle_browser_timeout(config.idle_timeout())
            .build()
            .map_err(|e| DeckError::Browser(format!("Invalid launch options: {}", e)))?;

        if !config.sandbox {
            launch_options
                .args
                .push(OsStr::new("--disable-setuid-sandbox"));
        }

        let browser = Browser::new(launch_options)
            .map_err(|e| DeckError::Browser(format!("Failed to launch browser: {}", e)))?;

        let tab = browser
            .new_tab()
            .map_err(|e| DeckError::Browser(format!("Failed to create tab: {}", e)))?;
        tab.set_default_timeout(config.timeout);

        info!("Browser launched successfully");

        Ok(Self {
            browser,
            tab,
            config,
        })
    }

    /// Navigate to a URL and wait until the document has finished loading
    ///
    /// Both the load event and `document.readyState === 'complete'` must be
    /// reached within the configured timeout.
    pub async fn navigate(&self, url: &str) -> Result<()> {
        debug!("Navigating to {}", url);

        self.tab.navigate_to(url).map_err(|e| DeckError::Navigation {
            url: url.to_string(),
            reason: e.to_string(),
        })?;

        self.tab
            .wait_until_navigated()
            .map_err(|e| DeckError::Navigation {
                url: url.to_string(),
                reason: format!("did not finish loading within {:?}: {}", self.config.timeout, e),
            })?;

        let condition = format!("{} to finish loading", url);
        self.wait_for_script(&condition, DOCUMENT_READY_SCRIPT, self.config.timeout)
            .await?;

        info!("Successfully navigated to {}", url);
        Ok(())
    }

    /// Wait until an element matching `selector` is present and visible
    ///
    /// Visible means rendered with a non-empty box and neither
    /// `display: none` nor `visibility: hidden`.
    pub async fn wait_for_visible(&self, selector: &str, timeout: Duration) -> Result<()> {
        debug!("Waiting for visible element: {} (timeout: {:?})", selector, timeout);

        let condition = format!("'{}' to become visible", selector);
        self.wait_for_script(&condition, &visibility_script(selector), timeout)
            .await?;

        debug!("Element visible: {}", selector);
        Ok(())
    }

    /// Poll `script` until it evaluates to `true` or `timeout` passes
    pub(crate) async fn wait_for_script(
        &self,
        condition: &str,
        script: &str,
        timeout: Duration,
    ) -> Result<()> {
        wait_until(&TokioClock::new(), condition, timeout, POLL_INTERVAL, || {
            self.script_is_true(script)
        })
        .await
    }

    async fn script_is_true(&self, script: &str) -> Result<bool> {
        Ok(self.evaluate_script(script).await?.as_bool() == Some(true))
    }

    /// Execute JavaScript in the page context
    ///
    /// # Returns
    /// JSON result from JavaScript execution
    pub async fn evaluate_script(&self, script: &str) -> Result<serde_json::Value> {
        debug!("Evaluating JavaScript: {}", script);

        let result = self
            .tab
            .evaluate(script, false)
            .map_err(|e| DeckError::Script(format!("JavaScript evaluation failed: {}", e)))?;

        Ok(result.value.unwrap_or(serde_json::Value::Null))
    }

    /// Capture the viewport as PNG and write it to `path`
    pub async fn capture_png(&self, path: &Path) -> Result<usize> {
        let data = self
            .tab
            .capture_screenshot(CaptureScreenshotFormatOption::Png, None, None, true)
            .map_err(|e| DeckError::Screenshot(format!("CDP capture failed: {}", e)))?;

        tokio::fs::write(path, &data).await?;
        Ok(data.len())
    }

    /// Render the page with the browser's built-in PDF export
    pub async fn print_pdf(&self, options: PrintToPdfOptions) -> Result<Vec<u8>> {
        self.tab
            .print_to_pdf(Some(options))
            .map_err(|e| DeckError::Pdf(e.to_string()))
    }

    /// Close the tab; the browser process ends when the session drops
    pub async fn close(self) -> Result<()> {
        info!("Closing browser session");
        self.tab
            .close(false)
            .map_err(|e| DeckError::Browser(format!("Failed to close tab: {}", e)))?;
        Ok(())
    }
}

impl Drop for BrowserSession {
    fn drop(&mut self) {
        debug!("BrowserSession dropped, browser process will be terminated");
    }
}

/// JavaScript expression that is `true` when `selector` matches a visible element
fn visibility_script(selector: &str) -> String {
    // serde_json quoting doubles as JS string literal escaping
    let quoted = serde_json::to_string(selector).unwrap_or_else(|_| "\"\"".to_string());
    format!(
        r#"(() => {{
    const el = document.querySelector({quoted});
    if (!el) return false;
    const style = window.getComputedStyle(el);
    if (style.display === 'none' || style.visibility === 'hidden') return false;
    const rect = el.getBoundingClientRect();
    return rect.width > 0 || rect.height > 0 || el.getClientRects().length > 0;
}})()"#
    )
}

/// Log and discard a close failure
pub(crate) async fn close_quietly(session: BrowserSession) {
    if let Err(e) = session.close().await {
        warn!("Failed to close browser cleanly: {}", e);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_from_default_settings() {
        let config = BrowserConfig::from_settings(
            &BrowserSettings::default(),
            Duration::from_secs(30),
            Duration::from_secs(1),
        );
        assert!(config.headless);
        assert!(!config.sandbox);
        assert_eq!(config.window_width, 1920);
        assert_eq!(config.window_height, 1080);
        assert_eq!(config.timeout, Duration::from_secs(30));
    }

    #[test]
    fn test_idle_timeout_outlasts_long_slide_delay() {
        let slide_delay = Duration::from_secs(120);
        let config = BrowserConfig::from_settings(
            &BrowserSettings::default(),
            Duration::from_millis(1000),
            slide_delay,
        );
        assert!(config.idle_timeout() > slide_delay);
        assert_eq!(config.idle_timeout(), slide_delay + IDLE_GRACE);
    }

    #[test]
    fn test_idle_timeout_outlasts_navigation_timeout() {
        let timeout = Duration::from_secs(90);
        let config = BrowserConfig::from_settings(
            &BrowserSettings::default(),
            timeout,
            Duration::from_millis(500),
        );
        assert_eq!(config.idle_timeout(), timeout + IDLE_GRACE);
    }

    #[test]
    fn test_config_from_settings() {
        let settings = BrowserSettings {
            headless: false,
            sandbox: true,
            window_width: 1280,
            window_height: 720,
            chrome_path: Some(PathBuf::from("/usr/bin/chromium")),
        };
        let config = BrowserConfig::from_settings(
            &settings,
            Duration::from_millis(2500),
            Duration::from_millis(400),
        );

        assert!(!config.headless);
        assert!(config.sandbox);
        assert_eq!(config.window_width, 1280);
        assert_eq!(config.chrome_path.as_deref(), Some(Path::new("/usr/bin/chromium")));
        assert_eq!(config.timeout, Duration::from_millis(2500));
    }

    #[test]
    fn test_visibility_script_escapes_selector() {
        let script = visibility_script(r#"div[data-x="a'b"]"#);
        assert!(script.contains(r#"document.querySelector("div[data-x=\"a'b\"]")"#));
    }
}

//! Integration tests against the fixture deck in `tests/fixtures/deck.html`.
//!
//! These launch a real Chrome/Chromium and are ignored by default:
//! `cargo test -p deckshot-browser -- --ignored`

use deckshot_browser::run_export;
use deckshot_core::{
    DeckError, ExportConfig, ExportMode, ExportOutcome, RecordingConverter, Settings, TokioClock,
};
use std::path::{Path, PathBuf};
use tempfile::TempDir;
use url::Url;

const PNG_MAGIC: &[u8] = b"\x89PNG";

fn fixture_url(query: &str) -> String {
    let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures/deck.html");
    let mut url = Url::from_file_path(path).expect("fixture path is absolute");
    if !query.is_empty() {
        url.set_query(Some(query));
    }
    url.to_string()
}

fn config(mode: &str, url: &str, output: &Path, timeout_ms: u64) -> ExportConfig {
    ExportConfig::from_args([
        mode.to_string(),
        url.to_string(),
        output.display().to_string(),
        timeout_ms.to_string(),
    ])
    .unwrap()
}

fn screenshot_settings(dir: &TempDir) -> Settings {
    Settings {
        image_dir: dir.path().join("shots"),
        slide_delay_ms: 50,
        ..Default::default()
    }
}

fn is_png(path: &PathBuf) -> bool {
    std::fs::read(path)
        .map(|bytes| bytes.starts_with(PNG_MAGIC))
        .unwrap_or(false)
}

#[tokio::test]
#[ignore = "requires Chrome/Chromium"]
async fn test_print_mode_writes_pdf() {
    let dir = TempDir::new().unwrap();
    let output = dir.path().join("deck.pdf");
    let config = config("print", &fixture_url("print-pdf"), &output, 10_000);
    assert_eq!(config.mode, ExportMode::Print);

    let converter = RecordingConverter::new();
    let outcome = run_export(&config, &Settings::default(), &converter, &TokioClock::new())
        .await
        .unwrap();

    assert!(matches!(outcome, ExportOutcome::Printed { bytes, .. } if bytes > 0));
    let pdf = std::fs::read(&output).unwrap();
    assert!(pdf.starts_with(b"%PDF"));
    assert!(converter.calls().is_empty());
}

#[tokio::test]
#[ignore = "requires Chrome/Chromium"]
async fn test_missing_marker_times_out_without_pdf() {
    let dir = TempDir::new().unwrap();
    let output = dir.path().join("deck.pdf");
    // Without the print-pdf query the marker is never applied
    let config = config("print", &fixture_url(""), &output, 1_000);

    let err = run_export(
        &config,
        &Settings::default(),
        &RecordingConverter::new(),
        &TokioClock::new(),
    )
    .await
    .unwrap_err();

    assert!(matches!(err, DeckError::Timeout { timeout_ms: 1000, .. }));
    assert!(!output.exists());
}

#[tokio::test]
#[ignore = "requires Chrome/Chromium"]
async fn test_screenshot_mode_three_slides() {
    let dir = TempDir::new().unwrap();
    let output = dir.path().join("deck.pdf");
    let settings = screenshot_settings(&dir);
    let config = config("screenshot", &fixture_url("slides=3"), &output, 10_000);

    let converter = RecordingConverter::new();
    let outcome = run_export(&config, &settings, &converter, &TokioClock::new())
        .await
        .unwrap();

    assert_eq!(outcome.slide_count(), Some(3));

    let calls = converter.calls();
    assert_eq!(calls.len(), 1);
    let (images, converted) = &calls[0];
    assert_eq!(converted, &output);
    assert_eq!(
        images,
        &vec![
            settings.image_path(0),
            settings.image_path(1),
            settings.image_path(2)
        ]
    );
    assert!(images.iter().all(is_png));
}

#[tokio::test]
#[ignore = "requires Chrome/Chromium"]
async fn test_screenshot_mode_captures_fragments() {
    let dir = TempDir::new().unwrap();
    let output = dir.path().join("deck.pdf");
    let settings = screenshot_settings(&dir);
    // Slide two reveals two fragments: 1 + (1 + 2) captures
    let config = config(
        "screenshot",
        &fixture_url("slides=2&fragments=0,2"),
        &output,
        10_000,
    );

    let converter = RecordingConverter::new();
    let outcome = run_export(&config, &settings, &converter, &TokioClock::new())
        .await
        .unwrap();

    assert_eq!(outcome.slide_count(), Some(4));
}

#[tokio::test]
#[ignore = "requires Chrome/Chromium"]
async fn test_screenshot_mode_waits_for_late_ready_deck() {
    let dir = TempDir::new().unwrap();
    let output = dir.path().join("deck.pdf");
    let settings = screenshot_settings(&dir);
    // Read before ready, the deck reports a single slide
    let config = config(
        "screenshot",
        &fixture_url("slides=3&ready-delay=1500"),
        &output,
        10_000,
    );

    let converter = RecordingConverter::new();
    let outcome = run_export(&config, &settings, &converter, &TokioClock::new())
        .await
        .unwrap();

    assert_eq!(outcome.slide_count(), Some(3));
}

#[tokio::test]
#[ignore = "requires Chrome/Chromium"]
async fn test_screenshot_mode_never_ready_times_out() {
    let dir = TempDir::new().unwrap();
    let output = dir.path().join("deck.pdf");

    let converter = RecordingConverter::new();
    let err = run_export(
        &config(
            "screenshot",
            &fixture_url("ready-delay=60000"),
            &output,
            1_000,
        ),
        &screenshot_settings(&dir),
        &converter,
        &TokioClock::new(),
    )
    .await
    .unwrap_err();

    assert!(matches!(err, DeckError::Timeout { timeout_ms: 1000, .. }));
    assert!(converter.calls().is_empty());
}

#[tokio::test]
#[ignore = "requires Chrome/Chromium"]
async fn test_screenshot_mode_without_reveal_fails() {
    let dir = TempDir::new().unwrap();
    let page = dir.path().join("plain.html");
    std::fs::write(&page, "<html><body><p>Not a deck</p></body></html>").unwrap();
    let url = Url::from_file_path(&page).unwrap().to_string();
    let output = dir.path().join("deck.pdf");

    let converter = RecordingConverter::new();
    let err = run_export(
        &config("screenshot", &url, &output, 1_000),
        &screenshot_settings(&dir),
        &converter,
        &TokioClock::new(),
    )
    .await
    .unwrap_err();

    assert!(matches!(
        err,
        DeckError::Timeout { ref condition, .. } if condition.contains("Reveal")
    ));
    assert!(converter.calls().is_empty());
    assert!(!output.exists());
}

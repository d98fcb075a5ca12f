//! Image-to-PDF converter abstraction

use async_trait::async_trait;
use std::path::{Path, PathBuf};
use std::process::Output;
use std::sync::Mutex;
use tokio::process::Command;
use tracing::{debug, info, instrument};

use crate::{DeckError, Result};

/// Assembles an ordered sequence of images into one PDF (allows mocking in tests)
#[async_trait]
pub trait ImageToPdfConverter: Send + Sync {
    /// Write `output` with one page per image, in order
    async fn convert(&self, images: &[PathBuf], output: &Path) -> Result<()>;
}

/// Reject an empty list or any image missing on disk
pub fn check_images(images: &[PathBuf]) -> Result<()> {
    if images.is_empty() {
        return Err(DeckError::NoImages);
    }
    if let Some(missing) = images.iter().find(|p| !p.is_file()) {
        return Err(DeckError::MissingImage(missing.clone()));
    }
    Ok(())
}

/// Converter that runs `<program> <images...> <output>`
///
/// The default program is ImageMagick's `convert`; `magick` or `img2pdf -o`
/// style tools that take the output last work as well.
#[derive(Debug, Clone)]
pub struct CommandConverter {
    program: String,
}

impl CommandConverter {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
        }
    }

    pub fn program(&self) -> &str {
        &self.program
    }

    fn failure(&self, output: Output) -> DeckError {
        DeckError::ConverterFailed {
            program: self.program.clone(),
            status: output.status.code(),
            stdout: String::from_utf8_lossy(&output.stdout).to_string(),
            stderr: String::from_utf8_lossy(&output.stderr).to_string(),
        }
    }
}

impl Default for CommandConverter {
    fn default() -> Self {
        Self::new("convert")
    }
}

#[async_trait]
impl ImageToPdfConverter for CommandConverter {
    #[instrument(skip(self, images), fields(program = %self.program, images = images.len()))]
    async fn convert(&self, images: &[PathBuf], output: &Path) -> Result<()> {
        check_images(images)?;

        debug!("Executing {} with {} images", self.program, images.len());

        let result = Command::new(&self.program)
            .args(images)
            .arg(output)
            .output()
            .await
            .map_err(|source| DeckError::ConverterSpawn {
                program: self.program.clone(),
                source,
            })?;

        if !result.status.success() {
            debug!(
                "Converter failed: {}",
                String::from_utf8_lossy(&result.stderr)
            );
            return Err(self.failure(result));
        }

        info!("Assembled {} images into {}", images.len(), output.display());
        Ok(())
    }
}

/// In-memory converter for testing
///
/// Records every call and writes a small placeholder to the output path.
#[derive(Debug, Default)]
pub struct RecordingConverter {
    calls: Mutex<Vec<(Vec<PathBuf>, PathBuf)>>,
}

impl RecordingConverter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every `(images, output)` pair received, in call order
    pub fn calls(&self) -> Vec<(Vec<PathBuf>, PathBuf)> {
        self.calls
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .clone()
    }
}

#[async_trait]
impl ImageToPdfConverter for RecordingConverter {
    async fn convert(&self, images: &[PathBuf], output: &Path) -> Result<()> {
        check_images(images)?;
        self.calls
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push((images.to_vec(), output.to_path_buf()));
        tokio::fs::write(output, format!("%PDF-1.4\n% {} pages\n", images.len())).await?;
        Ok(())
    }
}

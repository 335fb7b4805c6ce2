//! PNG writer for the final photo.

use crate::{config::OutputConfig, interfaces::ImageSink, Error, Result};
use image::{ImageFormat, RgbImage};
use log::info;
use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

/// Writes `<directory>/<prefix>_<unix seconds>.png`
#[derive(Debug, Clone)]
pub struct PngSink {
    directory: PathBuf,
    prefix: String,
}

impl PngSink {
    /// Create a sink; the directory is created on first save
    #[must_use]
    pub fn new(directory: impl Into<PathBuf>, prefix: impl Into<String>) -> Self {
        Self {
            directory: directory.into(),
            prefix: prefix.into(),
        }
    }

    /// Create a sink from the output configuration
    #[must_use]
    pub fn from_config(config: &OutputConfig) -> Self {
        Self::new(config.directory.clone(), config.file_prefix.clone())
    }

    /// Output directory
    #[must_use]
    pub fn directory(&self) -> &Path {
        &self.directory
    }

    /// Path a photo taken at `taken_at` is written to
    #[must_use]
    pub fn path_for(&self, taken_at: SystemTime) -> PathBuf {
        let secs = taken_at.duration_since(UNIX_EPOCH).map_or(0, |d| d.as_secs());
        self.directory.join(format!("{}_{secs}.png", self.prefix))
    }
}

impl ImageSink for PngSink {
    fn save(&mut self, image: &RgbImage, taken_at: SystemTime) -> Result<PathBuf> {
        std::fs::create_dir_all(&self.directory).map_err(|e| {
            Error::Persistence(format!("Failed to create {}: {e}", self.directory.display()))
        })?;

        let path = self.path_for(taken_at);
        image
            .save_with_format(&path, ImageFormat::Png)
            .map_err(|e| Error::Persistence(format!("Failed to write {}: {e}", path.display())))?;

        info!("Photo saved to {}", path.display());
        Ok(path)
    }
}

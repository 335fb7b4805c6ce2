//! Composition of render requests and a headless renderer.

use crate::{
    constants::FINAL_WINDOW,
    imaging::{draw_outline, side_by_side},
    interfaces::Renderer,
    workflow::RenderRequest,
    Result,
};
use image::{ImageFormat, RgbImage};
use log::{debug, info};
use std::path::PathBuf;

/// Flatten a request into one image: outlines on the base, side image to the right.
///
/// Texts are left to the renderer.
#[must_use]
pub fn compose(request: &RenderRequest) -> RgbImage {
    let mut base = request.base.clone();
    for overlay in &request.rects {
        draw_outline(&mut base, &overlay.rect, overlay.color, overlay.thickness);
    }

    match &request.side {
        Some(side) => side_by_side(&base, side),
        None => base,
    }
}

/// Renderer without a display.
///
/// Logs every request and optionally writes each composed frame as a PNG.
/// The final-photo window counts as closed once it has been shown.
pub struct HeadlessRenderer {
    preview_dir: Option<PathBuf>,
    frames: u64,
    last_window: Option<&'static str>,
    final_shown: bool,
}

impl HeadlessRenderer {
    /// Create a renderer, writing previews to `preview_dir` when given
    #[must_use]
    pub fn new(preview_dir: Option<PathBuf>) -> Self {
        Self {
            preview_dir,
            frames: 0,
            last_window: None,
            final_shown: false,
        }
    }

    /// Number of requests rendered so far
    #[must_use]
    pub const fn frames(&self) -> u64 {
        self.frames
    }

    fn write_preview(&self, request: &RenderRequest) -> Result<()> {
        let Some(dir) = &self.preview_dir else {
            return Ok(());
        };
        std::fs::create_dir_all(dir)?;

        let path = dir.join(format!("frame_{:06}.png", self.frames));
        compose(request).save_with_format(&path, ImageFormat::Png)?;
        Ok(())
    }
}

impl Renderer for HeadlessRenderer {
    fn render(&mut self, request: &RenderRequest) -> Result<()> {
        if self.last_window != Some(request.window) {
            info!("Showing window '{}' ({})", request.window, request.mode);
            self.last_window = Some(request.window);
        }
        for text in &request.texts {
            debug!("[{}] text at {:?}: {}", request.window, text.position, text.text);
        }
        for overlay in &request.rects {
            debug!("[{}] outline {:?}", request.window, overlay.rect);
        }

        self.write_preview(request)?;
        self.frames += 1;
        if request.window == FINAL_WINDOW {
            self.final_shown = true;
        }
        Ok(())
    }

    fn is_open(&self, window: &str) -> bool {
        !(window == FINAL_WINDOW && self.final_shown)
    }
}

//! Traits for the collaborators around the capture workflow.
//!
//! Frame acquisition, landmark extraction, display and persistence all
//! live behind these seams so the workflow can be driven by a live camera, a
//! recorded replay, or a test double.

use crate::{
    landmarks::{FaceLandmarks, HandLandmarks},
    session::Controls,
    workflow::RenderRequest,
    Result,
};
use image::RgbImage;
use std::path::PathBuf;
use std::time::{Instant, SystemTime};

/// One acquired frame
#[derive(Debug, Clone)]
pub struct CapturedFrame {
    /// Pixels
    pub image: RgbImage,
    /// Monotonic acquisition time
    pub at: Instant,
    /// Wall-clock acquisition time
    pub wall_time: SystemTime,
}

/// Source of camera frames
pub trait FrameSource {
    /// Next frame, or `None` at the end of the stream.
    ///
    /// An error means the frame could not be read and is fatal.
    fn next_frame(&mut self) -> Result<Option<CapturedFrame>>;
}

/// Hand and face landmark detector
pub trait LandmarkSource {
    /// Hands visible in `frame`, at most two
    fn detect_hands(&mut self, frame: &RgbImage) -> Result<Vec<HandLandmarks>>;

    /// Face visible in `frame`, if any
    fn detect_face(&mut self, frame: &RgbImage) -> Result<Option<FaceLandmarks>>;
}

/// Cancel and reset signals, polled once per frame
pub trait ControlInput {
    /// Current control state
    fn poll(&mut self) -> Controls;
}

/// A device that provides frames, landmarks and controls together
pub trait CaptureDevice: FrameSource + LandmarkSource + ControlInput {}

impl<T: FrameSource + LandmarkSource + ControlInput> CaptureDevice for T {}

/// Display of render requests
pub trait Renderer {
    /// Show one frame's request
    fn render(&mut self, request: &RenderRequest) -> Result<()>;

    /// Whether the named window is still open
    fn is_open(&self, window: &str) -> bool;
}

/// Writer for the final photo
pub trait ImageSink {
    /// Persist `image`, returning where it was written
    fn save(&mut self, image: &RgbImage, taken_at: SystemTime) -> Result<PathBuf>;
}

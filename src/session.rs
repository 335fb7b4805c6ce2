//! Capture session state and its transition function.
//!
//! `CaptureSession::advance` consumes one frame's already-derived events and
//! returns the side effects the caller must carry out. It never touches a
//! camera, window or file itself.

use crate::{
    config::WorkflowConfig,
    constants::ROTATION_STEP_DEG,
    gesture::Gesture,
    head_motion::Tilt,
    imaging::{crop, rotate_quarter_turns, CropRect},
};
use image::RgbImage;
use log::{debug, info};
use std::fmt;
use std::time::{Instant, SystemTime};

/// Workflow mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Mode {
    /// Waiting for a thumbs-up
    Idle,
    /// Countdown before the snapshot
    CountingDown,
    /// Photo taken, waiting for confirmation
    Confirm,
    /// Framing a crop rectangle with both hands
    Crop,
    /// Rotating the cropped photo with head tilts
    Rotate,
    /// Photo saved
    Done,
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Idle => "idle",
            Self::CountingDown => "counting down",
            Self::Confirm => "confirm",
            Self::Crop => "crop",
            Self::Rotate => "rotate",
            Self::Done => "done",
        };
        f.write_str(name)
    }
}

/// Per-frame control signals
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Controls {
    /// Stop the interactive loop
    pub cancel: bool,
    /// Return to Idle and discard the photo
    pub reset: bool,
}

/// Everything recognized in one frame
#[derive(Debug, Clone, Default)]
pub struct FrameEvents {
    /// One gesture per detected hand
    pub gestures: Vec<Gesture>,
    /// A nod was recognized
    pub nod: bool,
    /// A tilt was recognized
    pub tilt: Option<Tilt>,
    /// Rectangle framed by two hands
    pub crop_rect: Option<CropRect>,
    /// Control signals polled for this frame
    pub controls: Controls,
}

impl FrameEvents {
    /// Whether any hand shows `gesture`
    #[must_use]
    pub fn has(&self, gesture: Gesture) -> bool {
        self.gestures.contains(&gesture)
    }
}

/// Side effect requested by a transition
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    /// Write the final photo, keyed by its capture time
    Persist {
        /// Final, rotated photo
        image: RgbImage,
        /// Wall-clock time of the confirming gesture
        taken_at: SystemTime,
    },
    /// The workflow reached Done; show the final photo until closed
    Finish,
    /// Stop immediately
    Terminate,
}

/// The mutable workflow state
#[derive(Debug, Clone)]
pub struct CaptureSession {
    config: WorkflowConfig,
    mode: Mode,
    captured: Option<RgbImage>,
    crop_rect: Option<CropRect>,
    rotation_angle: i32,
    countdown_started: Option<Instant>,
    last_up: Option<Instant>,
    last_nod: Option<Instant>,
}

fn elapsed_secs(since: Instant, now: Instant) -> f64 {
    now.saturating_duration_since(since).as_secs_f64()
}

impl CaptureSession {
    /// Create a session in Idle
    #[must_use]
    pub fn new(config: WorkflowConfig) -> Self {
        Self {
            config,
            mode: Mode::Idle,
            captured: None,
            crop_rect: None,
            rotation_angle: 0,
            countdown_started: None,
            last_up: None,
            last_nod: None,
        }
    }

    /// Current mode
    #[must_use]
    pub const fn mode(&self) -> Mode {
        self.mode
    }

    /// Captured photo, if any
    #[must_use]
    pub const fn captured(&self) -> Option<&RgbImage> {
        self.captured.as_ref()
    }

    /// Crop rectangle from the latest frame in Crop mode
    #[must_use]
    pub const fn crop_rect(&self) -> Option<&CropRect> {
        self.crop_rect.as_ref()
    }

    /// Accumulated rotation in degrees, unwrapped
    #[must_use]
    pub const fn rotation_angle(&self) -> i32 {
        self.rotation_angle
    }

    /// Seconds left in the countdown, rounded up the way the overlay shows them
    #[must_use]
    pub fn countdown_remaining(&self, now: Instant) -> Option<u32> {
        let started = self.countdown_started?;
        let remaining = self.config.countdown_secs - elapsed_secs(started, now).floor();
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        Some(remaining.max(0.0).ceil() as u32)
    }

    /// Return to Idle, dropping the photo, rotation and every cooldown
    pub fn reset(&mut self) {
        info!("Session reset from {}", self.mode);
        self.mode = Mode::Idle;
        self.captured = None;
        self.crop_rect = None;
        self.rotation_angle = 0;
        self.countdown_started = None;
        self.last_up = None;
        self.last_nod = None;
    }

    fn up_allowed(&self, now: Instant) -> bool {
        self.last_up
            .map_or(true, |last| elapsed_secs(last, now) >= self.config.thumbs_cooldown_secs)
    }

    fn nod_allowed(&self, now: Instant) -> bool {
        self.last_nod
            .map_or(true, |last| elapsed_secs(last, now) >= self.config.nod_cooldown_secs)
    }

    fn enter(&mut self, mode: Mode) {
        info!("Mode {} -> {}", self.mode, mode);
        self.mode = mode;
    }

    /// Apply one frame's events.
    ///
    /// `frame` is the live camera image, snapshotted when the countdown ends.
    /// `wall_time` keys the saved photo.
    pub fn advance(&mut self, events: &FrameEvents, frame: &RgbImage, now: Instant, wall_time: SystemTime) -> Vec<Effect> {
        if events.controls.cancel {
            info!("Cancel requested in {}", self.mode);
            return vec![Effect::Terminate];
        }
        if events.controls.reset {
            self.reset();
            return Vec::new();
        }

        match self.mode {
            Mode::Idle => {
                if events.has(Gesture::Up) {
                    self.last_up = Some(now);
                    self.countdown_started = Some(now);
                    self.enter(Mode::CountingDown);
                }
            }
            Mode::CountingDown => {
                let started = *self.countdown_started.get_or_insert(now);
                if elapsed_secs(started, now) >= self.config.countdown_secs {
                    self.captured = Some(frame.clone());
                    self.countdown_started = None;
                    self.enter(Mode::Confirm);
                }
            }
            Mode::Confirm => {
                if events.has(Gesture::Up) && self.up_allowed(now) {
                    self.last_up = Some(now);
                    self.enter(Mode::Crop);
                } else if events.has(Gesture::Down) {
                    self.captured = None;
                    self.enter(Mode::Idle);
                }
            }
            Mode::Crop => {
                self.crop_rect = events.crop_rect;
                if events.nod && self.nod_allowed(now) {
                    self.apply_crop(now);
                }
            }
            Mode::Rotate => {
                if let Some(tilt) = events.tilt {
                    self.rotation_angle += match tilt {
                        Tilt::Left => -ROTATION_STEP_DEG,
                        Tilt::Right => ROTATION_STEP_DEG,
                    };
                    debug!("Rotation angle now {}", self.rotation_angle);
                } else if events.has(Gesture::Up) && self.up_allowed(now) {
                    self.last_up = Some(now);
                    return self.finish(wall_time);
                }
            }
            Mode::Done => {}
        }

        Vec::new()
    }

    fn apply_crop(&mut self, now: Instant) {
        let (Some(rect), Some(photo)) = (self.crop_rect, self.captured.as_ref()) else {
            debug!("Nod ignored: no crop rectangle");
            return;
        };
        let Some(cropped) = crop(photo, &rect) else {
            debug!("Nod ignored: rectangle outside the photo");
            return;
        };

        info!("Cropped photo to {}x{}", cropped.width(), cropped.height());
        self.last_nod = Some(now);
        self.captured = Some(cropped);
        self.crop_rect = None;
        self.enter(Mode::Rotate);
    }

    fn finish(&mut self, taken_at: SystemTime) -> Vec<Effect> {
        let Some(photo) = self.captured.take() else {
            return Vec::new();
        };

        let final_image = rotate_quarter_turns(&photo, self.rotation_angle);
        self.captured = Some(final_image.clone());
        self.enter(Mode::Done);

        vec![
            Effect::Persist {
                image: final_image,
                taken_at,
            },
            Effect::Finish,
        ]
    }
}

impl Default for CaptureSession {
    fn default() -> Self {
        Self::new(WorkflowConfig::default())
    }
}

//! Frame-level capture workflow.
//!
//! `CaptureWorkflow` turns one frame's landmarks into `FrameEvents`, feeds
//! them to the `CaptureSession`, and describes what should be drawn for the
//! resulting mode.

use crate::{
    config::Config,
    constants::{CONFIRM_WINDOW, FINAL_WINDOW, FRAME_OUTLINE_THICKNESS, MAIN_WINDOW, PHOTO_OUTLINE_THICKNESS},
    gesture::GestureClassifier,
    head_motion::HeadMotionAnalyzer,
    imaging::{highlight_region, rotate_quarter_turns, CropRect, BLUE},
    landmarks::{FaceLandmarks, HandLandmarks},
    session::{CaptureSession, Controls, Effect, FrameEvents, Mode},
};
use image::{Rgb, RgbImage};
use std::time::{Instant, SystemTime};

/// One frame handed to the workflow
#[derive(Debug, Clone)]
pub struct FrameInput {
    /// Live camera image
    pub frame: RgbImage,
    /// Detected hands, at most two
    pub hands: Vec<HandLandmarks>,
    /// Detected face, if any
    pub face: Option<FaceLandmarks>,
    /// Controls polled for this frame
    pub controls: Controls,
    /// Monotonic frame time
    pub at: Instant,
    /// Wall-clock frame time
    pub wall_time: SystemTime,
}

/// Text to draw at a pixel position of the composed image
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextOverlay {
    /// Text content
    pub text: String,
    /// Baseline origin
    pub position: (u32, u32),
}

/// Rectangle outline drawn on the base image
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RectOverlay {
    /// Outlined area
    pub rect: CropRect,
    /// Line color
    pub color: Rgb<u8>,
    /// Line thickness in pixels
    pub thickness: u32,
}

/// What the renderer should show for one frame
#[derive(Debug, Clone, PartialEq)]
pub struct RenderRequest {
    /// Target window
    pub window: &'static str,
    /// Mode the request was built for
    pub mode: Mode,
    /// Main image, usually the live frame
    pub base: RgbImage,
    /// Image placed to the right of `base`
    pub side: Option<RgbImage>,
    /// Outlines drawn on `base`
    pub rects: Vec<RectOverlay>,
    /// Texts over the composed image
    pub texts: Vec<TextOverlay>,
}

impl RenderRequest {
    fn new(window: &'static str, mode: Mode, base: RgbImage) -> Self {
        Self {
            window,
            mode,
            base,
            side: None,
            rects: Vec::new(),
            texts: Vec::new(),
        }
    }

    fn text(mut self, text: impl Into<String>, position: (u32, u32)) -> Self {
        self.texts.push(TextOverlay {
            text: text.into(),
            position,
        });
        self
    }
}

/// Result of processing one frame
#[derive(Debug, Clone)]
pub struct Step {
    /// Drawing request for this frame
    pub render: RenderRequest,
    /// Side effects the caller must perform, in order
    pub effects: Vec<Effect>,
}

/// Classifier, head analyzer and session wired together
pub struct CaptureWorkflow {
    classifier: GestureClassifier,
    analyzer: HeadMotionAnalyzer,
    session: CaptureSession,
}

impl CaptureWorkflow {
    /// Create a workflow from configuration
    #[must_use]
    pub fn new(config: &Config) -> Self {
        Self {
            classifier: GestureClassifier::new(config.gesture.clone()),
            analyzer: HeadMotionAnalyzer::new(config.head_motion.clone()),
            session: CaptureSession::new(config.workflow.clone()),
        }
    }

    /// Current session state
    #[must_use]
    pub const fn session(&self) -> &CaptureSession {
        &self.session
    }

    /// Head motion analyzer state
    #[must_use]
    pub const fn analyzer(&self) -> &HeadMotionAnalyzer {
        &self.analyzer
    }

    /// Derive the events of one frame.
    ///
    /// Nods are only evaluated in Crop and tilts only in Rotate, so the tilt
    /// cooldown is not consumed elsewhere.
    pub fn derive_events(&mut self, input: &FrameInput) -> FrameEvents {
        let mode = self.session.mode();
        let (width, height) = input.frame.dimensions();

        if let Some(face) = &input.face {
            self.analyzer.observe(face, width, height, input.at);
        }

        let mut events = FrameEvents {
            controls: input.controls,
            ..FrameEvents::default()
        };
        if mode == Mode::Done || input.controls.cancel || input.controls.reset {
            return events;
        }

        events.gestures = self.classifier.classify_all(&input.hands);
        match mode {
            Mode::Crop => {
                events.crop_rect = CropRect::from_hands(&input.hands, width, height);
                events.nod = input.face.is_some() && self.analyzer.detect_nod();
            }
            Mode::Rotate if input.face.is_some() => {
                events.tilt = self.analyzer.detect_tilt(input.at);
            }
            _ => {}
        }
        events
    }

    /// Process one frame: derive events, advance the session, describe the display
    pub fn process(&mut self, input: FrameInput) -> Step {
        let events = self.derive_events(&input);
        Step {
            effects: self.apply(&events, &input),
            render: self.render_request(input.frame, input.at),
        }
    }

    /// Advance the session with already-derived events
    pub fn apply(&mut self, events: &FrameEvents, input: &FrameInput) -> Vec<Effect> {
        if events.controls.reset && !events.controls.cancel {
            self.analyzer.reset_cooldown();
        }
        self.session.advance(events, &input.frame, input.at, input.wall_time)
    }

    /// The Done view, once the final photo exists
    #[must_use]
    pub fn final_view(&self) -> Option<RenderRequest> {
        if self.session.mode() != Mode::Done {
            return None;
        }
        let photo = self.session.captured()?;
        Some(RenderRequest::new(FINAL_WINDOW, Mode::Done, photo.clone()))
    }

    /// Build the drawing request for the current mode
    #[must_use]
    pub fn render_request(&self, frame: RgbImage, now: Instant) -> RenderRequest {
        let mode = self.session.mode();
        let (w, h) = frame.dimensions();
        let mode_label = (format!("Mode: {mode}"), (30, h.saturating_sub(20)));

        let request = match (mode, self.session.captured()) {
            (Mode::Done, _) => {
                if let Some(view) = self.final_view() {
                    return view;
                }
                RenderRequest::new(FINAL_WINDOW, mode, frame)
            }
            (Mode::CountingDown, _) => {
                let request = RenderRequest::new(MAIN_WINDOW, mode, frame);
                match self.session.countdown_remaining(now) {
                    Some(seconds) if seconds > 0 => request.text(format!("Taking photo in {seconds}s"), (50, 100)),
                    _ => request,
                }
            }
            (Mode::Confirm, Some(photo)) => {
                let mut request = RenderRequest::new(CONFIRM_WINDOW, mode, frame)
                    .text("Confirm photo? Thumbs up", (50, 50))
                    .text("Camera", ((w / 2).saturating_sub(50), h.saturating_sub(10)))
                    .text("Photo", ((w + w / 2).saturating_sub(50), h.saturating_sub(10)));
                request.side = Some(photo.clone());
                request
            }
            (Mode::Crop, Some(photo)) => {
                let rect = self.session.crop_rect();
                let mut request = RenderRequest::new(MAIN_WINDOW, mode, frame)
                    .text("Frame the photo with both hands - nod to confirm", (50, 50));
                if let Some(rect) = rect {
                    request.rects.push(RectOverlay {
                        rect: *rect,
                        color: BLUE,
                        thickness: FRAME_OUTLINE_THICKNESS,
                    });
                    request = request.text(
                        format!("Rect: ({},{}) - ({},{})", rect.x1(), rect.y1(), rect.x2(), rect.y2()),
                        (10, 30),
                    );
                }
                request.side = Some(highlight_region(photo, rect, PHOTO_OUTLINE_THICKNESS));
                request
            }
            (Mode::Rotate, Some(photo)) => {
                let mut request = RenderRequest::new(MAIN_WINDOW, mode, frame)
                    .text("Tilt head to rotate photo", (50, 50))
                    .text("Thumbs up to continue", (50, 80));
                request.side = Some(rotate_quarter_turns(photo, self.session.rotation_angle()));
                request
            }
            _ => RenderRequest::new(MAIN_WINDOW, mode, frame).text("Thumbs up to take a photo", (50, 50)),
        };

        request.text(mode_label.0, mode_label.1)
    }
}

//! Head motion analysis for nod and tilt detection.
//!
//! The analyzer keeps short rolling histories of the face-center position
//! and of the eye-line angle. A nod is an oscillation of the vertical
//! position; a tilt is a large change of the eye-line angle across the window.

use crate::{config::HeadMotionConfig, landmarks::FaceLandmarks};
use log::debug;
use std::collections::VecDeque;
use std::fmt;
use std::time::Instant;

/// Direction of a head tilt, as seen in the image
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Tilt {
    /// Eye-line angle decreased
    Left,
    /// Eye-line angle increased
    Right,
}

impl fmt::Display for Tilt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Left => write!(f, "left"),
            Self::Right => write!(f, "right"),
        }
    }
}

/// Angle in degrees of the vector from the left eye to the right eye, in pixels
#[must_use]
pub fn eye_line_angle(left: (u32, u32), right: (u32, u32)) -> f64 {
    let dx = f64::from(right.0) - f64::from(left.0);
    let dy = f64::from(right.1) - f64::from(left.1);
    dy.atan2(dx).to_degrees()
}

/// Count direction changes in the first differences of `values`
#[must_use]
pub fn count_sign_changes(values: &[f64]) -> usize {
    let diffs: Vec<f64> = values.windows(2).map(|w| w[1] - w[0]).collect();
    diffs.windows(2).filter(|w| w[0] * w[1] < 0.0).count()
}

/// Rolling head motion analyzer
pub struct HeadMotionAnalyzer {
    config: HeadMotionConfig,
    x_history: VecDeque<f64>,
    y_history: VecDeque<f64>,
    timestamps: VecDeque<Instant>,
    angle_history: VecDeque<f64>,
    last_tilt: Option<Instant>,
}

impl HeadMotionAnalyzer {
    /// Create a new analyzer
    #[must_use]
    pub fn new(config: HeadMotionConfig) -> Self {
        Self {
            x_history: VecDeque::with_capacity(config.position_window),
            y_history: VecDeque::with_capacity(config.position_window),
            timestamps: VecDeque::with_capacity(config.position_window),
            angle_history: VecDeque::with_capacity(config.angle_window),
            last_tilt: None,
            config,
        }
    }

    /// Record a face seen in a frame of the given pixel size
    pub fn observe(&mut self, face: &FaceLandmarks, width: u32, height: u32, at: Instant) {
        let (cx, cy) = face.center.to_pixel(width, height);
        let angle = eye_line_angle(face.left_eye.to_pixel(width, height), face.right_eye.to_pixel(width, height));

        self.push_sample(f64::from(cx), f64::from(cy), angle, at);
    }

    /// Record one face-center position (pixels) and eye-line angle (degrees)
    pub fn push_sample(&mut self, x: f64, y: f64, angle: f64, at: Instant) {
        // Add to history
        if self.x_history.len() >= self.config.position_window {
            self.x_history.pop_front();
            self.y_history.pop_front();
            self.timestamps.pop_front();
        }
        if self.angle_history.len() >= self.config.angle_window {
            self.angle_history.pop_front();
        }

        self.x_history.push_back(x);
        self.y_history.push_back(y);
        self.timestamps.push_back(at);
        self.angle_history.push_back(angle);
    }

    /// Whether the vertical position history looks like a nod.
    ///
    /// This heuristic fires repeatedly on a sustained oscillation, so callers
    /// gate it with their own cooldown.
    #[must_use]
    pub fn detect_nod(&self) -> bool {
        if self.y_history.len() < self.config.nod_min_samples {
            return false;
        }

        let n = self.y_history.len() as f64;
        let mean = self.y_history.iter().sum::<f64>() / n;
        let centered: Vec<f64> = self.y_history.iter().map(|y| y - mean).collect();

        let sign_changes = count_sign_changes(&centered);
        let peak = centered.iter().fold(0.0_f64, |acc, v| acc.max(v.abs()));

        sign_changes >= self.config.nod_min_sign_changes && peak > self.config.nod_min_amplitude_px
    }

    /// Detect a tilt across the angle window, honoring the tilt cooldown.
    ///
    /// A detected tilt restarts the cooldown clock at `now`.
    pub fn detect_tilt(&mut self, now: Instant) -> Option<Tilt> {
        if self.angle_history.len() < self.config.angle_window {
            return None;
        }
        let (first, last) = (self.angle_history.front()?, self.angle_history.back()?);
        let delta = last - first;

        if delta.abs() <= self.config.tilt_threshold_deg {
            return None;
        }
        if let Some(previous) = self.last_tilt {
            if now.saturating_duration_since(previous).as_secs_f64() < self.config.tilt_cooldown_secs {
                return None;
            }
        }

        self.last_tilt = Some(now);
        let tilt = if delta < 0.0 { Tilt::Left } else { Tilt::Right };
        debug!("Head tilt {} detected (delta {:.1} deg)", tilt, delta);
        Some(tilt)
    }

    /// Forget the last tilt time; histories are kept
    pub fn reset_cooldown(&mut self) {
        self.last_tilt = None;
    }

    /// Number of face-center samples held
    #[must_use]
    pub fn position_len(&self) -> usize {
        self.y_history.len()
    }

    /// Number of angle samples held
    #[must_use]
    pub fn angle_len(&self) -> usize {
        self.angle_history.len()
    }

    /// Face-center history, oldest first
    pub fn positions(&self) -> impl Iterator<Item = (f64, f64)> + '_ {
        self.x_history.iter().copied().zip(self.y_history.iter().copied())
    }

    /// Time of the most recent face sample
    #[must_use]
    pub fn last_seen(&self) -> Option<Instant> {
        self.timestamps.back().copied()
    }
}

impl Default for HeadMotionAnalyzer {
    fn default() -> Self {
        Self::new(HeadMotionConfig::default())
    }
}

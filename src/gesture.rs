//! Thumb gesture classification over a single hand's landmarks.
//!
//! The tests are relative distances within one hand, so they tolerate
//! different hand sizes somewhat but are not normalized for camera distance.
//! Treat the default ratios as a starting calibration.

use crate::{
    config::GestureConfig,
    constants::{
        INDEX_DIP, INDEX_MCP, INDEX_TIP, MIDDLE_DIP, MIDDLE_MCP, MIDDLE_TIP, PINKY_DIP, PINKY_MCP, PINKY_TIP,
        RING_DIP, RING_MCP, RING_TIP, THUMB_IP, THUMB_MCP, THUMB_TIP,
    },
    landmarks::HandLandmarks,
};
use std::fmt;

/// Symbolic hand gesture
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Gesture {
    /// Thumb extended upward, other fingers curled
    Up,
    /// Thumb folded across the palm, other fingers curled
    Down,
    /// Anything else
    None,
}

impl fmt::Display for Gesture {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Up => write!(f, "up"),
            Self::Down => write!(f, "down"),
            Self::None => write!(f, "none"),
        }
    }
}

/// (tip, dip, mcp) for index, middle, ring and pinky
const FINGERS: [(usize, usize, usize); 4] = [
    (INDEX_TIP, INDEX_DIP, INDEX_MCP),
    (MIDDLE_TIP, MIDDLE_DIP, MIDDLE_MCP),
    (RING_TIP, RING_DIP, RING_MCP),
    (PINKY_TIP, PINKY_DIP, PINKY_MCP),
];

/// Whether one finger is curled.
///
/// The tip may be no farther from the knuckle than `ratio` times the
/// joint below the tip. With `require_below`, the tip must also not be above
/// the knuckle.
#[must_use]
pub fn finger_flexed(hand: &HandLandmarks, finger: (usize, usize, usize), ratio: f32, require_below: bool) -> bool {
    let (tip, dip, mcp) = (hand.point(finger.0), hand.point(finger.1), hand.point(finger.2));

    if tip.distance(&mcp) > dip.distance(&mcp) * ratio {
        return false;
    }
    !(require_below && tip.y < mcp.y)
}

/// Whether all four non-thumb fingers are curled
#[must_use]
pub fn fingers_flexed(hand: &HandLandmarks, ratio: f32, require_below: bool) -> bool {
    FINGERS
        .iter()
        .all(|&finger| finger_flexed(hand, finger, ratio, require_below))
}

/// Thumb tip is farther from its knuckle than `ratio` times the IP joint is
#[must_use]
pub fn thumb_extended(hand: &HandLandmarks, ratio: f32) -> bool {
    let mcp = hand.point(THUMB_MCP);
    hand.point(THUMB_TIP).distance(&mcp) > hand.point(THUMB_IP).distance(&mcp) * ratio
}

/// Thumbs-up test
#[must_use]
pub fn is_thumbs_up(hand: &HandLandmarks, config: &GestureConfig) -> bool {
    let thumb_above_palm = hand.point(THUMB_TIP).y < hand.point(INDEX_MCP).y;

    thumb_extended(hand, config.thumb_extension_ratio)
        && thumb_above_palm
        && fingers_flexed(hand, config.up_flex_ratio, true)
}

/// Thumbs-down test
#[must_use]
pub fn is_thumbs_down(hand: &HandLandmarks, config: &GestureConfig) -> bool {
    let index_mcp = hand.point(INDEX_MCP);
    let thumb_folded = hand.point(THUMB_TIP).distance(&index_mcp)
        < hand.point(THUMB_MCP).distance(&index_mcp) * config.thumb_fold_ratio;

    thumb_folded && fingers_flexed(hand, config.down_flex_ratio, false)
}

/// Stateless gesture classifier
#[derive(Debug, Clone, Default)]
pub struct GestureClassifier {
    config: GestureConfig,
}

impl GestureClassifier {
    /// Create a classifier with the given ratios
    #[must_use]
    pub fn new(config: GestureConfig) -> Self {
        Self { config }
    }

    /// Classify one hand
    #[must_use]
    pub fn classify(&self, hand: &HandLandmarks) -> Gesture {
        if is_thumbs_up(hand, &self.config) {
            Gesture::Up
        } else if is_thumbs_down(hand, &self.config) {
            Gesture::Down
        } else {
            Gesture::None
        }
    }

    /// Classify every detected hand, keeping detector order
    #[must_use]
    pub fn classify_all(&self, hands: &[HandLandmarks]) -> Vec<Gesture> {
        hands.iter().map(|hand| self.classify(hand)).collect()
    }
}

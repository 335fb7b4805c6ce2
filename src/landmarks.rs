//! Hand and face landmark sets supplied by an external landmark detector.
//!
//! Coordinates are normalized to the frame: `x` and `y` lie in `[0, 1]` with
//! `y` growing downward, `z` is relative depth.

use crate::{
    constants::{FACE_CENTER, LEFT_EYE, NUM_HAND_LANDMARKS, RIGHT_EYE},
    utils::safe_cast::normalized_to_pixel,
    Error, Result,
};
use serde::{Deserialize, Serialize};

/// Normalized 3D landmark
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(from = "[f32; 3]", into = "[f32; 3]")]
pub struct Point3 {
    /// Horizontal position, 0 = left edge
    pub x: f32,
    /// Vertical position, 0 = top edge
    pub y: f32,
    /// Relative depth
    pub z: f32,
}

impl Point3 {
    /// Create a point
    #[must_use]
    pub const fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }

    /// Euclidean distance in all three dimensions
    #[must_use]
    pub fn distance(&self, other: &Self) -> f32 {
        ((self.x - other.x).powi(2) + (self.y - other.y).powi(2) + (self.z - other.z).powi(2)).sqrt()
    }

    /// Pixel position in a frame of the given size, truncated and clamped to the frame
    #[must_use]
    pub fn to_pixel(&self, width: u32, height: u32) -> (u32, u32) {
        (normalized_to_pixel(self.x, width), normalized_to_pixel(self.y, height))
    }
}

impl From<[f32; 3]> for Point3 {
    fn from([x, y, z]: [f32; 3]) -> Self {
        Self { x, y, z }
    }
}

impl From<Point3> for [f32; 3] {
    fn from(p: Point3) -> Self {
        [p.x, p.y, p.z]
    }
}

/// The 21 landmarks of one detected hand
#[derive(Debug, Clone, PartialEq)]
pub struct HandLandmarks {
    points: Vec<Point3>,
}

impl HandLandmarks {
    /// Create a hand set, rejecting anything other than 21 points
    ///
    /// # Errors
    ///
    /// Returns `Error::InvalidInput` if the point count is wrong
    pub fn new(points: Vec<Point3>) -> Result<Self> {
        if points.len() != NUM_HAND_LANDMARKS {
            return Err(Error::InvalidInput(format!(
                "Hand landmark set must have {NUM_HAND_LANDMARKS} points, got {}",
                points.len()
            )));
        }
        Ok(Self { points })
    }

    /// Landmark by index; indices are the `constants` hand indices
    ///
    /// # Panics
    ///
    /// Panics if `index >= 21`
    #[must_use]
    pub fn point(&self, index: usize) -> Point3 {
        self.points[index]
    }

    /// All landmarks in detector order
    #[must_use]
    pub fn points(&self) -> &[Point3] {
        &self.points
    }
}

impl TryFrom<Vec<Point3>> for HandLandmarks {
    type Error = Error;

    fn try_from(points: Vec<Point3>) -> Result<Self> {
        Self::new(points)
    }
}

/// The three face keypoints used for head motion
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FaceLandmarks {
    /// Point between the eyes, tracked for nods
    pub center: Point3,
    /// Outer corner of the left eye (image left)
    pub left_eye: Point3,
    /// Outer corner of the right eye (image right)
    pub right_eye: Point3,
}

impl FaceLandmarks {
    /// Build from the three keypoints directly
    #[must_use]
    pub const fn new(center: Point3, left_eye: Point3, right_eye: Point3) -> Self {
        Self {
            center,
            left_eye,
            right_eye,
        }
    }

    /// Extract keypoints from a full face mesh
    ///
    /// # Errors
    ///
    /// Returns `Error::InvalidInput` if the mesh is too short to contain the keypoints
    pub fn from_mesh(mesh: &[Point3]) -> Result<Self> {
        let needed = FACE_CENTER.max(LEFT_EYE).max(RIGHT_EYE) + 1;
        if mesh.len() < needed {
            return Err(Error::InvalidInput(format!(
                "Face mesh must have at least {needed} points, got {}",
                mesh.len()
            )));
        }
        Ok(Self::new(mesh[FACE_CENTER], mesh[LEFT_EYE], mesh[RIGHT_EYE]))
    }
}

//! Constants used throughout the application

/// Number of landmarks in one hand set
pub const NUM_HAND_LANDMARKS: usize = 21;

/// Hand landmark indices
pub const WRIST: usize = 0;
pub const THUMB_MCP: usize = 2;
pub const THUMB_IP: usize = 3;
pub const THUMB_TIP: usize = 4;
pub const INDEX_MCP: usize = 5;
pub const INDEX_DIP: usize = 7;
pub const INDEX_TIP: usize = 8;
pub const MIDDLE_MCP: usize = 9;
pub const MIDDLE_DIP: usize = 11;
pub const MIDDLE_TIP: usize = 12;
pub const RING_MCP: usize = 13;
pub const RING_DIP: usize = 15;
pub const RING_TIP: usize = 16;
pub const PINKY_MCP: usize = 17;
pub const PINKY_DIP: usize = 19;
pub const PINKY_TIP: usize = 20;

/// Face mesh indices: point between the eyes, outer eye corners
pub const FACE_CENTER: usize = 168;
pub const LEFT_EYE: usize = 33;
pub const RIGHT_EYE: usize = 263;

/// Gesture classifier ratios
pub const DEFAULT_THUMB_EXTENSION_RATIO: f32 = 1.5;
pub const DEFAULT_UP_FLEX_RATIO: f32 = 1.2;
pub const DEFAULT_THUMB_FOLD_RATIO: f32 = 0.6;
pub const DEFAULT_DOWN_FLEX_RATIO: f32 = 1.0;

/// Head history capacities
pub const DEFAULT_POSITION_WINDOW: usize = 20;
pub const DEFAULT_ANGLE_WINDOW: usize = 5;

/// Nod detection defaults
pub const DEFAULT_NOD_MIN_SAMPLES: usize = 10;
pub const DEFAULT_NOD_MIN_SIGN_CHANGES: usize = 2;
pub const DEFAULT_NOD_MIN_AMPLITUDE_PX: f64 = 10.0;

/// Tilt detection defaults
pub const DEFAULT_TILT_THRESHOLD_DEG: f64 = 20.0;
pub const DEFAULT_TILT_COOLDOWN_SECS: f64 = 0.8;

/// Workflow timing defaults (seconds)
pub const DEFAULT_COUNTDOWN_SECS: f64 = 3.0;
pub const DEFAULT_THUMBS_COOLDOWN_SECS: f64 = 2.0;
pub const DEFAULT_NOD_COOLDOWN_SECS: f64 = 1.0;

/// Rotation step applied per tilt, in degrees
pub const ROTATION_STEP_DEG: i32 = 90;

/// Outline thickness for the crop rectangle drawn on the photo
pub const PHOTO_OUTLINE_THICKNESS: u32 = 3;

/// Outline thickness for the crop rectangle drawn on the live frame
pub const FRAME_OUTLINE_THICKNESS: u32 = 2;

/// Default replay frame geometry
pub const DEFAULT_FRAME_WIDTH: u32 = 640;
pub const DEFAULT_FRAME_HEIGHT: u32 = 480;

/// Default frames per second assumption
pub const DEFAULT_FPS: f64 = 30.0;

/// Window names
pub const MAIN_WINDOW: &str = "Visual Interaction";
pub const CONFIRM_WINDOW: &str = "Confirm";
pub const FINAL_WINDOW: &str = "Final photo";

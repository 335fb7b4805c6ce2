//! Configuration management for the gesture capture application

use crate::{
    constants::{
        DEFAULT_ANGLE_WINDOW, DEFAULT_COUNTDOWN_SECS, DEFAULT_DOWN_FLEX_RATIO, DEFAULT_FPS, DEFAULT_FRAME_HEIGHT,
        DEFAULT_FRAME_WIDTH, DEFAULT_NOD_COOLDOWN_SECS, DEFAULT_NOD_MIN_AMPLITUDE_PX, DEFAULT_NOD_MIN_SAMPLES,
        DEFAULT_NOD_MIN_SIGN_CHANGES, DEFAULT_POSITION_WINDOW, DEFAULT_THUMBS_COOLDOWN_SECS,
        DEFAULT_THUMB_EXTENSION_RATIO, DEFAULT_THUMB_FOLD_RATIO, DEFAULT_TILT_COOLDOWN_SECS,
        DEFAULT_TILT_THRESHOLD_DEG, DEFAULT_UP_FLEX_RATIO,
    },
    Error, Result,
};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Gesture classifier ratios
    pub gesture: GestureConfig,

    /// Head motion analysis parameters
    pub head_motion: HeadMotionConfig,

    /// Capture workflow timing
    pub workflow: WorkflowConfig,

    /// Where the final photo is written
    pub output: OutputConfig,

    /// Replay source parameters
    pub replay: ReplayConfig,

    /// Display configuration
    pub display: DisplayConfig,
}

/// Thumb gesture ratios
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GestureConfig {
    /// Thumb tip to knuckle must exceed this multiple of IP joint to knuckle
    pub thumb_extension_ratio: f32,

    /// Finger curl ratio for thumbs-up
    pub up_flex_ratio: f32,

    /// Thumb tip to index knuckle must stay below this multiple of thumb knuckle to index knuckle
    pub thumb_fold_ratio: f32,

    /// Finger curl ratio for thumbs-down
    pub down_flex_ratio: f32,
}

/// Head motion analysis parameters
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct HeadMotionConfig {
    /// Capacity of the face-center history
    pub position_window: usize,

    /// Capacity of the eye-line angle history
    pub angle_window: usize,

    /// Minimum y samples before a nod can be detected
    pub nod_min_samples: usize,

    /// Minimum direction changes of the vertical motion
    pub nod_min_sign_changes: usize,

    /// Minimum deviation from the mean, in pixels
    pub nod_min_amplitude_px: f64,

    /// Angle change across the window that counts as a tilt, in degrees
    pub tilt_threshold_deg: f64,

    /// Minimum time between two tilts, in seconds
    pub tilt_cooldown_secs: f64,
}

/// Capture workflow timing
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct WorkflowConfig {
    /// Countdown before the photo is taken, in seconds
    pub countdown_secs: f64,

    /// Minimum time between two accepted thumbs-up, in seconds
    pub thumbs_cooldown_secs: f64,

    /// Minimum time between two accepted nods, in seconds
    pub nod_cooldown_secs: f64,
}

/// Output configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Directory the final photo is written to, created on demand
    pub directory: PathBuf,

    /// File name prefix, followed by the capture timestamp
    pub file_prefix: String,
}

/// Replay configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ReplayConfig {
    /// Width of blank frames when a record has no image
    pub frame_width: u32,

    /// Height of blank frames when a record has no image
    pub frame_height: u32,

    /// Frame rate used when records carry no timestamp
    pub fps: f64,
}

/// Display configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplayConfig {
    /// Write every composed frame to this directory
    pub preview_dir: Option<PathBuf>,
}

impl Default for GestureConfig {
    fn default() -> Self {
        Self {
            thumb_extension_ratio: DEFAULT_THUMB_EXTENSION_RATIO,
            up_flex_ratio: DEFAULT_UP_FLEX_RATIO,
            thumb_fold_ratio: DEFAULT_THUMB_FOLD_RATIO,
            down_flex_ratio: DEFAULT_DOWN_FLEX_RATIO,
        }
    }
}

impl Default for HeadMotionConfig {
    fn default() -> Self {
        Self {
            position_window: DEFAULT_POSITION_WINDOW,
            angle_window: DEFAULT_ANGLE_WINDOW,
            nod_min_samples: DEFAULT_NOD_MIN_SAMPLES,
            nod_min_sign_changes: DEFAULT_NOD_MIN_SIGN_CHANGES,
            nod_min_amplitude_px: DEFAULT_NOD_MIN_AMPLITUDE_PX,
            tilt_threshold_deg: DEFAULT_TILT_THRESHOLD_DEG,
            tilt_cooldown_secs: DEFAULT_TILT_COOLDOWN_SECS,
        }
    }
}

impl Default for WorkflowConfig {
    fn default() -> Self {
        Self {
            countdown_secs: DEFAULT_COUNTDOWN_SECS,
            thumbs_cooldown_secs: DEFAULT_THUMBS_COOLDOWN_SECS,
            nod_cooldown_secs: DEFAULT_NOD_COOLDOWN_SECS,
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            directory: PathBuf::from("results"),
            file_prefix: "photo".to_string(),
        }
    }
}

impl Default for ReplayConfig {
    fn default() -> Self {
        Self {
            frame_width: DEFAULT_FRAME_WIDTH,
            frame_height: DEFAULT_FRAME_HEIGHT,
            fps: DEFAULT_FPS,
        }
    }
}

impl Config {
    /// Load configuration from a YAML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| Error::IoError(e.to_string()))?;

        Self::from_yaml(&content)
    }

    /// Parse configuration from YAML text
    pub fn from_yaml(content: &str) -> Result<Self> {
        serde_yaml::from_str(content).map_err(|e| Error::ConfigError(format!("Failed to parse config: {e}")))
    }

    /// Save configuration to a YAML file
    pub fn to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let content = serde_yaml::to_string(self)
            .map_err(|e| Error::ConfigError(format!("Failed to serialize config: {e}")))?;

        std::fs::write(path, content).map_err(|e| Error::IoError(e.to_string()))?;

        Ok(())
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        // Validate gesture ratios
        let ratios = [
            ("thumb_extension_ratio", self.gesture.thumb_extension_ratio),
            ("up_flex_ratio", self.gesture.up_flex_ratio),
            ("thumb_fold_ratio", self.gesture.thumb_fold_ratio),
            ("down_flex_ratio", self.gesture.down_flex_ratio),
        ];
        for (name, value) in ratios {
            if !(value.is_finite() && value > 0.0) {
                return Err(Error::ConfigError(format!("{name} must be a positive number")));
            }
        }

        // Validate head motion windows
        let head = &self.head_motion;
        if head.position_window == 0 {
            return Err(Error::ConfigError("Position window must be greater than 0".to_string()));
        }
        if head.angle_window < 2 {
            return Err(Error::ConfigError("Angle window must hold at least 2 samples".to_string()));
        }
        if head.nod_min_samples < 3 || head.nod_min_samples > head.position_window {
            return Err(Error::ConfigError(format!(
                "Nod minimum samples must be between 3 and the position window ({})",
                head.position_window
            )));
        }
        if !(head.nod_min_amplitude_px >= 0.0 && head.tilt_threshold_deg >= 0.0) {
            return Err(Error::ConfigError(
                "Nod amplitude and tilt threshold must not be negative".to_string(),
            ));
        }

        // Validate durations
        let durations = [
            ("tilt_cooldown_secs", head.tilt_cooldown_secs),
            ("countdown_secs", self.workflow.countdown_secs),
            ("thumbs_cooldown_secs", self.workflow.thumbs_cooldown_secs),
            ("nod_cooldown_secs", self.workflow.nod_cooldown_secs),
        ];
        for (name, value) in durations {
            if !(value.is_finite() && value >= 0.0) {
                return Err(Error::ConfigError(format!("{name} must be a non-negative number of seconds")));
            }
        }

        // Validate output and replay settings
        if self.output.file_prefix.is_empty() {
            return Err(Error::ConfigError("Output file prefix must not be empty".to_string()));
        }
        if self.replay.frame_width == 0 || self.replay.frame_height == 0 {
            return Err(Error::ConfigError("Replay frame size must be greater than 0".to_string()));
        }
        if !(self.replay.fps.is_finite() && self.replay.fps > 0.0) {
            return Err(Error::ConfigError("Replay FPS must be greater than 0".to_string()));
        }

        Ok(())
    }
}

/// Example configuration file content
pub const EXAMPLE_CONFIG: &str = r#"# Gesture Capture Configuration

# Thumb gesture ratios
gesture:
  thumb_extension_ratio: 1.5
  up_flex_ratio: 1.2
  thumb_fold_ratio: 0.6
  down_flex_ratio: 1.0

# Head motion analysis
head_motion:
  position_window: 20
  angle_window: 5
  nod_min_samples: 10
  nod_min_sign_changes: 2
  nod_min_amplitude_px: 10.0
  tilt_threshold_deg: 20.0
  tilt_cooldown_secs: 0.8

# Workflow timing
workflow:
  countdown_secs: 3.0
  thumbs_cooldown_secs: 2.0
  nod_cooldown_secs: 1.0

# Final photo output
output:
  directory: "results"
  file_prefix: "photo"

# Replay source
replay:
  frame_width: 640
  frame_height: 480
  fps: 30.0

# Display
display:
  preview_dir: null
"#;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        assert!(Config::default().validate().is_ok());
    }

    #[test]
    fn test_example_config_matches_defaults() {
        let config = Config::from_yaml(EXAMPLE_CONFIG).unwrap();
        let defaults = Config::default();

        assert_eq!(config.gesture.up_flex_ratio, defaults.gesture.up_flex_ratio);
        assert_eq!(config.head_motion.position_window, defaults.head_motion.position_window);
        assert_eq!(config.workflow.countdown_secs, defaults.workflow.countdown_secs);
        assert_eq!(config.output.directory, defaults.output.directory);
        assert!(config.display.preview_dir.is_none());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_config_fills_defaults() {
        let config = Config::from_yaml("workflow:\n  countdown_secs: 1.5\n").unwrap();
        assert_eq!(config.workflow.countdown_secs, 1.5);
        assert_eq!(config.workflow.thumbs_cooldown_secs, DEFAULT_THUMBS_COOLDOWN_SECS);
        assert_eq!(config.gesture.thumb_fold_ratio, DEFAULT_THUMB_FOLD_RATIO);
    }

    #[test]
    fn test_invalid_values_rejected() {
        let mut config = Config::default();
        config.head_motion.angle_window = 1;
        assert!(config.validate().is_err());

        let mut config = Config::default();
        config.workflow.countdown_secs = -1.0;
        assert!(config.validate().is_err());

        let mut config = Config::default();
        config.gesture.up_flex_ratio = 0.0;
        assert!(config.validate().is_err());

        let mut config = Config::default();
        config.head_motion.nod_min_samples = 25;
        assert!(config.validate().is_err());

        let mut config = Config::default();
        config.output.file_prefix.clear();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_malformed_yaml() {
        assert!(matches!(Config::from_yaml("gesture: [1, 2"), Err(Error::ConfigError(_))));
    }
}

//! Recorded landmark sessions.
//!
//! A replay file holds one JSON object per line, one line per frame:
//!
//! ```text
//! {"t": 0.0, "image": "frame_0001.png", "hands": [[[x, y, z], ...21 points]],
//!  "face": {"center": [x, y, z], "left_eye": [x, y, z], "right_eye": [x, y, z]},
//!  "reset": false, "cancel": false}
//! ```
//!
//! Every field is optional. `face` may also be `{"mesh": [[x, y, z], ...]}`
//! with a full face mesh. Without `t` frames are spaced at the configured FPS;
//! without `image` a blank frame of the configured size is used. Relative
//! image paths are resolved against the replay file's directory.

use crate::{
    config::ReplayConfig,
    interfaces::{CapturedFrame, ControlInput, FrameSource, LandmarkSource},
    landmarks::{FaceLandmarks, HandLandmarks, Point3},
    session::Controls,
    Error, Result,
};
use image::{Rgb, RgbImage};
use log::{debug, info};
use serde::Deserialize;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant, SystemTime};

/// Gray used for blank frames
const BLANK_PIXEL: Rgb<u8> = Rgb([40, 40, 40]);

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum FaceRecord {
    Mesh { mesh: Vec<Point3> },
    Keypoints(FaceLandmarks),
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct ReplayRecord {
    t: Option<f64>,
    image: Option<PathBuf>,
    hands: Vec<Vec<Point3>>,
    face: Option<FaceRecord>,
    reset: bool,
    cancel: bool,
}

/// Landmarks and controls of the current frame
#[derive(Debug, Default)]
struct CurrentFrame {
    hands: Vec<HandLandmarks>,
    face: Option<FaceLandmarks>,
    controls: Controls,
}

/// Replays a recorded session as frames, landmarks and controls
pub struct ReplaySource {
    lines: std::io::Lines<Box<dyn BufRead>>,
    base_dir: PathBuf,
    config: ReplayConfig,
    started: Instant,
    started_wall: SystemTime,
    line_number: usize,
    frame_index: u64,
    current: CurrentFrame,
}

impl ReplaySource {
    /// Open a replay file
    ///
    /// # Errors
    ///
    /// Returns `Error::Acquisition` if the file cannot be opened
    pub fn open<P: AsRef<Path>>(path: P, config: &ReplayConfig) -> Result<Self> {
        let path = path.as_ref();
        info!("Opening replay file: {}", path.display());

        let file = File::open(path)
            .map_err(|e| Error::Acquisition(format!("Failed to open replay {}: {e}", path.display())))?;
        let base_dir = path.parent().map(Path::to_path_buf).unwrap_or_default();

        Ok(Self::from_reader(Box::new(BufReader::new(file)), base_dir, config))
    }

    /// Replay records from any reader
    #[must_use]
    pub fn from_reader(reader: Box<dyn BufRead>, base_dir: PathBuf, config: &ReplayConfig) -> Self {
        Self {
            lines: reader.lines(),
            base_dir,
            config: config.clone(),
            started: Instant::now(),
            started_wall: SystemTime::now(),
            line_number: 0,
            frame_index: 0,
            current: CurrentFrame::default(),
        }
    }

    fn next_record(&mut self) -> Result<Option<ReplayRecord>> {
        loop {
            let Some(line) = self.lines.next() else {
                return Ok(None);
            };
            self.line_number += 1;

            let line = line.map_err(|e| Error::Acquisition(format!("line {}: {e}", self.line_number)))?;
            if line.trim().is_empty() {
                continue;
            }

            return serde_json::from_str(&line)
                .map(Some)
                .map_err(|e| Error::Acquisition(format!("line {}: {e}", self.line_number)));
        }
    }

    fn offset(&self, record: &ReplayRecord) -> Result<Duration> {
        #[allow(clippy::cast_precision_loss)]
        let secs = record.t.unwrap_or(self.frame_index as f64 / self.config.fps);
        Duration::try_from_secs_f64(secs)
            .map_err(|e| Error::Acquisition(format!("line {}: invalid timestamp {secs}: {e}", self.line_number)))
    }

    fn load_image(&self, record: &ReplayRecord) -> Result<RgbImage> {
        match &record.image {
            Some(relative) => {
                let path = self.base_dir.join(relative);
                let image = image::open(&path)
                    .map_err(|e| Error::Acquisition(format!("Failed to read frame {}: {e}", path.display())))?;
                Ok(image.to_rgb8())
            }
            None => Ok(RgbImage::from_pixel(self.config.frame_width, self.config.frame_height, BLANK_PIXEL)),
        }
    }

    fn decode_landmarks(&self, record: ReplayRecord) -> Result<CurrentFrame> {
        let line = self.line_number;
        let hands = record
            .hands
            .into_iter()
            .map(|points| HandLandmarks::new(points).map_err(|e| Error::Acquisition(format!("line {line}: {e}"))))
            .collect::<Result<Vec<_>>>()?;

        let face = match record.face {
            Some(FaceRecord::Mesh { mesh }) => Some(
                FaceLandmarks::from_mesh(&mesh).map_err(|e| Error::Acquisition(format!("line {line}: {e}")))?,
            ),
            Some(FaceRecord::Keypoints(face)) => Some(face),
            None => None,
        };

        Ok(CurrentFrame {
            hands,
            face,
            controls: Controls {
                cancel: record.cancel,
                reset: record.reset,
            },
        })
    }
}

impl FrameSource for ReplaySource {
    fn next_frame(&mut self) -> Result<Option<CapturedFrame>> {
        let Some(record) = self.next_record()? else {
            debug!("Replay exhausted after {} frames", self.frame_index);
            return Ok(None);
        };

        let offset = self.offset(&record)?;
        let image = self.load_image(&record)?;
        self.current = self.decode_landmarks(record)?;
        self.frame_index += 1;

        Ok(Some(CapturedFrame {
            image,
            at: self.started + offset,
            wall_time: self.started_wall + offset,
        }))
    }
}

impl LandmarkSource for ReplaySource {
    fn detect_hands(&mut self, _frame: &RgbImage) -> Result<Vec<HandLandmarks>> {
        Ok(self.current.hands.clone())
    }

    fn detect_face(&mut self, _frame: &RgbImage) -> Result<Option<FaceLandmarks>> {
        Ok(self.current.face)
    }
}

impl ControlInput for ReplaySource {
    fn poll(&mut self) -> Controls {
        self.current.controls
    }
}

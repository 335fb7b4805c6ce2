//! Gesture-driven photo capture over hand and face landmarks.
//!
//! This library turns per-frame landmarks from an external detector into a
//! small photo workflow:
//! - Thumbs-up starts a countdown and takes a snapshot
//! - Thumbs-up confirms it, thumbs-down discards it
//! - Both hands frame a crop rectangle, a head nod applies it
//! - Head tilts rotate the photo, a final thumbs-up saves it
//!
//! Frame acquisition, landmark detection, display and persistence are
//! collaborators behind the traits in [`interfaces`].
//!
//! # Examples
//!
//! ## Classifying a Hand
//!
//! ```
//! use gesture_capture::{
//!     gesture::{Gesture, GestureClassifier},
//!     landmarks::{HandLandmarks, Point3},
//! };
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! // An open, flat hand: every point at the same place classifies as nothing
//! let hand = HandLandmarks::new(vec![Point3::new(0.5, 0.5, 0.0); 21])?;
//! let classifier = GestureClassifier::default();
//! assert_eq!(classifier.classify(&hand), Gesture::None);
//! # Ok(())
//! # }
//! ```
//!
//! ## Driving the Workflow
//!
//! ```no_run
//! use gesture_capture::{
//!     app::CaptureApp, config::Config, persistence::PngSink, render::HeadlessRenderer,
//!     replay::ReplaySource,
//! };
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let config = Config::default();
//! let source = ReplaySource::open("session.jsonl", &config.replay)?;
//! let renderer = HeadlessRenderer::new(None);
//! let sink = PngSink::from_config(&config.output);
//!
//! let mut app = CaptureApp::new(&config, source, renderer, sink);
//! let summary = app.run()?;
//! if let Some(path) = summary.saved {
//!     println!("Saved {}", path.display());
//! }
//! # Ok(())
//! # }
//! ```

/// Hand and face landmark types
pub mod landmarks;

/// Thumb gesture classification
pub mod gesture;

/// Nod and tilt detection from face landmarks
pub mod head_motion;

/// Crop, rotation and composition of image buffers
pub mod imaging;

/// Capture session state machine
pub mod session;

/// Frame-level workflow: events in, render requests and effects out
pub mod workflow;

/// Collaborator traits
pub mod interfaces;

/// Recorded landmark sessions
pub mod replay;

/// Render request composition and headless rendering
pub mod render;

/// Final photo persistence
pub mod persistence;

/// Main application module
pub mod app;

/// Utility functions for coordinate conversion
pub mod utils;

/// Error types and result handling
pub mod error;

/// Constants used throughout the application
pub mod constants;

/// Configuration management
pub mod config;

pub use error::{Error, Result};

//! Full pipeline: replay file through the application to a saved photo


use gesture_capture::{
    app::CaptureApp,
    config::Config,
    landmarks::{FaceLandmarks, HandLandmarks},
    persistence::PngSink,
    render::HeadlessRenderer,
    replay::ReplaySource,
    session::Mode,
    Error,
};
use serde_json::{json, Value};
use std::path::{Path, PathBuf};
use test_helpers::*;

fn temp_dir(name: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("gesture_capture_replay_{}_{name}", std::process::id()));
    let _ = std::fs::remove_dir_all(&dir);
    std::fs::create_dir_all(&dir).unwrap();
    dir
}

fn record(t: f64, hands: &[HandLandmarks], face: Option<FaceLandmarks>) -> Value {
    let hands: Vec<_> = hands.iter().map(HandLandmarks::points).collect();
    let mut value = json!({ "t": t, "hands": hands });
    if let Some(face) = face {
        value["face"] = json!(face);
    }
    value
}

fn write_replay(dir: &Path, records: &[Value]) -> PathBuf {
    let path = dir.join("session.jsonl");
    let lines: Vec<String> = records.iter().map(Value::to_string).collect();
    std::fs::write(&path, lines.join("\n")).unwrap();
    path
}

fn config_for(dir: &Path) -> Config {
    let mut config = Config::default();
    config.replay.frame_width = 200;
    config.replay.frame_height = 160;
    config.output.directory = dir.join("results");
    config
}

/// Snapshot, confirm, crop by nodding, rotate a quarter turn, save
fn full_session() -> Vec<Value> {
    let mut records = vec![
        record(0.0, &[thumbs_up()], None),
        record(3.0, &[], None),
        record(5.0, &[thumbs_up()], None),
    ];

    let pattern = [0.5, 0.575, 0.5, 0.425];
    for i in 0..10 {
        let t = 5.1 + 0.033 * f64::from(i);
        records.push(record(t, &framing_hands_200(), Some(face_at(0.5, pattern[i as usize % 4]))));
    }
    for i in 0..5 {
        records.push(record(6.0 + 0.033 * f64::from(i), &[], Some(face_tilted(0.0))));
    }
    for i in 0..4 {
        records.push(record(6.2 + 0.033 * f64::from(i), &[], Some(face_tilted(40.0))));
    }
    records.push(record(8.0, &[thumbs_up()], None));
    records.push(json!({ "t": 8.1, "cancel": true }));
    records
}

#[test]
fn test_replay_saves_rotated_crop() {
    let dir = temp_dir("full");
    let config = config_for(&dir);
    let path = write_replay(&dir, &full_session());

    let source = ReplaySource::open(&path, &config.replay).unwrap();
    let mut app = CaptureApp::new(&config, source, HeadlessRenderer::new(None), PngSink::from_config(&config.output));
    let summary = app.run().unwrap();

    assert_eq!(summary.final_mode, Mode::Done);
    assert_eq!(summary.frames, 23);

    let saved = summary.saved.unwrap();
    assert!(saved.starts_with(dir.join("results")));
    assert_eq!(saved.extension().and_then(|e| e.to_str()), Some("png"));

    // 90×72 crop of the 200×160 frame, turned a quarter
    let photo = image::open(&saved).unwrap();
    assert_eq!((photo.width(), photo.height()), (72, 90));

    let files = std::fs::read_dir(dir.join("results")).unwrap().count();
    assert_eq!(files, 1);

    let _ = std::fs::remove_dir_all(&dir);
}

#[test]
fn test_preview_frames_written() {
    let dir = temp_dir("preview");
    let config = config_for(&dir);
    let records = vec![record(0.0, &[], None), record(0.1, &[thumbs_up()], None)];
    let path = write_replay(&dir, &records);

    let source = ReplaySource::open(&path, &config.replay).unwrap();
    let renderer = HeadlessRenderer::new(Some(dir.join("preview")));
    let mut app = CaptureApp::new(&config, source, renderer, PngSink::from_config(&config.output));
    let summary = app.run().unwrap();

    assert_eq!(summary.frames, 2);
    assert_eq!(summary.final_mode, Mode::CountingDown);
    assert!(summary.saved.is_none());
    assert_eq!(app.renderer().frames(), 2);
    assert!(dir.join("preview/frame_000000.png").exists());
    assert!(dir.join("preview/frame_000001.png").exists());
    assert!(!dir.join("results").exists());

    let _ = std::fs::remove_dir_all(&dir);
}

#[test]
fn test_cancel_stops_replay() {
    let dir = temp_dir("cancel");
    let config = config_for(&dir);
    let records = vec![
        record(0.0, &[thumbs_up()], None),
        json!({ "t": 0.1, "cancel": true }),
        record(3.5, &[], None),
    ];
    let path = write_replay(&dir, &records);

    let source = ReplaySource::open(&path, &config.replay).unwrap();
    let mut app = CaptureApp::new(&config, source, HeadlessRenderer::new(None), PngSink::from_config(&config.output));
    let summary = app.run().unwrap();

    assert_eq!(summary.frames, 2);
    assert_eq!(summary.final_mode, Mode::CountingDown);
    assert!(summary.saved.is_none());

    let _ = std::fs::remove_dir_all(&dir);
}

#[test]
fn test_reset_returns_to_idle() {
    let dir = temp_dir("reset");
    let config = config_for(&dir);
    let records = vec![
        record(0.0, &[thumbs_up()], None),
        record(3.0, &[], None),
        json!({ "t": 3.1, "reset": true }),
    ];
    let path = write_replay(&dir, &records);

    let source = ReplaySource::open(&path, &config.replay).unwrap();
    let mut app = CaptureApp::new(&config, source, HeadlessRenderer::new(None), PngSink::from_config(&config.output));
    let summary = app.run().unwrap();

    assert_eq!(summary.final_mode, Mode::Idle);
    assert!(app.workflow().session().captured().is_none());

    let _ = std::fs::remove_dir_all(&dir);
}

#[test]
fn test_malformed_record_is_fatal() {
    let dir = temp_dir("malformed");
    let config = config_for(&dir);
    let path = dir.join("session.jsonl");
    std::fs::write(&path, "{}\n{\"hands\": [[[0.5, 0.5, 0.0]]]}\n").unwrap();

    let source = ReplaySource::open(&path, &config.replay).unwrap();
    let mut app = CaptureApp::new(&config, source, HeadlessRenderer::new(None), PngSink::from_config(&config.output));

    assert!(matches!(app.run(), Err(Error::Acquisition(_))));

    let _ = std::fs::remove_dir_all(&dir);
}

#[test]
fn test_missing_replay_file() {
    let config = Config::default();
    let result = ReplaySource::open("/nonexistent/session.jsonl", &config.replay);
    assert!(matches!(result, Err(Error::Acquisition(_))));
}

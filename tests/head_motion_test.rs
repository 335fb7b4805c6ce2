//! Nod and tilt detection over synthetic head trajectories


use gesture_capture::{
    config::HeadMotionConfig,
    head_motion::{HeadMotionAnalyzer, Tilt},
};
use proptest::prelude::*;
use std::time::{Duration, Instant};
use test_helpers::{face_at, face_tilted};

const FRAME: Duration = Duration::from_millis(33);

#[test]
fn test_nod_from_face_landmarks() {
    let mut analyzer = HeadMotionAnalyzer::default();
    let start = Instant::now();
    // 100, 115, 100, 85 px in a 200 px tall frame
    let pattern = [0.5, 0.575, 0.5, 0.425];

    for i in 0..9 {
        analyzer.observe(&face_at(0.5, pattern[i % 4]), 200, 200, start + FRAME * i as u32);
        assert!(!analyzer.detect_nod(), "nod reported with only {} samples", i + 1);
    }

    analyzer.observe(&face_at(0.5, pattern[9 % 4]), 200, 200, start + FRAME * 9);
    assert!(analyzer.detect_nod());
}

#[test]
fn test_small_oscillation_is_not_a_nod() {
    let mut analyzer = HeadMotionAnalyzer::default();
    let start = Instant::now();

    for i in 0..20 {
        let y = if i % 2 == 0 { 100.0 } else { 108.0 };
        analyzer.push_sample(320.0, y, 0.0, start + FRAME * i);
    }
    assert!(!analyzer.detect_nod());
}

#[test]
fn test_steady_drift_is_not_a_nod() {
    let mut analyzer = HeadMotionAnalyzer::default();
    let start = Instant::now();

    for i in 0..20 {
        analyzer.push_sample(320.0, 100.0 + f64::from(i) * 5.0, 0.0, start + FRAME * i);
    }
    assert!(!analyzer.detect_nod());
}

#[test]
fn test_tilt_direction_from_eye_line() {
    let start = Instant::now();

    let mut analyzer = HeadMotionAnalyzer::default();
    for (i, degrees) in [0.0, 8.0, 16.0, 24.0, 32.0].into_iter().enumerate() {
        analyzer.observe(&face_tilted(degrees), 640, 480, start + FRAME * i as u32);
    }
    assert_eq!(analyzer.detect_tilt(start + FRAME * 4), Some(Tilt::Right));

    let mut analyzer = HeadMotionAnalyzer::default();
    for (i, degrees) in [0.0, -8.0, -16.0, -24.0, -32.0].into_iter().enumerate() {
        analyzer.observe(&face_tilted(degrees), 640, 480, start + FRAME * i as u32);
    }
    assert_eq!(analyzer.detect_tilt(start + FRAME * 4), Some(Tilt::Left));
}

#[test]
fn test_tilt_respects_cooldown() {
    let mut analyzer = HeadMotionAnalyzer::default();
    let start = Instant::now();
    let mut fired = Vec::new();

    // Keep turning 10 degrees per frame for two seconds
    for i in 0..60_u32 {
        let at = start + FRAME * i;
        analyzer.push_sample(320.0, 240.0, f64::from(i) * 10.0, at);
        if analyzer.detect_tilt(at).is_some() {
            fired.push(at);
        }
    }

    assert!(fired.len() >= 2);
    for pair in fired.windows(2) {
        assert!(pair[1].duration_since(pair[0]) >= Duration::from_millis(800));
    }
}

#[test]
fn test_reset_cooldown_allows_immediate_tilt() {
    let mut analyzer = HeadMotionAnalyzer::default();
    let start = Instant::now();
    for i in 0..5_u32 {
        analyzer.push_sample(320.0, 240.0, f64::from(i) * 10.0, start + FRAME * i);
    }
    let now = start + FRAME * 4;

    assert!(analyzer.detect_tilt(now).is_some());
    assert!(analyzer.detect_tilt(now).is_none());

    analyzer.reset_cooldown();
    assert_eq!(analyzer.angle_len(), 5);
    assert!(analyzer.detect_tilt(now).is_some());
}

proptest! {
    #[test]
    fn prop_histories_stay_bounded(samples in prop::collection::vec((0.0f64..640.0, 0.0f64..480.0, -90.0f64..90.0), 0..100)) {
        let config = HeadMotionConfig::default();
        let mut analyzer = HeadMotionAnalyzer::new(config.clone());
        let start = Instant::now();

        for (i, (x, y, angle)) in samples.iter().enumerate() {
            analyzer.push_sample(*x, *y, *angle, start + FRAME * i as u32);
            prop_assert!(analyzer.position_len() <= config.position_window);
            prop_assert!(analyzer.angle_len() <= config.angle_window);
        }
        prop_assert_eq!(analyzer.position_len(), samples.len().min(config.position_window));
    }

    #[test]
    fn prop_no_nod_below_min_samples(ys in prop::collection::vec(0.0f64..480.0, 0..10)) {
        let mut analyzer = HeadMotionAnalyzer::default();
        let start = Instant::now();
        for (i, y) in ys.iter().enumerate() {
            analyzer.push_sample(320.0, *y, 0.0, start + FRAME * i as u32);
        }
        prop_assert!(!analyzer.detect_nod());
    }

    #[test]
    fn prop_tilts_spaced_by_cooldown(angles in prop::collection::vec(-60.0f64..60.0, 5..80)) {
        let mut analyzer = HeadMotionAnalyzer::default();
        let start = Instant::now();
        let mut last: Option<Instant> = None;

        for (i, angle) in angles.iter().enumerate() {
            let at = start + FRAME * i as u32;
            analyzer.push_sample(320.0, 240.0, *angle, at);
            if analyzer.detect_tilt(at).is_some() {
                if let Some(previous) = last {
                    prop_assert!(at.duration_since(previous).as_secs_f64() >= 0.8);
                }
                last = Some(at);
            }
        }
    }
}

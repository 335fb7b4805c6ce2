//! Benchmarks for per-frame recognition and image operations

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use gesture_capture::{
    gesture::GestureClassifier,
    head_motion::HeadMotionAnalyzer,
    imaging::{crop, highlight_region, rotate_quarter_turns, CropRect},
    landmarks::{HandLandmarks, Point3},
};
use image::{Rgb, RgbImage};
use std::time::{Duration, Instant};

fn noisy_hand() -> HandLandmarks {
    let points = (0..21)
        .map(|_| Point3::new(rand::random::<f32>(), rand::random::<f32>(), 0.0))
        .collect();
    HandLandmarks::new(points).unwrap()
}

fn benchmark_classifier(c: &mut Criterion) {
    let mut group = c.benchmark_group("gesture");
    let classifier = GestureClassifier::default();
    let hands: Vec<HandLandmarks> = (0..100).map(|_| noisy_hand()).collect();

    group.bench_function("classify_single", |b| {
        b.iter(|| black_box(classifier.classify(black_box(&hands[0]))));
    });

    group.bench_with_input(BenchmarkId::new("classify_sequence", 100), &hands, |b, hands| {
        b.iter(|| {
            for pair in hands.chunks(2) {
                black_box(classifier.classify_all(black_box(pair)));
            }
        });
    });

    group.finish();
}

fn benchmark_head_motion(c: &mut Criterion) {
    let mut group = c.benchmark_group("head_motion");

    // Simulated face track: slow nod plus detector jitter
    let start = Instant::now();
    let samples: Vec<(f64, f64, f64, Instant)> = (0..100)
        .map(|i| {
            let t = f64::from(i) * 0.033;
            let y = 240.0 + 15.0 * (t * 6.0).sin() + 2.0 * rand::random::<f64>();
            let angle = 5.0 * (t * 2.0).sin() + rand::random::<f64>();
            (320.0, y, angle, start + Duration::from_secs_f64(t))
        })
        .collect();

    group.bench_with_input(BenchmarkId::new("observe_and_detect", 100), &samples, |b, samples| {
        b.iter(|| {
            let mut analyzer = HeadMotionAnalyzer::default();
            for &(x, y, angle, at) in samples {
                analyzer.push_sample(x, y, angle, at);
                black_box(analyzer.detect_nod());
                black_box(analyzer.detect_tilt(at));
            }
        });
    });

    let mut analyzer = HeadMotionAnalyzer::default();
    for &(x, y, angle, at) in &samples {
        analyzer.push_sample(x, y, angle, at);
    }
    group.bench_function("detect_nod_full_window", |b| {
        b.iter(|| black_box(analyzer.detect_nod()));
    });

    group.finish();
}

fn benchmark_imaging(c: &mut Criterion) {
    let mut group = c.benchmark_group("imaging");
    let frame = RgbImage::from_fn(640, 480, |x, y| Rgb([(x % 256) as u8, (y % 256) as u8, 90]));
    let rect = CropRect::new(100, 80, 420, 400).unwrap();

    group.bench_function("crop", |b| b.iter(|| black_box(crop(black_box(&frame), &rect))));

    for angle in [0, 90, 180, -90] {
        group.bench_with_input(BenchmarkId::new("rotate", angle), &angle, |b, &angle| {
            b.iter(|| black_box(rotate_quarter_turns(black_box(&frame), angle)));
        });
    }

    group.bench_function("highlight_region", |b| {
        b.iter(|| black_box(highlight_region(black_box(&frame), Some(&rect), 3)));
    });

    group.finish();
}

criterion_group!(benches, benchmark_classifier, benchmark_head_motion, benchmark_imaging);
criterion_main!(benches);

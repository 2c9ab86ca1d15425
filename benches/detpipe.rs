use criterion::{criterion_group, criterion_main, Criterion};
use detpipe::{decode, suppress, Detector, DetectorConfig, FrameSize};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::hint::black_box;

const NUM_CLASSES: usize = 6;
// Candidate count of a 640x640 YOLOv8 head.
const NUM_RECORDS: usize = 8400;

fn make_tensor(records: usize, seed: u64) -> Vec<f32> {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut data = Vec::with_capacity(records * (NUM_CLASSES + 5));
    for _ in 0..records {
        data.push(rng.random_range(0.05..0.95));
        data.push(rng.random_range(0.05..0.95));
        data.push(rng.random_range(0.01..0.2));
        data.push(rng.random_range(0.01..0.2));
        data.push(rng.random_range(0.0..0.8));
        for _ in 0..NUM_CLASSES {
            data.push(rng.random_range(0.0..1.0));
        }
    }
    data
}

fn bench_pipeline(c: &mut Criterion) {
    let frame = FrameSize::new(1920.0, 1080.0).unwrap();
    let tensor = make_tensor(NUM_RECORDS, 1);
    let cfg = DetectorConfig::default();

    c.bench_function("decode_8400", |b| {
        b.iter(|| {
            black_box(decode(&tensor, NUM_CLASSES, cfg.confidence_threshold, frame).unwrap())
        });
    });

    let candidates = decode(&tensor, NUM_CLASSES, cfg.confidence_threshold, frame).unwrap();
    c.bench_function("suppress_decoded", |b| {
        b.iter(|| black_box(suppress(&candidates, cfg.iou_threshold).unwrap()));
    });

    let detector = Detector::new(cfg.clone()).unwrap();
    c.bench_function("run_8400", |b| {
        b.iter(|| black_box(detector.run(&tensor, frame).unwrap()));
    });

    if cfg!(feature = "rayon") {
        let detector_par = Detector::new(DetectorConfig {
            parallel: true,
            ..cfg.clone()
        })
        .unwrap();
        c.bench_function("run_8400_parallel", |b| {
            b.iter(|| black_box(detector_par.run(&tensor, frame).unwrap()));
        });

        let batch: Vec<Vec<f32>> = (0..8).map(|i| make_tensor(NUM_RECORDS, 10 + i)).collect();
        let inputs: Vec<(&[f32], FrameSize)> = batch.iter().map(|t| (t.as_slice(), frame)).collect();
        c.bench_function("run_batch_8_parallel", |b| {
            b.iter(|| black_box(detector_par.run_batch(&inputs).unwrap()));
        });
    }
}

criterion_group!(benches, bench_pipeline);
criterion_main!(benches);

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use crop_scorer_rust::input::{arid_plateau, coastal_orchard, paddy_field};
use crop_scorer_rust::CropScorer;

fn bench_predict(c: &mut Criterion) {
    let scorer = CropScorer::builtin();
    let sample = paddy_field();

    c.bench_function("predict_crop_22", |b| {
        b.iter(|| scorer.predict_crop(black_box(&sample)))
    });

    let batch: Vec<_> = (0..1_000)
        .map(|i| match i % 3 {
            0 => paddy_field(),
            1 => arid_plateau(),
            _ => coastal_orchard(),
        })
        .collect();

    c.bench_function("predict_batch_1000_parallel", |b| {
        b.iter(|| scorer.predict_batch(black_box(&batch)))
    });

    c.bench_function("predict_batch_1000_sequential", |b| {
        b.iter(|| scorer.predict_batch_sequential(black_box(&batch)))
    });
}

criterion_group!(benches, bench_predict);
criterion_main!(benches);

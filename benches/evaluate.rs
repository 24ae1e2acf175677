use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

use assay_conformity::reference::{compute_statistics, load_population};
use assay_conformity::{evaluate, get_reference_statistics, Sample, Variant};

fn evaluate_sample(c: &mut Criterion) {
    let mut group = c.benchmark_group("evaluate");
    for &variant in &Variant::ALL {
        let statistics = get_reference_statistics(variant).unwrap();
        let sample = statistics.mean_sample();

        group.bench_with_input(BenchmarkId::from_parameter(variant), &sample, |b, sample| {
            b.iter(|| evaluate(black_box(sample), statistics))
        });
    }
    group.finish();
}

fn outlier_sample(c: &mut Criterion) {
    let statistics = get_reference_statistics(Variant::Components).unwrap();
    let sample = Sample::new()
        .with("Curcumin", 90.)
        .with("DMC", 16.4)
        .with("BDMC", 2.7);

    c.bench_function("evaluate outlier", |b| {
        b.iter(|| evaluate(black_box(&sample), statistics))
    });
}

fn reference_statistics(c: &mut Criterion) {
    let population = load_population(Variant::Components).unwrap();

    c.bench_function("compute_statistics", |b| {
        b.iter(|| compute_statistics(black_box(&population)))
    });
}

criterion_group!(benches, evaluate_sample, outlier_sample, reference_statistics);
criterion_main!(benches);

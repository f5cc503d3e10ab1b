use criterion::{Criterion, black_box, criterion_group, criterion_main};
use ebltable::{OptDepth, PowerLaw, TauGrid};

fn model() -> OptDepth {
    let log_e: Vec<f64> = (0..100).map(|i| 0.5 + 0.04 * i as f64).collect();
    let z: Vec<f64> = (0..40).map(|i| 0.01 + 0.05 * i as f64).collect();
    let data: Vec<f64> = log_e
        .iter()
        .flat_map(|&le| {
            z.iter()
                .map(move |&zz| zz * (1.0 + zz) * 10f64.powf(0.8 * (le - 3.0)))
        })
        .collect();
    let energy_gev: Vec<f64> = log_e.iter().map(|le| 10f64.powf(*le)).collect();
    let tau = TauGrid::from_flat(log_e.len(), z.len(), data).unwrap();
    OptDepth::new(z, &energy_gev, tau).unwrap()
}

fn bench_surface_build(c: &mut Criterion) {
    let m = model();
    let table = m.to_table();

    c.bench_function("surface_build_100x40", |b| {
        b.iter(|| black_box(OptDepth::from_table(black_box(&table)).unwrap()));
    });
}

fn bench_forward(c: &mut Criterion) {
    let m = model();
    let z: Vec<f64> = (0..50).map(|i| 0.02 + 0.03 * i as f64).rev().collect();
    let e: Vec<f64> = (0..200).map(|i| 0.01 + 0.05 * i as f64).collect();

    c.bench_function("opt_depth_50x200_unsorted_z", |b| {
        b.iter(|| black_box(m.opt_depth(black_box(z.as_slice()), black_box(e.as_slice()))));
    });
}

fn bench_inverse_and_ebin(c: &mut Criterion) {
    let m = model();
    let edges: Vec<f64> = (0..21).map(|i| 10f64.powf(-1.0 + 0.1 * i as f64)).collect();
    let shape = PowerLaw::new(2.2);

    c.bench_function("opt_depth_inverse", |b| {
        b.iter(|| black_box(m.opt_depth_inverse(black_box(0.5), black_box(1.0)).unwrap()));
    });

    c.bench_function("opt_depth_ebin_20_bins", |b| {
        b.iter(|| black_box(m.opt_depth_ebin(black_box(0.5), black_box(&edges), &shape).unwrap()));
    });
}

criterion_group!(
    benches,
    bench_surface_build,
    bench_forward,
    bench_inverse_and_ebin
);
criterion_main!(benches);

//! Benchmarks for layer packing and session replay.

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use ghoststack_pallet::{
    BoxSpec, Config, CorrectionStrategy, LayerPacker, Manifest, Pallet, PalletStandard,
    PlacementEvent, PlanningSession,
};

fn mixed_boxes(n: usize) -> Vec<BoxSpec> {
    (0..n)
        .map(|i| {
            BoxSpec::new(
                8.0 + (i * 7 % 13) as f64,
                6.0 + (i * 5 % 11) as f64,
                9.0 + (i * 3 % 17) as f64,
            )
            .with_upright(i % 4 == 0)
        })
        .collect()
}

fn packer_benchmark(c: &mut Criterion) {
    let pallet = Pallet::standard(PalletStandard::Gma);
    let packer = LayerPacker::new();

    let uniform = vec![BoxSpec::new(12.0, 10.0, 10.0); 100];
    c.bench_function("pack_100_uniform_boxes", |b| {
        b.iter(|| black_box(packer.pack(black_box(&uniform), black_box(&pallet))))
    });

    let mixed = mixed_boxes(500);
    c.bench_function("pack_500_mixed_boxes", |b| {
        b.iter(|| black_box(packer.pack(black_box(&mixed), black_box(&pallet))))
    });
}

fn replay_benchmark(c: &mut Criterion) {
    let manifest = Manifest::new(mixed_boxes(200));
    let pallet = Pallet::standard(PalletStandard::Gma);

    for (name, strategy) in [
        ("replay_200_error_propagation", CorrectionStrategy::ErrorPropagation),
        ("replay_200_stability_offset", CorrectionStrategy::StabilityOffset),
    ] {
        let config = Config::new().with_correction(strategy);
        c.bench_function(name, |b| {
            b.iter(|| {
                let mut session =
                    PlanningSession::new(manifest.clone(), pallet, config.clone()).unwrap();
                while session
                    .confirm_next(PlacementEvent::SensedError { dx: 0.25, dz: -0.1 })
                    .unwrap()
                    .is_some()
                {}
                black_box(session.stability())
            })
        });
    }
}

criterion_group!(benches, packer_benchmark, replay_benchmark);
criterion_main!(benches);

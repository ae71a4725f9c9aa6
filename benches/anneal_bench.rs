//! Criterion benchmarks for the annealing loop.
//!
//! Uses uniformly random instances so the numbers reflect loop overhead
//! and move cost rather than any particular city layout.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use tsp_anneal::geometry::random_points;
use tsp_anneal::neighbor::MoveKind;
use tsp_anneal::random::create_rng;
use tsp_anneal::sa::{Acceptance, AnnealConfig, AnnealRunner};
use tsp_anneal::tour::{energy, Tour};

fn bench_energy(c: &mut Criterion) {
    let mut group = c.benchmark_group("tour_energy");

    for &n in &[100usize, 1_000, 10_000] {
        let mut rng = create_rng(42);
        let points = random_points(n, 1_000.0, &mut rng);
        let tour = Tour::random(n, &mut rng);
        group.bench_with_input(BenchmarkId::from_parameter(n), &(points, tour), |b, (p, t)| {
            b.iter(|| black_box(energy(black_box(t), black_box(p))))
        });
    }
    group.finish();
}

fn bench_anneal(c: &mut Criterion) {
    let mut group = c.benchmark_group("anneal");
    group.sample_size(10);

    for &n in &[20usize, 50, 100] {
        let mut rng = create_rng(7);
        let points = random_points(n, 1_000.0, &mut rng);
        let initial = Tour::random(n, &mut rng);

        for (label, acceptance, kind) in [
            ("metropolis_swap", Acceptance::Metropolis, MoveKind::Swap),
            ("metropolis_reverse", Acceptance::Metropolis, MoveKind::Reverse),
            ("strict_reverse", Acceptance::StrictImprovement, MoveKind::Reverse),
        ] {
            let config = AnnealConfig::default()
                .with_initial_temperature(100.0)
                .with_decay_factor(0.999)
                .with_min_temperature(0.01)
                .with_max_iterations(5_000)
                .with_acceptance(acceptance)
                .with_move_kind(kind)
                .with_seed(42);
            group.bench_with_input(
                BenchmarkId::new(label, n),
                &(points.clone(), initial.clone(), config),
                |b, (p, t, cfg)| {
                    b.iter(|| {
                        let result = AnnealRunner::run(t.clone(), black_box(p), black_box(cfg));
                        black_box(result)
                    })
                },
            );
        }
    }
    group.finish();
}

criterion_group!(benches, bench_energy, bench_anneal);
criterion_main!(benches);

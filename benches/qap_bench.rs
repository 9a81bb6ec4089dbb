//! Criterion benchmarks for the QAP objective and solvers.
//!
//! Uses seeded random instances so numbers are comparable across runs.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use qap_metaheur::bees::{BeesConfig, BeesRunner};
use qap_metaheur::genetic::{GeneticConfig, GeneticRunner};
use qap_metaheur::problem::{naive_objective, objective, Matrix, QapProblem};
use qap_metaheur::random::{create_rng, random_permutation};
use rand::Rng;

// ===========================================================================
// Instances
// ===========================================================================

fn random_instance(n: usize, seed: u64) -> QapProblem {
    let mut rng = create_rng(seed);
    let mut fill = || {
        let data = (0..n * n).map(|_| rng.random_range(0..100i64)).collect();
        Matrix::from_flat(n, data).expect("n*n entries")
    };
    let distances = fill();
    let flows = fill();
    QapProblem::new(n, distances, flows).expect("square matrices")
}

// ===========================================================================
// Benchmarks
// ===========================================================================

fn bench_objective(c: &mut Criterion) {
    let mut group = c.benchmark_group("objective");

    for &n in &[12usize, 30, 100] {
        let problem = random_instance(n, 1);
        let perm = random_permutation(n, &mut create_rng(2));
        group.bench_with_input(BenchmarkId::new("rows", n), &perm, |b, p| {
            b.iter(|| objective(problem.distances(), problem.flows(), black_box(p)))
        });
        group.bench_with_input(BenchmarkId::new("naive", n), &perm, |b, p| {
            b.iter(|| naive_objective(black_box(p), problem.distances(), problem.flows()))
        });
    }
    group.finish();
}

fn bench_genetic(c: &mut Criterion) {
    let mut group = c.benchmark_group("genetic");
    group.sample_size(10);

    for (n, pop, gen) in [(12usize, 50usize, 50usize), (30, 100, 30)] {
        let problem = random_instance(n, 3);
        let config = GeneticConfig::default()
            .with_population_size(pop)
            .with_max_iterations(gen)
            .with_report_every(0)
            .with_seed(42);
        group.bench_with_input(
            BenchmarkId::new(format!("n{}_p{}_g{}", n, pop, gen), n),
            &(problem, config),
            |b, (p, c)| {
                b.iter(|| {
                    let result = GeneticRunner::run(black_box(p), p.size(), black_box(c));
                    black_box(result)
                })
            },
        );
    }
    group.finish();
}

fn bench_bees(c: &mut Criterion) {
    let mut group = c.benchmark_group("bees");
    group.sample_size(10);

    for &workers in &[1usize, 6] {
        let problem = random_instance(30, 4);
        let config = BeesConfig::default()
            .with_population_size(100)
            .with_max_iterations(30)
            .with_elite_population(5usize)
            .with_selected_population(40usize)
            .with_elite_search_size(10usize)
            .with_selected_search_size(4usize)
            .with_lifetime(10)
            .with_workers(workers)
            .with_report_every(0)
            .with_seed(42);
        group.bench_with_input(
            BenchmarkId::new("workers", workers),
            &(problem, config),
            |b, (p, c)| {
                b.iter(|| {
                    let result = BeesRunner::run(black_box(p), p.size(), black_box(c));
                    black_box(result)
                })
            },
        );
    }
    group.finish();
}

criterion_group!(benches, bench_objective, bench_genetic, bench_bees);
criterion_main!(benches);

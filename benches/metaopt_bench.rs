//! Criterion benchmarks for u-metaopt strategies.
//!
//! Uses synthetic problems (Sphere, ZDT1) to measure pure algorithm overhead
//! independent of any domain.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use u_metaopt::core::{Bounds, Fgh, Information, Options};
use u_metaopt::de::De;
use u_metaopt::driver::optimize;
use u_metaopt::eca::Eca;
use u_metaopt::nsga2::Nsga2;
use u_metaopt::pso::Pso;
use u_metaopt::sa::Sa;

fn sphere(x: &[f64]) -> f64 {
    x.iter().map(|v| v * v).sum()
}

fn zdt1(x: &[f64]) -> Fgh {
    let f1 = x[0];
    let g = 1.0 + 9.0 * x[1..].iter().sum::<f64>() / (x.len() - 1) as f64;
    (vec![f1, g * (1.0 - (f1 / g).sqrt())], vec![], vec![])
}

fn bench_sphere(c: &mut Criterion) {
    let mut group = c.benchmark_group("sphere");
    group.sample_size(10);

    for dim in [5, 20] {
        let bounds = Bounds::uniform(-5.0, 5.0, dim).unwrap();
        let options = Options::default()
            .with_f_calls_limit(1000 * dim)
            .with_seed(42);
        let info = Information::default();

        group.bench_with_input(BenchmarkId::new("eca", dim), &bounds, |b, bounds| {
            b.iter(|| optimize(&sphere, black_box(bounds), &Eca::default(), &options, &info))
        });
        group.bench_with_input(BenchmarkId::new("de", dim), &bounds, |b, bounds| {
            b.iter(|| optimize(&sphere, black_box(bounds), &De::default(), &options, &info))
        });
        group.bench_with_input(BenchmarkId::new("pso", dim), &bounds, |b, bounds| {
            b.iter(|| optimize(&sphere, black_box(bounds), &Pso::default(), &options, &info))
        });
        group.bench_with_input(BenchmarkId::new("sa", dim), &bounds, |b, bounds| {
            b.iter(|| optimize(&sphere, black_box(bounds), &Sa::default(), &options, &info))
        });
    }
    group.finish();
}

fn bench_nsga2_zdt1(c: &mut Criterion) {
    let mut group = c.benchmark_group("nsga2_zdt1");
    group.sample_size(10);

    for pop in [40, 100] {
        let bounds = Bounds::uniform(0.0, 1.0, 10).unwrap();
        let options = Options::default().with_iterations(50).with_seed(42);
        let nsga2 = Nsga2::default().with_population_size(pop);
        group.bench_with_input(BenchmarkId::from_parameter(pop), &nsga2, |b, nsga2| {
            b.iter(|| optimize(&zdt1, &bounds, black_box(nsga2), &options, &Information::default()))
        });
    }
    group.finish();
}

criterion_group!(benches, bench_sphere, bench_nsga2_zdt1);
criterion_main!(benches);

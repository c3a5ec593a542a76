use checkout_sim::engine::run_simulation;
use checkout_sim::models::SimConfig;
use criterion::{black_box, criterion_group, criterion_main, BatchSize, BenchmarkId, Criterion};

const HORIZON: f64 = 1_000.0;

fn build_config(servers: usize) -> SimConfig {
    let mut config = SimConfig::default();
    config.servers = servers;
    config.horizon = HORIZON;
    config.seed = Some(42);
    config
}

fn bench_engine(c: &mut Criterion) {
    let mut group = c.benchmark_group("engine");
    for servers in [1usize, 3, 8] {
        group.bench_with_input(
            BenchmarkId::new("run", servers),
            &servers,
            |b, &servers| {
                b.iter_batched(
                    || build_config(servers),
                    |config| {
                        let result = run_simulation(&config).expect("simulation should succeed");
                        black_box(result);
                    },
                    BatchSize::SmallInput,
                );
            },
        );
    }
    group.finish();
}

criterion_group!(benches, bench_engine);
criterion_main!(benches);

// Ranking throughput benchmarks
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use rand::prelude::*;
use serde_json::{json, Value};
use waitrank_core::Coordinate;
use waitrank_ranking::{load_population_from_values, Ranker, ScoringSchema};

fn generate_random_record(id: usize, rng: &mut StdRng) -> Value {
    if rng.random_bool(0.1) {
        return json!({"id": format!("p{}", id)});
    }
    json!({
        "id": format!("p{}", id),
        "name": format!("Patient {}", id),
        "location": {
            "latitude": rng.random_range(45.0..47.0f64),
            "longitude": rng.random_range(7.0..9.0f64),
        },
        "age": rng.random_range(18..95u64),
        "acceptedOffers": rng.random_range(0..20u64),
        "canceledOffers": rng.random_range(0..20u64),
        "averageReplyTime": rng.random_range(10..5000u64),
    })
}

fn generate_records(n: usize) -> Vec<Value> {
    let mut rng = StdRng::seed_from_u64(42);
    (0..n).map(|i| generate_random_record(i, &mut rng)).collect()
}

fn benchmark_load(c: &mut Criterion) {
    let mut group = c.benchmark_group("load");
    let schema = ScoringSchema::default();

    for size in [1_000, 10_000, 100_000].iter() {
        let records = generate_records(*size);
        group.bench_with_input(BenchmarkId::new("population", size), size, |b, _| {
            b.iter(|| {
                let population = load_population_from_values(records.clone(), &schema).unwrap();
                black_box(population);
            });
        });
    }

    group.finish();
}

fn benchmark_rank(c: &mut Criterion) {
    let mut group = c.benchmark_group("rank");
    let ranker = Ranker::default();
    let query = Coordinate::new(46.0, 8.0).unwrap();

    for size in [1_000, 10_000, 100_000].iter() {
        let population =
            load_population_from_values(generate_records(*size), &ScoringSchema::default())
                .unwrap();
        let mut rng = StdRng::seed_from_u64(7);

        group.bench_with_input(BenchmarkId::new("top10", size), size, |b, _| {
            b.iter(|| {
                let result = ranker.rank(&population, black_box(&query), 10, &mut rng);
                black_box(result);
            });
        });
    }

    group.finish();
}

criterion_group!(benches, benchmark_load, benchmark_rank);
criterion_main!(benches);

use chrono::{NaiveDate, TimeDelta};
use criterion::{BatchSize, BenchmarkId, Criterion, criterion_group, criterion_main};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use std::hint::black_box;
use toki_logic::{Instant, Interval, IntervalSet, TemporalIndex};

fn origin() -> Instant {
    NaiveDate::from_ymd_opt(2024, 1, 1)
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .unwrap_or_default()
}

fn generate_fixed_intervals(size: usize, seed: u64) -> Vec<Interval> {
    let mut rng = ChaCha8Rng::seed_from_u64(seed); // シード固定
    (0..size)
        .map(|_| Interval::random_within_using(&mut rng, origin(), TimeDelta::days(365)))
        .collect()
}

fn bench_set_operations(c: &mut Criterion) {
    let mut group = c.benchmark_group("Set Operations");

    let sizes = [100, 1_000, 10_000];

    for &size in &sizes {
        let intervals_a = generate_fixed_intervals(size, 12345);
        let intervals_b = generate_fixed_intervals(size, 67890);

        let set_a = IntervalSet::new(intervals_a.iter().copied());
        let set_b = IntervalSet::new(intervals_b.iter().copied());

        group.bench_with_input(BenchmarkId::new("Build", size), &intervals_a, |b, intervals| {
            b.iter_batched(
                || intervals.clone(),
                |intervals| black_box(IntervalSet::from(intervals)),
                BatchSize::SmallInput,
            );
        });

        group.bench_with_input(
            BenchmarkId::new("Union", size),
            &(&set_a, &set_b),
            |b, (a, b_set)| {
                b.iter(|| {
                    let result = a.union(*b_set);
                    black_box(result)
                });
            },
        );

        group.bench_with_input(
            BenchmarkId::new("Intersection", size),
            &(&set_a, &set_b),
            |b, (a, b_set)| {
                b.iter(|| {
                    let result = a.intersection(*b_set);
                    black_box(result)
                });
            },
        );

        group.bench_with_input(
            BenchmarkId::new("Difference", size),
            &(&set_a, &set_b),
            |b, (a, b_set)| {
                b.iter(|| {
                    let result = a.difference(*b_set);
                    black_box(result)
                });
            },
        );
    }
    group.finish();
}

fn bench_index_lookup(c: &mut Criterion) {
    let mut group = c.benchmark_group("Index Lookup");

    for &size in &[1_000, 100_000] {
        let mut rng = ChaCha8Rng::seed_from_u64(42);
        let index: TemporalIndex<u64> = (0..size as u64)
            .map(|i| (origin() + TimeDelta::seconds(rng.random_range(0..31_536_000)), i))
            .collect();
        let probes: Vec<Instant> = (0..1_000)
            .map(|_| origin() + TimeDelta::seconds(rng.random_range(0..31_536_000)))
            .collect();

        group.bench_with_input(BenchmarkId::new("AtOrBefore", size), &probes, |b, probes| {
            b.iter(|| {
                for probe in probes {
                    black_box(index.lookup_at_or_before(*probe).ok());
                }
            });
        });
    }
    group.finish();
}

criterion_group!(benches, bench_set_operations, bench_index_lookup);
criterion_main!(benches);

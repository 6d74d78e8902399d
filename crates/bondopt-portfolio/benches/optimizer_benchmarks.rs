//! Benchmarks for screening and portfolio optimization.
//!
//! Run with: cargo bench -p bondopt-portfolio

use std::hint::black_box;

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use rust_decimal::Decimal;

use bondopt_core::{Bond, ClassLevel, Classification, Date, TargetMetric, Universe};
use bondopt_portfolio::prelude::*;

// =============================================================================
// TEST DATA GENERATORS
// =============================================================================

fn bench_date() -> Date {
    Date::from_ymd(2023, 3, 31).unwrap()
}

fn create_universe(n: usize) -> Universe {
    let sectors = [
        "Energy", "Utility", "Banking", "Insurance", "Media", "Telecom", "Retail", "Autos",
        "Chemicals", "Software",
    ];
    let ratings = ["AAA", "AA", "A", "BBB", "BB"];

    let bonds = (0..n)
        .map(|i| {
            Bond::builder()
                .alias(format!("BOND_{i:05}"))
                .classification(Classification::new(
                    "Corporate",
                    sectors[i % sectors.len()],
                    "Senior",
                    "Fixed",
                ))
                .rating(ratings[i % ratings.len()])
                .effective_date(bench_date())
                .effective_duration(1.0 + (i % 17) as f64 * 0.75)
                .market_value(Decimal::from(100_000 + (i % 50) as i64 * 10_000))
                .oas(0.5 + (i % 23) as f64 * 0.1)
                .ytm(3.0 + (i % 29) as f64 * 0.1)
                .build()
                .unwrap()
        })
        .collect();

    Universe::new(bonds).unwrap()
}

// =============================================================================
// BENCHMARKS
// =============================================================================

fn bench_filter(c: &mut Criterion) {
    let mut group = c.benchmark_group("filter");
    let selector = SegmentSelector::new(
        Classification::new("Corporate", "Energy", "Senior", "Fixed"),
        "AAA",
        DurationBand::new(2.0, 10.0).unwrap(),
    );

    for size in &[1_000, 10_000] {
        let universe = create_universe(*size);
        group.throughput(Throughput::Elements(*size as u64));
        group.bench_with_input(BenchmarkId::from_parameter(size), &universe, |b, universe| {
            b.iter(|| filter(black_box(universe), black_box(&selector)).len());
        });
    }

    group.finish();
}

fn bench_expand_indicators(c: &mut Criterion) {
    let universe = create_universe(5_000);
    c.bench_function("expand_indicators_5000", |b| {
        b.iter(|| expand_indicators(black_box(&universe), ClassLevel::Two).unwrap());
    });
}

fn bench_optimize(c: &mut Criterion) {
    let mut group = c.benchmark_group("optimize");
    group.sample_size(20);
    let config = OptimizerConfig::default();

    for size in &[50, 200, 500] {
        let universe = create_universe(*size);
        let duration_sum: f64 = universe.iter().map(|b| b.effective_duration).sum();
        let params = OptimizationParams::new(TargetMetric::Oas, bench_date())
            .with_sector_cap(0.15)
            .with_max_individual_weight(0.02)
            .with_duration_delta(duration_sum);

        group.throughput(Throughput::Elements(*size as u64));
        group.bench_with_input(BenchmarkId::from_parameter(size), &universe, |b, universe| {
            b.iter(|| optimize(black_box(universe), &params, &config).unwrap());
        });
    }

    group.finish();
}

criterion_group!(benches, bench_filter, bench_expand_indicators, bench_optimize);
criterion_main!(benches);

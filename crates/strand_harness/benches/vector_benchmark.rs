//! # Vector Benchmark
//!
//! Compares:
//! 1. Growth policies - exact, doubling and golden-ratio appends
//! 2. The append / resize / pop workload across `Vector` and the standard
//!    containers

#![allow(missing_docs)]

use std::collections::{LinkedList, VecDeque};
use std::hint::black_box;

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use strand_core::{GrowthPolicy, Heap, Vector, VectorConfig};
use strand_harness::{workload, Sequence, WorkloadConfig};

const PUSH_COUNT: usize = 100_000;

/// Workload sized so one iteration stays in the millisecond range.
const WORKLOAD: WorkloadConfig = WorkloadConfig {
    rounds: 1,
    elements: 100_000,
};

// =============================================================================
// GROWTH POLICIES
// =============================================================================

fn bench_push_growth(c: &mut Criterion) {
    let mut group = c.benchmark_group("push_growth");

    let policies = [
        ("exact", VectorConfig::exact()),
        ("doubling", VectorConfig::default()),
        (
            "golden",
            VectorConfig {
                growth: GrowthPolicy::GOLDEN,
                ..VectorConfig::default()
            },
        ),
    ];

    for (name, config) in policies {
        // Exact growth is quadratic; keep its run short.
        let count = if config.growth == GrowthPolicy::Exact {
            PUSH_COUNT / 10
        } else {
            PUSH_COUNT
        };

        group.bench_with_input(BenchmarkId::new(name, count), &count, |b, &count| {
            b.iter(|| {
                let mut v = Vector::with_config(config, Heap);
                for i in 0..count {
                    v.push_back(i);
                }
                black_box(v.len())
            });
        });
    }

    group.finish();
}

fn bench_push_reserved(c: &mut Criterion) {
    c.bench_function("push_reserved_100K", |b| {
        b.iter(|| {
            let mut v = Vector::with_capacity(PUSH_COUNT);
            for i in 0..PUSH_COUNT {
                v.push_back(i);
            }
            black_box(v.capacity())
        });
    });
}

// =============================================================================
// WORKLOAD ACROSS CONTAINERS
// =============================================================================

fn bench_one<S: Sequence + Default>(c: &mut Criterion, name: &str) {
    c.bench_function(name, |b| {
        b.iter(|| {
            let mut sequence = S::default();
            black_box(workload::run(&mut sequence, &WORKLOAD))
        });
    });
}

fn bench_workload(c: &mut Criterion) {
    bench_one::<Vector<i32>>(c, "workload_vector");
    bench_one::<Vec<i32>>(c, "workload_vec");
    bench_one::<VecDeque<i32>>(c, "workload_vec_deque");
    bench_one::<LinkedList<i32>>(c, "workload_linked_list");
}

criterion_group!(
    benches,
    bench_push_growth,
    bench_push_reserved,
    bench_workload
);
criterion_main!(benches);

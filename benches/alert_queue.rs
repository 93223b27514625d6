// SPDX-License-Identifier: MPL-2.0
//! Benchmarks for alert queue transitions.
//!
//! Measures the performance of:
//! - Inserting into a full queue (overflow eviction on every push)
//! - Draining a full queue tick by tick

use alert_stack::alerts::{Alert, AlertQueue, Expiry};
use alert_stack::domain::alert::StackSettings;
use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use std::hint::black_box;
use std::time::Duration;

fn settings(max_len: usize) -> StackSettings {
    StackSettings::try_from_raw(max_len, Duration::from_secs(5)).unwrap()
}

/// Benchmark inserts once the queue is at capacity.
fn bench_insert_overflow(c: &mut Criterion) {
    let mut group = c.benchmark_group("alert_queue");

    for max_len in [3usize, 64, 1024] {
        group.bench_with_input(
            BenchmarkId::new("insert_overflow", max_len),
            &max_len,
            |b, &max_len| {
                let mut queue = AlertQueue::new(settings(max_len));
                for _ in 0..max_len {
                    let _ = queue.insert(Alert::info("warm-up"));
                }
                b.iter(|| {
                    let insertion = queue.insert(Alert::warning("overflow"));
                    black_box(insertion.overflowed);
                });
            },
        );
    }

    group.finish();
}

/// Benchmark a full drain through the timer transition.
fn bench_drain(c: &mut Criterion) {
    let mut group = c.benchmark_group("alert_queue");

    group.bench_function("drain_64", |b| {
        b.iter(|| {
            let mut queue = AlertQueue::new(settings(64));
            for _ in 0..64 {
                let _ = queue.insert(Alert::info("drain"));
            }
            while let Some(epoch) = queue.armed() {
                if let Expiry::Evicted { evicted, .. } = queue.expire(epoch) {
                    black_box(evicted.payload);
                }
            }
        });
    });

    group.finish();
}

criterion_group!(benches, bench_insert_overflow, bench_drain);
criterion_main!(benches);

//! Reading the supported tick sources.

#![allow(
    missing_docs,
    reason = "No need for API documentation in benchmark code"
)]

use std::hint::black_box;
use std::time::Instant;

use chronon::{
    Clock, CpuCounter, CpuCounterFenced, CpuCounterSerialized, Monotonic, Realtime,
    RealtimeCoarse, TickSource,
};
use criterion::measurement::WallTime;
use criterion::{BenchmarkGroup, Criterion, criterion_group, criterion_main};

criterion_group!(benches, entrypoint);
criterion_main!(benches);

fn entrypoint(c: &mut Criterion) {
    let mut group = c.benchmark_group("Clock");

    bench_now::<Realtime>(&mut group, "realtime");
    bench_now::<RealtimeCoarse>(&mut group, "realtime_coarse");
    bench_now::<Monotonic>(&mut group, "monotonic");
    bench_now::<CpuCounter>(&mut group, "cpu_counter");
    bench_now::<CpuCounterSerialized>(&mut group, "cpu_counter_serialized");
    bench_now::<CpuCounterFenced>(&mut group, "cpu_counter_fenced");

    group.bench_function("last", |b| {
        let clock = Clock::<Monotonic>::new().unwrap();

        b.iter(|| black_box(&clock).last());
    });

    // For comparison.
    group.bench_function("std_instant", |b| {
        b.iter(Instant::now);
    });

    group.finish();
}

fn bench_now<S: TickSource>(group: &mut BenchmarkGroup<'_, WallTime>, name: &str) {
    // Not every clock exists on every platform.
    let Ok(mut clock) = Clock::<S>::new() else {
        return;
    };

    group.bench_function(name, |b| {
        b.iter(|| clock.now().unwrap());
    });
}

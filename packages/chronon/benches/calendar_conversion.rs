//! Converting between rata die day numbers and calendar dates.

#![allow(
    missing_docs,
    reason = "No need for API documentation in benchmark code"
)]

use std::hint::black_box;

use chronon::{date_from_rata_die, day_of_week, is_leap_year, rata_die_from_date};
use criterion::{Criterion, criterion_group, criterion_main};

criterion_group!(benches, entrypoint);
criterion_main!(benches);

fn entrypoint(c: &mut Criterion) {
    let mut group = c.benchmark_group("calendar");

    group.bench_function("date_from_rata_die", |b| {
        b.iter(|| date_from_rata_die(black_box(19_838)));
    });

    group.bench_function("rata_die_from_date", |b| {
        b.iter(|| rata_die_from_date(black_box(2024), black_box(4), black_box(25)));
    });

    group.bench_function("is_leap_year", |b| {
        b.iter(|| is_leap_year(black_box(2100)));
    });

    group.bench_function("day_of_week", |b| {
        b.iter(|| day_of_week(black_box(19_838)));
    });

    // A year of consecutive days, to keep the branch predictor honest.
    group.bench_function("date_from_rata_die_year", |b| {
        b.iter(|| {
            for rata_die in 19_723..19_723 + 366 {
                black_box(date_from_rata_die(black_box(rata_die)));
            }
        });
    });

    group.finish();
}

//! Benchmarks for watchlist operations
//!
//! Run with: cargo bench --package watchlist
//!
//! Membership is a linear scan, so these track how add/query cost grows
//! with list size.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use watchlist::{Movie, Watchlist};

fn filled_watchlist(size: u32) -> Watchlist {
    let mut watchlist = Watchlist::new();
    for id in 0..size {
        watchlist.add_movie(Movie::new(id).with_title(format!("Movie {id}")));
    }
    watchlist
}

fn bench_is_in_watchlist(c: &mut Criterion) {
    let mut group = c.benchmark_group("is_in_watchlist");
    for size in [10u32, 100, 1_000] {
        let watchlist = filled_watchlist(size);
        group.bench_with_input(BenchmarkId::from_parameter(size), &size, |b, &size| {
            b.iter(|| black_box(watchlist.is_in_watchlist(black_box(size - 1))))
        });
    }
    group.finish();
}

fn bench_add_duplicate(c: &mut Criterion) {
    let mut watchlist = filled_watchlist(1_000);

    c.bench_function("add_movie_duplicate", |b| {
        b.iter(|| watchlist.add_movie(black_box(Movie::new(999))))
    });
}

fn bench_add_remove_cycle(c: &mut Criterion) {
    let mut watchlist = filled_watchlist(100);

    c.bench_function("add_remove_cycle", |b| {
        b.iter(|| {
            watchlist.add_movie(black_box(Movie::new(5_000)));
            watchlist.remove_movie(black_box(5_000));
        })
    });
}

criterion_group!(
    benches,
    bench_is_in_watchlist,
    bench_add_duplicate,
    bench_add_remove_cycle
);
criterion_main!(benches);

//! Benchmarks for trace generation and playback.
//!
//! Run with: cargo bench -p algoviz-runtime --bench playback_bench
//!
//! Measures the cost of generating a full-size trace and of draining it
//! through the player in one tick versus one tick per step.

use criterion::{Criterion, criterion_group, criterion_main};
use std::hint::black_box;

use algoviz_core::generate::sort::{bubble_sort, merge_sort};
use algoviz_core::replay;
use algoviz_runtime::{Player, PlayerConfig};
use web_time::Duration;

const LEN: i64 = 100;

fn reversed() -> Vec<i64> {
    (1..=LEN).rev().collect()
}

fn bench_generate(c: &mut Criterion) {
    let values = reversed();
    c.bench_function("generate/bubble_sort_100", |b| {
        b.iter(|| bubble_sort(black_box(&values)).unwrap())
    });
    c.bench_function("generate/merge_sort_100", |b| {
        b.iter(|| merge_sort(black_box(&values)).unwrap())
    });
}

fn bench_playback(c: &mut Criterion) {
    let trace = bubble_sort(&reversed()).unwrap();
    let speed = Duration::from_millis(5);

    c.bench_function("playback/single_tick", |b| {
        b.iter(|| {
            let mut player = Player::new(PlayerConfig::default().with_speed_ms(5));
            player.start(trace.clone());
            while player.tick(Duration::from_secs(3600)) > 0 {}
            black_box(player.cursor())
        })
    });

    c.bench_function("playback/tick_per_step", |b| {
        b.iter(|| {
            let mut player = Player::new(PlayerConfig::default().with_speed_ms(5));
            player.start(trace.clone());
            player.tick(Duration::ZERO);
            while player.tick(speed) > 0 {}
            black_box(player.cursor())
        })
    });

    c.bench_function("replay/full_fold", |b| {
        b.iter(|| replay(black_box(&trace), trace.len()).unwrap())
    });
}

criterion_group!(benches, bench_generate, bench_playback);
criterion_main!(benches);

//! Benchmarks for tracker and dispatcher throughput

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use motion_playback::{
    command::PlaybackCommand,
    config::PlaybackConfig,
    dispatcher::CommandDispatcher,
    location::{LocationSample, LocationTracker},
    orientation::{OrientationSample, OrientationTracker},
    player::SimulatedPlayer,
};
use std::time::Duration;

fn benchmark_trackers(c: &mut Criterion) {
    let mut group = c.benchmark_group("trackers");

    // One second of 50 Hz orientation data with a slow wobble
    let orientation_data: Vec<OrientationSample> = (0..50)
        .map(|i| {
            let t = f64::from(i) * 0.02;
            OrientationSample::new(0.3 * (t * 6.0).sin(), 0.2 * (t * 4.0).cos())
        })
        .collect();

    // A walk north in 2 m steps
    let location_data: Vec<LocationSample> = (0..100)
        .map(|i| LocationSample::new(45.0 + f64::from(i) * 0.000_018, 7.0))
        .collect();

    group.bench_with_input(
        BenchmarkId::new("orientation", "50_samples"),
        &orientation_data,
        |b, data| {
            b.iter(|| {
                let mut tracker = OrientationTracker::default();
                for &sample in data {
                    black_box(tracker.observe(black_box(sample)));
                }
            });
        },
    );

    group.bench_with_input(BenchmarkId::new("location", "100_fixes"), &location_data, |b, data| {
        b.iter(|| {
            let mut tracker = LocationTracker::default();
            for &sample in data {
                black_box(tracker.observe(black_box(sample)));
            }
        });
    });

    group.finish();
}

fn benchmark_dispatch(c: &mut Criterion) {
    let player = SimulatedPlayer::new(Duration::from_secs(600));
    let dispatcher = CommandDispatcher::new(player.clone(), &PlaybackConfig::default());

    c.bench_function("dispatch_volume_up_down", |b| {
        b.iter(|| {
            dispatcher.apply(black_box(PlaybackCommand::VolumeUp));
            dispatcher.apply(black_box(PlaybackCommand::VolumeDown));
            player.take_calls();
        });
    });
}

criterion_group!(benches, benchmark_trackers, benchmark_dispatch);
criterion_main!(benches);

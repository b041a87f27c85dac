// SPDX-License-Identifier: MPL-2.0
//! Benchmarks for slide navigation.
//!
//! Measures the performance of:
//! - Raw sequencer stepping across a large deck
//! - Full presentation navigation (controller teardown and creation)

use criterion::{criterion_group, criterion_main, Criterion};
use std::hint::black_box;
use storydeck::audio::{AutoplayPolicy, SimulatedResource, TrackCatalog};
use storydeck::celebration::LogEmitter;
use storydeck::presentation::{Presentation, SlideDeck};
use storydeck::sequencer::SlideSequencer;

/// Benchmark walking a 1000-slide sequencer end to end and back.
fn bench_sequencer(c: &mut Criterion) {
    let mut group = c.benchmark_group("navigation");

    group.bench_function("sequencer_round_trip", |b| {
        b.iter(|| {
            let Some(mut sequencer) = SlideSequencer::new(1_000) else {
                return;
            };
            while sequencer.next().is_some() {}
            while sequencer.prev().is_some() {}
            black_box(sequencer.index());
        });
    });

    group.bench_function("markers", |b| {
        let Some(mut sequencer) = SlideSequencer::new(1_000) else {
            return;
        };
        sequencer.go_to(500);
        b.iter(|| black_box(sequencer.markers()));
    });

    group.finish();
}

/// Benchmark navigating the stock deck through the presentation root.
fn bench_presentation(c: &mut Criterion) {
    let mut group = c.benchmark_group("navigation");

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_time()
        .build()
        .expect("runtime");
    let _guard = runtime.enter();

    let mut presentation = Presentation::new(
        SlideDeck::narrative(),
        TrackCatalog::default(),
        SimulatedResource::new(AutoplayPolicy::RequiresGesture),
        LogEmitter,
    )
    .expect("stock deck");

    group.bench_function("presentation_sweep", |b| {
        b.iter(|| {
            while presentation.next().is_some() {}
            while presentation.prev().is_some() {}
            presentation.drain_messages();
            black_box(presentation.index());
        });
    });

    group.finish();
}

criterion_group!(benches, bench_sequencer, bench_presentation);
criterion_main!(benches);

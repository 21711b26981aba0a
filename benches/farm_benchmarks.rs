//! Bounded work farm benchmarks:
//! - End-to-end throughput of a farm with a single worker slot
//! - Throughput of a farm wide enough to run every worker concurrently

#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]

// Layer 1: Standard library imports
use std::hint::black_box;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

// Layer 2: Third-party crate imports
use criterion::{criterion_group, criterion_main, Criterion};

// Layer 3: Internal module imports
use mailswarm::prelude::*;

const WORK_ITEMS: usize = 200;

fn worker_factory(done: Arc<AtomicUsize>) -> WorkerFactory {
    WorkerFactory::Plain(Arc::new(move || {
        let done = done.clone();
        Behavior::from_fn(move |_msg: &mut Msg, ctx: &mut ActorContext| {
            done.fetch_add(1, Ordering::Relaxed);
            ctx.suicide();
            async move {}
        })
    }))
}

async fn run_farm(max_workers: usize) {
    let group = Group::new("bench").await;
    let done = Arc::new(AtomicUsize::new(0));
    let (spec, sender) = FarmSpec::new(max_workers, worker_factory(done.clone()));
    group.spawn_farm(spec).await;

    for i in 0..WORK_ITEMS {
        sender.push(Msg::of(i as u64)).await;
    }
    sender.end().await;

    while done.load(Ordering::Relaxed) < WORK_ITEMS {
        tokio::task::yield_now().await;
    }

    group.graceful_active_shutdown().await;
}

fn farm_single_slot_throughput(c: &mut Criterion) {
    let rt = tokio::runtime::Runtime::new().unwrap();

    c.bench_function("farm_single_slot_throughput", |b| {
        b.to_async(&rt).iter(|| async { black_box(run_farm(1).await) });
    });
}

fn farm_wide_throughput(c: &mut Criterion) {
    let rt = tokio::runtime::Runtime::new().unwrap();

    c.bench_function("farm_wide_throughput", |b| {
        b.to_async(&rt).iter(|| async { black_box(run_farm(16).await) });
    });
}

fn configure_criterion() -> Criterion {
    Criterion::default()
        .sample_size(20)
        .measurement_time(Duration::from_secs(5))
        .warm_up_time(Duration::from_secs(2))
        .without_plots()
}

criterion_group! {
    name = benches;
    config = configure_criterion();
    targets = farm_single_slot_throughput, farm_wide_throughput
}

criterion_main!(benches);

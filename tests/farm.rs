//! S6: a bounded farm with a single worker slot processes ten strings,
//! the farmer accumulates the per-worker results itself via a custom
//! [`FarmHandler`], and observes `WorkComplete` exactly once.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use mailswarm::prelude::*;
use tokio::sync::oneshot;

const WORDS: [&str; 10] = [
    "a", "bb", "ccc", "dddd", "e", "ff", "ggg", "hhhh", "i", "jj",
];

#[tokio::test]
async fn farm_bounds_concurrency_and_accumulates_worker_results() {
    let group = Group::new("root").await;

    let concurrent = Arc::new(AtomicUsize::new(0));
    let max_seen = Arc::new(AtomicUsize::new(0));

    let worker_concurrent = concurrent.clone();
    let worker_max_seen = max_seen.clone();
    let worker = WorkerFactory::Plain(Arc::new(move || {
        let concurrent = worker_concurrent.clone();
        let max_seen = worker_max_seen.clone();
        Behavior::from_fn(move |msg: &mut Msg, ctx: &mut ActorContext| {
            let len = msg.get::<String>(0).map(|s| s.len() as i64);
            let live = concurrent.fetch_add(1, Ordering::SeqCst) + 1;
            max_seen.fetch_max(live, Ordering::SeqCst);
            concurrent.fetch_sub(1, Ordering::SeqCst);
            ctx.return_to_parent(Msg::of(len.unwrap_or(0)));
            ctx.suicide();
            async move {}
        })
    }));

    let (result_tx, result_rx) = oneshot::channel::<i64>();
    let result_tx = Arc::new(Mutex::new(Some(result_tx)));
    let farmer_result_tx = result_tx.clone();
    let work_complete_count = Arc::new(AtomicUsize::new(0));
    let farmer_work_complete_count = work_complete_count.clone();

    let farmer_factory = move || -> Box<dyn FarmHandler> {
        let result_tx = farmer_result_tx.clone();
        let work_complete_count = farmer_work_complete_count.clone();
        let mut total: i64 = 0;
        Box::new(FnFarmHandler::new(
            move |msg: &mut Msg, ctx: &mut ActorContext, _dispatch: DispatchFn| {
                if let Some(n) = msg.get::<i64>(0) {
                    total += *n;
                } else if msg.get::<WorkComplete>(0).is_some() {
                    work_complete_count.fetch_add(1, Ordering::SeqCst);
                    if let Some(tx) = result_tx.lock().expect("lock").take() {
                        let _ = tx.send(total);
                    }
                    ctx.suicide();
                }
                async move {}
            },
        ))
    };

    let (spec, sender) = FarmSpec::new(1, worker);
    let spec = spec.with_farmer(farmer_factory);
    group.spawn_farm(spec).await;

    for word in WORDS {
        assert!(sender.push(Msg::of(word.to_string())).await);
    }
    sender.end().await;

    let total = result_rx.await.expect("farmer reports WorkComplete");
    let expected: i64 = WORDS.iter().map(|w| w.len() as i64).sum();
    assert_eq!(total, expected);

    assert!(max_seen.load(Ordering::SeqCst) <= 1);
    assert_eq!(work_complete_count.load(Ordering::SeqCst), 1);

    group.graceful_active_shutdown().await;
}

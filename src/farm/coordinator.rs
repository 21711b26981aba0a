//! The farm coordinator (§4.6): a task running alongside the farmer
//! actor's own loop, bounding how many workers run concurrently and
//! fanning queued work out to them as slots free up. Mirrors the
//! original's `manageFarmer` goroutine.

// Layer 1: Standard library imports
use std::collections::VecDeque;

// Layer 2: Third-party crate imports
use tokio::sync::mpsc;

// Layer 3: Internal module imports
use super::spec::{FarmSpec, FarmerBehavior, WorkerFactory};
use crate::actor::options::InternalHooks;
use crate::actor::{spawn_actor, ActorHandle, ActorOptions, Behavior, DispatchFn};
use crate::group::GroupHandle;
use crate::message::{EndSentinel, Msg, WorkComplete};

/// Spawns the farmer actor and starts its coordinator task. The farmer is
/// a child of `parent` like any other actor; the coordinator is a plain
/// background task wired to the farmer through obit/die hooks set at
/// construction time, since it is not itself a handler dispatch (§4.6).
pub(crate) fn spawn_farm(
    group: GroupHandle,
    parent: ActorHandle,
    spec: FarmSpec,
) -> futures::future::BoxFuture<'static, ActorHandle> {
    Box::pin(spawn_farm_inner(group, parent, spec))
}

async fn spawn_farm_inner(group: GroupHandle, parent: ActorHandle, spec: FarmSpec) -> ActorHandle {
    let (obit_tx, obit_rx) = mpsc::channel(spec.max_workers + 4);
    let (die_tx, die_rx) = mpsc::channel(1);

    let farmer_behavior = match &spec.farmer {
        FarmerBehavior::Default => Behavior::from_fn(|_msg, _ctx| async move {}),
        FarmerBehavior::Custom(factory) => {
            let dispatch = DispatchFn::new(spec.dist_tx.clone());
            Behavior::farm(factory(), dispatch)
        }
    };
    let options = ActorOptions::new(farmer_behavior);
    let hooks = InternalHooks {
        obit_hook: Some(obit_tx),
        die_hook: Some(die_tx),
    };

    let farmer = spawn_actor(group.clone(), Some(parent), options, hooks)
        .await
        .unwrap_or_else(|| unreachable!("farmer name is freshly generated"));

    let worker = spec.worker;
    let max_workers = spec.max_workers;
    let dist_rx = spec.dist_rx;
    let coordinator_farmer = farmer.clone();
    tokio::spawn(run_farm(
        coordinator_farmer,
        group,
        dist_rx,
        obit_rx,
        die_rx,
        worker,
        max_workers,
    ));

    farmer
}

async fn run_farm(
    farmer: ActorHandle,
    group: GroupHandle,
    mut dist_rx: mpsc::Receiver<Msg>,
    mut obit_rx: mpsc::Receiver<crate::message::Obit>,
    mut die_rx: mpsc::Receiver<()>,
    worker: WorkerFactory,
    max_workers: usize,
) {
    let mut actors_left = max_workers;
    let mut queue: VecDeque<Msg> = VecDeque::new();
    let mut more_coming = true;
    let mut killed_early = false;

    while more_coming || !queue.is_empty() {
        if actors_left == 0 || queue.is_empty() {
            tokio::select! {
                maybe = dist_rx.recv() => {
                    match maybe {
                        Some(msg) if msg.get::<EndSentinel>(0).is_some() => more_coming = false,
                        Some(msg) => queue.push_back(msg),
                        None => more_coming = false,
                    }
                }
                Some(_obit) = obit_rx.recv() => { actors_left += 1; }
                _ = die_rx.recv() => {
                    killed_early = true;
                    more_coming = false;
                    queue.clear();
                }
            }
            continue;
        }

        while actors_left > 0 {
            let Some(msg) = queue.pop_front() else { break };
            actors_left -= 1;
            let worker_handle = spawn_worker(&group, &farmer, &worker).await;
            farmer.monitor(&worker_handle);
            worker_handle.send(msg);
        }
    }

    if killed_early {
        // The farmer's own loop is already tombstoning and will kill its
        // worker children as part of its normal death cascade (§4.5);
        // there is nothing left for the coordinator to do.
        return;
    }

    while actors_left < max_workers {
        tokio::select! {
            Some(_obit) = obit_rx.recv() => { actors_left += 1; }
            _ = die_rx.recv() => { return; }
        }
    }

    farmer.send(Msg::of(WorkComplete));
    farmer.die();
}

async fn spawn_worker(group: &GroupHandle, farmer: &ActorHandle, worker: &WorkerFactory) -> ActorHandle {
    match worker {
        WorkerFactory::Plain(f) => {
            let behavior = f();
            spawn_actor(
                group.clone(),
                Some(farmer.clone()),
                ActorOptions::new(behavior),
                InternalHooks::default(),
            )
            .await
            .unwrap_or_else(|| unreachable!("worker name is freshly generated"))
        }
        WorkerFactory::Options(f) => {
            let options = f();
            spawn_actor(
                group.clone(),
                Some(farmer.clone()),
                options,
                InternalHooks::default(),
            )
            .await
            .unwrap_or_else(|| unreachable!("worker name is freshly generated"))
        }
        WorkerFactory::Farm(f) => {
            let nested = f();
            super::spawn_farm(group.clone(), farmer.clone(), nested).await
        }
    }
}

//! Farm configuration (§4.6): how many workers run at once, how each one
//! is built, and the channel work flows in on.

// Layer 1: Standard library imports
use std::sync::Arc;

// Layer 2: Third-party crate imports
use tokio::sync::mpsc;

// Layer 3: Internal module imports
use crate::actor::{ActorOptions, Behavior, FarmHandler};
use crate::message::{EndSentinel, Msg};

/// Default bound on the farm's inbound work queue (§5: small fixed
/// capacities throughout).
pub const DEFAULT_QUEUE_CAPACITY: usize = 256;

/// How a fresh worker is produced each time the coordinator has both a
/// free slot and queued work (§4.6). Three shapes, matching the
/// granularity a caller might want to configure a worker with: a plain
/// behavior, a nested farm (workers that are themselves farms), or a full
/// `ActorOptions` bundle (validator, age-out, etc).
#[derive(Clone)]
pub enum WorkerFactory {
    Plain(Arc<dyn Fn() -> Behavior + Send + Sync>),
    Farm(Arc<dyn Fn() -> FarmSpec + Send + Sync>),
    Options(Arc<dyn Fn() -> ActorOptions + Send + Sync>),
}

/// How the farmer itself behaves (§4.3, §4.6): by default it only exists
/// to receive `WorkComplete` and die, but a caller may give it a
/// [`FarmHandler`] to accumulate worker results (delivered via
/// `return_to_parent`) and to push further work back into its own
/// distribution stream through the supplied [`DispatchFn`](crate::actor::DispatchFn).
#[derive(Clone)]
pub enum FarmerBehavior {
    /// Receives only `WorkComplete`, then dies. The common case.
    Default,
    Custom(Arc<dyn Fn() -> Box<dyn FarmHandler> + Send + Sync>),
}

/// A bounded work farm's configuration (§4.6).
pub struct FarmSpec {
    pub(crate) max_workers: usize,
    pub(crate) worker: WorkerFactory,
    pub(crate) farmer: FarmerBehavior,
    pub(crate) dist_tx: mpsc::Sender<Msg>,
    pub(crate) dist_rx: mpsc::Receiver<Msg>,
}

/// The sending half of a farm's distribution channel: push work in, then
/// signal completion either by sending [`EndSentinel`] or by dropping the
/// sender (§4.6, mirroring the original's "closed channel" terminator).
#[derive(Clone)]
pub struct FarmSender {
    tx: mpsc::Sender<Msg>,
}

impl FarmSender {
    pub async fn push(&self, msg: Msg) -> bool {
        self.tx.send(msg).await.is_ok()
    }

    pub async fn end(&self) {
        let _ = self.tx.send(Msg::of(EndSentinel)).await;
    }
}

impl FarmSpec {
    /// `max_workers` bounds how many worker actors run concurrently;
    /// queued work waits for a slot to free up.
    pub fn new(max_workers: usize, worker: WorkerFactory) -> (Self, FarmSender) {
        Self::with_capacity(max_workers, worker, DEFAULT_QUEUE_CAPACITY)
    }

    pub fn with_capacity(
        max_workers: usize,
        worker: WorkerFactory,
        queue_capacity: usize,
    ) -> (Self, FarmSender) {
        let (tx, rx) = mpsc::channel(queue_capacity);
        (
            Self {
                max_workers: max_workers.max(1),
                worker,
                farmer: FarmerBehavior::Default,
                dist_tx: tx.clone(),
                dist_rx: rx,
            },
            FarmSender { tx },
        )
    }

    /// Gives the farmer itself a [`FarmHandler`] instead of the default
    /// "receive `WorkComplete`, then die" behavior (§4.6). The handler
    /// sees every message returned to the farmer by its workers (via
    /// `return_to_parent`), any `ChildDied` reports, and can push further
    /// work into the farm's own distribution stream through the
    /// `DispatchFn` it's handed.
    pub fn with_farmer(
        mut self,
        factory: impl Fn() -> Box<dyn FarmHandler> + Send + Sync + 'static,
    ) -> Self {
        self.farmer = FarmerBehavior::Custom(Arc::new(factory));
        self
    }
}

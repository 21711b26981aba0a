//! Bounded work farms (§4.6): spawn a fixed pool of worker actors that
//! drain a work queue, finishing with a `WorkComplete` signal to the
//! farmer once every worker has returned.

mod coordinator;
mod spec;

pub use spec::{FarmSender, FarmSpec, FarmerBehavior, WorkerFactory, DEFAULT_QUEUE_CAPACITY};

pub(crate) use coordinator::spawn_farm;

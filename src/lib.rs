//! # mailswarm — a lightweight actor runtime
//!
//! An in-process actor runtime built around bounded mailboxes, supervision
//! by containment (a dying actor kills its children), death notification
//! through obituaries, dynamic behavior swapping, and bounded work farms.
//! A [`Group`] is the unit of sharing: every actor spawned inside one sees
//! the same name registry, group-scoped key/value store, and name
//! generator.
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use mailswarm::prelude::*;
//!
//! #[tokio::main]
//! async fn main() {
//!     let group = Group::new("root").await;
//!
//!     let behavior = Behavior::from_fn(|msg, _ctx| async move {
//!         if let Some(n) = msg.get::<u64>(0) {
//!             println!("got {n}");
//!         }
//!     });
//!
//!     let counter = group.spawn(behavior).await.expect("spawn rejected");
//!     counter.send(Msg::of(42u64));
//!
//!     group.graceful_active_shutdown().await;
//! }
//! ```
//!
//! # Module Organization
//!
//! - [`actor`] - actor handles, behaviors, the per-actor select loop
//! - [`message`] - the heterogeneous `Msg` type and reserved markers
//! - [`mailbox`] - the bounded user-message channel
//! - [`group`] - groups: registry, key/value store, name generator, shutdown
//! - [`farm`] - bounded work farms
//! - [`monitoring`] - best-effort diagnostic event recording
//! - [`util`] - identifiers and small serde helpers
//!
//! # Design Notes
//!
//! Every actor is a `tokio::spawn`ed task driving a `tokio::select!` loop
//! over three channels: a user-message mailbox, a control channel for
//! child/watcher bookkeeping, and a status channel that reports handler
//! completions back to the loop. Handler dispatch runs in its own spawned
//! task, wrapped in `catch_unwind`, so a panicking handler kills only its
//! actor — the loop regains control through the status channel either way
//! and reports the fault to the actor's parent as `ChildDied`.
//!
//! Dynamic behavior (`Become`/`Revert`) and watcher/hook registration are
//! never applied directly by a handler: they are collected as
//! [`actor::ActorContext`] operations and replayed by the loop itself after
//! the handler returns, so loop state is never touched concurrently with a
//! running handler.

#![cfg_attr(test, allow(clippy::unwrap_used, clippy::expect_used))]

pub mod actor;
pub mod farm;
pub mod group;
pub mod mailbox;
pub mod message;
pub mod monitoring;
pub mod prelude;
pub mod util;

pub use actor::{
    ActorContext, ActorHandle, ActorOptions, Behavior, DispatchFn, FarmHandler, FnFarmHandler,
    FnHandler, PlainHandler, Validator,
};
pub use farm::{FarmSender, FarmSpec, FarmerBehavior, WorkerFactory, DEFAULT_QUEUE_CAPACITY};
pub use group::{DbResp, DbValue, Group, GroupError};
pub use mailbox::{MailboxError, DEFAULT_MAILBOX_CAPACITY};
pub use message::{ChildDied, EndSentinel, Msg, Obit, WorkComplete};
pub use monitoring::{
    EventSeverity, InMemoryMonitor, Monitor, MonitoringConfig, MonitoringError, MonitoringEvent,
    MonitoringSnapshot, NoopMonitor, RuntimeEvent, RuntimeEventKind,
};
pub use util::{ActorId, FullName, LocalName};

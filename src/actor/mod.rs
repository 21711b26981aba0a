//! Actor core (§4): mailboxes, the behavior stack, and the single
//! select-loop that drives each actor from spawn to death.
//!
//! Each running actor is a `tokio::spawn`ed task owning a private `mbox`
//! (user messages), `cbox` (child/watcher bookkeeping) and `sbox` (status
//! reports from its own handler dispatches and death requests). External
//! callers only ever see an [`ActorHandle`]; the loop state itself
//! (`ActorLoop` in `env.rs`) is private.

pub(crate) mod behavior;
pub(crate) mod context;
pub(crate) mod control;
pub(crate) mod env;
pub(crate) mod handle;
pub(crate) mod options;
pub(crate) mod status;

pub use behavior::{Behavior, DispatchFn, FarmHandler, FnFarmHandler, FnHandler, PlainHandler};
pub use context::ActorContext;
pub use handle::{ActorHandle, Validator};
pub use options::ActorOptions;

pub(crate) use env::spawn_actor;

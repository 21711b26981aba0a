//! Convenient imports for building on top of the runtime.
//!
//! ```rust
//! use mailswarm::prelude::*;
//! ```

pub use crate::actor::{
    ActorContext, ActorHandle, ActorOptions, Behavior, DispatchFn, FarmHandler, FnFarmHandler,
    FnHandler, PlainHandler, Validator,
};
pub use crate::farm::{FarmSender, FarmSpec, FarmerBehavior, WorkerFactory};
pub use crate::group::{DbResp, DbValue, Group, GroupError};
pub use crate::mailbox::MailboxError;
pub use crate::message::{ChildDied, EndSentinel, Msg, Obit, WorkComplete};
pub use crate::monitoring::{EventSeverity, InMemoryMonitor, Monitor, MonitoringEvent, NoopMonitor};
pub use crate::util::{ActorId, FullName, LocalName};

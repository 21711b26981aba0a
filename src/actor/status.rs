//! The `sbox` status channel (§4.2): the spawned handler task reports back
//! here, and external callers deliver death requests here too.

// Layer 2: Third-party crate imports
use tokio::sync::mpsc;

// Layer 3: Internal module imports
use super::behavior::{Behavior, HandlerOp};
use crate::message::Msg;

pub(crate) type StatusSender = mpsc::Sender<StatusMsg>;
pub(crate) type StatusReceiver = mpsc::Receiver<StatusMsg>;

pub(crate) fn channel() -> (StatusSender, StatusReceiver) {
    // A handler invocation in flight plus at most one pending death
    // request is all the buffering this channel ever needs.
    mpsc::channel(4)
}

/// The message and the error string that faulted a handler invocation,
/// preserved so it can be relayed to the parent as `ChildDied` (§4.4).
pub(crate) struct FaultReport {
    pub error: String,
    pub message: Msg,
}

pub(crate) enum StatusMsg {
    /// A spawned handler invocation finished (or panicked). Carries the
    /// behavior back so the loop can resume ownership of it.
    ReceiveFinished {
        behavior: Behavior,
        ops: Vec<HandlerOp>,
        fault: Option<FaultReport>,
    },
    /// Requests a graceful shutdown (tombstone-driven drain).
    GracefulDeath,
    /// Requests immediate termination without draining.
    HardKill,
}

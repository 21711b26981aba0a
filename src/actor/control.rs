//! The `cbox` control channel (§4.2): child/watcher bookkeeping and
//! obituary routing. Kept separate from `mbox` so control traffic is
//! never queued behind user messages.

// Layer 1: Standard library imports
// (none)

// Layer 2: Third-party crate imports
use tokio::sync::{mpsc, oneshot};

// Layer 3: Internal module imports
use super::handle::{ActorHandle, WeakActorHandle};
use crate::message::Obit;
use crate::util::LocalName;

/// Default bounded capacity for the control and status channels (§5: "small
/// fixed capacities").
pub const CONTROL_CHANNEL_CAPACITY: usize = 16;

pub(crate) type ControlSender = mpsc::Sender<ControlMsg>;
pub(crate) type ControlReceiver = mpsc::Receiver<ControlMsg>;

pub(crate) fn channel() -> (ControlSender, ControlReceiver) {
    mpsc::channel(CONTROL_CHANNEL_CAPACITY)
}

pub(crate) enum ControlMsg {
    AddChild {
        name: LocalName,
        actor: ActorHandle,
        resp: oneshot::Sender<bool>,
    },
    RemoveChild {
        name: LocalName,
    },
    FindChild {
        name: LocalName,
        resp: oneshot::Sender<Option<ActorHandle>>,
    },
    GetChildren {
        resp: oneshot::Sender<Vec<(LocalName, ActorHandle)>>,
    },
    AddWatcher {
        watcher: WeakActorHandle,
    },
    RemoveWatcher {
        watcher_id: crate::util::ActorId,
    },
    /// A monitored child (or any monitored actor) has died.
    ChildObit(Obit),
}

//! The actor's external address (§4.1): the only thing most callers ever
//! hold. Cloning is cheap (an `Arc` bump); every clone addresses the same
//! mailbox.

// Layer 1: Standard library imports
use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::{Arc, Weak};

// Layer 2: Third-party crate imports
use tokio::sync::oneshot;

// Layer 3: Internal module imports
use super::control::{ControlMsg, ControlSender};
use super::status::{StatusMsg, StatusSender};
use crate::mailbox::MailboxSender;
use crate::message::{MailboxEntry, Msg};
use crate::util::{ActorId, FullName};

/// A validator runs on the sender's task before a message is enqueued
/// (§4.1). Rejecting a message never panics the sender; it's reported to
/// the monitoring sink and silently dropped.
pub type Validator = Arc<dyn Fn(&Msg) -> bool + Send + Sync>;

pub(crate) struct ActorHandleInner {
    pub id: ActorId,
    pub full_name: FullName,
    pub mbox: MailboxSender,
    pub cbox: ControlSender,
    pub sbox: StatusSender,
    pub validator: Option<Validator>,
}

/// An actor's address: send to it, monitor it, ask it to die. Never gives
/// access to its state directly — all interaction goes through messages
/// or the handful of control operations below (§4.1).
#[derive(Clone)]
pub struct ActorHandle(pub(crate) Arc<ActorHandleInner>);

impl ActorHandle {
    pub(crate) fn new(
        id: ActorId,
        full_name: FullName,
        mbox: MailboxSender,
        cbox: ControlSender,
        sbox: StatusSender,
        validator: Option<Validator>,
    ) -> Self {
        Self(Arc::new(ActorHandleInner {
            id,
            full_name,
            mbox,
            cbox,
            sbox,
            validator,
        }))
    }

    pub fn id(&self) -> ActorId {
        self.0.id
    }

    pub fn full_name(&self) -> &FullName {
        &self.0.full_name
    }

    /// Non-blocking deposit (§4.1). Runs the validator synchronously on
    /// the caller's task, then fires a detached task to push past a full
    /// mailbox's backpressure without ever blocking the caller.
    pub fn send(&self, msg: Msg) {
        if let Some(validator) = &self.0.validator {
            if !validator(&msg) {
                return;
            }
        }
        let mbox = self.0.mbox.clone();
        tokio::spawn(async move {
            let _ = mbox.send(MailboxEntry::User(msg)).await;
        });
    }

    /// Waits until the message is actually enqueued (or the mailbox is
    /// gone). Callers must never await this from inside the target's own
    /// handler: with a full mailbox and no other task draining it, this
    /// deadlocks (§4.1, §7).
    pub async fn send_blocking(&self, msg: Msg) -> bool {
        if let Some(validator) = &self.0.validator {
            if !validator(&msg) {
                return false;
            }
        }
        self.0.mbox.send(MailboxEntry::User(msg)).await.is_ok()
    }

    /// Looks up a direct child by local name and sends to it (§6).
    pub async fn send_by_name(&self, name: &str, msg: Msg) -> bool {
        match self.find_child(name).await {
            Some(child) => {
                child.send(msg);
                true
            }
            None => false,
        }
    }

    pub(crate) async fn find_child(&self, name: &str) -> Option<ActorHandle> {
        let (resp, rx) = oneshot::channel();
        self.0
            .cbox
            .send(ControlMsg::FindChild {
                name: name.to_string(),
                resp,
            })
            .await
            .ok()?;
        rx.await.ok().flatten()
    }

    pub(crate) async fn children(&self) -> Vec<(String, ActorHandle)> {
        let (resp, rx) = oneshot::channel();
        if self
            .0
            .cbox
            .send(ControlMsg::GetChildren { resp })
            .await
            .is_err()
        {
            return Vec::new();
        }
        rx.await.unwrap_or_default()
    }

    /// Registers `self` as a watcher of `other`: when `other` dies, `self`
    /// receives an `Obit` (§4.4).
    pub fn monitor(&self, other: &ActorHandle) {
        let watcher = self.downgrade();
        let cbox = other.0.cbox.clone();
        tokio::spawn(async move {
            let _ = cbox.send(ControlMsg::AddWatcher { watcher }).await;
        });
    }

    pub fn unmonitor(&self, other: &ActorHandle) {
        let watcher_id = self.id();
        let cbox = other.0.cbox.clone();
        tokio::spawn(async move {
            let _ = cbox.send(ControlMsg::RemoveWatcher { watcher_id }).await;
        });
    }

    /// Requests a graceful shutdown: the actor finishes its current
    /// handler invocation, drains its mailbox, and kills its children
    /// before terminating (§4.5).
    pub fn die(&self) {
        let sbox = self.0.sbox.clone();
        tokio::spawn(async move {
            let _ = sbox.send(StatusMsg::GracefulDeath).await;
        });
    }

    pub(crate) fn downgrade(&self) -> WeakActorHandle {
        WeakActorHandle(Arc::downgrade(&self.0))
    }
}

impl fmt::Debug for ActorHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ActorHandle")
            .field("id", &self.0.id)
            .field("full_name", &self.0.full_name)
            .finish()
    }
}

impl PartialEq for ActorHandle {
    fn eq(&self, other: &Self) -> bool {
        self.0.id == other.0.id
    }
}
impl Eq for ActorHandle {}

impl Hash for ActorHandle {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.0.id.hash(state);
    }
}

/// A non-owning reference to an actor, used for watcher lists so that
/// monitoring relationships never keep a dead actor's resources alive
/// (§4.4: monitoring is advisory, not a strong reference).
#[derive(Clone)]
pub(crate) struct WeakActorHandle(Weak<ActorHandleInner>);

impl WeakActorHandle {
    pub fn upgrade(&self) -> Option<ActorHandle> {
        self.0.upgrade().map(ActorHandle)
    }

    pub fn id(&self) -> Option<ActorId> {
        self.0.upgrade().map(|inner| inner.id)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::actor::control::channel as control_channel;
    use crate::actor::status::channel as status_channel;
    use crate::mailbox::channel as mailbox_channel;

    fn test_handle(name: &str) -> ActorHandle {
        let (mbox, _rx) = mailbox_channel(4);
        let (cbox, _crx) = control_channel();
        let (sbox, _srx) = status_channel();
        ActorHandle::new(
            ActorId::new(),
            FullName::root(name),
            mbox,
            cbox,
            sbox,
            None,
        )
    }

    #[test]
    fn clones_compare_equal_by_id() {
        let h = test_handle("a");
        let clone = h.clone();
        assert_eq!(h, clone);
    }

    #[test]
    fn distinct_actors_are_unequal() {
        assert_ne!(test_handle("a"), test_handle("b"));
    }

    #[tokio::test]
    async fn send_respects_validator_rejection() {
        let (mbox, mut rx) = mailbox_channel(4);
        let (cbox, _crx) = control_channel();
        let (sbox, _srx) = status_channel();
        let validator: Validator = Arc::new(|_msg: &Msg| false);
        let handle = ActorHandle::new(
            ActorId::new(),
            FullName::root("rejecting"),
            mbox,
            cbox,
            sbox,
            Some(validator),
        );
        handle.send(Msg::of(42_i32));
        let outcome = tokio::time::timeout(std::time::Duration::from_millis(50), rx.recv()).await;
        assert!(outcome.is_err(), "validator should have dropped the message");
    }
}

//! The bounded `mbox` channel user messages travel through (§5).
//!
//! A plain wrapper over `tokio::mpsc` sized at [`DEFAULT_MAILBOX_CAPACITY`]
//! unless an actor's options override it. Kept deliberately thin: the
//! actor loop is the only reader, and it alone decides how entries are
//! interpreted (user message vs. tombstone).

// Layer 1: Standard library imports
// (none)

// Layer 2: Third-party crate imports
use tokio::sync::mpsc;

// Layer 3: Internal module imports
use super::error::MailboxError;
use crate::message::MailboxEntry;

/// Default bounded capacity for a new actor's mailbox (§5).
pub const DEFAULT_MAILBOX_CAPACITY: usize = 35;

/// Receiving half of a mailbox. Owned exclusively by the actor loop.
pub(crate) struct MailboxReceiver {
    inner: mpsc::Receiver<MailboxEntry>,
}

/// Sending half of a mailbox. Cheaply cloneable; shared by every caller
/// holding an [`ActorHandle`](crate::actor::ActorHandle).
#[derive(Clone)]
pub(crate) struct MailboxSender {
    inner: mpsc::Sender<MailboxEntry>,
    capacity: usize,
}

/// Create a new bounded mailbox pair.
pub(crate) fn channel(capacity: usize) -> (MailboxSender, MailboxReceiver) {
    let (tx, rx) = mpsc::channel(capacity);
    (
        MailboxSender {
            inner: tx,
            capacity,
        },
        MailboxReceiver { inner: rx },
    )
}

impl MailboxSender {
    /// Non-blocking enqueue. Used by `ActorHandle::send`, which spawns this
    /// call on its own task so the caller never blocks (§4.1).
    pub fn try_send(&self, entry: MailboxEntry) -> Result<(), MailboxError> {
        self.inner.try_send(entry).map_err(|err| match err {
            mpsc::error::TrySendError::Full(_) => MailboxError::Full {
                capacity: self.capacity,
            },
            mpsc::error::TrySendError::Closed(_) => MailboxError::Closed,
        })
    }

    /// Blocking enqueue: waits for room in the mailbox. Backs
    /// `ActorHandle::send_blocking` (§4.1, deadlock hazard documented there).
    pub async fn send(&self, entry: MailboxEntry) -> Result<(), MailboxError> {
        self.inner.send(entry).await.map_err(|_| MailboxError::Closed)
    }
}

impl MailboxReceiver {
    pub async fn recv(&mut self) -> Option<MailboxEntry> {
        self.inner.recv().await
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::message::Msg;

    #[tokio::test]
    async fn send_then_recv_preserves_order() {
        let (tx, mut rx) = channel(4);
        tx.try_send(MailboxEntry::User(Msg::of(1_i32))).unwrap();
        tx.try_send(MailboxEntry::User(Msg::of(2_i32))).unwrap();

        let first = rx.recv().await.unwrap();
        let MailboxEntry::User(m) = first else {
            panic!("expected user message");
        };
        assert_eq!(m.get::<i32>(0), Some(&1));
    }

    #[tokio::test]
    async fn try_send_reports_full() {
        let (tx, _rx) = channel(1);
        tx.try_send(MailboxEntry::User(Msg::of(1_i32))).unwrap();
        let err = tx.try_send(MailboxEntry::User(Msg::of(2_i32))).unwrap_err();
        assert!(matches!(err, MailboxError::Full { capacity: 1 }));
    }

    #[tokio::test]
    async fn closed_receiver_reports_closed() {
        let (tx, rx) = channel(1);
        drop(rx);
        let err = tx.try_send(MailboxEntry::User(Msg::of(1_i32))).unwrap_err();
        assert!(matches!(err, MailboxError::Closed));
    }
}

//! The wire format of the `mbox` channel itself.
//!
//! User messages and the tombstone marker (§4.2) ride the same tokio
//! channel so the tombstone is observed in strict FIFO order relative to
//! every message enqueued before it.

// Layer 3: Internal module imports
use super::msg::Msg;

/// An entry in an actor's mailbox queue.
pub(crate) enum MailboxEntry {
    /// An ordinary user message.
    User(Msg),
    /// The marker an actor sends to its own mailbox when it begins
    /// graceful death, guaranteeing every message queued before it is
    /// drained first (§4.2).
    Tombstone,
}

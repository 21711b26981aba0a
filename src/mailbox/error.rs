//! Mailbox error types.

// Layer 2: Third-party crate imports
use thiserror::Error;

/// Errors produced by the mailbox send surface.
///
/// Per §7, these never cross the actor-handle boundary: `ActorHandle::send`
/// swallows them into a silent no-op plus a diagnostic monitoring event.
/// They exist so internal call sites (the actor loop, the farm coordinator,
/// the group registry) can tell a full mailbox from a dead one.
#[derive(Debug, Error)]
pub enum MailboxError {
    /// The bounded channel is at capacity; a blocking sender should retry,
    /// a non-blocking one should drop the message.
    #[error("mailbox is full (capacity: {capacity})")]
    Full { capacity: usize },

    /// The receiving actor's loop has already terminated.
    #[error("mailbox is closed")]
    Closed,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn full_display_includes_capacity() {
        let err = MailboxError::Full { capacity: 35 };
        assert!(err.to_string().contains("35"));
    }

    #[test]
    fn closed_display() {
        assert_eq!(MailboxError::Closed.to_string(), "mailbox is closed");
    }
}

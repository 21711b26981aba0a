//! Errors surfaced by the group facade itself, as distinct from
//! [`crate::mailbox::MailboxError`] (per-actor) and panics inside handlers
//! (reported as `ChildDied`, never as a `Result`) (§7).

// Layer 2: Third-party crate imports
use thiserror::Error;

#[derive(Debug, Error)]
pub enum GroupError {
    /// `spawn_named` was given a local name already in use among the
    /// guardian's direct children.
    #[error("an actor named {0:?} already exists at this level")]
    NameInUse(String),

    /// The group's guardian has already been asked to shut down.
    #[error("the group is shutting down and no longer accepts new actors")]
    ShuttingDown,
}

impl GroupError {
    /// Matches the `is_transient`/`is_fatal` helper convention used
    /// throughout the crate's error types (§7): a name collision is the
    /// caller's to retry with a different name, shutdown is not.
    pub fn is_transient(&self) -> bool {
        matches!(self, GroupError::NameInUse(_))
    }

    pub fn is_fatal(&self) -> bool {
        matches!(self, GroupError::ShuttingDown)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn name_in_use_is_transient() {
        assert!(GroupError::NameInUse("x".into()).is_transient());
        assert!(!GroupError::NameInUse("x".into()).is_fatal());
    }

    #[test]
    fn shutting_down_is_fatal() {
        assert!(GroupError::ShuttingDown.is_fatal());
        assert!(!GroupError::ShuttingDown.is_transient());
    }
}

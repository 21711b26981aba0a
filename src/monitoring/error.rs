//! Failure modes a `Monitor` can hit.

use thiserror::Error;

/// Which operation was in flight when a monitor failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MonitorOp {
    Record,
    Snapshot,
    Reset,
}

impl std::fmt::Display for MonitorOp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            MonitorOp::Record => "record",
            MonitorOp::Snapshot => "snapshot",
            MonitorOp::Reset => "reset",
        };
        write!(f, "{name}")
    }
}

/// The only way an `InMemoryMonitor` actually fails: a panic inside
/// another holder of the history lock poisoned it while this op was
/// waiting on it. `NoopMonitor` never returns this.
#[derive(Debug, Error)]
pub enum MonitoringError {
    #[error("{op} failed: history lock poisoned ({detail})")]
    LockPoisoned { op: MonitorOp, detail: String },
}

impl MonitoringError {
    pub fn lock_poisoned(op: MonitorOp, detail: impl Into<String>) -> Self {
        Self::LockPoisoned {
            op,
            detail: detail.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lock_poisoned_message_names_the_operation() {
        let error = MonitoringError::lock_poisoned(MonitorOp::Record, "writer panicked");
        assert!(error.to_string().contains("record failed"));
        assert!(error.to_string().contains("writer panicked"));
    }

    #[test]
    fn op_display_matches_lowercase_verb() {
        assert_eq!(MonitorOp::Snapshot.to_string(), "snapshot");
        assert_eq!(MonitorOp::Reset.to_string(), "reset");
    }
}

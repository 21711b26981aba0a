//! Monitoring event types and configuration structures.

use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::Serialize;

use super::traits::{EventSeverity, MonitoringEvent};
use crate::util::ActorId;

/// `snapshot_interval` serializes as whole seconds rather than pulling in
/// a full duration-serde crate for the one field that needs it.
mod snapshot_interval_secs {
    use super::Duration;
    use serde::{Serialize, Serializer};

    pub fn serialize<S>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        duration.as_secs().serialize(serializer)
    }
}

/// Configuration for monitoring behavior.
///
/// Controls how events are recorded, filtered, and stored in the monitor.
#[derive(Debug, Clone, Serialize)]
pub struct MonitoringConfig {
    /// Whether monitoring is enabled
    pub enabled: bool,

    /// Maximum number of events to keep in history
    pub max_history_size: usize,

    /// Minimum severity level to record (events below this are filtered)
    pub severity_filter: EventSeverity,

    /// Minimum severity an event needs to be retained in the ring buffer.
    /// Routine lifecycle chatter (`ActorSpawned`, `ActorDied`) is counted
    /// but not kept around; a snapshot's `recent_events` is a window onto
    /// what actually needs attention, not a tail of everything.
    pub history_severity: EventSeverity,

    /// Interval for snapshot generation (if using background snapshots)
    #[serde(serialize_with = "snapshot_interval_secs::serialize")]
    pub snapshot_interval: Duration,
}

impl Default for MonitoringConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            max_history_size: 1000,
            severity_filter: EventSeverity::Info,
            history_severity: EventSeverity::Warning,
            snapshot_interval: Duration::from_secs(60),
        }
    }
}

/// Snapshot of monitoring state at a point in time.
///
/// Provides queryable access to monitoring counters and recent event history.
#[derive(Debug, Clone, Serialize)]
pub struct MonitoringSnapshot<E: MonitoringEvent> {
    /// Timestamp when snapshot was taken
    pub timestamp: DateTime<Utc>,

    /// Total number of events recorded
    pub total_events: u64,

    /// Number of trace-level events
    pub trace_count: u64,

    /// Number of debug-level events
    pub debug_count: u64,

    /// Number of info-level events
    pub info_count: u64,

    /// Number of warning-level events
    pub warning_count: u64,

    /// Number of error-level events
    pub error_count: u64,

    /// Number of critical-level events
    pub critical_count: u64,

    /// Recent events (up to max_history_size)
    pub recent_events: Vec<E>,
}

impl<E: MonitoringEvent> MonitoringSnapshot<E> {
    /// An all-zero snapshot taken "now" — what a monitor that has never
    /// observed anything should hand back.
    pub fn empty() -> Self {
        Self {
            timestamp: Utc::now(),
            total_events: 0,
            trace_count: 0,
            debug_count: 0,
            info_count: 0,
            warning_count: 0,
            error_count: 0,
            critical_count: 0,
            recent_events: Vec::new(),
        }
    }
}

/// Diagnostic events the runtime itself emits (§4.2, §4.4, §4.6): never
/// load-bearing for correctness, always best-effort to record.
#[derive(Debug, Clone, Serialize)]
pub struct RuntimeEvent {
    /// Timestamp when event occurred
    pub timestamp: DateTime<Utc>,

    /// The actor this event concerns, when there is a single obvious one
    pub actor_id: Option<ActorId>,

    /// Specific event type
    pub event_kind: RuntimeEventKind,
}

impl MonitoringEvent for RuntimeEvent {
    const EVENT_TYPE: &'static str = "runtime";

    fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }

    fn severity(&self) -> EventSeverity {
        match &self.event_kind {
            RuntimeEventKind::ActorSpawned { .. } => EventSeverity::Debug,
            RuntimeEventKind::ActorDied { .. } => EventSeverity::Info,
            RuntimeEventKind::HandlerFaulted { .. } => EventSeverity::Error,
            RuntimeEventKind::ObitDropped => EventSeverity::Warning,
            RuntimeEventKind::ValidatorRejected => EventSeverity::Trace,
            RuntimeEventKind::MailboxFull { .. } => EventSeverity::Warning,
            RuntimeEventKind::FarmCompleted { .. } => EventSeverity::Info,
        }
    }
}

/// Specific kinds of runtime diagnostic events.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type")]
pub enum RuntimeEventKind {
    /// An actor was spawned, with its full name for correlation.
    ActorSpawned { full_name: String },

    /// An actor reached the dead state.
    ActorDied { full_name: String },

    /// A handler invocation panicked; the message and panic payload were
    /// reported to the parent as `ChildDied`, this is purely diagnostic.
    HandlerFaulted { full_name: String, error: String },

    /// An obituary arrived for a watcher with neither forwarding nor a
    /// hook installed, so it was silently discarded.
    ObitDropped,

    /// A message was rejected by a validator before being enqueued.
    ValidatorRejected,

    /// A non-blocking send found the mailbox at capacity and dropped the
    /// message.
    MailboxFull { capacity: usize },

    /// A farm finished distributing work and sent `WorkComplete`.
    FarmCompleted { worker_count: usize },
}

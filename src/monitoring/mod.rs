//! # Monitoring Module
//!
//! Universal monitoring infrastructure for observing and tracking events across all runtime components.
//!
//! ## Features
//! - **Generic Monitor<E> Trait**: Universal monitoring for any entity type
//! - **Zero-Cost Abstraction**: NoopMonitor compiles away when disabled
//! - **Lock-Free Recording**: Atomic counters for concurrent event tracking
//! - **Type Safety**: MonitoringEvent trait ensures compile-time correctness
//!
//! ## Event Types
//! - `RuntimeEvent`: actor lifecycle, faults, and farm diagnostics, tagged
//!   by [`RuntimeEventKind`]
//!
//! ## Examples
//! ```rust,ignore
//! use mailswarm::monitoring::{InMemoryMonitor, MonitoringConfig, RuntimeEvent};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = MonitoringConfig::default();
//! let monitor = InMemoryMonitor::<RuntimeEvent>::new(config);
//!
//! // monitor.record(event).await?;
//! // let snapshot = monitor.snapshot().await?;
//! # Ok(())
//! # }
//! ```

pub mod error;
pub mod in_memory;
pub mod noop;
pub mod traits;
pub mod types;

pub use error::{MonitorOp, MonitoringError};
pub use in_memory::InMemoryMonitor;
pub use noop::NoopMonitor;
pub use traits::{EventSeverity, Monitor, MonitoringEvent};
pub use types::{MonitoringConfig, MonitoringSnapshot, RuntimeEvent, RuntimeEventKind};

//! Wires an `InMemoryMonitor<RuntimeEvent>` around a handler explicitly,
//! the pattern `group::GroupHandle` and `actor::env` leave to application
//! code rather than hard-wiring into the actor loop (see the monitoring
//! scope decision in `DESIGN.md`).

use std::sync::Arc;

use mailswarm::monitoring::{
    EventSeverity, InMemoryMonitor, Monitor, MonitoringConfig, RuntimeEvent, RuntimeEventKind,
};
use mailswarm::prelude::*;

#[tokio::main]
async fn main() {
    // Spawn/death chatter is Debug/Info severity; widen both thresholds
    // past the defaults (Info/Warning) so this demo actually has something
    // to print instead of silently filtering its only event.
    let config = MonitoringConfig {
        severity_filter: EventSeverity::Trace,
        history_severity: EventSeverity::Trace,
        ..MonitoringConfig::default()
    };
    let monitor = Arc::new(InMemoryMonitor::<RuntimeEvent>::new(config));

    let group = Group::new("root").await;

    let record_monitor = monitor.clone();
    let behavior = Behavior::from_fn(move |msg: &mut Msg, ctx: &mut ActorContext| {
        let full_name = ctx.handle().full_name().to_string();
        let monitor = record_monitor.clone();
        let spawned = msg.get::<()>(0).is_some();
        async move {
            let kind = if spawned {
                RuntimeEventKind::ActorSpawned { full_name }
            } else {
                RuntimeEventKind::ActorDied { full_name }
            };
            let _ = monitor
                .record(RuntimeEvent {
                    timestamp: chrono::Utc::now(),
                    actor_id: None,
                    event_kind: kind,
                })
                .await;
        }
    });

    let actor = group.spawn(behavior).await.expect("spawn");
    actor.send_blocking(Msg::of(())).await;
    group.graceful_active_shutdown().await;

    let snapshot = monitor.snapshot().await.expect("snapshot");
    println!("recorded {} events", snapshot.total_events);
}

//! The group's membership registry: a single-owner task mapping full
//! names to handles (§4.7's "single-owner, serialized" discipline applied
//! to lookup rather than storage — mirrors the original's `manageMembers`
//! goroutine).

// Layer 1: Standard library imports
use std::collections::HashMap;

// Layer 2: Third-party crate imports
use tokio::sync::{mpsc, oneshot};

// Layer 3: Internal module imports
use crate::actor::ActorHandle;
use crate::util::FullName;

enum RegistryMsg {
    Register(FullName, ActorHandle),
    Deregister(FullName),
    Find(FullName, oneshot::Sender<Option<ActorHandle>>),
    Len(oneshot::Sender<usize>),
    /// Tells the task to stop; the ack fires only once it has actually
    /// returned, mirroring the original's `uniqueStringCh`/`memberCh`
    /// rendezvous in `GracefulPassiveShutdown` (§4.5).
    Shutdown(oneshot::Sender<()>),
}

#[derive(Clone)]
pub(crate) struct RegistryHandle {
    tx: mpsc::Sender<RegistryMsg>,
}

pub(crate) fn spawn() -> RegistryHandle {
    let (tx, mut rx) = mpsc::channel::<RegistryMsg>(256);
    tokio::spawn(async move {
        let mut members: HashMap<FullName, ActorHandle> = HashMap::new();
        let mut shutdown_ack = None;
        while let Some(msg) = rx.recv().await {
            match msg {
                RegistryMsg::Register(name, handle) => {
                    members.insert(name, handle);
                }
                RegistryMsg::Deregister(name) => {
                    members.remove(&name);
                }
                RegistryMsg::Find(name, resp) => {
                    let _ = resp.send(members.get(&name).cloned());
                }
                RegistryMsg::Len(resp) => {
                    let _ = resp.send(members.len());
                }
                RegistryMsg::Shutdown(ack) => {
                    shutdown_ack = Some(ack);
                    break;
                }
            }
        }
        if let Some(ack) = shutdown_ack {
            let _ = ack.send(());
        }
    });
    RegistryHandle { tx }
}

impl RegistryHandle {
    pub async fn register(&self, name: FullName, handle: ActorHandle) {
        let _ = self.tx.send(RegistryMsg::Register(name, handle)).await;
    }

    pub async fn deregister(&self, name: &FullName) {
        let _ = self.tx.send(RegistryMsg::Deregister(name.clone())).await;
    }

    pub async fn find(&self, name: &FullName) -> Option<ActorHandle> {
        let (resp, rx) = oneshot::channel();
        self.tx.send(RegistryMsg::Find(name.clone(), resp)).await.ok()?;
        rx.await.ok().flatten()
    }

    #[allow(dead_code)]
    pub async fn len(&self) -> usize {
        let (resp, rx) = oneshot::channel();
        if self.tx.send(RegistryMsg::Len(resp)).await.is_err() {
            return 0;
        }
        rx.await.unwrap_or(0)
    }

    /// Stops the task and waits for it to actually exit (§4.5). A second
    /// call is a harmless no-op: the channel is already closed, so the
    /// send fails and we return immediately.
    pub async fn close(&self) {
        let (ack, rx) = oneshot::channel();
        if self.tx.send(RegistryMsg::Shutdown(ack)).await.is_err() {
            return;
        }
        let _ = rx.await;
    }

    /// True once the task has exited: the `mpsc::Receiver` it owned is
    /// dropped the instant it returns, which flips every sender's
    /// `is_closed()` regardless of how many clones of this handle exist.
    pub fn is_closed(&self) -> bool {
        self.tx.is_closed()
    }
}

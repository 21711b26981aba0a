//! Unique local-name generation (§4.8): a single-owner counter task, one
//! per prefix, mirroring the original's `stringgenerator` goroutine.

// Layer 1: Standard library imports
use std::collections::HashMap;

// Layer 2: Third-party crate imports
use tokio::sync::{mpsc, oneshot};

// Layer 3: Internal module imports
use crate::util::LocalName;

enum NameGenMsg {
    Next(String, oneshot::Sender<LocalName>),
    /// Mirrors the original's `stringControl <- true` / `<-uniqueStringCh`
    /// rendezvous: the ack only fires once the loop has actually exited.
    Shutdown(oneshot::Sender<()>),
}

#[derive(Clone)]
pub(crate) struct NameGenHandle {
    tx: mpsc::Sender<NameGenMsg>,
}

pub(crate) fn spawn() -> NameGenHandle {
    let (tx, mut rx) = mpsc::channel::<NameGenMsg>(64);
    tokio::spawn(async move {
        let mut counters: HashMap<String, u64> = HashMap::new();
        let mut shutdown_ack = None;
        while let Some(msg) = rx.recv().await {
            match msg {
                NameGenMsg::Next(prefix, resp) => {
                    let counter = counters.entry(prefix.clone()).or_insert(0);
                    let name = format!("{prefix}-{counter}");
                    *counter += 1;
                    let _ = resp.send(name);
                }
                NameGenMsg::Shutdown(ack) => {
                    shutdown_ack = Some(ack);
                    break;
                }
            }
        }
        if let Some(ack) = shutdown_ack {
            let _ = ack.send(());
        }
    });
    NameGenHandle { tx }
}

impl NameGenHandle {
    pub async fn next(&self, prefix: &str) -> LocalName {
        let (resp, rx) = oneshot::channel();
        if self
            .tx
            .send(NameGenMsg::Next(prefix.to_string(), resp))
            .await
            .is_err()
        {
            return prefix.to_string();
        }
        rx.await.unwrap_or_else(|_| prefix.to_string())
    }

    pub async fn close(&self) {
        let (ack, rx) = oneshot::channel();
        if self.tx.send(NameGenMsg::Shutdown(ack)).await.is_err() {
            return;
        }
        let _ = rx.await;
    }

    pub fn is_closed(&self) -> bool {
        self.tx.is_closed()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn names_increment_per_prefix() {
        let gen = spawn();
        assert_eq!(gen.next("actor").await, "actor-0");
        assert_eq!(gen.next("actor").await, "actor-1");
        assert_eq!(gen.next("worker").await, "worker-0");
    }
}

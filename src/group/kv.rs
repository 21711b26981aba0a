//! The group key/value store (§4.7): a single-owner task holding an
//! immutable (`im`) hash map, serializing every read and write through one
//! channel so mutations are linearized without locks — mirrors the
//! original's `manageDB` goroutine and its monotonic `dbCounter`.

// Layer 2: Third-party crate imports
use tokio::sync::{mpsc, oneshot};

/// A stored value. Left as an opaque JSON value rather than `Box<dyn Any>`
/// so it can cross actor and (eventually) process boundaries uniformly,
/// and so callers can store structured data without a downcast dance.
pub type DbValue = serde_json::Value;

/// The result of any KV operation: the key it concerned, the binding left
/// in place afterward (`None` if absent), and the store's tick at that
/// moment — a linearization witness shared by every writer (§4.7, §8
/// property 7).
#[derive(Debug, Clone, PartialEq)]
pub struct DbResp {
    pub key: String,
    pub value: Option<DbValue>,
    pub tick: u64,
}

enum KvMsg {
    Get(String, oneshot::Sender<DbResp>),
    Set(String, DbValue, oneshot::Sender<DbResp>),
    /// Inserts only if absent; the tick only advances when it did.
    Insert(String, DbValue, oneshot::Sender<DbResp>),
    /// `f(current)` returns `(new_value, should_update)`; the tick only
    /// advances when `should_update` is true.
    Mutate(
        String,
        Box<dyn FnOnce(Option<DbValue>) -> (DbValue, bool) + Send>,
        oneshot::Sender<DbResp>,
    ),
    /// Mirrors the original's `dbReq <- sHappyDeath{}` followed by the
    /// overall `ewg.Wait()`: the ack only fires once the loop has
    /// actually exited.
    Shutdown(oneshot::Sender<()>),
}

#[derive(Clone)]
pub(crate) struct KvHandle {
    tx: mpsc::Sender<KvMsg>,
}

pub(crate) fn spawn() -> KvHandle {
    let (tx, mut rx) = mpsc::channel::<KvMsg>(256);
    tokio::spawn(async move {
        let mut store: im::HashMap<String, DbValue> = im::HashMap::new();
        let mut tick: u64 = 0;
        let mut shutdown_ack = None;
        while let Some(msg) = rx.recv().await {
            match msg {
                KvMsg::Get(key, resp) => {
                    let value = store.get(&key).cloned();
                    let _ = resp.send(DbResp { key, value, tick });
                }
                KvMsg::Set(key, value, resp) => {
                    store.insert(key.clone(), value.clone());
                    tick += 1;
                    let _ = resp.send(DbResp {
                        key,
                        value: Some(value),
                        tick,
                    });
                }
                KvMsg::Insert(key, value, resp) => {
                    let existing = store.get(&key).cloned();
                    let reply = match existing {
                        Some(prior) => DbResp {
                            key,
                            value: Some(prior),
                            tick,
                        },
                        None => {
                            store.insert(key.clone(), value.clone());
                            tick += 1;
                            DbResp {
                                key,
                                value: Some(value),
                                tick,
                            }
                        }
                    };
                    let _ = resp.send(reply);
                }
                KvMsg::Mutate(key, f, resp) => {
                    let current = store.get(&key).cloned();
                    let (next, should_update) = f(current.clone());
                    let reply = if should_update {
                        store.insert(key.clone(), next.clone());
                        tick += 1;
                        DbResp {
                            key,
                            value: Some(next),
                            tick,
                        }
                    } else {
                        DbResp {
                            key,
                            value: current,
                            tick,
                        }
                    };
                    let _ = resp.send(reply);
                }
                KvMsg::Shutdown(ack) => {
                    shutdown_ack = Some(ack);
                    break;
                }
            }
        }
        if let Some(ack) = shutdown_ack {
            let _ = ack.send(());
        }
    });
    KvHandle { tx }
}

impl KvHandle {
    pub async fn get(&self, key: String) -> DbResp {
        let (resp, rx) = oneshot::channel();
        match self.tx.send(KvMsg::Get(key.clone(), resp)).await {
            Ok(()) => rx.await.unwrap_or(DbResp { key, value: None, tick: 0 }),
            Err(_) => DbResp { key, value: None, tick: 0 },
        }
    }

    pub async fn set(&self, key: String, value: DbValue) -> DbResp {
        let (resp, rx) = oneshot::channel();
        match self.tx.send(KvMsg::Set(key.clone(), value, resp)).await {
            Ok(()) => rx.await.unwrap_or(DbResp { key, value: None, tick: 0 }),
            Err(_) => DbResp { key, value: None, tick: 0 },
        }
    }

    pub async fn insert(&self, key: String, value: DbValue) -> DbResp {
        let (resp, rx) = oneshot::channel();
        match self.tx.send(KvMsg::Insert(key.clone(), value, resp)).await {
            Ok(()) => rx.await.unwrap_or(DbResp { key, value: None, tick: 0 }),
            Err(_) => DbResp { key, value: None, tick: 0 },
        }
    }

    pub async fn mutate<F>(&self, key: String, f: F) -> DbResp
    where
        F: FnOnce(Option<DbValue>) -> (DbValue, bool) + Send + 'static,
    {
        let (resp, rx) = oneshot::channel();
        if self
            .tx
            .send(KvMsg::Mutate(key.clone(), Box::new(f), resp))
            .await
            .is_err()
        {
            return DbResp { key, value: None, tick: 0 };
        }
        rx.await.unwrap_or(DbResp { key, value: None, tick: 0 })
    }

    pub async fn close(&self) {
        let (ack, rx) = oneshot::channel();
        if self.tx.send(KvMsg::Shutdown(ack)).await.is_err() {
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
    use serde_json::json;

    #[tokio::test]
    async fn set_then_get_roundtrips() {
        let kv = spawn();
        kv.set("a".into(), json!(1)).await;
        assert_eq!(kv.get("a".into()).await.value, Some(json!(1)));
    }

    #[tokio::test]
    async fn insert_only_succeeds_once() {
        let kv = spawn();
        let first = kv.insert("k".into(), json!("first")).await;
        assert_eq!(first.value, Some(json!("first")));
        assert_eq!(first.tick, 1);

        let second = kv.insert("k".into(), json!("second")).await;
        assert_eq!(second.value, Some(json!("first")));
        assert_eq!(second.tick, 1);
    }

    #[tokio::test]
    async fn mutate_sees_prior_value_and_advances_tick() {
        let kv = spawn();
        kv.set("n".into(), json!(1)).await;
        let updated = kv
            .mutate("n".into(), |current| {
                let n = current.and_then(|v| v.as_i64()).unwrap_or(0);
                (json!(n + 1), true)
            })
            .await;
        assert_eq!(updated.value, Some(json!(2)));
        assert_eq!(updated.tick, 2);
    }

    #[tokio::test]
    async fn mutate_declining_update_leaves_tick_unchanged() {
        let kv = spawn();
        kv.set("actor".into(), json!("model")).await;
        let result = kv.mutate("actor".into(), |_current| (json!(""), false)).await;
        assert_eq!(result.value, Some(json!("model")));
        assert_eq!(result.tick, 1);
    }

    #[tokio::test]
    async fn mutate_on_absent_key_sees_none() {
        let kv = spawn();
        let updated = kv
            .mutate("missing".into(), |current| (json!(current.is_none()), true))
            .await;
        assert_eq!(updated.value, Some(json!(true)));
    }
}

//! S4: the group KV store's get/set/insert/mutate contract, including the
//! tick as a linearization witness and a declined `mutate` leaving both
//! the value and the tick untouched.

use mailswarm::prelude::*;
use serde_json::json;

#[tokio::test]
async fn kv_store_tracks_ticks_across_writers() {
    let group = Group::new("root").await;

    let missing = group.db_get("donut").await;
    assert_eq!(missing.value, None);

    let apple = group.db_set("apple", json!("doctor")).await;
    assert_eq!(apple.value, Some(json!("doctor")));
    assert_eq!(apple.tick, 1);

    let actor = group.db_set("actor", json!("model")).await;
    assert_eq!(actor.value, Some(json!("model")));
    assert_eq!(actor.tick, 2);

    let mutated = group
        .db_mutate("apple", |current| {
            let current = current.and_then(|v| v.as_str().map(str::to_string));
            match current.as_deref() {
                Some("doctor") => (json!("Doctor Who"), true),
                _ => (json!(current), false),
            }
        })
        .await;
    assert_eq!(mutated.value, Some(json!("Doctor Who")));
    assert_eq!(mutated.tick, 3);

    let declined = group
        .db_mutate("actor", |current| {
            let current = current.and_then(|v| v.as_str().map(str::to_string));
            match current.as_deref() {
                Some("model") => (json!(""), false),
                _ => (json!(current), true),
            }
        })
        .await;
    assert_eq!(declined.value, Some(json!("model")));
    assert_eq!(declined.tick, 3);

    group.graceful_passive_shutdown().await;
}

#[tokio::test]
async fn insert_only_succeeds_when_key_absent() {
    let group = Group::new("root").await;

    let first = group.db_insert("k", json!("first")).await;
    assert_eq!(first.value, Some(json!("first")));

    let second = group.db_insert("k", json!("second")).await;
    assert_eq!(second.value, Some(json!("first")));
    assert_eq!(second.tick, first.tick);

    group.graceful_passive_shutdown().await;
}

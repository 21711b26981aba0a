//! S5: a validator rejects messages before they ever reach the mailbox.
//! Only values passing the predicate show up in the handler's observed
//! sequence.

use std::sync::{Arc, Mutex};

use mailswarm::prelude::*;

#[tokio::test]
async fn validator_filters_before_enqueue() {
    let group = Group::new("root").await;

    let validator: Validator = Arc::new(|msg: &Msg| {
        if msg.get::<String>(0).is_some() {
            return true;
        }
        if let Some(n) = msg.get::<i64>(0) {
            return *n > 0 && *n < 10;
        }
        false
    });

    let seen = Arc::new(Mutex::new(Vec::<String>::new()));
    let seen_in_handler = seen.clone();
    let behavior = Behavior::from_fn(move |msg: &mut Msg, _ctx: &mut ActorContext| {
        let label = msg
            .get::<String>(0)
            .cloned()
            .or_else(|| msg.get::<i64>(0).map(i64::to_string));
        let seen = seen_in_handler.clone();
        async move {
            if let Some(label) = label {
                seen.lock().expect("lock").push(label);
            }
        }
    });

    let actor = group
        .spawn_with_options(ActorOptions::new(behavior).validator(validator))
        .await
        .expect("spawn");

    assert!(actor.send_blocking(Msg::of("Hi".to_string())).await);
    assert!(!actor.send_blocking(Msg::of(3.3_f64)).await);
    assert!(actor.send_blocking(Msg::of(6_i64)).await);
    assert!(!actor.send_blocking(Msg::of(17_i64)).await);

    group.graceful_active_shutdown().await;

    let seen = seen.lock().expect("lock").clone();
    assert_eq!(seen, vec!["Hi".to_string(), "6".to_string()]);
}

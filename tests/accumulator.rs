//! S1: a single actor accumulates a running sum across 1000 messages,
//! then reports the total on request.

use mailswarm::prelude::*;
use tokio::sync::oneshot;

struct AddMsg {
    val: i64,
}

struct EchoInt(oneshot::Sender<i64>);

#[tokio::test]
async fn accumulator_sums_to_499500() {
    let group = Group::new("root").await;

    let mut total: i64 = 0;
    let behavior = Behavior::from_fn(move |msg: &mut Msg, _ctx: &mut ActorContext| {
        if let Some(add) = msg.get::<AddMsg>(0) {
            total += add.val;
        } else if let Some(echo) = msg.take::<EchoInt>(0) {
            let _ = echo.0.send(total);
        }
        async move {}
    });

    let actor = group.spawn(behavior).await.expect("spawn");

    for i in 0..1000 {
        assert!(actor.send_blocking(Msg::of(AddMsg { val: i })).await);
    }

    let (tx, rx) = oneshot::channel();
    assert!(actor.send_blocking(Msg::of(EchoInt(tx))).await);
    let total = rx.await.expect("echo reply delivered");

    assert_eq!(total, 499_500);

    group.graceful_active_shutdown().await;
}

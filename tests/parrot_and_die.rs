//! S2: five actors each report their index on a shared channel, then
//! suicide. Verifies `send_all`'s factory-per-recipient broadcast and that
//! a graceful passive shutdown observes the population reach zero.

use std::collections::HashSet;

use mailswarm::prelude::*;
use tokio::sync::mpsc;

#[tokio::test]
async fn parrot_and_die_reports_every_index_then_exits() {
    let group = Group::new("root").await;
    let (tx, mut rx) = mpsc::channel::<usize>(5);

    for i in 0..5usize {
        let behavior = Behavior::from_fn(move |msg: &mut Msg, ctx: &mut ActorContext| {
            let sender = msg.get::<mpsc::Sender<usize>>(0).cloned();
            ctx.suicide();
            async move {
                if let Some(sender) = sender {
                    let _ = sender.send(i).await;
                }
            }
        });
        group.spawn(behavior).await.expect("spawn");
    }

    assert_eq!(group.population(), 5);

    group.send_all(|| Msg::of(tx.clone())).await;
    drop(tx);

    let mut seen = HashSet::new();
    for _ in 0..5 {
        seen.insert(rx.recv().await.expect("parrot reports its index"));
    }
    assert_eq!(seen, HashSet::from([0, 1, 2, 3, 4]));

    group.graceful_passive_shutdown().await;
    assert_eq!(group.population(), 0);
}

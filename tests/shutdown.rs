//! Shutdown properties: no leaks (a passive shutdown's wait actually
//! reaches zero population) and cascade totality (an active shutdown tears
//! down an entire multi-level hierarchy, not just the guardian's direct
//! children).

use async_trait::async_trait;
use mailswarm::prelude::*;

struct SpawnChildren {
    count: usize,
    depth: usize,
}

/// Spawns `count` children the first time it's asked to, handing each one a
/// `SpawnChildren` of one shallower depth so the tree builds itself through
/// ordinary actor messaging. Needs the borrow-tied future `async_trait`
/// gives `receive`, since `ctx.spawn(...)` has to be awaited with `ctx`
/// still reachable — `Behavior::from_fn` closures can't do that.
struct Spawner {
    spawned: bool,
}

#[async_trait]
impl PlainHandler for Spawner {
    async fn receive(&mut self, msg: &mut Msg, ctx: &mut ActorContext) {
        if self.spawned {
            return;
        }
        let Some(req) = msg.take::<SpawnChildren>(0) else {
            return;
        };
        self.spawned = true;
        if req.depth == 0 {
            return;
        }
        for _ in 0..req.count {
            if let Some(child) = ctx.spawn(Behavior::plain(Spawner { spawned: false })).await {
                child.send(Msg::of(SpawnChildren {
                    count: req.count,
                    depth: req.depth - 1,
                }));
            }
        }
    }
}

#[tokio::test]
async fn passive_shutdown_reaches_zero_population() {
    let group = Group::new("root").await;

    for _ in 0..8 {
        let behavior = Behavior::from_fn(move |msg: &mut Msg, ctx: &mut ActorContext| {
            if msg.get::<()>(0).is_some() {
                ctx.suicide();
            }
            async move {}
        });
        group.spawn(behavior).await.expect("spawn");
    }
    assert_eq!(group.population(), 8);

    group.send_all(|| Msg::of(())).await;
    group.graceful_passive_shutdown().await;

    assert_eq!(group.population(), 0);
    assert!(group.get_all_top_level_names().await.is_empty());
    assert!(group.services_shut_down());
}

#[tokio::test]
async fn active_shutdown_cascades_through_every_level() {
    let group = Group::new("root").await;

    // Three top-level actors, each spawning two children, each of those
    // spawning two more grandchildren: 3 + 6 + 12 = 21 actors total.
    let mut parents = Vec::new();
    for _ in 0..3 {
        let parent = group
            .spawn(Behavior::plain(Spawner { spawned: false }))
            .await
            .expect("spawn parent");
        parents.push(parent);
    }
    for parent in &parents {
        assert!(
            parent
                .send_blocking(Msg::of(SpawnChildren { count: 2, depth: 2 }))
                .await
        );
    }

    // Let the tree fan out across the two recursive levels before we check
    // population and ask for a cascading shutdown.
    tokio::time::sleep(std::time::Duration::from_millis(50)).await;
    assert_eq!(group.population(), 21);

    group.graceful_active_shutdown().await;

    assert_eq!(group.population(), 0);
    assert!(group.get_all_top_level_names().await.is_empty());
    assert!(group.services_shut_down());
}

//! S3: `Become`/`Revert` sequencing. The initial behavior answers every
//! message with "Init()" and installs a second behavior that echoes its
//! command argument, unless the command is "Revert", in which case it
//! pops back to the initial behavior and answers "Reverting".

use mailswarm::prelude::*;
use tokio::sync::mpsc;

fn first_behavior() -> Behavior {
    Behavior::from_fn(|msg: &mut Msg, ctx: &mut ActorContext| {
        let ch = msg.get::<mpsc::Sender<String>>(0).cloned();
        ctx.become_behavior(second_behavior());
        async move {
            if let Some(ch) = ch {
                let _ = ch.send("Init()".to_string()).await;
            }
        }
    })
}

fn second_behavior() -> Behavior {
    Behavior::from_fn(|msg: &mut Msg, ctx: &mut ActorContext| {
        let ch = msg.get::<mpsc::Sender<String>>(0).cloned();
        let cmd = msg.get::<String>(1).cloned();
        let reverted = cmd.as_deref() == Some("Revert") && ctx.revert();
        async move {
            let Some(ch) = ch else { return };
            if reverted {
                let _ = ch.send("Reverting".to_string()).await;
            } else if let Some(cmd) = cmd {
                let _ = ch.send(cmd).await;
            }
        }
    })
}

#[tokio::test]
async fn become_and_revert_restore_the_original_behavior() {
    let group = Group::new("root").await;
    let (tx, mut rx) = mpsc::channel::<String>(5);

    let actor = group.spawn(first_behavior()).await.expect("spawn");

    let commands = ["Ping!", "Ping!", "Ping!", "Revert", "Ping!"];
    for cmd in commands {
        let msg = Msg::new(vec![Box::new(tx.clone()), Box::new(cmd.to_string())]);
        assert!(actor.send_blocking(msg).await);
    }

    let mut responses = Vec::new();
    for _ in 0..commands.len() {
        responses.push(rx.recv().await.expect("reply for each command"));
    }

    assert_eq!(
        responses,
        vec!["Init()", "Ping!", "Ping!", "Reverting", "Init()"]
    );

    group.graceful_active_shutdown().await;
}

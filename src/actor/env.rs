//! The actor loop (§4.2): a single-threaded state machine that owns the
//! behavior stack, the child map and the watcher set, and selects over the
//! three channels (`mbox`, `cbox`, `sbox`) until it transitions to dead.
//!
//! Nothing here is ever touched by more than one task at a time: a running
//! handler invocation borrows its own copies, and mutates loop state only
//! indirectly through [`HandlerOp`]s applied back on this task.

// Layer 1: Standard library imports
use std::collections::{HashMap, VecDeque};
use std::panic::AssertUnwindSafe;
use std::time::Duration;

// Layer 2: Third-party crate imports
use futures::FutureExt;
use tokio::sync::{mpsc, oneshot};
use tokio::task::JoinHandle;

// Layer 3: Internal module imports
use super::behavior::{BehaviorStack, HandlerOp};
use super::context::ActorContext;
use super::control::{self, ControlMsg};
use super::handle::ActorHandle;
use super::options::{ActorOptions, InternalHooks};
use super::status::{self, FaultReport, StatusMsg};
use crate::group::GroupHandle;
use crate::mailbox::{self, MailboxSender};
use crate::message::{ChildDied, MailboxEntry, Msg, Obit};
use crate::util::{ActorId, LocalName};

/// Spawns a new actor under `parent` (or as a root, when `parent` is
/// `None` — only the guardian is spawned this way).
pub(crate) async fn spawn_actor(
    group: GroupHandle,
    parent: Option<ActorHandle>,
    mut options: ActorOptions,
    hooks: InternalHooks,
) -> Option<ActorHandle> {
    let local_name = match options.local_name.take() {
        Some(name) => name,
        None => group.next_name("actor").await,
    };

    let full_name = match &parent {
        Some(p) => p.full_name().child(&local_name),
        None => group.root_name().clone(),
    };

    let (mbox_tx, mbox_rx) = mailbox::channel(options.mailbox_capacity);
    let (cbox_tx, cbox_rx) = control::channel();
    let (sbox_tx, sbox_rx) = status::channel();

    let id = ActorId::new();
    let me = ActorHandle::new(
        id,
        full_name.clone(),
        mbox_tx.clone(),
        cbox_tx.clone(),
        sbox_tx.clone(),
        options.validator.clone(),
    );

    if let Some(parent) = &parent {
        let (resp, rx) = oneshot::channel();
        if parent
            .0
            .cbox
            .send(ControlMsg::AddChild {
                name: local_name.clone(),
                actor: me.clone(),
                resp,
            })
            .await
            .is_err()
        {
            return None;
        }
        if !rx.await.unwrap_or(false) {
            return None;
        }
    }

    group.register(full_name.clone(), me.clone()).await;
    let is_guardian = parent.is_none();
    if !is_guardian {
        group.wait_group_inc();
    }

    let loop_state = ActorLoop {
        me: me.clone(),
        local_name,
        parent: parent.clone(),
        group: group.clone(),
        mbox_rx,
        mbox_tx,
        cbox_rx,
        cbox_tx,
        sbox_rx,
        sbox_tx,
        behavior_stack: BehaviorStack::new(options.behavior),
        children: HashMap::new(),
        watchers: HashMap::new(),
        pending: VecDeque::new(),
        dying: false,
        dead: false,
        tombstone: false,
        handler_running: false,
        waiting_on_kids: false,
        obit_forward: false,
        obit_hook: hooks.obit_hook,
        die_hook: hooks.die_hook,
        last_message: options.last_message,
        last_message_done: false,
        age_out: options.age_out,
        age_out_task: None,
        is_guardian,
    };

    tokio::spawn(loop_state.run());

    if let Some(first) = options.first_message {
        me.send_blocking(first).await;
    }

    Some(me)
}

struct ActorLoop {
    me: ActorHandle,
    local_name: LocalName,
    parent: Option<ActorHandle>,
    group: GroupHandle,
    mbox_rx: mailbox::MailboxReceiver,
    mbox_tx: MailboxSender,
    cbox_rx: control::ControlReceiver,
    cbox_tx: control::ControlSender,
    sbox_rx: status::StatusReceiver,
    sbox_tx: status::StatusSender,
    behavior_stack: BehaviorStack,
    children: HashMap<LocalName, ActorHandle>,
    watchers: HashMap<ActorId, super::handle::WeakActorHandle>,
    pending: VecDeque<Msg>,
    dying: bool,
    dead: bool,
    tombstone: bool,
    handler_running: bool,
    waiting_on_kids: bool,
    obit_forward: bool,
    obit_hook: Option<mpsc::Sender<Obit>>,
    die_hook: Option<mpsc::Sender<()>>,
    last_message: Option<Msg>,
    last_message_done: bool,
    age_out: Option<Duration>,
    age_out_task: Option<JoinHandle<()>>,
    is_guardian: bool,
}

impl ActorLoop {
    async fn run(mut self) {
        if self.last_message.is_none() {
            self.last_message_done = true;
        }
        self.arm_age_out();

        while !self.dead {
            tokio::select! {
                ctrl = self.cbox_rx.recv() => {
                    // Every loop holds its own sender clones, so these
                    // channels never actually close while it is running.
                    match ctrl {
                        Some(msg) => self.handle_control(msg).await,
                        None => self.dead = true,
                    }
                }
                status = self.sbox_rx.recv() => {
                    match status {
                        Some(msg) => self.handle_status(msg).await,
                        None => self.dead = true,
                    }
                }
                entry = self.mbox_rx.recv() => {
                    match entry {
                        Some(MailboxEntry::User(msg)) => {
                            self.reset_age_out();
                            self.pending.push_back(msg);
                        }
                        Some(MailboxEntry::Tombstone) => { self.tombstone = true; }
                        None => self.dead = true,
                    }
                }
            }
            self.post_event();
        }

        self.finalize().await;
    }

    fn post_event(&mut self) {
        if !self.handler_running {
            if let Some(msg) = self.pending.pop_front() {
                self.dispatch(msg);
            } else if self.tombstone && !self.last_message_done {
                self.last_message_done = true;
                if let Some(msg) = self.last_message.take() {
                    self.dispatch(msg);
                }
            }
        }

        if self.tombstone
            && self.pending.is_empty()
            && self.last_message_done
            && !self.handler_running
            && !self.waiting_on_kids
        {
            self.send_children_to_die();
            if self.children.is_empty() {
                self.dead = true;
            } else {
                self.waiting_on_kids = true;
            }
        }

        if self.waiting_on_kids && self.children.is_empty() {
            self.dead = true;
        }
    }

    fn dispatch(&mut self, msg: Msg) {
        self.handler_running = true;
        let behavior = self
            .behavior_stack
            .current
            .take()
            .unwrap_or_else(|| unreachable!("behavior absent while handler_running was false"));
        let mut ctx = ActorContext::new(
            self.me.clone(),
            self.parent.clone(),
            self.group.clone(),
            self.cbox_tx.clone(),
            self.sbox_tx.clone(),
            self.behavior_stack.depth(),
        );
        let sbox_tx = self.sbox_tx.clone();

        tokio::spawn(async move {
            let mut behavior = behavior;
            let mut msg = msg;
            let outcome = AssertUnwindSafe(behavior.run(&mut msg, &mut ctx))
                .catch_unwind()
                .await;
            let ops = ctx.into_ops();
            let fault = outcome.err().map(|panic| FaultReport {
                error: panic_message(&panic),
                message: msg,
            });
            let _ = sbox_tx
                .send(StatusMsg::ReceiveFinished {
                    behavior,
                    ops,
                    fault,
                })
                .await;
        });
    }

    async fn handle_control(&mut self, msg: ControlMsg) {
        match msg {
            ControlMsg::AddChild { name, actor, resp } => {
                let accepted = if self.dying || self.children.contains_key(&name) {
                    false
                } else {
                    self.children.insert(name, actor);
                    true
                };
                let _ = resp.send(accepted);
            }
            ControlMsg::RemoveChild { name } => {
                self.children.remove(&name);
            }
            ControlMsg::FindChild { name, resp } => {
                let _ = resp.send(self.children.get(&name).cloned());
            }
            ControlMsg::GetChildren { resp } => {
                let list = self
                    .children
                    .iter()
                    .map(|(k, v)| (k.clone(), v.clone()))
                    .collect();
                let _ = resp.send(list);
            }
            ControlMsg::AddWatcher { watcher } => {
                if let Some(id) = watcher.id() {
                    self.watchers.insert(id, watcher);
                }
            }
            ControlMsg::RemoveWatcher { watcher_id } => {
                self.watchers.remove(&watcher_id);
            }
            ControlMsg::ChildObit(obit) => {
                self.route_obit(obit);
            }
        }
    }

    fn route_obit(&mut self, obit: Obit) {
        if self.obit_forward {
            self.me.send(Msg::of(obit));
        } else if let Some(hook) = &self.obit_hook {
            let hook = hook.clone();
            tokio::spawn(async move {
                let _ = hook.send(obit).await;
            });
        }
        // else: no hook installed, the obituary is silently dropped (§4.4,
        // resolved open question: a watcher with no hook never panics).
    }

    async fn handle_status(&mut self, msg: StatusMsg) {
        match msg {
            StatusMsg::ReceiveFinished {
                behavior,
                ops,
                fault,
            } => {
                self.handler_running = false;
                self.behavior_stack.current = Some(behavior);
                for op in ops {
                    self.apply_op(op);
                }
                if let Some(fault) = fault {
                    if let Some(parent) = &self.parent {
                        parent.send(Msg::of(ChildDied {
                            error: fault.error,
                            actor: self.me.clone(),
                            message: fault.message,
                        }));
                    }
                }
            }
            StatusMsg::GracefulDeath => {
                if !self.dying {
                    self.dying = true;
                    let mbox_tx = self.mbox_tx.clone();
                    tokio::spawn(async move {
                        let _ = mbox_tx.send(MailboxEntry::Tombstone).await;
                    });
                    if let Some(hook) = self.die_hook.take() {
                        tokio::spawn(async move {
                            let _ = hook.send(()).await;
                        });
                    }
                }
            }
            StatusMsg::HardKill => {
                self.dying = true;
                self.dead = true;
            }
        }
    }

    fn apply_op(&mut self, op: HandlerOp) {
        match op {
            HandlerOp::Become(new) => {
                if let Some(current) = self.behavior_stack.current.take() {
                    self.behavior_stack.previous.push(current);
                }
                self.behavior_stack.current = Some(new);
            }
            HandlerOp::Revert => {
                if let Some(prev) = self.behavior_stack.previous.pop() {
                    self.behavior_stack.current = Some(prev);
                }
            }
            HandlerOp::SetObitForward(v) => self.obit_forward = v,
            HandlerOp::SetObitHook(ch) => self.obit_hook = Some(ch),
            HandlerOp::ClearObitHook => self.obit_hook = None,
            HandlerOp::SetDieHook(ch) => self.die_hook = Some(ch),
            HandlerOp::ClearDieHook => self.die_hook = None,
            HandlerOp::SetLastMessage(msg) => {
                self.last_message = Some(msg);
                self.last_message_done = false;
            }
        }
    }

    fn send_children_to_die(&self) {
        for child in self.children.values() {
            child.die();
        }
    }

    fn arm_age_out(&mut self) {
        let Some(duration) = self.age_out else {
            return;
        };
        let me = self.me.clone();
        self.age_out_task = Some(tokio::spawn(async move {
            tokio::time::sleep(duration).await;
            me.die();
        }));
    }

    fn reset_age_out(&mut self) {
        if let Some(task) = self.age_out_task.take() {
            task.abort();
        }
        self.arm_age_out();
    }

    async fn finalize(mut self) {
        if let Some(task) = self.age_out_task.take() {
            task.abort();
        }

        if self.handler_running {
            while let Some(status) = self.sbox_rx.recv().await {
                if matches!(status, StatusMsg::ReceiveFinished { .. }) {
                    break;
                }
            }
        }

        if let Some(parent) = &self.parent {
            let _ = parent
                .0
                .cbox
                .send(ControlMsg::RemoveChild {
                    name: self.local_name.clone(),
                })
                .await;
        }

        self.group.deregister(&self.me.full_name().clone()).await;
        if !self.is_guardian {
            self.group.wait_group_dec();
        }

        let obit = Obit {
            actor: self.me.clone(),
            full_name: self.me.full_name().clone(),
        };
        for (_, watcher) in self.watchers.drain() {
            if let Some(watcher) = watcher.upgrade() {
                let _ = watcher
                    .0
                    .cbox
                    .send(ControlMsg::ChildObit(obit.clone()))
                    .await;
            }
        }
    }
}

fn panic_message(panic: &(dyn std::any::Any + Send)) -> String {
    if let Some(s) = panic.downcast_ref::<&str>() {
        s.to_string()
    } else if let Some(s) = panic.downcast_ref::<String>() {
        s.clone()
    } else {
        "actor handler panicked with a non-string payload".to_string()
    }
}

//! The handler-facing environment surface (§6): everything a `receive`
//! implementation can do besides looking at its message. Every mutation of
//! shared actor state is deferred as a [`HandlerOp`] and applied by the
//! loop after the invocation returns, so the loop's state is never touched
//! concurrently with a running handler.

// Layer 2: Third-party crate imports
use tokio::sync::mpsc;

// Layer 3: Internal module imports
use super::behavior::{Behavior, HandlerOp};
use super::control::ControlMsg;
use super::env::spawn_actor;
use super::handle::ActorHandle;
use super::options::ActorOptions;
use super::status::StatusMsg;
use crate::farm::FarmSpec;
use crate::group::GroupHandle;
use crate::message::{Msg, Obit};
use crate::util::LocalName;

/// Passed by `&mut` to every handler invocation (§6).
pub struct ActorContext {
    me: ActorHandle,
    parent: Option<ActorHandle>,
    group: GroupHandle,
    cbox: mpsc::Sender<ControlMsg>,
    sbox: mpsc::Sender<StatusMsg>,
    stack_depth: usize,
    ops: Vec<HandlerOp>,
}

impl ActorContext {
    pub(crate) fn new(
        me: ActorHandle,
        parent: Option<ActorHandle>,
        group: GroupHandle,
        cbox: mpsc::Sender<ControlMsg>,
        sbox: mpsc::Sender<StatusMsg>,
        stack_depth: usize,
    ) -> Self {
        Self {
            me,
            parent,
            group,
            cbox,
            sbox,
            stack_depth,
            ops: Vec::new(),
        }
    }

    pub(crate) fn into_ops(self) -> Vec<HandlerOp> {
        self.ops
    }

    /// This actor's own address.
    pub fn handle(&self) -> &ActorHandle {
        &self.me
    }

    pub fn parent(&self) -> Option<&ActorHandle> {
        self.parent.as_ref()
    }

    /// Sends `msg` to the parent, or drops it silently if this is the
    /// guardian (§6).
    pub fn return_to_parent(&self, msg: Msg) {
        if let Some(parent) = &self.parent {
            parent.send(msg);
        }
    }

    /// Installs a new behavior, pushing the current one onto the revert
    /// stack (§4.3). Takes effect once this invocation returns.
    pub fn become_behavior(&mut self, behavior: Behavior) {
        self.stack_depth += 1;
        self.ops.push(HandlerOp::Become(behavior));
    }

    /// Pops the revert stack, restoring the previously shadowed behavior.
    /// Returns `false` (no-op) if the stack is already empty (§4.3).
    pub fn revert(&mut self) -> bool {
        if self.stack_depth == 0 {
            return false;
        }
        self.stack_depth -= 1;
        self.ops.push(HandlerOp::Revert);
        true
    }

    /// Requests a graceful death of this actor (§4.5).
    pub fn suicide(&self) {
        let sbox = self.sbox.clone();
        tokio::spawn(async move {
            let _ = sbox.send(StatusMsg::GracefulDeath).await;
        });
    }

    pub fn set_obit_forward(&mut self, enabled: bool) {
        self.ops.push(HandlerOp::SetObitForward(enabled));
    }

    /// Routes obituaries of monitored actors to `sink` instead of the
    /// default (forward-to-self-mailbox-or-drop) behavior.
    pub fn add_obit_hook(&mut self, sink: mpsc::Sender<Obit>) {
        self.ops.push(HandlerOp::SetObitHook(sink));
    }

    pub fn remove_obit_hook(&mut self) {
        self.ops.push(HandlerOp::ClearObitHook);
    }

    /// Registers a channel to be signalled once when this actor begins a
    /// graceful death, before any drain work happens (§4.6, used by the
    /// farm coordinator to notice `killMe`).
    pub fn add_die_hook(&mut self, sink: mpsc::Sender<()>) {
        self.ops.push(HandlerOp::SetDieHook(sink));
    }

    pub fn remove_die_hook(&mut self) {
        self.ops.push(HandlerOp::ClearDieHook);
    }

    /// Replaces the message delivered once during this actor's drain
    /// phase (§4.1 `ActorOptions::last_message`, settable post-spawn too).
    pub fn set_last_message(&mut self, msg: Msg) {
        self.ops.push(HandlerOp::SetLastMessage(msg));
    }

    pub async fn get_children(&self) -> Vec<ActorHandle> {
        self.me.children().await.into_iter().map(|(_, h)| h).collect()
    }

    pub async fn get_children_names(&self) -> Vec<LocalName> {
        self.me.children().await.into_iter().map(|(n, _)| n).collect()
    }

    /// Spawns a plain child under this actor, auto-generating its local
    /// name (§4.1, §4.8).
    pub async fn spawn(&self, behavior: Behavior) -> Option<ActorHandle> {
        self.spawn_with_options(ActorOptions::new(behavior)).await
    }

    pub async fn spawn_named(
        &self,
        name: impl Into<LocalName>,
        behavior: Behavior,
    ) -> Option<ActorHandle> {
        self.spawn_with_options(ActorOptions::new(behavior).named(name))
            .await
    }

    pub async fn spawn_with_options(&self, options: ActorOptions) -> Option<ActorHandle> {
        spawn_actor(self.group.clone(), Some(self.me.clone()), options, Default::default()).await
    }

    /// Spawns a bounded work farm as a child of this actor (§4.6).
    pub async fn spawn_farm(&self, spec: FarmSpec) -> ActorHandle {
        crate::farm::spawn_farm(self.group.clone(), self.me.clone(), spec).await
    }

    pub async fn db_get(&self, key: impl Into<String>) -> crate::group::DbResp {
        self.group.db_get(key.into()).await
    }

    pub async fn db_set(&self, key: impl Into<String>, value: crate::group::DbValue) -> crate::group::DbResp {
        self.group.db_set(key.into(), value).await
    }

    /// Inserts only if absent; the returned binding is the prior one if
    /// the key already existed.
    pub async fn db_insert(
        &self,
        key: impl Into<String>,
        value: crate::group::DbValue,
    ) -> crate::group::DbResp {
        self.group.db_insert(key.into(), value).await
    }

    /// Atomically transforms the stored value (or `None` if absent): `f`
    /// returns `(new_value, should_update)`, and the tick only advances
    /// when `should_update` is true (§4.7, linearized by the single-owner
    /// KV task's tick counter).
    pub async fn db_mutate<F>(&self, key: impl Into<String>, f: F) -> crate::group::DbResp
    where
        F: FnOnce(Option<crate::group::DbValue>) -> (crate::group::DbValue, bool) + Send + 'static,
    {
        self.group.db_mutate(key.into(), f).await
    }
}

//! A group (§4.7, §6): a guardian actor plus the group-scoped registry,
//! key/value store and name generator every actor spawned inside it
//! shares. This is the crate's main entry point — most programs create
//! exactly one.

// Layer 1: Standard library imports
use std::sync::Arc;

// Layer 3: Internal module imports
mod errors;
mod kv;
mod namegen;
mod registry;
mod waitgroup;

pub use errors::GroupError;
pub use kv::{DbResp, DbValue};

use crate::actor::options::InternalHooks;
use crate::actor::{spawn_actor, ActorHandle, ActorOptions, Behavior, FnHandler};
use crate::farm::{self, FarmSpec};
use crate::message::Msg;
use crate::util::{FullName, LocalName};
use kv::KvHandle;
use namegen::NameGenHandle;
use registry::RegistryHandle;
use waitgroup::WaitGroup;

/// The shared handle every spawned actor and farm coordinator carries a
/// clone of: cheap to clone, never exposed outside the crate.
#[derive(Clone)]
pub(crate) struct GroupHandle {
    root_name: FullName,
    registry: RegistryHandle,
    kv: KvHandle,
    namegen: NameGenHandle,
    wait_group: Arc<WaitGroup>,
}

impl GroupHandle {
    pub fn root_name(&self) -> &FullName {
        &self.root_name
    }

    pub async fn register(&self, name: FullName, handle: ActorHandle) {
        self.registry.register(name, handle).await;
    }

    pub async fn deregister(&self, name: &FullName) {
        self.registry.deregister(name).await;
    }

    pub async fn find_by_full_name(&self, name: &FullName) -> Option<ActorHandle> {
        self.registry.find(name).await
    }

    pub async fn next_name(&self, prefix: &str) -> LocalName {
        self.namegen.next(prefix).await
    }

    pub fn wait_group_inc(&self) {
        self.wait_group.inc();
    }

    pub fn wait_group_dec(&self) {
        self.wait_group.dec();
    }

    pub async fn db_get(&self, key: String) -> DbResp {
        self.kv.get(key).await
    }

    pub async fn db_set(&self, key: String, value: DbValue) -> DbResp {
        self.kv.set(key, value).await
    }

    pub async fn db_insert(&self, key: String, value: DbValue) -> DbResp {
        self.kv.insert(key, value).await
    }

    pub async fn db_mutate<F>(&self, key: String, f: F) -> DbResp
    where
        F: FnOnce(Option<DbValue>) -> (DbValue, bool) + Send + 'static,
    {
        self.kv.mutate(key, f).await
    }

    /// Shuts down the name generator, registry and KV store, in that
    /// order — mirroring the original's `stringControl`/`uniqueStringCh`,
    /// then `memberCh`, then `dbReq` sequencing in
    /// `GracefulPassiveShutdown` (§4.5). Each `close()` blocks until its
    /// task has actually returned, so this returns only once every
    /// group-level service is gone.
    pub async fn shutdown_services(&self) {
        self.namegen.close().await;
        self.registry.close().await;
        self.kv.close().await;
    }

    /// True once all three group-level services have exited.
    pub fn services_shut_down(&self) -> bool {
        self.namegen.is_closed() && self.registry.is_closed() && self.kv.is_closed()
    }
}

/// A group: the guardian actor and the services shared by everything
/// spawned under it (§3, §4.7).
pub struct Group {
    guardian: ActorHandle,
    handle: GroupHandle,
}

impl Group {
    /// Creates a new group with a guardian actor named `name`. The
    /// guardian never processes user messages itself; it exists to anchor
    /// the top-level actor population and the group's shutdown sequence.
    pub async fn new(name: impl Into<String>) -> Self {
        let handle = GroupHandle {
            root_name: FullName::root(name),
            registry: registry::spawn(),
            kv: kv::spawn(),
            namegen: namegen::spawn(),
            wait_group: Arc::new(WaitGroup::new()),
        };

        let guardian_behavior = Behavior::Plain(Box::new(FnHandler::new(
            |_msg: &mut Msg, _ctx: &mut crate::actor::ActorContext| async move {},
        )));
        let options = ActorOptions::new(guardian_behavior);
        let guardian = spawn_actor(handle.clone(), None, options, InternalHooks::default())
            .await
            .unwrap_or_else(|| {
                unreachable!("guardian spawn has no parent to reject it")
            });

        Self { guardian, handle }
    }

    pub fn guardian(&self) -> &ActorHandle {
        &self.guardian
    }

    pub(crate) fn group_handle(&self) -> GroupHandle {
        self.handle.clone()
    }

    /// Spawns a top-level actor with an auto-generated name (§4.8).
    pub async fn spawn(&self, behavior: Behavior) -> Option<ActorHandle> {
        self.spawn_with_options(ActorOptions::new(behavior)).await
    }

    /// Spawns a top-level actor under a caller-chosen name, failing if
    /// that name is already taken among the guardian's direct children.
    pub async fn spawn_named(
        &self,
        name: impl Into<LocalName>,
        behavior: Behavior,
    ) -> Result<ActorHandle, GroupError> {
        let name = name.into();
        self.spawn_with_options(ActorOptions::new(behavior).named(name.clone()))
            .await
            .ok_or(GroupError::NameInUse(name))
    }

    pub async fn spawn_with_options(&self, options: ActorOptions) -> Option<ActorHandle> {
        spawn_actor(
            self.handle.clone(),
            Some(self.guardian.clone()),
            options,
            InternalHooks::default(),
        )
        .await
    }

    /// Spawns a bounded work farm as a top-level actor (§4.6).
    pub async fn spawn_farm(&self, spec: FarmSpec) -> ActorHandle {
        farm::spawn_farm(self.handle.clone(), self.guardian.clone(), spec).await
    }

    /// Sends to any actor in the group by its fully-qualified path.
    pub async fn send_by_full_name(&self, name: &FullName, msg: Msg) -> bool {
        match self.handle.find_by_full_name(name).await {
            Some(actor) => {
                actor.send(msg);
                true
            }
            None => false,
        }
    }

    /// Looks up a top-level actor by local name and sends to it; returns
    /// whether such an actor existed, not whether delivery ultimately
    /// succeeded.
    pub async fn send_by_name(&self, name: &str, msg: Msg) -> bool {
        self.guardian.send_by_name(name, msg).await
    }

    /// Broadcasts a message to every top-level actor. Takes a factory
    /// rather than an owned `Msg` since a message's boxed payload elements
    /// aren't `Clone` in general; call it once per recipient.
    pub async fn send_all(&self, mut msg_factory: impl FnMut() -> Msg) {
        for (_, actor) in self.guardian.children().await {
            actor.send(msg_factory());
        }
    }

    /// Returns the existing top-level actor named `name`, or spawns one
    /// with `behavior_factory()` if none exists yet.
    pub async fn get_or_create_named(
        &self,
        name: impl Into<LocalName>,
        behavior_factory: impl FnOnce() -> Behavior,
    ) -> ActorHandle {
        let name = name.into();
        if let Some(existing) = self.guardian.find_child(&name).await {
            return existing;
        }
        match self.spawn_named(name.clone(), behavior_factory()).await {
            Ok(actor) => actor,
            Err(GroupError::NameInUse(_)) => self
                .guardian
                .find_child(&name)
                .await
                .unwrap_or_else(|| unreachable!("name collision implies the actor exists")),
            Err(other) => unreachable!("spawn_named only returns NameInUse: {other}"),
        }
    }

    /// Sends to the named top-level actor, spawning it first (with the
    /// message produced by `msg` as its first message) if it does not
    /// already exist.
    pub async fn send_or_create_by_name(
        &self,
        name: impl Into<LocalName>,
        msg: impl FnOnce() -> Msg,
        behavior_factory: impl FnOnce() -> Behavior,
    ) {
        let name = name.into();
        if let Some(existing) = self.guardian.find_child(&name).await {
            existing.send(msg());
            return;
        }
        let actor = self.get_or_create_named(name, behavior_factory).await;
        actor.send(msg());
    }

    pub async fn get_all_top_level_names(&self) -> Vec<LocalName> {
        self.guardian
            .children()
            .await
            .into_iter()
            .map(|(name, _)| name)
            .collect()
    }

    /// Waits for the group's population to reach zero without asking
    /// anyone to die, then tears down the name generator, registry and KV
    /// store behind it (§4.5).
    pub async fn graceful_passive_shutdown(&self) {
        self.handle.wait_group.wait_zero().await;
        self.handle.shutdown_services().await;
    }

    /// Tells the guardian to die, which cascades a graceful death through
    /// every actor in the group, waits for the population to reach zero,
    /// then tears down the group-level services (§4.5).
    pub async fn graceful_active_shutdown(&self) {
        self.guardian.die();
        self.handle.wait_group.wait_zero().await;
        self.handle.shutdown_services().await;
    }

    pub fn population(&self) -> usize {
        self.handle.wait_group.count()
    }

    /// True once the group's services (name generator, registry, KV
    /// store) have all exited — observable after either shutdown call
    /// returns, or at any point a caller wants to confirm no leaked
    /// background tasks remain.
    pub fn services_shut_down(&self) -> bool {
        self.handle.services_shut_down()
    }

    pub async fn db_get(&self, key: impl Into<String>) -> DbResp {
        self.handle.db_get(key.into()).await
    }

    pub async fn db_set(&self, key: impl Into<String>, value: DbValue) -> DbResp {
        self.handle.db_set(key.into(), value).await
    }

    pub async fn db_insert(&self, key: impl Into<String>, value: DbValue) -> DbResp {
        self.handle.db_insert(key.into(), value).await
    }

    pub async fn db_mutate<F>(&self, key: impl Into<String>, f: F) -> DbResp
    where
        F: FnOnce(Option<DbValue>) -> (DbValue, bool) + Send + 'static,
    {
        self.handle.db_mutate(key.into(), f).await
    }
}

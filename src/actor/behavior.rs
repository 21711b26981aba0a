//! Behavior polymorphism (§4.3): a plain handler reacts to messages; a farm
//! handler additionally gets a dispatch function for re-injecting work into
//! its own farm. Both are boxed trait objects so `Become`/`Revert` can swap
//! them at runtime without the caller needing to know the concrete type.

// Layer 1: Standard library imports
use std::future::Future;
use std::sync::Arc;

// Layer 2: Third-party crate imports
use async_trait::async_trait;
use tokio::sync::mpsc;

// Layer 3: Internal module imports
use crate::message::{MailboxEntry, Msg, Obit};

/// A handler reacting to ordinary messages (§4.3).
///
/// Takes `msg` by mutable reference rather than by value: if the handler
/// panics mid-invocation the dispatcher still owns the message and can
/// attach it to the `ChildDied` report sent to the parent (§4.4).
#[async_trait]
pub trait PlainHandler: Send + Sync + 'static {
    async fn receive(&mut self, msg: &mut Msg, ctx: &mut super::context::ActorContext);
}

/// A handler for a farm worker or farmer that additionally wants to
/// re-inject messages into its own farm's distribution stream (§4.6).
#[async_trait]
pub trait FarmHandler: Send + Sync + 'static {
    async fn receive(
        &mut self,
        msg: &mut Msg,
        ctx: &mut super::context::ActorContext,
        dispatch: DispatchFn,
    );
}

/// Wraps a closure as a [`PlainHandler`], so simple actors don't need a
/// named type (mirrors `tower::service_fn`-style adaptors).
pub struct FnHandler<F> {
    f: F,
}

impl<F> FnHandler<F> {
    pub fn new(f: F) -> Self {
        Self { f }
    }
}

#[async_trait]
impl<F, Fut> PlainHandler for FnHandler<F>
where
    F: FnMut(&mut Msg, &mut super::context::ActorContext) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = ()> + Send,
{
    async fn receive(&mut self, msg: &mut Msg, ctx: &mut super::context::ActorContext) {
        (self.f)(msg, ctx).await
    }
}

/// Wraps a closure as a [`FarmHandler`].
pub struct FnFarmHandler<F> {
    f: F,
}

impl<F> FnFarmHandler<F> {
    pub fn new(f: F) -> Self {
        Self { f }
    }
}

#[async_trait]
impl<F, Fut> FarmHandler for FnFarmHandler<F>
where
    F: FnMut(&mut Msg, &mut super::context::ActorContext, DispatchFn) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = ()> + Send,
{
    async fn receive(
        &mut self,
        msg: &mut Msg,
        ctx: &mut super::context::ActorContext,
        dispatch: DispatchFn,
    ) {
        (self.f)(msg, ctx, dispatch).await
    }
}

#[async_trait]
impl FarmHandler for Box<dyn FarmHandler> {
    async fn receive(
        &mut self,
        msg: &mut Msg,
        ctx: &mut super::context::ActorContext,
        dispatch: DispatchFn,
    ) {
        (**self).receive(msg, ctx, dispatch).await
    }
}

/// Re-injects a message into a farm's own distribution stream (§4.6,
/// mirroring the original's `genFarmReceiveAdaptor` dispatch closure).
#[derive(Clone)]
pub struct DispatchFn(Arc<dyn Fn(Msg) + Send + Sync>);

impl DispatchFn {
    pub(crate) fn new(target: mpsc::Sender<Msg>) -> Self {
        Self(Arc::new(move |msg: Msg| {
            let target = target.clone();
            tokio::spawn(async move {
                let _ = target.send(msg).await;
            });
        }))
    }

    pub fn dispatch(&self, msg: Msg) {
        (self.0)(msg)
    }
}

/// The currently-installed behavior, either a plain handler or a farm one.
pub enum Behavior {
    Plain(Box<dyn PlainHandler>),
    Farm(Box<dyn FarmHandler>, DispatchFn),
}

impl Behavior {
    pub fn plain<H: PlainHandler>(handler: H) -> Self {
        Behavior::Plain(Box::new(handler))
    }

    pub fn from_fn<F, Fut>(f: F) -> Self
    where
        F: FnMut(&mut Msg, &mut super::context::ActorContext) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = ()> + Send,
    {
        Behavior::Plain(Box::new(FnHandler::new(f)))
    }

    pub(crate) fn farm<H: FarmHandler>(handler: H, dispatch: DispatchFn) -> Self {
        Behavior::Farm(Box::new(handler), dispatch)
    }

    pub(crate) async fn run(&mut self, msg: &mut Msg, ctx: &mut super::context::ActorContext) {
        match self {
            Behavior::Plain(h) => h.receive(msg, ctx).await,
            Behavior::Farm(h, disp) => h.receive(msg, ctx, disp.clone()).await,
        }
    }
}

/// The `Become`/`Revert` stack (§4.3, invariant 2: exactly one behavior is
/// current at any instant; `previous` holds everything shadowed by a
/// `Become` that has not yet been `Revert`ed).
pub(crate) struct BehaviorStack {
    pub current: Option<Behavior>,
    pub previous: Vec<Behavior>,
}

impl BehaviorStack {
    pub fn new(initial: Behavior) -> Self {
        Self {
            current: Some(initial),
            previous: Vec::new(),
        }
    }

    pub fn depth(&self) -> usize {
        self.previous.len()
    }
}

/// Deferred mutations a handler invocation asked for, applied by the loop
/// once the invocation completes (§4.2: behavior and hook state is only
/// ever touched by the single-threaded loop, never concurrently with a
/// running handler).
pub(crate) enum HandlerOp {
    Become(Behavior),
    Revert,
    SetObitForward(bool),
    SetObitHook(mpsc::Sender<Obit>),
    ClearObitHook,
    SetDieHook(mpsc::Sender<()>),
    ClearDieHook,
    SetLastMessage(Msg),
}

pub(crate) fn tombstone_entry() -> MailboxEntry {
    MailboxEntry::Tombstone
}

//! Optional spawn-time configuration (§4.1, mirroring the original's
//! `ActorOptions`). Everything here has a sensible default; `Group::spawn`
//! is the zero-configuration path, `Group::spawn_with_options` is this one.

// Layer 1: Standard library imports
use std::time::Duration;

// Layer 3: Internal module imports
use super::behavior::Behavior;
use super::handle::Validator;
use crate::message::Msg;
use crate::util::LocalName;

/// Spawn-time configuration for a single actor (§4.1).
pub struct ActorOptions {
    pub local_name: Option<LocalName>,
    pub behavior: Behavior,
    pub mailbox_capacity: usize,
    pub validator: Option<Validator>,
    /// Delivered via `send_blocking` immediately after activation, before
    /// any externally-sent message can be observed.
    pub first_message: Option<Msg>,
    /// Delivered exactly once during the drain phase of a graceful death,
    /// after the mailbox empties but before children are told to die.
    pub last_message: Option<Msg>,
    /// If the actor receives no user message within this window, it is
    /// sent a graceful death request. Cancelled the instant the actor
    /// dies for any other reason.
    pub age_out: Option<Duration>,
}

impl ActorOptions {
    pub fn new(behavior: Behavior) -> Self {
        Self {
            local_name: None,
            behavior,
            mailbox_capacity: crate::mailbox::DEFAULT_MAILBOX_CAPACITY,
            validator: None,
            first_message: None,
            last_message: None,
            age_out: None,
        }
    }

    pub fn named(mut self, name: impl Into<LocalName>) -> Self {
        self.local_name = Some(name.into());
        self
    }

    pub fn mailbox_capacity(mut self, capacity: usize) -> Self {
        self.mailbox_capacity = capacity;
        self
    }

    pub fn validator(mut self, validator: Validator) -> Self {
        self.validator = Some(validator);
        self
    }

    pub fn first_message(mut self, msg: Msg) -> Self {
        self.first_message = Some(msg);
        self
    }

    pub fn last_message(mut self, msg: Msg) -> Self {
        self.last_message = Some(msg);
        self
    }

    pub fn age_out(mut self, duration: Duration) -> Self {
        self.age_out = Some(duration);
        self
    }
}

/// Hooks wired in at construction time, bypassing the normal
/// `HandlerOp`-mediated mutation path. Only the farm coordinator uses
/// this: it runs alongside the farmer's loop rather than inside one of
/// its dispatches, so there is no handler invocation to return ops from
/// (§4.6).
#[derive(Default)]
pub(crate) struct InternalHooks {
    pub obit_hook: Option<tokio::sync::mpsc::Sender<crate::message::Obit>>,
    pub die_hook: Option<tokio::sync::mpsc::Sender<()>>,
}

//! The user-message channel an actor's loop selects over (§4.2). The
//! control and status channels live alongside the actor loop itself in
//! [`crate::actor`].

mod bounded;
mod error;

pub(crate) use bounded::{channel, MailboxReceiver, MailboxSender};
pub use bounded::DEFAULT_MAILBOX_CAPACITY;
pub use error::MailboxError;

//! Messages: the heterogeneous tuples actors exchange, plus the reserved
//! markers the runtime itself delivers (§3, §4.2, §6).

pub(crate) mod envelope;
pub mod msg;

pub(crate) use envelope::MailboxEntry;
pub use msg::{ChildDied, EndSentinel, Msg, Obit, WorkComplete};

//! `Msg`, the heterogeneous payload every actor mailbox carries.
//!
//! A message is an ordered tuple of arbitrary, independently-typed values
//! (§3 Data Model). The runtime never inspects payload semantics; it only
//! recognizes a handful of reserved marker types it delivers itself
//! (`Obit`, `ChildDied`, `WorkComplete`, `EndSentinel`) which user handlers
//! match against by downcasting just like any other element.

// Layer 1: Standard library imports
use std::any::Any;
use std::fmt;

// Layer 2: Third-party crate imports
// (none)

// Layer 3: Internal module imports
use crate::actor::ActorHandle;
use crate::util::FullName;

/// An ordered, heterogeneous tuple of values passed to an actor.
///
/// Elements are type-erased and recovered with [`Msg::get`] or
/// [`Msg::take`]. Construct one with [`Msg::new`] or the single-element
/// shorthand [`Msg::of`].
pub struct Msg(Vec<Box<dyn Any + Send + Sync>>);

impl Msg {
    /// Build a message from an already-boxed tuple of values.
    pub fn new(values: Vec<Box<dyn Any + Send + Sync>>) -> Self {
        Self(values)
    }

    /// Build a single-element message. The common case: most messages in
    /// this runtime carry one payload struct, e.g. `Msg::of(AddMsg { val: 3 })`.
    pub fn of<T: Send + Sync + 'static>(value: T) -> Self {
        Self(vec![Box::new(value)])
    }

    /// Number of elements in the tuple.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Borrow element `idx` as `T`, or `None` if the index is out of range
    /// or holds a different type.
    pub fn get<T: 'static>(&self, idx: usize) -> Option<&T> {
        self.0.get(idx).and_then(|b| b.downcast_ref::<T>())
    }

    /// Remove element `idx` and downcast it to an owned `T`. Leaves a unit
    /// placeholder behind so the tuple's length and remaining indices are
    /// unaffected. Returns `None` if the index is out of range, the type
    /// doesn't match, or the slot was already taken.
    pub fn take<T: 'static>(&mut self, idx: usize) -> Option<T> {
        let slot = self.0.get_mut(idx)?;
        if !slot.is::<T>() {
            return None;
        }
        let taken = std::mem::replace(slot, Box::new(()));
        taken.downcast::<T>().ok().map(|b| *b)
    }
}

impl fmt::Debug for Msg {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Msg(arity={})", self.0.len())
    }
}

/// Sent by the farm coordinator to the farmer actor once every worker it
/// ever spawned has died and no more work will arrive (§4.6).
#[derive(Debug, Clone, Copy)]
pub struct WorkComplete;

/// A sentinel a caller pushes down a farm's distribution channel to mark
/// "no more work after this point" without closing the channel itself.
#[derive(Debug, Clone, Copy)]
pub struct EndSentinel;

/// Delivered to a parent when a child's handler invocation faults. The
/// actor that faulted survives and continues with its next message
/// (§4.4, §8 property 6).
#[derive(Debug)]
pub struct ChildDied {
    /// Human-readable description of the fault (panic payload, formatted).
    pub error: String,
    /// Handle to the actor that faulted.
    pub actor: ActorHandle,
    /// The message whose processing triggered the fault.
    pub message: Msg,
}

/// Delivered to every watcher registered on an actor before its death was
/// finalized (§3 Invariant 4, §4.4).
#[derive(Debug, Clone)]
pub struct Obit {
    /// Handle to the actor that died. Sending to it after this point is a
    /// harmless no-op (its mailbox is closed).
    pub actor: ActorHandle,
    /// The dead actor's fully qualified name.
    pub full_name: FullName,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_element_roundtrip() {
        let msg = Msg::of(42_i64);
        assert_eq!(msg.get::<i64>(0), Some(&42));
        assert_eq!(msg.len(), 1);
    }

    #[test]
    fn tuple_elements_keep_distinct_types() {
        let msg = Msg::new(vec![Box::new(3_i64), Box::new("hi".to_string())]);
        assert_eq!(msg.get::<i64>(0), Some(&3));
        assert_eq!(msg.get::<String>(1), Some(&"hi".to_string()));
        assert_eq!(msg.get::<i64>(1), None);
    }

    #[test]
    fn take_consumes_and_downcasts() {
        let mut msg = Msg::of(String::from("owned"));
        let taken = msg.take::<String>(0);
        assert_eq!(taken, Some("owned".to_string()));
        // slot now holds a unit placeholder, re-taking fails
        assert_eq!(msg.take::<String>(0), None);
    }

    #[test]
    fn get_out_of_range_is_none() {
        let msg = Msg::of(1_i32);
        assert_eq!(msg.get::<i32>(5), None);
    }
}

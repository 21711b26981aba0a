// Layer 1: Standard library imports
use std::fmt::{self, Display};

// Layer 2: Third-party crate imports
use serde::{Deserialize, Serialize};
use uuid::Uuid;

// Layer 3: Internal module imports
// (none)

/// Unique identifier for an actor's lifetime inside the runtime.
///
/// Distinct from an actor's *name*: an `ActorId` identifies one spawned
/// instance and never repeats, while a name can be reused once its prior
/// holder has died and been removed from its parent's child set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ActorId(Uuid);

impl ActorId {
    /// Generate a new random `ActorId`.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for ActorId {
    fn default() -> Self {
        Self::new()
    }
}

impl Display for ActorId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// An actor's name relative to its parent, e.g. `"worker-3"`.
pub type LocalName = String;

/// A `:`-joined path from the group's guardian down to an actor, e.g.
/// `"my-group:worker-3:task-7"`.
///
/// Fully qualified names are the keys of the group membership registry
/// (§3 Invariant 5) and are what `send_by_full_name` and `Group::db_*`
/// diagnostics refer to.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FullName(String);

impl FullName {
    /// The name of the guardian itself, the root of every full name.
    pub fn root(group_name: impl Into<String>) -> Self {
        Self(group_name.into())
    }

    /// Append a local name as a child of this path.
    pub fn child(&self, local: &str) -> Self {
        Self(format!("{}:{local}", self.0))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for FullName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn actor_id_unique() {
        assert_ne!(ActorId::new(), ActorId::new());
    }

    #[test]
    fn full_name_nests_with_colons() {
        let root = FullName::root("grp");
        let child = root.child("worker-1");
        let grandchild = child.child("task-7");
        assert_eq!(grandchild.as_str(), "grp:worker-1:task-7");
    }

    #[test]
    fn full_name_display_matches_as_str() {
        let name = FullName::root("grp").child("a");
        assert_eq!(format!("{name}"), name.as_str());
    }
}

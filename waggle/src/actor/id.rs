//! Actor identity and the process-wide id registry.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

/// Unique identifier for an actor, assigned at spawn time.
///
/// Ids are positive, strictly increasing per registry, and never reused or
/// recycled. Two references carrying the same id address the same actor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ActorId(u64);

impl ActorId {
    /// Get the raw id value.
    pub fn as_u64(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for ActorId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Source of actor ids, shared by every node of a tree.
///
/// Wraps an atomic counter: [`IdRegistry::next_id`] is safe under unbounded
/// concurrent callers and never returns the same id twice. Gaps in the
/// sequence are acceptable.
///
/// The registry is an explicit object shared via `Arc` rather than a
/// process global: [`crate::runtime::ActorSystem`] owns one and threads it
/// through every node it spawns, and tests can inject a fresh registry per
/// run.
#[derive(Debug, Default)]
pub struct IdRegistry {
    next: AtomicU64,
}

impl IdRegistry {
    /// Create a registry whose first issued id is 1.
    pub fn new() -> Self {
        Self {
            next: AtomicU64::new(0),
        }
    }

    /// Allocate the next id.
    pub fn next_id(&self) -> ActorId {
        ActorId(self.next.fetch_add(1, Ordering::Relaxed) + 1)
    }
}

//! Actor lifecycle state machine.

use serde::{Deserialize, Serialize};

/// Lifecycle state of an actor.
///
/// # State Transitions
///
/// ```text
/// Started → Finished
/// ```
///
/// The transition happens exactly once per actor and is irreversible. A
/// poison pill tears an actor down without moving it to `Finished`; the
/// actor simply stops.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ActorState {
    /// Processing messages.
    Started,

    /// Done. Queues closed, no further messages accepted.
    Finished,
}

impl ActorState {
    /// Check if transition to the next state is valid.
    pub fn can_transition_to(&self, next: ActorState) -> bool {
        matches!((self, next), (ActorState::Started, ActorState::Finished))
    }

    /// Check if this is the terminal state.
    pub fn is_finished(&self) -> bool {
        matches!(self, ActorState::Finished)
    }
}

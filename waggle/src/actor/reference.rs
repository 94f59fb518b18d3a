//! Capability handles for addressing actors.
//!
//! Two handle types share the same shape at different levels of typing:
//! [`ActorRef`] carries both of an actor's endpoints and is what producers
//! use to feed payloads in, while [`ControlRef`] is the type-erased
//! capability (id + control endpoint) that lets actors of different payload
//! types be kept in one parent link or children map.

use crate::actor::{ActorId, ActorState, Control};
use crate::error::ActorError;
use std::fmt;
use std::hash::{Hash, Hasher};
use tokio::sync::mpsc;

/// Typed handle to an actor.
///
/// A reference is a value: clones are equivalent and freely shared across
/// tasks. It carries no ownership of the actor's resources, only the
/// capability to talk to it. Multiple holders may send concurrently; each
/// holder's own messages are delivered in send order.
///
/// References compare equal by id. The [`state`](ActorRef::state) field is a
/// snapshot taken when the reference was constructed, not a live view: two
/// references to the same actor are equal even when their snapshots differ.
pub struct ActorRef<T> {
    id: ActorId,
    state: ActorState,
    control_tx: mpsc::Sender<Control>,
    payload_tx: mpsc::Sender<T>,
}

impl<T> ActorRef<T> {
    pub(crate) fn new(
        id: ActorId,
        state: ActorState,
        control_tx: mpsc::Sender<Control>,
        payload_tx: mpsc::Sender<T>,
    ) -> Self {
        Self {
            id,
            state,
            control_tx,
            payload_tx,
        }
    }

    /// The addressed actor's id.
    pub fn id(&self) -> ActorId {
        self.id
    }

    /// The actor's state as observed when this reference was constructed.
    pub fn state(&self) -> ActorState {
        self.state
    }

    /// Deliver a business payload to the actor.
    ///
    /// Suspends the caller until the actor's receive loop takes the item
    /// (an unbuffered hand-off), so producers cannot run ahead of the
    /// consumer.
    ///
    /// # Errors
    ///
    /// [`ActorError::ChannelClosed`] if the actor has finished or was torn
    /// down.
    pub async fn send_payload(&self, value: T) -> Result<(), ActorError> {
        self.payload_tx
            .send(value)
            .await
            .map_err(|_| ActorError::ChannelClosed { actor: self.id })
    }

    /// Deliver a control message to the actor.
    ///
    /// Same hand-off and closure semantics as
    /// [`send_payload`](ActorRef::send_payload).
    pub async fn send_control(&self, message: Control) -> Result<(), ActorError> {
        self.control_tx
            .send(message)
            .await
            .map_err(|_| ActorError::ChannelClosed { actor: self.id })
    }

    /// Force the actor to shut down immediately.
    ///
    /// Sends a [`Control::PoisonPill`]: the actor closes both queues without
    /// notifying its parent or consulting its children. Descendants keep
    /// running; poison them explicitly if the whole subtree must stop.
    pub async fn poison(&self) -> Result<(), ActorError> {
        self.send_control(Control::PoisonPill(self.control_ref())).await
    }

    /// Downgrade to the type-erased control capability.
    pub fn control_ref(&self) -> ControlRef {
        ControlRef::new(self.id, self.state, self.control_tx.clone())
    }
}

impl<T> Clone for ActorRef<T> {
    fn clone(&self) -> Self {
        Self {
            id: self.id,
            state: self.state,
            control_tx: self.control_tx.clone(),
            payload_tx: self.payload_tx.clone(),
        }
    }
}

impl<T> PartialEq for ActorRef<T> {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl<T> Eq for ActorRef<T> {}

// Manual Debug: the payload type need not be Debug.
impl<T> fmt::Debug for ActorRef<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ActorRef")
            .field("id", &self.id)
            .field("state", &self.state)
            .finish()
    }
}

/// Type-erased capability handle for an actor.
///
/// Carries only the actor's id, its control endpoint, and a state snapshot.
/// This is what parent links, children maps, and control-message sources
/// hold, so that actors with different payload types can live in one tree.
///
/// Compared and hashed by id; the state snapshot is fixed at construction
/// time.
#[derive(Clone)]
pub struct ControlRef {
    id: ActorId,
    state: ActorState,
    control_tx: mpsc::Sender<Control>,
}

impl ControlRef {
    pub(crate) fn new(id: ActorId, state: ActorState, control_tx: mpsc::Sender<Control>) -> Self {
        Self {
            id,
            state,
            control_tx,
        }
    }

    /// The addressed actor's id.
    pub fn id(&self) -> ActorId {
        self.id
    }

    /// The actor's state as observed when this capability was constructed.
    pub fn state(&self) -> ActorState {
        self.state
    }

    /// Deliver a control message to the actor.
    ///
    /// # Errors
    ///
    /// [`ActorError::ChannelClosed`] if the actor has finished or was torn
    /// down.
    pub async fn send_control(&self, message: Control) -> Result<(), ActorError> {
        self.control_tx
            .send(message)
            .await
            .map_err(|_| ActorError::ChannelClosed { actor: self.id })
    }
}

impl PartialEq for ControlRef {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for ControlRef {}

impl Hash for ControlRef {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl fmt::Debug for ControlRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ControlRef")
            .field("id", &self.id)
            .field("state", &self.state)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::actor::IdRegistry;

    fn make_ref(id: ActorId, state: ActorState) -> ActorRef<u32> {
        let (control_tx, _control_rx) = mpsc::channel(1);
        let (payload_tx, _payload_rx) = mpsc::channel(1);
        ActorRef::new(id, state, control_tx, payload_tx)
    }

    #[test]
    fn test_refs_compare_by_id_not_state() {
        let registry = IdRegistry::new();
        let id = registry.next_id();
        let other = registry.next_id();

        let started = make_ref(id, ActorState::Started);
        let finished = make_ref(id, ActorState::Finished);
        let stranger = make_ref(other, ActorState::Started);

        assert_eq!(started, finished); // Same id, stale snapshots differ
        assert_ne!(started, stranger);
        assert_eq!(started.control_ref(), finished.control_ref());
    }

    #[test]
    fn test_state_is_a_snapshot() {
        let registry = IdRegistry::new();
        let reference = make_ref(registry.next_id(), ActorState::Finished);
        assert!(reference.state().is_finished());
        assert!(reference.control_ref().state().is_finished());
    }

    #[tokio::test]
    async fn test_send_to_closed_actor_fails() {
        let registry = IdRegistry::new();
        let id = registry.next_id();
        let (control_tx, control_rx) = mpsc::channel(1);
        let (payload_tx, payload_rx) = mpsc::channel::<u32>(1);
        drop(control_rx);
        drop(payload_rx);

        let reference = ActorRef::new(id, ActorState::Started, control_tx, payload_tx);
        assert!(matches!(
            reference.send_payload(7).await,
            Err(ActorError::ChannelClosed { actor }) if actor == id
        ));
        assert!(matches!(
            reference.poison().await,
            Err(ActorError::ChannelClosed { actor }) if actor == id
        ));
    }
}

//! Live actor state and the merged-receive loop.

use crate::actor::supervision::LoopDirective;
use crate::actor::{ActorId, ActorRef, ActorState, Control, ControlRef, IdRegistry, PayloadHandler};
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;
use tokio::sync::{mpsc, oneshot};

/// Capacity of the inbound payload queue.
///
/// A single slot makes the queue a hand-off: a sender parks until the
/// receive loop drains the previous item, so producers cannot run ahead of
/// the consumer.
pub(crate) const PAYLOAD_QUEUE_CAPACITY: usize = 1;

/// Capacity of the inbound control queue.
pub(crate) const CONTROL_QUEUE_CAPACITY: usize = 1;

/// The owning side of an actor.
///
/// Holds the actor's identity, lifecycle state, parent link, children map,
/// and the sender halves of its two queues (the receiver halves are owned by
/// the receive loop). Handlers get `&mut` access to the node during
/// dispatch; nothing else ever touches it, so none of this state needs a
/// lock.
///
/// # Invariants
///
/// - The parent link is fixed at spawn time and never changes.
/// - A child id, once registered in the children map, is never removed; a
///   child's `Finished` report refreshes its entry in place.
/// - State moves `Started → Finished` exactly once; both queues are closed
///   together, exactly once, when the loop exits.
pub struct ActorNode<T> {
    pub(crate) id: ActorId,
    pub(crate) state: ActorState,
    pub(crate) parent: Option<ControlRef>,
    pub(crate) children: HashMap<ActorId, ControlRef>,
    pub(crate) control_tx: mpsc::Sender<Control>,
    pub(crate) payload_tx: mpsc::Sender<T>,
    pub(crate) registry: Arc<IdRegistry>,
    pub(crate) completion_tx: Option<oneshot::Sender<()>>,
}

impl<T: Send + 'static> ActorNode<T> {
    /// Allocate a node: assign an id, create both queues empty, wire the
    /// parent link. The caller decides what to do with the receiver halves
    /// (normally: hand them to [`run_actor_loop`]).
    pub(crate) fn allocate(
        registry: Arc<IdRegistry>,
        parent: Option<ControlRef>,
        completion_tx: Option<oneshot::Sender<()>>,
    ) -> (
        Self,
        ActorRef<T>,
        mpsc::Receiver<T>,
        mpsc::Receiver<Control>,
    ) {
        let id = registry.next_id();
        let (payload_tx, payload_rx) = mpsc::channel(PAYLOAD_QUEUE_CAPACITY);
        let (control_tx, control_rx) = mpsc::channel(CONTROL_QUEUE_CAPACITY);

        let node = Self {
            id,
            state: ActorState::Started,
            parent,
            children: HashMap::new(),
            control_tx,
            payload_tx,
            registry,
            completion_tx,
        };
        let actor_ref = node.actor_ref();
        (node, actor_ref, payload_rx, control_rx)
    }

    /// Spawn a child actor running `handler`.
    ///
    /// The child's parent link is fixed to this actor, and the child is
    /// registered in this actor's children map before its loop starts. The
    /// returned reference is usable immediately: the hand-off queues make
    /// the first `send_payload` park until the child is ready to take it.
    ///
    /// This is the only way non-root actors enter the tree.
    pub fn create_child<H>(&mut self, handler: H) -> ActorRef<H::Payload>
    where
        H: PayloadHandler,
    {
        let (child, child_ref, payload_rx, control_rx) =
            ActorNode::allocate(Arc::clone(&self.registry), Some(self.control_ref()), None);
        self.children.insert(child_ref.id(), child_ref.control_ref());

        tracing::debug!(parent = %self.id, child = %child_ref.id(), "spawning child actor");
        tokio::spawn(run_actor_loop(child, handler, payload_rx, control_rx));
        child_ref
    }

    /// This actor's id.
    pub fn id(&self) -> ActorId {
        self.id
    }

    /// This actor's current lifecycle state.
    pub fn state(&self) -> ActorState {
        self.state
    }

    /// Id of this actor's parent, if any. Fixed at spawn time.
    pub fn parent_id(&self) -> Option<ActorId> {
        self.parent.as_ref().map(ControlRef::id)
    }

    /// Ids of every child ever registered under this actor.
    pub fn child_ids(&self) -> Vec<ActorId> {
        self.children.keys().copied().collect()
    }

    /// Create a typed reference to this actor, snapshotting its current
    /// state.
    pub fn actor_ref(&self) -> ActorRef<T> {
        ActorRef::new(
            self.id,
            self.state,
            self.control_tx.clone(),
            self.payload_tx.clone(),
        )
    }

    /// Create the type-erased control capability for this actor.
    pub fn control_ref(&self) -> ControlRef {
        ControlRef::new(self.id, self.state, self.control_tx.clone())
    }
}

impl<T> fmt::Debug for ActorNode<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut children: Vec<u64> = self.children.keys().map(|id| id.as_u64()).collect();
        children.sort_unstable();
        f.debug_struct("ActorNode")
            .field("id", &self.id)
            .field("state", &self.state)
            .field("parent", &self.parent.as_ref().map(ControlRef::id))
            .field("children", &children)
            .finish()
    }
}

/// Merged-receive loop: the unit of single-threaded-per-actor isolation.
///
/// Waits until either queue has a message (no fixed priority between the
/// two: `select!` polls in random order, so neither queue starves) and
/// dispatches: payloads to the caller-supplied handler, control messages to
/// the fixed supervision handler. Runs until the actor finishes (or is
/// torn down by a poison pill or a supervision violation); on the way out
/// both queues are closed together, exactly once, and the completion
/// notifier (if any) fires only when the actor actually finished.
pub(crate) async fn run_actor_loop<H>(
    mut node: ActorNode<H::Payload>,
    mut handler: H,
    mut payload_rx: mpsc::Receiver<H::Payload>,
    mut control_rx: mpsc::Receiver<Control>,
) where
    H: PayloadHandler,
{
    tracing::info!(actor = %node.id, "actor loop started");

    loop {
        let directive = tokio::select! {
            maybe_control = control_rx.recv() => match maybe_control {
                Some(control) => match node.handle_control(control).await {
                    Ok(directive) => directive,
                    Err(error) => {
                        tracing::error!(actor = %node.id, %error, "stopping actor");
                        LoopDirective::Stop
                    }
                },
                None => LoopDirective::Stop,
            },
            maybe_payload = payload_rx.recv() => match maybe_payload {
                Some(payload) => {
                    if let Err(error) = handler.on_payload(payload, &mut node).await {
                        tracing::error!(actor = %node.id, %error, "payload handler failed");
                    }
                    if node.state.is_finished() {
                        LoopDirective::Stop
                    } else {
                        LoopDirective::Continue
                    }
                }
                None => LoopDirective::Stop,
            },
        };

        if directive == LoopDirective::Stop {
            payload_rx.close();
            control_rx.close();
            break;
        }
    }

    if node.state.is_finished() {
        if let Some(completion_tx) = node.completion_tx.take() {
            let _ = completion_tx.send(());
        }
    }

    tracing::info!(actor = %node.id, state = ?node.state, "actor loop exited");
}

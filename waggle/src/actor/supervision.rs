//! Supervision protocol: completion propagation and forced teardown.
//!
//! The rules here are fixed; handlers cannot override how `Finished` and
//! `PoisonPill` are processed. Completion flows strictly upward: a child
//! reports `Finished` to its parent, and a parent whose children have all
//! reported finishes itself. A `Finished` from anyone other than a
//! registered child is a defect in the supervising logic and stops the
//! receiving actor.

use crate::actor::{ActorNode, ActorState, Control, ControlRef};
use crate::error::{ActorError, ProtocolViolation};
use tokio::sync::oneshot;

/// Classification of a control message's sender relative to the receiver.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum SenderClass {
    /// The sender is the receiver's stored parent.
    Parent,
    /// The sender is registered in the receiver's children map.
    Child,
    /// Neither parent nor child: a leaked reference or a bookkeeping bug.
    Unknown,
}

/// What the receive loop should do after a message was dispatched.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum LoopDirective {
    /// Keep receiving.
    Continue,
    /// Close both queues and exit.
    Stop,
}

impl<T: Send + 'static> ActorNode<T> {
    /// Classify `source` by id against the stored parent link and children
    /// map.
    pub(crate) fn classify_sender(&self, source: &ControlRef) -> SenderClass {
        match &self.parent {
            Some(parent) if parent.id() == source.id() => SenderClass::Parent,
            _ if self.children.contains_key(&source.id()) => SenderClass::Child,
            _ => SenderClass::Unknown,
        }
    }

    /// Fixed control handler, one message per call.
    ///
    /// Errors are protocol violations; the caller stops the loop without
    /// touching any actor state.
    pub(crate) async fn handle_control(
        &mut self,
        control: Control,
    ) -> Result<LoopDirective, ActorError> {
        match control {
            Control::Finished(source) => match self.classify_sender(&source) {
                SenderClass::Parent => Err(ProtocolViolation::FinishedFromParent {
                    actor: self.id,
                    sender: source.id(),
                }
                .into()),
                SenderClass::Unknown => Err(ProtocolViolation::FinishedFromUnknown {
                    actor: self.id,
                    sender: source.id(),
                }
                .into()),
                SenderClass::Child => {
                    tracing::debug!(actor = %self.id, child = %source.id(), "child finished");
                    // Refresh, never remove: the entry now carries the
                    // child's Finished snapshot.
                    self.children.insert(source.id(), source);
                    if self.children_finished() {
                        self.finish().await?;
                        Ok(LoopDirective::Stop)
                    } else {
                        Ok(LoopDirective::Continue)
                    }
                }
            },
            Control::PoisonPill(source) => {
                tracing::debug!(actor = %self.id, source = %source.id(), "poison pill received");
                Ok(LoopDirective::Stop)
            }
        }
    }

    /// True when every registered child has reported `Finished`.
    ///
    /// Trivially true for an actor that never spawned children.
    pub(crate) fn children_finished(&self) -> bool {
        self.children
            .values()
            .all(|child| child.state().is_finished())
    }

    /// Declare this actor's work complete.
    ///
    /// Transitions the state to `Finished` and, if a parent exists, reports
    /// up with a reference carrying the new state so the parent can refresh
    /// its children map. The receive loop then closes both queues and
    /// exits. Calling `finish` on an already-finished actor is a no-op.
    ///
    /// A leaf calls this from its handler once its unit of work is done
    /// (for instance on an empty, terminal payload). An actor that spawned
    /// children normally never calls it: the last child's report finishes
    /// it automatically.
    ///
    /// # Errors
    ///
    /// [`ActorError::ChannelClosed`] if the parent is already gone; the
    /// actor still counts as finished.
    pub async fn finish(&mut self) -> Result<(), ActorError> {
        if !self.state.can_transition_to(ActorState::Finished) {
            return Ok(());
        }
        self.state = ActorState::Finished;
        tracing::debug!(actor = %self.id, "actor finished");

        if let Some(parent) = &self.parent {
            parent
                .send_control(Control::Finished(self.control_ref()))
                .await?;
        }
        Ok(())
    }
}

/// One-shot handle resolving when the associated actor has finished and its
/// queues are closed.
///
/// Returned by [`crate::runtime::ActorSystem::spawn_root`] so a driver can
/// await the whole tree: the root finishes last, after every descendant has
/// reported up.
#[derive(Debug)]
pub struct Completion {
    receiver: oneshot::Receiver<()>,
}

impl Completion {
    pub(crate) fn new(receiver: oneshot::Receiver<()>) -> Self {
        Self { receiver }
    }

    /// Wait until the actor finishes.
    ///
    /// # Errors
    ///
    /// [`ActorError::Aborted`] if the actor's loop terminated without the
    /// actor finishing: it was poisoned or hit a protocol violation.
    pub async fn wait(self) -> Result<(), ActorError> {
        self.receiver.await.map_err(|_| ActorError::Aborted)
    }
}

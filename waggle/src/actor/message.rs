//! Control messages exchanged on the supervision channel.
//!
//! Business payloads travel on each actor's dedicated payload queue;
//! everything on the control queue is one of the variants below, processed
//! by the actor's fixed internal control handler.

use crate::actor::ControlRef;

/// Control messages driving the supervision protocol.
#[derive(Debug, Clone)]
pub enum Control {
    /// The sender has transitioned to `Finished`.
    ///
    /// A parent refreshes the sender's entry in its children map from the
    /// carried reference, and itself finishes once every registered child
    /// has reported in.
    Finished(ControlRef),

    /// Immediate forced shutdown: the receiver closes both of its queues
    /// without notifying its parent and without consulting its children.
    ///
    /// Not propagated to descendants: tearing down a whole subtree means
    /// poisoning each node explicitly.
    PoisonPill(ControlRef),
}

impl Control {
    /// The reference carried by this message, identifying its sender.
    pub fn source(&self) -> &ControlRef {
        match self {
            Control::Finished(source) | Control::PoisonPill(source) => source,
        }
    }
}

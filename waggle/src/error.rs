//! Error types for the waggle actor tree.

use crate::actor::ActorId;
use thiserror::Error;

/// Errors surfaced by actor operations and supervision.
#[derive(Debug, Clone, Error)]
pub enum ActorError {
    /// A supervision invariant was broken. Fatal to the offending actor's
    /// loop; never retried.
    #[error("protocol violation: {0}")]
    Protocol(#[from] ProtocolViolation),

    /// The target actor no longer accepts messages (its queues are closed).
    ///
    /// Callers must treat this as "the receiver is gone", not as a
    /// retryable condition.
    #[error("channel closed: actor {actor} is gone")]
    ChannelClosed {
        /// Id of the unreachable actor.
        actor: ActorId,
    },

    /// The actor's loop terminated without the actor reporting completion
    /// (poison pill or protocol violation).
    #[error("actor terminated without finishing")]
    Aborted,

    /// A payload handler failed.
    ///
    /// Handler failures are logged and do not tear the actor down; domain
    /// errors are expected to be converted into domain values before they
    /// reach the tree.
    #[error("handler execution failed: {0}")]
    ExecutionFailed(String),
}

/// Supervision defects: a control message arrived that no well-formed tree
/// produces. These indicate a bookkeeping bug (a leaked reference, a broken
/// parent link), not an environmental condition, and stop the receiving
/// actor's loop.
#[derive(Debug, Clone, Error)]
pub enum ProtocolViolation {
    /// `Finished` arrived from the actor's own parent. Completion flows
    /// strictly upward.
    #[error("actor {actor} received Finished from its own parent {sender}")]
    FinishedFromParent {
        /// The actor that received the message.
        actor: ActorId,
        /// The offending sender (the stored parent).
        sender: ActorId,
    },

    /// `Finished` arrived from a sender that is neither the parent nor a
    /// registered child.
    #[error("actor {actor} received Finished from unknown sender {sender}")]
    FinishedFromUnknown {
        /// The actor that received the message.
        actor: ActorId,
        /// The offending sender.
        sender: ActorId,
    },
}

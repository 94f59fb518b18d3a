//! Common imports for the waggle actor tree.

pub use crate::actor::{
    ActorId, ActorNode, ActorRef, ActorState, Completion, Control, ControlRef, IdRegistry,
    PayloadHandler,
};
pub use crate::error::{ActorError, ProtocolViolation};
pub use crate::runtime::ActorSystem;

// Re-export commonly used external types
pub use async_trait::async_trait;
pub use std::sync::Arc;
pub use std::time::Duration;

/// Convenience alias for fallible actor operations.
pub type Result<T> = std::result::Result<T, ActorError>;

//! # Waggle
//!
//! A supervised actor tree for concurrent fan-out pipelines.
//!
//! Actors communicate exclusively through message passing: each actor owns
//! two inbound queues (business payloads and control messages), merged by a
//! single receive loop that dispatches one message at a time. Trees are
//! built top-down (a handler spawns children and forwards payloads) and
//! completion flows back up: a child reports `Finished` to its parent, and
//! a parent finishes once every child has reported in.
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────┐
//! │ ActorSystem                                              │
//! │   owns the shared IdRegistry, spawns root actors         │
//! ├──────────────────────────────────────────────────────────┤
//! │ ActorRef<T> / ControlRef                                 │
//! │   clonable capability handles: send payloads / control   │
//! ├──────────────────────────────────────────────────────────┤
//! │ ActorNode<T>                                             │
//! │   queues, parent link, children map, merged-receive loop │
//! ├──────────────────────────────────────────────────────────┤
//! │ Supervision                                              │
//! │   Finished propagation, PoisonPill teardown, Completion  │
//! └──────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Quick Start
//!
//! ```
//! use waggle::prelude::*;
//!
//! struct Printer;
//!
//! #[async_trait]
//! impl PayloadHandler for Printer {
//!     type Payload = u32;
//!
//!     async fn on_payload(&mut self, payload: u32, node: &mut ActorNode<u32>) -> Result<()> {
//!         println!("got {payload}");
//!         node.finish().await
//!     }
//! }
//!
//! # #[tokio::main(flavor = "multi_thread")]
//! # async fn main() -> Result<()> {
//! let system = ActorSystem::new();
//! let (root, completion) = system.spawn_root(Printer);
//! root.send_payload(7).await?;
//! completion.wait().await?;
//! # Ok(())
//! # }
//! ```
//!
//! ## Pipeline fan-out
//!
//! The shape this crate exists for: one root per input folder, one child
//! per discovered file, one grandchild per output artifact, all running in
//! parallel on the worker pool.
//!
//! ```text
//! folder root ──► file child ──► artifact grandchild
//!            └──► file child ──► artifact grandchild
//!                           └──► artifact grandchild
//! ```
//!
//! Leaves call [`ActorNode::finish`] once their unit of work is done (for
//! instance on an empty, terminal payload); inner actors finish
//! automatically when their last child reports. The driver feeds the root
//! through its [`ActorRef`] and awaits the [`Completion`] handle returned
//! by [`ActorSystem::spawn_root`] to know when the whole tree is done.
//! Payload sends are unbuffered hand-offs, so a fast producer parks until
//! the consumer actor is ready; backpressure comes with the queue, not
//! from tuning.

#![deny(missing_docs)]

pub mod actor;
pub mod error;
pub mod prelude;
pub mod runtime;

pub use actor::{
    ActorId, ActorNode, ActorRef, ActorState, Completion, Control, ControlRef, IdRegistry,
    PayloadHandler,
};
pub use error::{ActorError, ProtocolViolation};
pub use runtime::ActorSystem;

//! Tree entry point owning the shared id registry.

use crate::actor::node::run_actor_loop;
use crate::actor::{ActorNode, ActorRef, Completion, IdRegistry, PayloadHandler};
use std::sync::Arc;
use tokio::sync::oneshot;

/// Owner of the shared [`IdRegistry`] and spawner of root actors.
///
/// A system is cheap to clone and carries no tasks of its own; every actor
/// it spawns runs as an independent task on the ambient tokio runtime.
/// Typical pipelines create one system and one root per input folder.
///
/// # Example
///
/// ```rust,ignore
/// let system = ActorSystem::new();
/// let (root, completion) = system.spawn_root(FolderHandler::default());
/// root.send_payload(folder).await?;
/// completion.wait().await?;
/// ```
#[derive(Debug, Clone)]
pub struct ActorSystem {
    registry: Arc<IdRegistry>,
}

impl ActorSystem {
    /// Create a system with a fresh registry.
    pub fn new() -> Self {
        Self {
            registry: Arc::new(IdRegistry::new()),
        }
    }

    /// Create a system over an existing registry.
    ///
    /// Lets tests pin id sequences by injecting a fresh registry per run,
    /// and lets several systems share one id space.
    pub fn with_registry(registry: Arc<IdRegistry>) -> Self {
        Self { registry }
    }

    /// The registry this system allocates ids from.
    pub fn registry(&self) -> &Arc<IdRegistry> {
        &self.registry
    }

    /// Spawn a root actor (no parent) running `handler`.
    ///
    /// Returns the reference used to feed the root, plus a [`Completion`]
    /// that resolves once the root has finished. Because completion
    /// propagates upward, that means the entire tree under it is done.
    ///
    /// Must be called from within a tokio runtime.
    pub fn spawn_root<H>(&self, handler: H) -> (ActorRef<H::Payload>, Completion)
    where
        H: PayloadHandler,
    {
        let (completion_tx, completion_rx) = oneshot::channel();
        let (root, actor_ref, payload_rx, control_rx) =
            ActorNode::allocate(Arc::clone(&self.registry), None, Some(completion_tx));

        tracing::debug!(actor = %actor_ref.id(), "spawning root actor");
        tokio::spawn(run_actor_loop(root, handler, payload_rx, control_rx));
        (actor_ref, Completion::new(completion_rx))
    }
}

impl Default for ActorSystem {
    fn default() -> Self {
        Self::new()
    }
}

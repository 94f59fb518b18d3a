//! Handler trait: the business-logic seam of an actor.

use crate::actor::ActorNode;
use crate::error::ActorError;
use async_trait::async_trait;

/// Business logic invoked for each payload an actor receives.
///
/// A handler is a value moved into its actor at spawn time. Dispatch is
/// strictly sequential per actor (`on_payload` is never called concurrently
/// for the same actor instance), which is what makes the `&mut` access to
/// the node safe without locks. Distinct actors run in parallel on the
/// runtime's worker pool.
///
/// The node handle lets a handler spawn children
/// ([`create_child`](ActorNode::create_child)), forward payloads down the
/// tree, and declare its own work complete ([`finish`](ActorNode::finish)).
/// An actor with no children leaves the tree only once its handler calls
/// `finish`; an actor that spawned children also finishes automatically when
/// the last of them reports completion.
///
/// # Example
///
/// ```rust,ignore
/// struct RowCounter {
///     rows: usize,
/// }
///
/// #[async_trait]
/// impl PayloadHandler for RowCounter {
///     type Payload = Vec<Record>;
///
///     async fn on_payload(
///         &mut self,
///         batch: Vec<Record>,
///         node: &mut ActorNode<Vec<Record>>,
///     ) -> Result<(), ActorError> {
///         if batch.is_empty() {
///             // Terminal payload: no more work coming.
///             return node.finish().await;
///         }
///         self.rows += batch.len();
///         Ok(())
///     }
/// }
/// ```
#[async_trait]
pub trait PayloadHandler: Send + 'static {
    /// Payload type this handler consumes.
    type Payload: Send + 'static;

    /// Handle one payload.
    ///
    /// # Errors
    ///
    /// Errors are logged and do not tear the actor down (error isolation).
    /// Domain failures that must be observed downstream should be converted
    /// into domain values instead.
    async fn on_payload(
        &mut self,
        payload: Self::Payload,
        node: &mut ActorNode<Self::Payload>,
    ) -> Result<(), ActorError>;
}

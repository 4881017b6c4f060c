//! Edges: statically-targeted transitions and runtime-routed conditionals.

use std::future::Future;
use std::sync::Arc;

use async_trait::async_trait;

use super::node::BoxError;
use crate::run_context::RunContext;

/// Routing function for a conditional edge.
///
/// Returns the name of the node to transition to, or the empty string when the
/// edge does not fire. Implemented by any matching async fn or closure via the
/// blanket impl.
///
/// The driver evaluates conditions with the initial input to `stream`, not the
/// state produced by the current node; callers depend on this.
#[async_trait]
pub trait EdgeCondition<S>: Send + Sync
where
    S: Send + 'static,
{
    /// Picks the next node name; empty string means "no edge fires here".
    async fn pick(&self, state: S, ctx: RunContext) -> Result<String, BoxError>;
}

#[async_trait]
impl<S, F, Fut> EdgeCondition<S> for F
where
    S: Send + 'static,
    F: Fn(S, RunContext) -> Fut + Send + Sync,
    Fut: Future<Output = Result<String, BoxError>> + Send,
{
    async fn pick(&self, state: S, ctx: RunContext) -> Result<String, BoxError> {
        (self)(state, ctx).await
    }
}

/// Outgoing edge of a node. The two arms carry disjoint payloads: a simple
/// edge has a compile-validated target and no condition, a conditional edge
/// has a condition and no pre-bound target.
pub(crate) enum Edge<S> {
    Simple { target: String },
    Conditional { condition: Arc<dyn EdgeCondition<S>> },
}

//! Graph node: a named async action over the state type `S`.
//!
//! [`NodeAction`] is the one step of work attached to a node: state in, state
//! out. Plain async fns and closures of the right shape implement it via the
//! blanket impl, so callers rarely implement the trait by hand.

use std::fmt;
use std::future::Future;
use std::sync::Arc;

use async_trait::async_trait;

use super::edge::Edge;
use crate::run_context::RunContext;

/// Boxed error carried by actions and conditions.
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// One node's unit of work: state in, next state out.
///
/// The executor treats the returned state as the next state regardless of side
/// effects the action performs. On failure the action still hands back a state
/// via [`ActionError`]; the driver records that state in the trace before
/// surfacing the error.
///
/// **Interaction**: registered with [`GraphBuilder::add_node`]; invoked by
/// [`Graph::stream`] with a clone of the call's [`RunContext`].
///
/// [`GraphBuilder::add_node`]: super::GraphBuilder::add_node
/// [`Graph::stream`]: super::Graph::stream
#[async_trait]
pub trait NodeAction<S>: Send + Sync
where
    S: Send + 'static,
{
    /// Runs the action. The context is an opaque handle; observe cancellation
    /// here if the caller needs it.
    async fn run(&self, state: S, ctx: RunContext) -> Result<S, ActionError<S>>;
}

#[async_trait]
impl<S, F, Fut> NodeAction<S> for F
where
    S: Send + 'static,
    F: Fn(S, RunContext) -> Fut + Send + Sync,
    Fut: Future<Output = Result<S, ActionError<S>>> + Send,
{
    async fn run(&self, state: S, ctx: RunContext) -> Result<S, ActionError<S>> {
        (self)(state, ctx).await
    }
}

/// Failure of a node action, still carrying the state the action produced.
///
/// The driver appends `state` to the trace even on failure, so a half-finished
/// state is observable in the returned trace.
#[derive(Debug)]
pub struct ActionError<S> {
    /// State the action reached before failing; recorded in the trace.
    pub state: S,
    /// Underlying cause, reported as `error in node <name>: <cause>`.
    pub source: BoxError,
}

impl<S> ActionError<S> {
    /// Builds a failure from the reached state and any error-like cause.
    pub fn new(state: S, source: impl Into<BoxError>) -> Self {
        Self {
            state,
            source: source.into(),
        }
    }
}

impl<S> fmt::Display for ActionError<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.source)
    }
}

/// A compiled node: name, optional action, outgoing edges in registration
/// order. Only the synthesised `END` node has no action.
pub struct Node<S> {
    pub(crate) name: String,
    pub(crate) action: Option<Arc<dyn NodeAction<S>>>,
    pub(crate) edges: Vec<Edge<S>>,
}

impl<S> Node<S> {
    /// Node name, unique within its graph.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Number of outgoing edges.
    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }
}

//! Streaming errors: every failure carries the trace observed so far.

use std::fmt;

use thiserror::Error;

use super::node::BoxError;
use super::trace::StateItem;

/// What went wrong during a `stream` call. Message strings are stable; tests
/// and log scraping match on them.
#[derive(Debug, Error)]
pub enum StreamErrorKind {
    /// The entry point did not resolve to a node at run time.
    #[error("current node is nil")]
    CurrentNodeNil,
    /// A simple edge's target was missing from the node table.
    #[error("node {0} not found")]
    NodeNotFound(String),
    /// A non-`END` node had no action.
    #[error("node {0} has no action")]
    NoAction(String),
    /// The current node had no outgoing edges to follow.
    #[error("node {0} does not have any edges")]
    NoEdges(String),
    /// A node action failed; the trace includes the state it returned.
    #[error("error in node {node}: {source}")]
    Action {
        node: String,
        #[source]
        source: BoxError,
    },
    /// An edge condition failed while routing out of `node`.
    #[error("error in edge from {node}: {source}")]
    Condition {
        node: String,
        #[source]
        source: BoxError,
    },
    /// A condition named a node that does not exist.
    #[error("{0} node not found")]
    ConditionTargetNotFound(String),
    /// Every outgoing edge declined to fire.
    #[error("reached dead end after {0}")]
    DeadEnd(String),
    /// The step safeguard fired (conditional edges formed a cycle).
    #[error("reached max step limit")]
    MaxSteps,
}

/// Failure of a `stream` call, carrying the trace up to the failing step.
///
/// On an action failure the trace already holds the state the failing action
/// returned; on an edge failure the trace ends with the last completed step.
#[derive(Debug)]
pub struct StreamError<S> {
    /// Snapshots recorded before the failure, `START` sentinel included.
    pub trace: Vec<StateItem<S>>,
    /// The failure itself.
    pub kind: StreamErrorKind,
}

impl<S> StreamError<S> {
    pub(crate) fn new(trace: Vec<StateItem<S>>, kind: StreamErrorKind) -> Self {
        Self { trace, kind }
    }

    /// Consumes the error, yielding the partial trace.
    pub fn into_trace(self) -> Vec<StateItem<S>> {
        self.trace
    }
}

impl<S> fmt::Display for StreamError<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.kind.fmt(f)
    }
}

impl<S: fmt::Debug> std::error::Error for StreamError<S> {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        std::error::Error::source(&self.kind)
    }
}

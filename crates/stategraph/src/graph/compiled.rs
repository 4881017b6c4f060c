//! Compiled graph and the streaming driver.
//!
//! Built by `GraphBuilder::compile`. Immutable: `stream` builds and returns a
//! per-call trace, so one graph value can serve concurrent calls.

use std::collections::HashMap;
use std::fmt;

use super::edge::Edge;
use super::node::Node;
use super::stream_error::{StreamError, StreamErrorKind};
use super::trace::StateItem;
use super::{END, MAX_STEPS, START};
use crate::run_context::RunContext;

/// An immutable, compiled graph of named nodes and their outgoing edges.
///
/// Created by [`GraphBuilder::compile`]. Drive it with [`Graph::stream`];
/// inspect it with [`Graph::node`] / [`Graph::node_names`].
///
/// [`GraphBuilder::compile`]: super::GraphBuilder::compile
pub struct Graph<S> {
    nodes: HashMap<String, Node<S>>,
    entry: String,
}

// Actions and conditions are trait objects, so Debug is written by hand:
// entry point and node names only, never the state or the callables.
impl<S> fmt::Debug for Graph<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut names: Vec<&str> = self.nodes.keys().map(String::as_str).collect();
        names.sort_unstable();
        f.debug_struct("Graph")
            .field("entry", &self.entry)
            .field("nodes", &names)
            .finish()
    }
}

impl<S> Graph<S>
where
    S: Clone + Send + Sync + 'static,
{
    pub(super) fn new(nodes: HashMap<String, Node<S>>, entry: String) -> Self {
        Self { nodes, entry }
    }

    /// Looks up a node by name.
    pub fn node(&self, name: &str) -> Option<&Node<S>> {
        self.nodes.get(name)
    }

    /// Names of all nodes in the graph, `END` included. Unordered.
    pub fn node_names(&self) -> impl Iterator<Item = &str> {
        self.nodes.keys().map(String::as_str)
    }

    /// Name of the node `stream` starts from.
    pub fn entry_point(&self) -> &str {
        &self.entry
    }

    /// Drives the graph from the entry point until `END` is reached, an error
    /// occurs, or [`MAX_STEPS`] actions have run.
    ///
    /// Returns the ordered trace of `(node, state)` snapshots, beginning with
    /// the `START` sentinel holding `input`. On success the final entry is the
    /// last action's output and the driver has transitioned into `END` (`END`
    /// itself never appears in the trace). On failure the trace observed so
    /// far rides on the [`StreamError`]; an action failure has already
    /// appended the failing action's returned state.
    ///
    /// Actions run strictly in sequence. `ctx` is cloned into every action and
    /// condition and never inspected by the driver.
    pub async fn stream(
        &self,
        input: S,
        ctx: RunContext,
    ) -> Result<Vec<StateItem<S>>, StreamError<S>> {
        tracing::debug!(entry = %self.entry, "streaming started");

        let mut trace = vec![StateItem {
            node: START.to_string(),
            state: input.clone(),
        }];

        let Some(mut current) = self.nodes.get(&self.entry) else {
            return Err(StreamError::new(trace, StreamErrorKind::CurrentNodeNil));
        };
        let mut current_state = input.clone();
        let mut step_count = 0;

        while step_count < MAX_STEPS {
            step_count += 1;

            if current.name == END {
                tracing::debug!(steps = step_count - 1, "END node reached, streaming stopped");
                return Ok(trace);
            }

            let Some(action) = &current.action else {
                return Err(StreamError::new(
                    trace,
                    StreamErrorKind::NoAction(current.name.clone()),
                ));
            };

            let next_state = match action.run(current_state, ctx.clone()).await {
                Ok(state) => {
                    trace.push(StateItem {
                        node: current.name.clone(),
                        state: state.clone(),
                    });
                    tracing::trace!(node = %current.name, step = step_count, "action completed");
                    state
                }
                Err(failure) => {
                    // The failing action's returned state still goes into the
                    // trace before the error is surfaced.
                    trace.push(StateItem {
                        node: current.name.clone(),
                        state: failure.state,
                    });
                    return Err(StreamError::new(
                        trace,
                        StreamErrorKind::Action {
                            node: current.name.clone(),
                            source: failure.source,
                        },
                    ));
                }
            };

            if current.edges.is_empty() {
                return Err(StreamError::new(
                    trace,
                    StreamErrorKind::NoEdges(current.name.clone()),
                ));
            }

            // Walk every edge in registration order; the last one that
            // resolves wins.
            let mut target: Option<&Node<S>> = None;
            for edge in &current.edges {
                match self.resolve_target(edge, &current.name, &input, &ctx).await {
                    Ok(Some(node)) => target = Some(node),
                    Ok(None) => {}
                    Err(kind) => return Err(StreamError::new(trace, kind)),
                }
            }

            let Some(next) = target else {
                return Err(StreamError::new(
                    trace,
                    StreamErrorKind::DeadEnd(current.name.clone()),
                ));
            };

            tracing::trace!(from = %current.name, to = %next.name, "edge resolved");
            current = next;
            current_state = next_state;
        }

        Err(StreamError::new(trace, StreamErrorKind::MaxSteps))
    }

    /// Resolves one edge to a node, or `None` when a condition declines.
    ///
    /// Conditions are evaluated with the initial input to `stream`, not the
    /// current state; callers depend on this.
    async fn resolve_target<'a>(
        &'a self,
        edge: &'a Edge<S>,
        from: &str,
        input: &S,
        ctx: &RunContext,
    ) -> Result<Option<&'a Node<S>>, StreamErrorKind> {
        match edge {
            Edge::Simple { target } => match self.nodes.get(target) {
                Some(node) => Ok(Some(node)),
                None => Err(StreamErrorKind::NodeNotFound(target.clone())),
            },
            Edge::Conditional { condition } => {
                let name = condition
                    .pick(input.clone(), ctx.clone())
                    .await
                    .map_err(|source| StreamErrorKind::Condition {
                        node: from.to_string(),
                        source,
                    })?;
                if name.is_empty() {
                    return Ok(None);
                }
                match self.nodes.get(&name) {
                    Some(node) => Ok(Some(node)),
                    None => Err(StreamErrorKind::ConditionTargetNotFound(name)),
                }
            }
        }
    }
}

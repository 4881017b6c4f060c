//! Graph builder: accumulate nodes and edges, validate in `compile`.
//!
//! Registration order is free: edges may name nodes that are registered later.
//! All validation happens in `compile()`, which leaves the builder untouched
//! on failure so it can be corrected and compiled again.

use std::collections::HashMap;
use std::sync::Arc;

use super::compile_error::CompileError;
use super::compiled::Graph;
use super::edge::{Edge, EdgeCondition};
use super::node::{Node, NodeAction};
use super::END;

enum BuilderEdge<S> {
    Simple {
        source: String,
        target: String,
    },
    Conditional {
        source: String,
        condition: Arc<dyn EdgeCondition<S>>,
    },
}

/// Mutable accumulator for a graph description. Used once, then discarded.
///
/// Generic over the state type `S`. Register actions with [`add_node`], wire
/// them with [`add_edge`] / [`add_conditional_edge`], pick a start with
/// [`set_entry_point`], then [`compile`] into an immutable [`Graph`].
/// Not intended for concurrent use.
///
/// [`add_node`]: GraphBuilder::add_node
/// [`add_edge`]: GraphBuilder::add_edge
/// [`add_conditional_edge`]: GraphBuilder::add_conditional_edge
/// [`set_entry_point`]: GraphBuilder::set_entry_point
/// [`compile`]: GraphBuilder::compile
pub struct GraphBuilder<S> {
    nodes: HashMap<String, Arc<dyn NodeAction<S>>>,
    edges: Vec<BuilderEdge<S>>,
    entry_point: Option<String>,
}

impl<S> Default for GraphBuilder<S>
where
    S: Clone + Send + Sync + 'static,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<S> GraphBuilder<S>
where
    S: Clone + Send + Sync + 'static,
{
    /// Creates an empty builder.
    pub fn new() -> Self {
        Self {
            nodes: HashMap::new(),
            edges: Vec::new(),
            entry_point: None,
        }
    }

    /// Registers a node under a unique name.
    ///
    /// # Panics
    ///
    /// Panics when `name` is already registered. Duplicate registration is a
    /// wiring bug, not a runtime condition.
    pub fn add_node(
        &mut self,
        name: impl Into<String>,
        action: impl NodeAction<S> + 'static,
    ) -> &mut Self {
        let name = name.into();
        if self.nodes.contains_key(&name) {
            panic!("node with name {name} already exists");
        }
        self.nodes.insert(name, Arc::new(action));
        self
    }

    /// Appends a simple edge. Neither endpoint needs to be registered yet;
    /// resolution happens in `compile`.
    pub fn add_edge(&mut self, source: impl Into<String>, target: impl Into<String>) -> &mut Self {
        self.edges.push(BuilderEdge::Simple {
            source: source.into(),
            target: target.into(),
        });
        self
    }

    /// Appends a conditional edge; the condition picks the target node by name
    /// at each step (empty string means the edge does not fire).
    pub fn add_conditional_edge(
        &mut self,
        source: impl Into<String>,
        condition: impl EdgeCondition<S> + 'static,
    ) -> &mut Self {
        self.edges.push(BuilderEdge::Conditional {
            source: source.into(),
            condition: Arc::new(condition),
        });
        self
    }

    /// Records the entry-point name. It need not be registered yet.
    pub fn set_entry_point(&mut self, name: impl Into<String>) -> &mut Self {
        self.entry_point = Some(name.into());
        self
    }

    /// Validates the accumulated description and produces an immutable
    /// [`Graph`].
    ///
    /// Validation order: node table (synthesising `END` when absent), then
    /// edges (source and simple-edge targets must resolve), then the entry
    /// point. On failure the builder is unchanged and can be compiled again.
    pub fn compile(&self) -> Result<Graph<S>, CompileError> {
        let mut nodes = self.compile_nodes();

        for edge in &self.edges {
            // The source resolves first, then the target; the error for an
            // edge with two dangling ends names the source.
            let (source, resolved) = match edge {
                BuilderEdge::Simple { source, target } => {
                    if !nodes.contains_key(source) {
                        return Err(CompileError::SourceNotFound(source.clone()));
                    }
                    if !nodes.contains_key(target) {
                        return Err(CompileError::TargetNotFound(target.clone()));
                    }
                    (
                        source,
                        Edge::Simple {
                            target: target.clone(),
                        },
                    )
                }
                BuilderEdge::Conditional { source, condition } => (
                    source,
                    Edge::Conditional {
                        condition: Arc::clone(condition),
                    },
                ),
            };
            match nodes.get_mut(source) {
                Some(node) => node.edges.push(resolved),
                None => return Err(CompileError::SourceNotFound(source.clone())),
            }
        }

        let entry = self
            .entry_point
            .clone()
            .ok_or(CompileError::EntryPointNotSet)?;
        if !nodes.contains_key(&entry) {
            return Err(CompileError::EntryPointNotFound(entry));
        }

        tracing::debug!(nodes = nodes.len(), entry = %entry, "graph compiled");
        Ok(Graph::new(nodes, entry))
    }

    fn compile_nodes(&self) -> HashMap<String, Node<S>> {
        let mut nodes: HashMap<String, Node<S>> = self
            .nodes
            .iter()
            .map(|(name, action)| {
                // A node registered under the END name keeps its terminal
                // semantics; its action is ignored.
                let action = (name != END).then(|| Arc::clone(action));
                (
                    name.clone(),
                    Node {
                        name: name.clone(),
                        action,
                        edges: Vec::new(),
                    },
                )
            })
            .collect();

        nodes.entry(END.to_string()).or_insert_with(|| Node {
            name: END.to_string(),
            action: None,
            edges: Vec::new(),
        });

        nodes
    }
}

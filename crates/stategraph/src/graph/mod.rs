//! State graph: builder, compiled graph, and the streaming driver.
//!
//! [`GraphBuilder`] accumulates nodes and edges and validates them in
//! `compile()`; [`Graph`] is the immutable result and owns `stream()`.

mod builder;
mod compile_error;
mod compiled;
mod edge;
mod node;
mod stream_error;
mod trace;

pub use builder::GraphBuilder;
pub use compile_error::CompileError;
pub use compiled::Graph;
pub use edge::EdgeCondition;
pub use node::{ActionError, BoxError, Node, NodeAction};
pub use stream_error::{StreamError, StreamErrorKind};
pub use trace::StateItem;

/// Sentinel name for the first trace entry. Never a node in the graph.
pub const START: &str = "START";

/// Name of the terminal node. Auto-synthesised by `compile()` when not
/// registered; has no action and no outgoing edges.
pub const END: &str = "END";

/// Hard cap on action invocations per `stream` call, guarding against
/// conditional-edge cycles.
pub const MAX_STEPS: usize = 10;

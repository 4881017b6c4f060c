//! Generic state-graph executor: state-in, state-out.
//!
//! Build a graph with [`GraphBuilder`] (named async actions over a caller-chosen
//! state type `S`, simple and conditional edges, an entry point), `compile()` it
//! into an immutable [`Graph`], then `stream(initial_state, ctx)` to drive it
//! step by step and collect the ordered trace of `(node, state)` snapshots.
//!
//! The executor never inspects `S`; it only threads it through actions. The
//! [`RunContext`] is an opaque cancellation/value handle passed through to every
//! action and condition.

pub mod graph;
pub mod run_context;

pub use graph::{
    ActionError, BoxError, CompileError, EdgeCondition, Graph, GraphBuilder, Node, NodeAction,
    StateItem, StreamError, StreamErrorKind, END, MAX_STEPS, START,
};
pub use run_context::RunContext;

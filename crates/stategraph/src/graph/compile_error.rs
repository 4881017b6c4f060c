//! Graph compilation errors.
//!
//! Returned by `GraphBuilder::compile` when edge endpoints or the entry point
//! do not resolve. The builder is left untouched on failure.

use thiserror::Error;

/// Error when compiling a graph. Message strings are stable; tests and log
/// scraping match on them.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CompileError {
    /// An edge's source name was never registered via `add_node`.
    #[error("source node {0} not found")]
    SourceNotFound(String),
    /// A simple edge's target name was never registered (and is not `END`).
    #[error("target node {0} not found")]
    TargetNotFound(String),
    /// `set_entry_point` was never called.
    #[error("entry point not set")]
    EntryPointNotSet,
    /// The entry-point name does not resolve to a node.
    #[error("entry point {0} not found")]
    EntryPointNotFound(String),
}

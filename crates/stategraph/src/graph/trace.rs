//! Trace entries recorded by `stream`.

/// One `(node, state)` snapshot in a stream trace.
///
/// The first entry of every trace is the `START` sentinel with the initial
/// input; each following entry is the name of the node that ran and the state
/// its action returned. `END` never appears as an entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StateItem<S> {
    /// Name of the node that produced `state` (or `START` for the input).
    pub node: String,
    /// Owned snapshot of the state after that node ran.
    pub state: S,
}

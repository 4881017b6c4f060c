//! Per-run context threaded into every action and condition.
//!
//! Carries a cancellation token and an immutable value bag. The executor never
//! inspects it; cancellation is observed inside actions, not between steps.

use std::collections::HashMap;
use std::sync::Arc;

use serde_json::Value;
use tokio_util::sync::CancellationToken;

/// Context for a single `stream` call. Cheap to clone; clones share the same
/// cancellation token and value bag.
///
/// The executor passes a clone into every action and condition and otherwise
/// leaves it alone. Actions that need preemptive cancellation must check
/// [`RunContext::is_cancelled`] (or await the token) themselves.
#[derive(Debug, Clone, Default)]
pub struct RunContext {
    cancel: CancellationToken,
    values: Arc<HashMap<String, Value>>,
}

impl RunContext {
    /// Creates an empty context: no values, not cancelled.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a context carrying the given value bag.
    pub fn with_values(values: HashMap<String, Value>) -> Self {
        Self {
            cancel: CancellationToken::new(),
            values: Arc::new(values),
        }
    }

    /// Looks up a value by key.
    pub fn value(&self, key: &str) -> Option<&Value> {
        self.values.get(key)
    }

    /// Requests cancellation; visible through every clone of this context.
    pub fn cancel(&self) {
        self.cancel.cancel();
    }

    /// True once [`RunContext::cancel`] has been called on any clone.
    pub fn is_cancelled(&self) -> bool {
        self.cancel.is_cancelled()
    }

    /// The underlying token, for actions that want to `select!` on it.
    pub fn cancellation_token(&self) -> &CancellationToken {
        &self.cancel
    }
}

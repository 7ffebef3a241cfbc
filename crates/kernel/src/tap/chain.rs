//! Filter chain - ordered handlers that transform a value in turn.
//!
//! Each handler receives the value produced by the previous one plus a
//! read-only context, and returns the next value. Handlers run in weight
//! order (lower = earlier); equal weights keep registration order.

use std::sync::Arc;

use parking_lot::RwLock;
use tracing::{debug, trace};

/// Signature of a filter handler.
pub type FilterFn<C> = dyn Fn(String, &C) -> String + Send + Sync;

/// A registered handler with its name and priority.
struct FilterHandler<C> {
    name: String,
    weight: i32,
    func: Arc<FilterFn<C>>,
}

/// Ordered chain of filter handlers for one tap.
pub struct FilterChain<C> {
    tap_name: &'static str,
    handlers: RwLock<Vec<FilterHandler<C>>>,
}

impl<C: 'static> FilterChain<C> {
    /// Create an empty chain for the named tap.
    pub fn new(tap_name: &'static str) -> Self {
        Self {
            tap_name,
            handlers: RwLock::new(Vec::new()),
        }
    }

    /// Name of the tap this chain serves.
    pub fn tap_name(&self) -> &'static str {
        self.tap_name
    }

    /// Register a handler.
    pub fn add<F>(&self, name: impl Into<String>, weight: i32, func: F)
    where
        F: Fn(String, &C) -> String + Send + Sync + 'static,
    {
        let name = name.into();
        debug!(tap = %self.tap_name, handler = %name, weight, "tap handler registered");

        let mut handlers = self.handlers.write();
        handlers.push(FilterHandler {
            name,
            weight,
            func: Arc::new(func),
        });
        // Stable sort keeps registration order within a weight.
        handlers.sort_by_key(|h| h.weight);
    }

    /// Remove every handler registered under `name`. Returns how many were
    /// removed.
    pub fn remove(&self, name: &str) -> usize {
        let mut handlers = self.handlers.write();
        let before = handlers.len();
        handlers.retain(|h| h.name != name);
        before - handlers.len()
    }

    /// Run the value through every handler.
    ///
    /// Handlers are snapshotted first so a handler may register further
    /// handlers without deadlocking; those only apply to later calls.
    pub fn apply(&self, value: String, context: &C) -> String {
        let funcs: Vec<Arc<FilterFn<C>>> = self
            .handlers
            .read()
            .iter()
            .map(|h| Arc::clone(&h.func))
            .collect();

        if funcs.is_empty() {
            trace!(tap = %self.tap_name, "no handlers registered for tap");
            return value;
        }

        let output = funcs.iter().fold(value, |acc, func| (**func)(acc, context));
        trace!(tap = %self.tap_name, handlers = funcs.len(), "tap applied");
        output
    }

    /// Check if any handler is registered.
    pub fn has_handlers(&self) -> bool {
        !self.handlers.read().is_empty()
    }

    /// Get the count of registered handlers.
    pub fn handler_count(&self) -> usize {
        self.handlers.read().len()
    }

    /// Handler names in invocation order.
    pub fn handler_names(&self) -> Vec<String> {
        self.handlers.read().iter().map(|h| h.name.clone()).collect()
    }

    /// Remove all handlers.
    pub fn clear(&self) {
        self.handlers.write().clear();
    }
}

impl<C: 'static> std::fmt::Debug for FilterChain<C> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FilterChain")
            .field("tap", &self.tap_name)
            .field("handlers", &self.handler_names())
            .finish()
    }
}

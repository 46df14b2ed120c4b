use std::collections::HashMap;
use std::sync::Arc;
use tracing::{info, warn};

use super::RouteHandler;

/// Named collection of handlers awaiting registration
///
/// Lets composition code refer to handlers by name (e.g. from a config file)
/// and map them onto a route table later.
#[derive(Default, Clone)]
pub struct HandlerRegistry {
    handlers: HashMap<String, Arc<dyn RouteHandler>>,
}

impl HandlerRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a handler under its own name
    ///
    /// **IMPORTANT**: If a handler with the same name already exists, it will be
    /// replaced.
    pub fn insert(&mut self, handler: Arc<dyn RouteHandler>) {
        let handler_name = handler.name().to_string();
        if self.handlers.insert(handler_name.clone(), handler).is_some() {
            warn!(
                handler_name = %handler_name,
                total_handlers = self.handlers.len(),
                "Replaced existing handler"
            );
        } else {
            info!(
                handler_name = %handler_name,
                total_handlers = self.handlers.len(),
                "Handler registered successfully"
            );
        }
    }

    #[must_use]
    pub fn get(&self, name: &str) -> Option<Arc<dyn RouteHandler>> {
        self.handlers.get(name).map(Arc::clone)
    }

    /// Handler names, sorted for stable output
    #[must_use]
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.handlers.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }
}

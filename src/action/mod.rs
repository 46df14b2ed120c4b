//! # Action Module
//!
//! Turns one handler annotated with route attributes into one endpoint per
//! attribute.
//!
//! ## Request Flow
//!
//! 1. Reject a missing route builder or handler
//! 2. Build the handler's dispatch target once
//! 3. Scan the handler's metadata for route attributes
//! 4. For each attribute with a pattern: map an endpoint, then queue a
//!    convention that copies the handler metadata and sets display name,
//!    route name and match order
//! 5. Fail if no attribute had a pattern
//! 6. Return a composite handle over every mapped endpoint
//!
//! ## Example
//!
//! ```rust
//! use std::sync::Arc;
//! use brrtmap::action::map_action;
//! use brrtmap::dispatcher::HandlerResponse;
//! use brrtmap::handler::ActionHandler;
//! use brrtmap::metadata::RouteAttribute;
//! use brrtmap::router::{ConventionBuilder, RouteTable};
//!
//! let handler = ActionHandler::new("list_pets", |_req| {
//!     HandlerResponse::json(200, serde_json::json!([]))
//! })
//! .route(RouteAttribute::new("/pets").with_name("list_pets"))
//! .route(RouteAttribute::new("/animals").with_order(5));
//!
//! let mut table = RouteTable::default();
//! let conventions = map_action(&mut table, Arc::new(handler)).unwrap();
//! conventions.require_authorization(Some("reader"));
//! assert_eq!(conventions.len(), 2);
//!
//! let router = table.build().unwrap();
//! let names: Vec<&str> = router.endpoints().iter().map(|e| e.display_name()).collect();
//! assert_eq!(names, vec!["list_pets", "/animals"]);
//! ```

mod convention;
mod map;
#[cfg(test)]
mod tests;

pub use convention::ActionConventionBuilder;
pub use map::{map_action, map_named, register_endpoint, register_from_handler, register_with};

//! # Router Module
//!
//! The router abstraction handler registration talks to, plus a reference
//! implementation that turns registrations into a matchable route set.
//!
//! ## Overview
//!
//! - [`EndpointRouteBuilder`] - the consumed abstraction: `map(pattern, target)`
//!   creates one draft endpoint and returns its configuration handle
//! - [`EndpointConventionBuilder`] - that handle; conventions attached to it
//!   run after the router's defaults and before finalization
//! - [`RouteTable`] - a mutable table implementing `EndpointRouteBuilder`
//! - [`Router`] - the immutable result of [`RouteTable::build`]
//!
//! ## Architecture
//!
//! Registration is two-phase:
//!
//! 1. **Draft**: each `map` call stores a [`RouteEndpointBuilder`] holding the
//!    pattern, the shared dispatch target and default name/order.
//! 2. **Seal**: `build` applies every convention to its draft (last writer
//!    wins), freezes the result into [`RouteEndpoint`]s and indexes them in a
//!    radix tree for matching.
//!
//! ## Example
//!
//! ```rust
//! use brrtmap::dispatcher::{DispatchTarget, HandlerRequest, HandlerResponse};
//! use brrtmap::router::{EndpointRouteBuilder, RouteTable};
//! use http::Method;
//!
//! let mut table = RouteTable::default();
//! let target = DispatchTarget::new("get_pet", |req| {
//!     HandlerResponse::json(200, serde_json::json!({ "id": req.get_path_param("id") }))
//! });
//! table.map("/pets/{id}", target);
//! let router = table.build().unwrap();
//!
//! let m = router.route(Method::GET, "/pets/42").unwrap();
//! assert_eq!(m.get_path_param("id"), Some("42"));
//! let resp = m.dispatch(HandlerRequest::new(Method::GET, "/pets/42"));
//! assert_eq!(resp.body["id"], "42");
//! ```

mod builder;
mod convention;
mod core;
mod endpoint;
mod radix;
mod table;

pub use builder::EndpointRouteBuilder;
pub use convention::{Convention, ConventionBuilder, EndpointConventionBuilder};
pub use core::{ParamVec, RouteMatch, Router, MAX_INLINE_PARAMS};
pub use endpoint::{RouteEndpoint, RouteEndpointBuilder};
pub use table::RouteTable;

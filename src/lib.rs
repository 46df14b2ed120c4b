//! # brrtmap
//!
//! **brrtmap** turns a single handler annotated with one or more route
//! attributes into named, ordered endpoints in a BRRTRouter-style route table.
//!
//! ## Overview
//!
//! A handler declares its routing intent as metadata: any number of
//! [`metadata::RouteAttribute`]s (pattern, optional name, optional order)
//! alongside other tags such as allowed methods or authorization
//! requirements. [`action::map_action`] reads that metadata and registers
//! one endpoint per usable pattern, all sharing one compiled
//! [`dispatcher::DispatchTarget`].
//!
//! ## Architecture
//!
//! - **[`metadata`]** - Metadata tags and the scanner that reads route intent
//! - **[`handler`]** - The [`handler::RouteHandler`] capability trait and a handler registry
//! - **[`dispatcher`]** - Request/response types and dispatch targets
//! - **[`router`]** - The route builder abstraction and a reference route table
//! - **[`action`]** - Handler-to-endpoint registration
//! - **[`config`]** - Route table configuration (YAML + environment)
//! - **[`logging`]** - `tracing` subscriber setup
//!
//! ### Registration Flow
//!
//! ```mermaid
//! sequenceDiagram
//!     participant App as Startup code
//!     participant Map as action::map_action
//!     participant Build as DispatchTargetBuilder
//!     participant Scan as metadata::scan
//!     participant Table as RouteTable
//!
//!     App->>Map: map_action(&mut table, handler)
//!     Map->>Build: build(handler)
//!     Build-->>Map: DispatchTarget (shared)
//!     Map->>Scan: scan(handler)
//!     Scan-->>Map: route attributes + metadata
//!     loop each attribute with a pattern
//!         Map->>Table: map(pattern, target)
//!         Table-->>Map: EndpointConventionBuilder
//!         Map->>Map: queue metadata/name/order convention
//!     end
//!     Map-->>App: ActionConventionBuilder
//!     App->>Table: build()
//!     Table->>Table: defaults, then conventions, then seal
//!     Table-->>App: Router
//! ```
//!
//! ## Quick Start
//!
//! ```rust
//! use std::sync::Arc;
//! use brrtmap::action::map_action;
//! use brrtmap::dispatcher::{HandlerRequest, HandlerResponse};
//! use brrtmap::handler::ActionHandler;
//! use brrtmap::metadata::{MetadataTag, RouteAttribute};
//! use brrtmap::router::RouteTable;
//! use http::Method;
//!
//! let get_pet = ActionHandler::new("get_pet", |req| {
//!     HandlerResponse::json(200, serde_json::json!({ "id": req.get_path_param("id") }))
//! })
//! .route(RouteAttribute::new("/pets/{id}").with_name("get_pet"))
//! .with_metadata(MetadataTag::HttpMethods(vec![Method::GET]));
//!
//! let mut table = RouteTable::default();
//! map_action(&mut table, Arc::new(get_pet)).expect("handler declares a route");
//! let router = table.build().expect("unique route names");
//!
//! let resp = router
//!     .dispatch(HandlerRequest::new(Method::GET, "/pets/12"))
//!     .expect("route matched");
//! assert_eq!(resp.status, 200);
//! ```
//!
//! ## Runtime Considerations
//!
//! Registration is a synchronous startup phase. [`router::RouteTable`] is
//! mutated without locking, so `map` calls against one table must not run
//! concurrently. The [`router::Router`] produced by `build` is immutable and
//! can be shared across threads for matching.

pub mod action;
pub mod config;
pub mod dispatcher;
pub mod error;
pub mod handler;
mod ids;
pub mod logging;
pub mod metadata;
pub mod router;

pub use action::{map_action, map_named, register_from_handler, ActionConventionBuilder};
pub use error::{RegistrationError, RouteTableError};
pub use ids::EndpointId;
pub use router::{ConventionBuilder, EndpointRouteBuilder, RouteTable, Router};

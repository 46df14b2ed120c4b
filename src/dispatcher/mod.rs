//! # Dispatcher Module
//!
//! Request/response types and the [`DispatchTarget`] every endpoint invokes.
//!
//! ## Overview
//!
//! Registration compiles a handler into a dispatch target exactly once and
//! hands the same target to every endpoint the handler produces:
//!
//! ```rust
//! use brrtmap::dispatcher::{DispatchTarget, HandlerRequest, HandlerResponse};
//! use http::Method;
//!
//! let target = DispatchTarget::new("ping", |_req| {
//!     HandlerResponse::json(200, serde_json::json!({ "pong": true }))
//! });
//! let shared = target.clone();
//! assert!(target.ptr_eq(&shared));
//!
//! let resp = shared.invoke(HandlerRequest::new(Method::GET, "/ping"));
//! assert_eq!(resp.status, 200);
//! ```
//!
//! ## Error Handling
//!
//! - Handler panics are caught and return 500 responses
//! - Nothing here mutates a target after construction

mod core;

pub use core::{
    DirectDispatch, DispatchTarget, DispatchTargetBuilder, HandlerFn, HandlerRequest,
    HandlerResponse, HeaderVec, MAX_INLINE_HEADERS,
};

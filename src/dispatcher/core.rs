//! Dispatcher core module - the invocable form of a handler.
//!
//! A [`DispatchTarget`] is built once per registration call and shared by
//! reference between every endpoint derived from the same handler. It is
//! never mutated after construction, which is what makes concurrent reads
//! during serving safe.

use http::Method;
use serde_json::Value;
use smallvec::SmallVec;
use std::fmt;
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, error};

use crate::handler::RouteHandler;
use crate::router::ParamVec;

/// Maximum inline headers before heap allocation
pub const MAX_INLINE_HEADERS: usize = 16;

/// Stack-allocated header storage
///
/// Header names use `Arc<str>` since they repeat across requests; values are
/// per-request data.
pub type HeaderVec = SmallVec<[(Arc<str>, String); MAX_INLINE_HEADERS]>;

/// Request data passed to a dispatch target
#[derive(Debug, Clone)]
pub struct HandlerRequest {
    /// HTTP method (GET, POST, etc.)
    pub method: Method,
    /// Request path
    pub path: String,
    /// Path parameters extracted from the URL (stack-allocated for ≤8 params)
    pub path_params: ParamVec,
    /// HTTP headers (stack-allocated for ≤16 headers)
    pub headers: HeaderVec,
    /// Request body parsed as JSON (if present)
    pub body: Option<Value>,
}

impl HandlerRequest {
    /// Bare request for `method` and `path`
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            path_params: ParamVec::new(),
            headers: HeaderVec::new(),
            body: None,
        }
    }

    /// Attach a JSON body
    #[must_use]
    pub fn with_body(mut self, body: Value) -> Self {
        self.body = Some(body);
        self
    }

    /// Get a path parameter by name
    ///
    /// Uses "last write wins" semantics: if duplicate parameter names exist
    /// at different path depths (e.g., `/org/{id}/team/{team_id}/user/{id}`),
    /// returns the last occurrence (the user id, not the org id).
    #[inline]
    #[must_use]
    pub fn get_path_param(&self, name: &str) -> Option<&str> {
        self.path_params
            .iter()
            .rfind(|(k, _)| k.as_ref() == name)
            .map(|(_, v)| v.as_str())
    }

    /// Get a header by name (case-insensitive per RFC 7230)
    #[inline]
    #[must_use]
    pub fn get_header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }
}

/// Response data returned by a dispatch target
#[derive(Debug, Clone)]
pub struct HandlerResponse {
    /// HTTP status code (200, 404, 500, etc.)
    pub status: u16,
    /// HTTP response headers (stack-allocated for ≤16 headers)
    pub headers: HeaderVec,
    /// Response body as JSON
    pub body: Value,
}

impl HandlerResponse {
    /// Create a JSON response with default headers
    #[must_use]
    pub fn json(status: u16, body: Value) -> Self {
        let mut headers = HeaderVec::new();
        headers.push((Arc::from("content-type"), "application/json".to_string()));
        Self {
            status,
            headers,
            body,
        }
    }

    /// Create an error response
    #[must_use]
    pub fn error(status: u16, message: &str) -> Self {
        Self::json(status, serde_json::json!({ "error": message }))
    }

    /// Get a header by name
    #[inline]
    #[must_use]
    pub fn get_header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    /// Add or update a header
    pub fn set_header(&mut self, name: &str, value: String) {
        self.headers.retain(|(k, _)| !k.eq_ignore_ascii_case(name));
        self.headers.push((Arc::from(name), value));
    }
}

/// Uniform signature every dispatch target exposes to the router
pub type HandlerFn = dyn Fn(HandlerRequest) -> HandlerResponse + Send + Sync;

/// Compiled, invocable form of a handler
///
/// Cloning is an `Arc` clone: every clone refers to the same target, which
/// [`DispatchTarget::ptr_eq`] can verify.
#[derive(Clone)]
pub struct DispatchTarget {
    handler_name: Arc<str>,
    call: Arc<HandlerFn>,
}

impl DispatchTarget {
    pub fn new<F>(handler_name: &str, f: F) -> Self
    where
        F: Fn(HandlerRequest) -> HandlerResponse + Send + Sync + 'static,
    {
        Self {
            handler_name: Arc::from(handler_name),
            call: Arc::new(f),
        }
    }

    /// Name of the handler this target was built from
    #[must_use]
    pub fn handler_name(&self) -> &str {
        &self.handler_name
    }

    /// True when both values refer to the same compiled target
    #[must_use]
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.call, &other.call)
    }

    /// Invoke the target
    ///
    /// A panicking handler is converted into a 500 response.
    pub fn invoke(&self, req: HandlerRequest) -> HandlerResponse {
        let started = Instant::now();
        let method = req.method.clone();
        let path = req.path.clone();
        match std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| (self.call)(req))) {
            Ok(response) => {
                debug!(
                    handler_name = %self.handler_name,
                    method = %method,
                    path = %path,
                    status = response.status,
                    duration_us = started.elapsed().as_micros(),
                    "Handler execution complete"
                );
                response
            }
            Err(panic) => {
                let panic_message = panic
                    .downcast_ref::<&str>()
                    .map(|s| (*s).to_string())
                    .or_else(|| panic.downcast_ref::<String>().cloned())
                    .unwrap_or_else(|| "unknown panic".to_string());
                error!(
                    handler_name = %self.handler_name,
                    method = %method,
                    path = %path,
                    panic_message = %panic_message,
                    "Handler panicked - CRITICAL"
                );
                HandlerResponse::error(500, &format!("Handler panicked: {}", panic_message))
            }
        }
    }
}

impl fmt::Debug for DispatchTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DispatchTarget")
            .field("handler_name", &self.handler_name)
            .finish_non_exhaustive()
    }
}

/// Turns a handler into its dispatch target
///
/// Implementations must be deterministic and free of side effects; the
/// registration core calls `build` exactly once per handler registration.
pub trait DispatchTargetBuilder {
    fn build(&self, handler: Arc<dyn RouteHandler>) -> DispatchTarget;
}

/// Builder that forwards requests straight to [`RouteHandler::handle`]
#[derive(Debug, Clone, Copy, Default)]
pub struct DirectDispatch;

impl DispatchTargetBuilder for DirectDispatch {
    fn build(&self, handler: Arc<dyn RouteHandler>) -> DispatchTarget {
        let name = handler.name().to_string();
        DispatchTarget::new(&name, move |req| handler.handle(req))
    }
}

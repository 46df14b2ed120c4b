use std::fmt;
use std::sync::Arc;

use crate::dispatcher::{HandlerFn, HandlerRequest, HandlerResponse};
use crate::metadata::{HandlerMetadata, MetadataTag, RouteAttribute};

/// A callable handler that carries declarative routing metadata
///
/// This is the capability query the registration core relies on: the
/// handler reports its metadata (route attributes included) once, and
/// handles requests through a single uniform entry point.
pub trait RouteHandler: Send + Sync {
    /// Stable handler name used in logs and errors
    fn name(&self) -> &str;

    /// Every metadata tag declared on the handler, in declaration order
    fn metadata(&self) -> HandlerMetadata;

    /// Handle one request
    fn handle(&self, req: HandlerRequest) -> HandlerResponse;
}

/// Closure-backed handler with attached metadata
///
/// # Example
///
/// ```rust
/// use brrtmap::dispatcher::HandlerResponse;
/// use brrtmap::handler::{ActionHandler, RouteHandler};
/// use brrtmap::metadata::RouteAttribute;
///
/// let handler = ActionHandler::new("get_pet", |req| {
///     HandlerResponse::json(200, serde_json::json!({ "id": req.get_path_param("id") }))
/// })
/// .route(RouteAttribute::new("/pets/{id}").with_name("get_pet"));
///
/// assert_eq!(handler.metadata().len(), 1);
/// ```
#[derive(Clone)]
pub struct ActionHandler {
    name: String,
    call: Arc<HandlerFn>,
    metadata: Vec<MetadataTag>,
}

impl ActionHandler {
    pub fn new<F>(name: impl Into<String>, f: F) -> Self
    where
        F: Fn(HandlerRequest) -> HandlerResponse + Send + Sync + 'static,
    {
        Self {
            name: name.into(),
            call: Arc::new(f),
            metadata: Vec::new(),
        }
    }

    /// Declare a route attribute
    #[must_use]
    pub fn route(mut self, attr: RouteAttribute) -> Self {
        self.metadata.push(MetadataTag::Route(attr));
        self
    }

    /// Declare any other metadata tag
    #[must_use]
    pub fn with_metadata(mut self, tag: MetadataTag) -> Self {
        self.metadata.push(tag);
        self
    }
}

impl RouteHandler for ActionHandler {
    fn name(&self) -> &str {
        &self.name
    }

    fn metadata(&self) -> HandlerMetadata {
        HandlerMetadata::new(self.metadata.clone())
    }

    fn handle(&self, req: HandlerRequest) -> HandlerResponse {
        (self.call)(req)
    }
}

impl fmt::Debug for ActionHandler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ActionHandler")
            .field("name", &self.name)
            .field("metadata", &self.metadata)
            .finish_non_exhaustive()
    }
}

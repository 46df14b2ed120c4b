use http::Method;

use crate::dispatcher::{DispatchTarget, HandlerRequest, HandlerResponse};
use crate::ids::EndpointId;
use crate::metadata::EndpointMetadata;

/// Draft endpoint under construction
///
/// Produced by [`super::EndpointRouteBuilder::map`] with the router's
/// defaults filled in. Conventions mutate the draft; [`RouteTable::build`]
/// then seals it into a [`RouteEndpoint`].
///
/// [`RouteTable::build`]: super::RouteTable::build
#[derive(Debug, Clone)]
pub struct RouteEndpointBuilder {
    pattern: String,
    target: DispatchTarget,
    /// Human readable name shown in logs and diagnostics
    pub display_name: Option<String>,
    /// Name used for by-name lookups; `None` leaves the endpoint unnamed
    pub route_name: Option<String>,
    /// Match order; lower values win ties
    pub order: i32,
    /// Endpoint-owned metadata
    pub metadata: EndpointMetadata,
}

impl RouteEndpointBuilder {
    pub fn new(pattern: impl Into<String>, target: DispatchTarget, order: i32) -> Self {
        Self {
            pattern: pattern.into(),
            target,
            display_name: None,
            route_name: None,
            order,
            metadata: EndpointMetadata::new(),
        }
    }

    #[must_use]
    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    #[must_use]
    pub fn target(&self) -> &DispatchTarget {
        &self.target
    }

    /// Seal the draft
    ///
    /// `full_pattern` is the pattern with any router base path applied and
    /// `sequence` the registration index used as the final tie-break.
    pub(crate) fn build(self, full_pattern: String, sequence: usize) -> RouteEndpoint {
        let display_name = self.display_name.unwrap_or_else(|| self.pattern.clone());
        RouteEndpoint {
            id: EndpointId::new(),
            pattern: full_pattern,
            display_name,
            route_name: self.route_name,
            order: self.order,
            sequence,
            metadata: self.metadata,
            target: self.target,
        }
    }
}

/// Finalized, immutable endpoint owned by a [`super::Router`]
#[derive(Debug, Clone)]
pub struct RouteEndpoint {
    id: EndpointId,
    pattern: String,
    display_name: String,
    route_name: Option<String>,
    order: i32,
    sequence: usize,
    metadata: EndpointMetadata,
    target: DispatchTarget,
}

impl RouteEndpoint {
    #[must_use]
    pub fn id(&self) -> EndpointId {
        self.id
    }

    /// Pattern including the router base path
    #[must_use]
    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    #[must_use]
    pub fn display_name(&self) -> &str {
        &self.display_name
    }

    #[must_use]
    pub fn route_name(&self) -> Option<&str> {
        self.route_name.as_deref()
    }

    #[must_use]
    pub fn order(&self) -> i32 {
        self.order
    }

    /// Position in registration order
    #[must_use]
    pub fn sequence(&self) -> usize {
        self.sequence
    }

    #[must_use]
    pub fn metadata(&self) -> &EndpointMetadata {
        &self.metadata
    }

    #[must_use]
    pub fn target(&self) -> &DispatchTarget {
        &self.target
    }

    /// True unless the endpoint restricts methods and `method` is not listed
    #[must_use]
    pub fn allows(&self, method: &Method) -> bool {
        self.metadata
            .http_methods()
            .is_none_or(|methods| methods.contains(method))
    }

    pub fn invoke(&self, req: HandlerRequest) -> HandlerResponse {
        self.target.invoke(req)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metadata::MetadataTag;

    fn target() -> DispatchTarget {
        DispatchTarget::new("t", |_req| HandlerResponse::json(200, serde_json::Value::Null))
    }

    #[test]
    fn test_display_name_defaults_to_pattern() {
        let endpoint = RouteEndpointBuilder::new("/a", target(), 0).build("/a".to_string(), 0);
        assert_eq!(endpoint.display_name(), "/a");
    }

    #[test]
    fn test_allows_any_method_without_restriction() {
        let endpoint = RouteEndpointBuilder::new("/a", target(), 0).build("/a".to_string(), 0);
        assert!(endpoint.allows(&Method::DELETE));
    }

    #[test]
    fn test_allows_respects_http_methods() {
        let mut draft = RouteEndpointBuilder::new("/a", target(), 0);
        draft.metadata.push(MetadataTag::HttpMethods(vec![Method::GET]));
        let endpoint = draft.build("/a".to_string(), 0);
        assert!(endpoint.allows(&Method::GET));
        assert!(!endpoint.allows(&Method::POST));
    }
}

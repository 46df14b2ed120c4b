//! Radix tree for endpoint matching
//!
//! The tree is built by splitting patterns into `/`-separated segments:
//! - Static segments (e.g., `users`) match exactly
//! - Parameter segments (e.g., `{id}`) match any single segment
//! - Endpoints are stored at terminal nodes; several endpoints may share one
//!   terminal node when they were mapped with the same pattern
//!
//! Unlike a first-match tree, [`RadixRouter::candidates`] collects every
//! endpoint whose pattern matches so the caller can apply match order.

use http::Method;
use std::borrow::Cow;
use std::sync::Arc;

use super::core::ParamVec;
use super::RouteEndpoint;

/// One endpoint whose pattern matched a request path
#[derive(Debug, Clone)]
pub(crate) struct Candidate {
    pub(crate) endpoint: Arc<RouteEndpoint>,
    pub(crate) params: ParamVec,
    /// Number of static segments matched; higher is more specific
    pub(crate) literals: usize,
}

#[derive(Clone, Default)]
struct RadixNode {
    /// The path segment this node represents (without leading /)
    segment: Cow<'static, str>,
    /// Parameter name if this segment is a path parameter (e.g., "{id}" -> Some("id"))
    param_name: Option<Arc<str>>,
    /// Endpoints terminating at this node, in registration order
    endpoints: Vec<Arc<RouteEndpoint>>,
    children: Vec<RadixNode>,
    param_children: Vec<RadixNode>,
}

impl RadixNode {
    fn new(segment: Cow<'static, str>) -> Self {
        Self {
            segment,
            ..Self::default()
        }
    }

    fn new_param(param_name: &str) -> Self {
        Self {
            param_name: Some(Arc::from(param_name)),
            ..Self::default()
        }
    }

    fn insert(&mut self, segments: &[&str], endpoint: Arc<RouteEndpoint>) {
        let Some((segment, remaining)) = segments.split_first() else {
            self.endpoints.push(endpoint);
            return;
        };

        if segment.starts_with('{') && segment.ends_with('}') {
            let param_name = segment.trim_start_matches('{').trim_end_matches('}');

            if let Some(child) = self
                .param_children
                .iter_mut()
                .find(|c| c.param_name.as_deref() == Some(param_name))
            {
                child.insert(remaining, endpoint);
                return;
            }

            let mut child = RadixNode::new_param(param_name);
            child.insert(remaining, endpoint);
            self.param_children.push(child);
            return;
        }

        if let Some(child) = self.children.iter_mut().find(|c| c.segment == *segment) {
            child.insert(remaining, endpoint);
            return;
        }

        let mut child = RadixNode::new(Cow::Owned((*segment).to_string()));
        child.insert(remaining, endpoint);
        self.children.push(child);
    }

    fn collect(
        &self,
        segments: &[&str],
        method: &Method,
        params: &mut ParamVec,
        literals: usize,
        out: &mut Vec<Candidate>,
    ) {
        let Some((segment, remaining)) = segments.split_first() else {
            for endpoint in self.endpoints.iter().filter(|e| e.allows(method)) {
                out.push(Candidate {
                    endpoint: Arc::clone(endpoint),
                    params: params.clone(),
                    literals,
                });
            }
            return;
        };

        for child in self.children.iter().filter(|c| c.segment == *segment) {
            child.collect(remaining, method, params, literals + 1, out);
        }

        for child in &self.param_children {
            if let Some(param_name) = &child.param_name {
                params.push((Arc::clone(param_name), (*segment).to_string()));
                child.collect(remaining, method, params, literals, out);
                // Backtrack before trying the next parameter branch
                params.pop();
            }
        }
    }
}

fn split_segments(path: &str) -> Vec<&str> {
    path.trim_start_matches('/')
        .split('/')
        .filter(|s| !s.is_empty())
        .collect()
}

/// Radix tree over finalized endpoints
#[derive(Clone, Default)]
pub(crate) struct RadixRouter {
    root: RadixNode,
}

impl RadixRouter {
    pub(crate) fn new(endpoints: &[Arc<RouteEndpoint>]) -> Self {
        let mut root = RadixNode::new(Cow::Borrowed(""));
        for endpoint in endpoints {
            let segments = split_segments(endpoint.pattern());
            root.insert(&segments, Arc::clone(endpoint));
        }
        Self { root }
    }

    /// Every endpoint matching `method` and `path`, in tree order
    pub(crate) fn candidates(&self, method: &Method, path: &str) -> Vec<Candidate> {
        let segments = split_segments(path);
        let mut params = ParamVec::new();
        let mut out = Vec::new();
        self.root.collect(&segments, method, &mut params, 0, &mut out);
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dispatcher::{DispatchTarget, HandlerResponse};
    use crate::router::RouteEndpointBuilder;

    fn endpoint(pattern: &str, sequence: usize) -> Arc<RouteEndpoint> {
        let target =
            DispatchTarget::new("t", |_req| HandlerResponse::json(200, serde_json::Value::Null));
        Arc::new(RouteEndpointBuilder::new(pattern, target, 0).build(pattern.to_string(), sequence))
    }

    #[test]
    fn test_root_path() {
        let radix = RadixRouter::new(&[endpoint("/", 0)]);
        assert_eq!(radix.candidates(&Method::GET, "/").len(), 1);
        assert!(radix.candidates(&Method::GET, "/x").is_empty());
    }

    #[test]
    fn test_parameterized_path_extracts_params() {
        let radix = RadixRouter::new(&[endpoint("/users/{id}/posts/{post_id}", 0)]);
        let found = radix.candidates(&Method::GET, "/users/7/posts/abc");
        assert_eq!(found.len(), 1);
        let params: Vec<(&str, &str)> = found[0]
            .params
            .iter()
            .map(|(k, v)| (k.as_ref(), v.as_str()))
            .collect();
        assert_eq!(params, vec![("id", "7"), ("post_id", "abc")]);
    }

    #[test]
    fn test_static_and_param_both_collected() {
        let radix = RadixRouter::new(&[endpoint("/pets/{id}", 0), endpoint("/pets/mine", 1)]);
        let found = radix.candidates(&Method::GET, "/pets/mine");
        assert_eq!(found.len(), 2);
        let literal = found.iter().find(|c| c.literals == 2).unwrap();
        assert_eq!(literal.endpoint.pattern(), "/pets/mine");
    }

    #[test]
    fn test_same_pattern_shares_terminal_node() {
        let radix = RadixRouter::new(&[endpoint("/same", 0), endpoint("/same", 1)]);
        assert_eq!(radix.candidates(&Method::GET, "/same").len(), 2);
    }

    #[test]
    fn test_different_param_names_same_position() {
        let radix = RadixRouter::new(&[
            endpoint("/users/{id}/posts", 0),
            endpoint("/users/{user_id}/comments", 1),
        ]);
        let found = radix.candidates(&Method::GET, "/users/5/comments");
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].params[0].0.as_ref(), "user_id");
    }
}

//! Router core module - finalized endpoints and request matching.

use http::Method;
use smallvec::SmallVec;
use std::cmp::Reverse;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::{debug, info, warn};

use super::radix::RadixRouter;
use super::RouteEndpoint;
use crate::dispatcher::{HandlerRequest, HandlerResponse};

/// Maximum number of path/query parameters before heap allocation.
/// Most REST APIs have ≤4 path params (e.g., /users/{id}/posts/{postId}).
pub const MAX_INLINE_PARAMS: usize = 8;

/// Stack-allocated parameter storage.
///
/// Param names use `Arc<str>` since they come from the static route tree;
/// values are per-request data from the URL.
pub type ParamVec = SmallVec<[(Arc<str>, String); MAX_INLINE_PARAMS]>;

/// Result of successfully matching a request path to an endpoint
#[derive(Debug, Clone)]
pub struct RouteMatch {
    /// The winning endpoint
    pub endpoint: Arc<RouteEndpoint>,
    /// Path parameters extracted from the URL (e.g., `{id}` → `{"id": "123"}`)
    pub path_params: ParamVec,
}

impl RouteMatch {
    /// Get a path parameter by name ("last write wins" for duplicates)
    #[inline]
    #[must_use]
    pub fn get_path_param(&self, name: &str) -> Option<&str> {
        self.path_params
            .iter()
            .rfind(|(k, _)| k.as_ref() == name)
            .map(|(_, v)| v.as_str())
    }

    /// Invoke the matched endpoint
    ///
    /// The extracted path parameters replace whatever `req` carried.
    pub fn dispatch(&self, mut req: HandlerRequest) -> HandlerResponse {
        req.path_params = self.path_params.clone();
        self.endpoint.invoke(req)
    }
}

/// Finalized route set
///
/// Produced by [`super::RouteTable::build`]. Immutable; safe to share across
/// threads for concurrent matching.
///
/// When several endpoints match one request the winner is chosen by
/// ascending match order, then by the number of static segments (more
/// specific first), then by registration order.
#[derive(Clone)]
pub struct Router {
    radix_router: RadixRouter,
    /// Endpoints sorted by (order, registration sequence)
    endpoints: Vec<Arc<RouteEndpoint>>,
    names: HashMap<String, Arc<RouteEndpoint>>,
    base_path: String,
}

impl Router {
    pub(crate) fn new(mut endpoints: Vec<Arc<RouteEndpoint>>, base_path: String) -> Self {
        endpoints.sort_by_key(|e| (e.order(), e.sequence()));

        let mut names = HashMap::new();
        for endpoint in &endpoints {
            if let Some(name) = endpoint.route_name() {
                names
                    .entry(name.to_string())
                    .or_insert_with(|| Arc::clone(endpoint));
            }
        }

        let radix_router = RadixRouter::new(&endpoints);

        Self {
            radix_router,
            endpoints,
            names,
            base_path,
        }
    }

    /// Endpoints sorted by match order, then registration order
    #[must_use]
    pub fn endpoints(&self) -> &[Arc<RouteEndpoint>] {
        &self.endpoints
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.endpoints.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.endpoints.is_empty()
    }

    #[must_use]
    pub fn base_path(&self) -> &str {
        &self.base_path
    }

    /// Look up an endpoint by its route name
    #[must_use]
    pub fn endpoint_by_name(&self, name: &str) -> Option<&Arc<RouteEndpoint>> {
        self.names.get(name)
    }

    /// One `pattern order=N -> display name` line per endpoint, in match order
    pub fn route_summary(&self) -> impl Iterator<Item = String> + '_ {
        self.endpoints.iter().map(|endpoint| {
            format!(
                "{} order={} -> {}",
                endpoint.pattern(),
                endpoint.order(),
                endpoint.display_name()
            )
        })
    }

    /// Match a request to an endpoint
    ///
    /// # Returns
    ///
    /// * `Some(RouteMatch)` - If a matching endpoint is found
    /// * `None` - If no endpoint matches (results in 404)
    #[must_use]
    pub fn route(&self, method: Method, path: &str) -> Option<RouteMatch> {
        debug!(method = %method, path = %path, "Route match attempt");

        let match_start = Instant::now();
        let winner = self
            .radix_router
            .candidates(&method, path)
            .into_iter()
            .min_by_key(|c| (c.endpoint.order(), Reverse(c.literals), c.endpoint.sequence()));
        let match_duration = match_start.elapsed();

        let Some(candidate) = winner else {
            warn!(
                method = %method,
                path = %path,
                duration_us = match_duration.as_micros(),
                "No route matched"
            );
            return None;
        };

        if match_duration > Duration::from_millis(1) {
            warn!(
                method = %method,
                path = %path,
                display_name = %candidate.endpoint.display_name(),
                route_pattern = %candidate.endpoint.pattern(),
                duration_us = match_duration.as_micros(),
                "Slow route matching detected"
            );
        } else {
            info!(
                method = %method,
                path = %path,
                display_name = %candidate.endpoint.display_name(),
                route_pattern = %candidate.endpoint.pattern(),
                order = candidate.endpoint.order(),
                path_params = ?candidate.params,
                duration_us = match_duration.as_micros(),
                "Route matched"
            );
        }

        Some(RouteMatch {
            endpoint: candidate.endpoint,
            path_params: candidate.params,
        })
    }

    /// Route and invoke in one step
    ///
    /// Returns `None` when no endpoint matches.
    #[must_use]
    pub fn dispatch(&self, req: HandlerRequest) -> Option<HandlerResponse> {
        let route_match = self.route(req.method.clone(), &req.path)?;
        Some(route_match.dispatch(req))
    }
}

impl std::fmt::Debug for Router {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Router")
            .field("base_path", &self.base_path)
            .field("endpoints", &self.endpoints)
            .finish_non_exhaustive()
    }
}

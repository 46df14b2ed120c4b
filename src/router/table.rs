use std::collections::BTreeMap;
use std::mem;
use std::sync::{Arc, Mutex, PoisonError};
use tracing::{debug, info, warn};

use super::convention::{Convention, DraftState};
use super::{EndpointConventionBuilder, EndpointRouteBuilder, RouteEndpointBuilder, Router};
use crate::config::RouterConfig;
use crate::dispatcher::DispatchTarget;
use crate::error::RouteTableError;

struct Draft {
    builder: RouteEndpointBuilder,
    state: Arc<Mutex<DraftState>>,
}

/// Mutable route table used during the registration phase
///
/// Collects draft endpoints through [`EndpointRouteBuilder::map`] and turns
/// them into an immutable [`Router`] with [`RouteTable::build`]:
///
/// 1. each draft starts with the table defaults (display name = pattern, order 0)
/// 2. table-wide default conventions run
/// 3. the draft's own conventions run in attachment order
/// 4. the draft is sealed; later conventions on its handle are ignored
///
/// ```rust
/// use brrtmap::config::RouterConfig;
/// use brrtmap::dispatcher::{DispatchTarget, HandlerResponse};
/// use brrtmap::router::{ConventionBuilder, EndpointRouteBuilder, RouteTable};
///
/// let mut table = RouteTable::new(RouterConfig::default());
/// let target = DispatchTarget::new("health", |_req| {
///     HandlerResponse::json(200, serde_json::json!({ "status": "ok" }))
/// });
/// table.map("/health", target).with_display_name("health check");
///
/// let router = table.build().unwrap();
/// assert_eq!(router.endpoints()[0].display_name(), "health check");
/// ```
pub struct RouteTable {
    config: RouterConfig,
    drafts: Vec<Draft>,
    default_conventions: Vec<Convention>,
}

impl RouteTable {
    #[must_use]
    pub fn new(config: RouterConfig) -> Self {
        Self {
            config,
            drafts: Vec::new(),
            default_conventions: Vec::new(),
        }
    }

    /// Convention applied to every endpoint before its own conventions
    pub fn add_default_convention<F>(&mut self, f: F)
    where
        F: Fn(&mut RouteEndpointBuilder) + Send + Sync + 'static,
    {
        self.default_conventions.push(Arc::new(f));
    }

    /// Number of drafts mapped so far
    #[must_use]
    pub fn len(&self) -> usize {
        self.drafts.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.drafts.is_empty()
    }

    /// Apply conventions, seal every draft and produce the router
    ///
    /// # Errors
    ///
    /// Returns [`RouteTableError::DuplicateRouteName`] when two endpoints share
    /// a route name and `reject_duplicate_names` is enabled.
    pub fn build(self) -> Result<Router, RouteTableError> {
        let base_path = self.config.base_path.trim_end_matches('/').to_string();
        let mut endpoints = Vec::with_capacity(self.drafts.len());

        for (sequence, draft) in self.drafts.into_iter().enumerate() {
            let mut builder = draft.builder;
            let conventions = {
                let mut state = draft.state.lock().unwrap_or_else(PoisonError::into_inner);
                state.sealed = true;
                mem::take(&mut state.conventions)
            };

            for convention in self.default_conventions.iter().chain(conventions.iter()) {
                convention(&mut builder);
            }

            let full_pattern = join_base_path(&base_path, builder.pattern());
            let endpoint = builder.build(full_pattern, sequence);
            debug!(
                endpoint_id = %endpoint.id(),
                pattern = %endpoint.pattern(),
                display_name = %endpoint.display_name(),
                order = endpoint.order(),
                metadata_count = endpoint.metadata().len(),
                conventions = conventions.len(),
                "Endpoint sealed"
            );
            endpoints.push(Arc::new(endpoint));
        }

        let mut by_name: BTreeMap<&str, Vec<String>> = BTreeMap::new();
        for endpoint in &endpoints {
            if let Some(name) = endpoint.route_name() {
                by_name
                    .entry(name)
                    .or_default()
                    .push(endpoint.pattern().to_string());
            }
        }
        for (name, patterns) in by_name.into_iter().filter(|(_, p)| p.len() > 1) {
            if self.config.reject_duplicate_names {
                return Err(RouteTableError::DuplicateRouteName {
                    name: name.to_string(),
                    patterns,
                });
            }
            warn!(
                route_name = %name,
                patterns = ?patterns,
                "Route name used by multiple endpoints - by-name lookup returns the first"
            );
        }

        let router = Router::new(endpoints, base_path);

        let routes_summary: Vec<String> = router
            .route_summary()
            .take(self.config.route_summary_limit)
            .collect();
        info!(
            routes_count = router.len(),
            base_path = %router.base_path(),
            routes_summary = ?routes_summary,
            "Routing table loaded"
        );

        Ok(router)
    }
}

/// Prefix `pattern` with `base_path`, inserting exactly one `/` between them
fn join_base_path(base_path: &str, pattern: &str) -> String {
    if base_path.is_empty() {
        return pattern.to_string();
    }
    format!("{}/{}", base_path, pattern.trim_start_matches('/'))
}

impl EndpointRouteBuilder for RouteTable {
    fn map(&mut self, pattern: &str, target: DispatchTarget) -> EndpointConventionBuilder {
        let state = Arc::new(Mutex::new(DraftState::default()));
        let mut builder = RouteEndpointBuilder::new(pattern, target, 0);
        builder.display_name = Some(pattern.to_string());

        debug!(
            pattern = %pattern,
            handler_name = %builder.target().handler_name(),
            draft_count = self.drafts.len() + 1,
            "Endpoint draft created"
        );

        self.drafts.push(Draft {
            builder,
            state: Arc::clone(&state),
        });
        EndpointConventionBuilder::new(pattern, state)
    }
}

impl Default for RouteTable {
    fn default() -> Self {
        Self::new(RouterConfig::default())
    }
}

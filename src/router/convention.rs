use std::sync::{Arc, Mutex, PoisonError};
use tracing::warn;

use super::RouteEndpointBuilder;
use crate::metadata::MetadataTag;

/// Deferred configuration step applied to a draft endpoint before it is sealed
pub type Convention = Arc<dyn Fn(&mut RouteEndpointBuilder) + Send + Sync>;

/// Anything that accepts conventions for one or more endpoints
///
/// Implemented by the single-endpoint [`EndpointConventionBuilder`] and by the
/// composite [`crate::action::ActionConventionBuilder`]; the helper methods
/// are written once in terms of [`ConventionBuilder::add_convention`].
pub trait ConventionBuilder {
    /// Attach a convention to every endpoint behind this handle
    fn add_convention(&self, convention: Convention);

    /// Attach a closure as a convention
    fn add<F>(&self, f: F) -> &Self
    where
        F: Fn(&mut RouteEndpointBuilder) + Send + Sync + 'static,
        Self: Sized,
    {
        self.add_convention(Arc::new(f));
        self
    }

    fn with_display_name(&self, display_name: impl Into<String>) -> &Self
    where
        Self: Sized,
    {
        let display_name = display_name.into();
        self.add(move |endpoint| endpoint.display_name = Some(display_name.clone()))
    }

    fn with_order(&self, order: i32) -> &Self
    where
        Self: Sized,
    {
        self.add(move |endpoint| endpoint.order = order)
    }

    fn with_metadata(&self, tag: MetadataTag) -> &Self
    where
        Self: Sized,
    {
        self.add(move |endpoint| endpoint.metadata.push(tag.clone()))
    }

    /// Require an authorization policy (`None` for the default policy)
    fn require_authorization(&self, policy: Option<&str>) -> &Self
    where
        Self: Sized,
    {
        self.with_metadata(MetadataTag::Authorization {
            policy: policy.map(str::to_string),
        })
    }

    fn allow_anonymous(&self) -> &Self
    where
        Self: Sized,
    {
        self.with_metadata(MetadataTag::AllowAnonymous)
    }
}

#[derive(Default)]
pub(crate) struct DraftState {
    pub(crate) conventions: Vec<Convention>,
    pub(crate) sealed: bool,
}

/// Configuration handle for one draft endpoint
///
/// Shares the draft's convention list with the route table that created it.
/// Conventions run in attachment order when the table is built, after the
/// table's own defaults, so the last writer wins.
#[derive(Clone)]
pub struct EndpointConventionBuilder {
    pattern: Arc<str>,
    state: Arc<Mutex<DraftState>>,
}

impl EndpointConventionBuilder {
    pub(crate) fn new(pattern: &str, state: Arc<Mutex<DraftState>>) -> Self {
        Self {
            pattern: Arc::from(pattern),
            state,
        }
    }

    /// Pattern of the endpoint this handle configures
    #[must_use]
    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    /// Number of conventions attached so far
    #[must_use]
    pub fn convention_count(&self) -> usize {
        self.state
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .conventions
            .len()
    }

    /// True when two handles configure the same draft
    #[must_use]
    pub fn same_endpoint(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.state, &other.state)
    }
}

impl ConventionBuilder for EndpointConventionBuilder {
    fn add_convention(&self, convention: Convention) {
        let mut state = self.state.lock().unwrap_or_else(PoisonError::into_inner);
        if state.sealed {
            warn!(
                pattern = %self.pattern,
                "Convention added after the route table was built - ignored"
            );
            return;
        }
        state.conventions.push(convention);
    }
}

impl std::fmt::Debug for EndpointConventionBuilder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EndpointConventionBuilder")
            .field("pattern", &self.pattern)
            .field("conventions", &self.convention_count())
            .finish()
    }
}

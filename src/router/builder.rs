use super::EndpointConventionBuilder;
use crate::dispatcher::DispatchTarget;

/// Router abstraction consumed by handler registration
///
/// Every call to `map` creates exactly one new draft endpoint, even when the
/// pattern has been mapped before; the returned handle accepts conventions
/// that run after the router's own defaults and before the route table is
/// finalized.
///
/// Implementations are mutated in place without locking. Registration is a
/// single-threaded startup phase, so callers must serialize `map` calls
/// against one router.
pub trait EndpointRouteBuilder {
    fn map(&mut self, pattern: &str, target: DispatchTarget) -> EndpointConventionBuilder;
}

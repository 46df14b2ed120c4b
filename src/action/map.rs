use std::sync::Arc;
use tracing::{debug, info};

use super::ActionConventionBuilder;
use crate::dispatcher::{DirectDispatch, DispatchTarget, DispatchTargetBuilder};
use crate::error::RegistrationError;
use crate::handler::{HandlerRegistry, RouteHandler};
use crate::metadata::scan;
use crate::router::{ConventionBuilder, EndpointConventionBuilder, EndpointRouteBuilder};

/// Create exactly one endpoint for `pattern` and return its handle
pub fn register_endpoint<R>(
    endpoints: &mut R,
    pattern: &str,
    target: &DispatchTarget,
) -> EndpointConventionBuilder
where
    R: EndpointRouteBuilder + ?Sized,
{
    endpoints.map(pattern, target.clone())
}

/// Map a handler onto one endpoint per declared route pattern
///
/// Uses [`DirectDispatch`] to build the dispatch target. See
/// [`register_with`] for the full contract.
///
/// # Errors
///
/// * [`RegistrationError::InvalidArgument`] - `endpoints` or `action` is `None`
/// * [`RegistrationError::Configuration`] - the handler declares no usable pattern
pub fn register_from_handler<R>(
    endpoints: Option<&mut R>,
    action: Option<Arc<dyn RouteHandler>>,
) -> Result<ActionConventionBuilder, RegistrationError>
where
    R: EndpointRouteBuilder + ?Sized,
{
    register_with(endpoints, action, &DirectDispatch)
}

/// Map a handler onto one endpoint per declared route pattern
///
/// The dispatch target is built once and shared by every endpoint. Each
/// endpoint gets a convention that copies the handler's metadata into its
/// own collection and sets the display name (route name, else pattern),
/// the route name (when declared) and the match order (declared, else 0).
///
/// # Errors
///
/// * [`RegistrationError::InvalidArgument`] - `endpoints` or `action` is `None`
/// * [`RegistrationError::Configuration`] - the handler declares no usable pattern
pub fn register_with<R, B>(
    endpoints: Option<&mut R>,
    action: Option<Arc<dyn RouteHandler>>,
    dispatch_builder: &B,
) -> Result<ActionConventionBuilder, RegistrationError>
where
    R: EndpointRouteBuilder + ?Sized,
    B: DispatchTargetBuilder + ?Sized,
{
    let endpoints = endpoints.ok_or_else(|| RegistrationError::invalid_argument("endpoints"))?;
    let action = action.ok_or_else(|| RegistrationError::invalid_argument("action"))?;

    let target = dispatch_builder.build(Arc::clone(&action));
    let scanned = scan(action.as_ref());

    let mut builders = Vec::new();
    for descriptor in scanned.descriptors() {
        let builder = register_endpoint(endpoints, &descriptor.pattern, &target);

        let metadata = scanned.metadata.clone();
        let display_name = descriptor.display_name().to_string();
        let route_name = descriptor.name.clone();
        let order = descriptor.match_order();

        debug!(
            handler_name = %action.name(),
            pattern = %descriptor.pattern,
            display_name = %display_name,
            order = order,
            "Endpoint registered from route attribute"
        );

        builder.add(move |endpoint| {
            endpoint.metadata.extend(metadata.iter().cloned());
            endpoint.display_name = Some(display_name.clone());
            if route_name.is_some() {
                endpoint.route_name.clone_from(&route_name);
            }
            endpoint.order = order;
        });

        builders.push(builder);
    }

    if builders.is_empty() {
        return Err(RegistrationError::missing_pattern(action.name()));
    }

    let conventions = ActionConventionBuilder::new(builders);
    info!(
        handler_name = %action.name(),
        endpoints_count = conventions.len(),
        patterns = ?conventions.patterns(),
        metadata_count = scanned.metadata.len(),
        "Handler mapped to endpoints"
    );
    Ok(conventions)
}

/// Map a handler that is known to be present
///
/// # Errors
///
/// [`RegistrationError::Configuration`] when the handler declares no usable pattern.
pub fn map_action<R>(
    endpoints: &mut R,
    action: Arc<dyn RouteHandler>,
) -> Result<ActionConventionBuilder, RegistrationError>
where
    R: EndpointRouteBuilder + ?Sized,
{
    register_from_handler(Some(endpoints), Some(action))
}

/// Map the handler registered under `name`
///
/// # Errors
///
/// * [`RegistrationError::InvalidArgument`] - no handler named `name`
/// * [`RegistrationError::Configuration`] - the handler declares no usable pattern
pub fn map_named<R>(
    endpoints: &mut R,
    registry: &HandlerRegistry,
    name: &str,
) -> Result<ActionConventionBuilder, RegistrationError>
where
    R: EndpointRouteBuilder + ?Sized,
{
    let action = registry
        .get(name)
        .ok_or_else(|| RegistrationError::invalid_argument(format!("action '{}'", name)))?;
    map_action(endpoints, action)
}

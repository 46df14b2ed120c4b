use std::cell::Cell;
use std::sync::Arc;

use super::*;
use crate::dispatcher::{
    DirectDispatch, DispatchTarget, DispatchTargetBuilder, HandlerRequest, HandlerResponse,
};
use crate::error::RegistrationError;
use crate::handler::{ActionHandler, HandlerRegistry, RouteHandler};
use crate::metadata::{MetadataTag, RouteAttribute};
use crate::router::{
    ConventionBuilder, EndpointConventionBuilder, EndpointRouteBuilder, RouteTable,
};
use http::Method;

/// Route builder that only records `map` calls
#[derive(Default)]
struct RecordingRoutes {
    inner: RouteTable,
    mapped: Vec<(String, DispatchTarget)>,
}

impl EndpointRouteBuilder for RecordingRoutes {
    fn map(&mut self, pattern: &str, target: DispatchTarget) -> EndpointConventionBuilder {
        self.mapped.push((pattern.to_string(), target.clone()));
        self.inner.map(pattern, target)
    }
}

/// Dispatch builder that counts how often it is invoked
#[derive(Default)]
struct CountingDispatch {
    calls: Cell<usize>,
}

impl DispatchTargetBuilder for CountingDispatch {
    fn build(&self, handler: Arc<dyn RouteHandler>) -> DispatchTarget {
        self.calls.set(self.calls.get() + 1);
        DirectDispatch.build(handler)
    }
}

fn ok_handler(name: &str) -> ActionHandler {
    ActionHandler::new(name, |_req| {
        HandlerResponse::json(200, serde_json::json!({ "ok": true }))
    })
}

#[test]
fn test_missing_router_is_invalid_argument() {
    let action: Arc<dyn RouteHandler> =
        Arc::new(ok_handler("h").route(RouteAttribute::new("/a")));
    let err = register_from_handler::<RouteTable>(None, Some(action)).unwrap_err();
    assert_eq!(
        err,
        RegistrationError::InvalidArgument {
            argument: "endpoints".to_string()
        }
    );
}

#[test]
fn test_missing_handler_is_invalid_argument() {
    let mut routes = RecordingRoutes::default();
    let err = register_from_handler(Some(&mut routes), None).unwrap_err();
    assert!(matches!(
        err,
        RegistrationError::InvalidArgument { ref argument } if argument == "action"
    ));
    assert!(routes.mapped.is_empty());
}

#[test]
fn test_missing_handler_skips_dispatch_build() {
    let mut routes = RecordingRoutes::default();
    let dispatch = CountingDispatch::default();
    assert!(register_with(Some(&mut routes), None, &dispatch).is_err());
    assert_eq!(dispatch.calls.get(), 0);
}

#[test]
fn test_no_route_attributes_is_configuration_error() {
    let mut routes = RecordingRoutes::default();
    let handler = ok_handler("no_routes").with_metadata(MetadataTag::AllowAnonymous);
    let err = map_action(&mut routes, Arc::new(handler)).unwrap_err();
    assert!(matches!(
        err,
        RegistrationError::Configuration { ref handler, .. } if handler == "no_routes"
    ));
    assert!(routes.mapped.is_empty());
}

#[test]
fn test_only_null_patterns_is_configuration_error() {
    let mut routes = RecordingRoutes::default();
    let handler = ok_handler("ghost").route(RouteAttribute::without_pattern().with_order(3));
    let err = map_action(&mut routes, Arc::new(handler)).unwrap_err();
    assert!(matches!(err, RegistrationError::Configuration { .. }));
    assert!(routes.mapped.is_empty());
}

#[test]
fn test_member_count_matches_usable_patterns() {
    let mut routes = RecordingRoutes::default();
    let handler = ok_handler("mixed")
        .route(RouteAttribute::new("/a"))
        .route(RouteAttribute::without_pattern())
        .route(RouteAttribute::new("/b"));
    let conventions = map_action(&mut routes, Arc::new(handler)).unwrap();
    assert_eq!(conventions.len(), 2);
    assert_eq!(conventions.patterns(), vec!["/a", "/b"]);
    assert_eq!(routes.mapped.len(), 2);
}

#[test]
fn test_dispatch_target_built_once_and_shared() {
    let mut routes = RecordingRoutes::default();
    let dispatch = CountingDispatch::default();
    let handler: Arc<dyn RouteHandler> = Arc::new(
        ok_handler("shared")
            .route(RouteAttribute::new("/same"))
            .route(RouteAttribute::new("/same"))
            .route(RouteAttribute::new("/same")),
    );
    let conventions = register_with(Some(&mut routes), Some(handler), &dispatch).unwrap();

    assert_eq!(dispatch.calls.get(), 1);
    assert_eq!(conventions.len(), 3);
    let (_, first) = &routes.mapped[0];
    assert!(routes.mapped.iter().all(|(_, t)| t.ptr_eq(first)));
}

#[test]
fn test_same_pattern_produces_distinct_endpoints() {
    let mut table = RouteTable::default();
    let handler = ok_handler("same")
        .route(RouteAttribute::new("/same"))
        .route(RouteAttribute::new("/same"))
        .route(RouteAttribute::new("/same"));
    let conventions = map_action(&mut table, Arc::new(handler)).unwrap();
    let members: Vec<&EndpointConventionBuilder> = conventions.iter().collect();
    assert!(!members[0].same_endpoint(members[1]));
    assert!(!members[1].same_endpoint(members[2]));

    let router = table.build().unwrap();
    assert_eq!(router.len(), 3);
    assert!(router.endpoints().iter().all(|e| e.pattern() == "/same"));
    let ids: std::collections::HashSet<_> = router.endpoints().iter().map(|e| e.id()).collect();
    assert_eq!(ids.len(), 3);
}

#[test]
fn test_registration_overrides_router_defaults() {
    let mut table = RouteTable::default();
    table.add_default_convention(|e| {
        e.display_name = Some("router default".to_string());
        e.order = 42;
    });
    let handler = ok_handler("h").route(RouteAttribute::new("/a"));
    map_action(&mut table, Arc::new(handler)).unwrap();

    let router = table.build().unwrap();
    let endpoint = &router.endpoints()[0];
    assert_eq!(endpoint.display_name(), "/a");
    assert_eq!(endpoint.order(), 0);
}

#[test]
fn test_caller_conventions_apply_after_registration() {
    let mut table = RouteTable::default();
    let handler = ok_handler("h")
        .route(RouteAttribute::new("/a").with_order(5))
        .route(RouteAttribute::new("/b"));
    map_action(&mut table, Arc::new(handler))
        .unwrap()
        .with_display_name("renamed")
        .with_order(-1);

    let router = table.build().unwrap();
    assert!(router
        .endpoints()
        .iter()
        .all(|e| e.display_name() == "renamed" && e.order() == -1));
}

#[test]
fn test_metadata_propagated_to_every_endpoint() {
    let mut table = RouteTable::default();
    let tags = vec![
        MetadataTag::Description("lists pets".to_string()),
        MetadataTag::Tags(vec!["pets".to_string()]),
        MetadataTag::Extension {
            key: "x-cache".to_string(),
            value: serde_json::json!({ "ttl": 30 }),
        },
    ];
    let mut handler = ok_handler("list_pets")
        .route(RouteAttribute::new("/pets"))
        .route(RouteAttribute::new("/animals").with_name("animals"));
    for tag in &tags {
        handler = handler.with_metadata(tag.clone());
    }
    let declared = handler.metadata();
    map_action(&mut table, Arc::new(handler)).unwrap();

    let router = table.build().unwrap();
    for endpoint in router.endpoints() {
        assert_eq!(endpoint.metadata().len(), declared.len());
        for tag in &declared {
            assert!(endpoint.metadata().contains(tag), "missing {tag:?}");
        }
    }
}

#[test]
fn test_endpoint_metadata_is_a_copy() {
    let mut table = RouteTable::default();
    let handler = ok_handler("h")
        .route(RouteAttribute::new("/a"))
        .route(RouteAttribute::new("/b"));
    let conventions = map_action(&mut table, Arc::new(handler)).unwrap();
    conventions.iter().next().unwrap().allow_anonymous();

    let router = table.build().unwrap();
    let a = &router.endpoints()[0];
    let b = &router.endpoints()[1];
    assert!(a.metadata().contains(&MetadataTag::AllowAnonymous));
    assert!(!b.metadata().contains(&MetadataTag::AllowAnonymous));
}

#[test]
fn test_route_name_set_only_when_declared() {
    let mut table = RouteTable::default();
    let handler = ok_handler("h")
        .route(RouteAttribute::new("/a").with_name("alpha"))
        .route(RouteAttribute::new("/b"));
    map_action(&mut table, Arc::new(handler)).unwrap();

    let router = table.build().unwrap();
    assert_eq!(router.endpoints()[0].route_name(), Some("alpha"));
    assert_eq!(router.endpoints()[1].route_name(), None);
    assert!(router.endpoint_by_name("alpha").is_some());
}

#[test]
fn test_map_named_unknown_handler() {
    let mut table = RouteTable::default();
    let registry = HandlerRegistry::new();
    let err = map_named(&mut table, &registry, "ghost").unwrap_err();
    assert!(err.to_string().contains("ghost"));
    assert!(table.is_empty());
}

#[test]
fn test_map_named_dispatches() {
    let mut table = RouteTable::default();
    let mut registry = HandlerRegistry::new();
    registry.insert(Arc::new(
        ActionHandler::new("get_pet", |req| {
            HandlerResponse::json(200, serde_json::json!({ "id": req.get_path_param("id") }))
        })
        .route(RouteAttribute::new("/pets/{id}")),
    ));
    map_named(&mut table, &registry, "get_pet").unwrap();

    let router = table.build().unwrap();
    let resp = router
        .dispatch(HandlerRequest::new(Method::GET, "/pets/9"))
        .unwrap();
    assert_eq!(resp.body["id"], "9");
}

#![allow(clippy::unwrap_used, clippy::expect_used)]

use std::sync::Arc;

use brrtmap::dispatcher::{HandlerRequest, HandlerResponse};
use brrtmap::handler::ActionHandler;
use brrtmap::metadata::{MetadataTag, RouteAttribute};
use brrtmap::{map_action, ConventionBuilder, RegistrationError, RouteTable};
use http::Method;

fn handler(name: &'static str) -> ActionHandler {
    ActionHandler::new(name, move |req| {
        HandlerResponse::json(
            200,
            serde_json::json!({ "handler": name, "path": req.path }),
        )
    })
}

#[test]
fn test_single_route_defaults() {
    let mut table = RouteTable::default();
    let conventions =
        map_action(&mut table, Arc::new(handler("a").route(RouteAttribute::new("/a")))).unwrap();
    assert_eq!(conventions.len(), 1);

    let router = table.build().unwrap();
    assert_eq!(router.len(), 1);
    let endpoint = &router.endpoints()[0];
    assert_eq!(endpoint.pattern(), "/a");
    assert_eq!(endpoint.display_name(), "/a");
    assert_eq!(endpoint.order(), 0);
}

#[test]
fn test_named_and_ordered_route_alongside_default_route() {
    let mut table = RouteTable::default();
    let action = handler("ab")
        .route(RouteAttribute::new("/a").with_name("alpha").with_order(5))
        .route(RouteAttribute::new("/b"));
    let conventions = map_action(&mut table, Arc::new(action)).unwrap();
    assert_eq!(conventions.patterns(), vec!["/a", "/b"]);

    let router = table.build().unwrap();
    let a = router
        .endpoints()
        .iter()
        .find(|e| e.pattern() == "/a")
        .unwrap();
    let b = router
        .endpoints()
        .iter()
        .find(|e| e.pattern() == "/b")
        .unwrap();
    assert_eq!((a.display_name(), a.order()), ("alpha", 5));
    assert_eq!((b.display_name(), b.order()), ("/b", 0));
}

#[test]
fn test_handler_without_routes_registers_nothing() {
    let mut table = RouteTable::default();
    let err = map_action(&mut table, Arc::new(handler("none"))).unwrap_err();
    assert!(matches!(err, RegistrationError::Configuration { .. }));
    assert!(table.is_empty());
    assert!(table.build().unwrap().is_empty());
}

#[test]
fn test_handler_with_only_null_pattern_registers_nothing() {
    let mut table = RouteTable::default();
    let action = handler("null").route(RouteAttribute::without_pattern().with_name("n"));
    let err = map_action(&mut table, Arc::new(action)).unwrap_err();
    assert!(matches!(err, RegistrationError::Configuration { .. }));
    assert!(table.is_empty());
}

#[test]
fn test_three_identical_patterns_share_one_target() {
    let mut table = RouteTable::default();
    let action = handler("same")
        .route(RouteAttribute::new("/same"))
        .route(RouteAttribute::new("/same"))
        .route(RouteAttribute::new("/same"));
    let conventions = map_action(&mut table, Arc::new(action)).unwrap();
    assert_eq!(conventions.len(), 3);

    let router = table.build().unwrap();
    let endpoints = router.endpoints();
    assert_eq!(endpoints.len(), 3);
    assert!(endpoints.iter().all(|e| e.pattern() == "/same"));
    assert!(endpoints
        .iter()
        .all(|e| e.target().ptr_eq(endpoints[0].target())));
    assert_ne!(endpoints[0].id(), endpoints[1].id());
}

#[test]
fn test_targets_differ_between_handlers() {
    let mut table = RouteTable::default();
    map_action(&mut table, Arc::new(handler("one").route(RouteAttribute::new("/one")))).unwrap();
    map_action(&mut table, Arc::new(handler("two").route(RouteAttribute::new("/two")))).unwrap();

    let router = table.build().unwrap();
    let endpoints = router.endpoints();
    assert!(!endpoints[0].target().ptr_eq(endpoints[1].target()));
}

#[test]
fn test_end_to_end_dispatch_with_methods_and_auth() {
    let mut table = RouteTable::default();
    let action = ActionHandler::new("get_post", |req| {
        HandlerResponse::json(
            200,
            serde_json::json!({
                "user": req.get_path_param("user_id"),
                "post": req.get_path_param("post_id"),
            }),
        )
    })
    .route(RouteAttribute::new("/users/{user_id}/posts/{post_id}").with_name("get_post"))
    .with_metadata(MetadataTag::HttpMethods(vec![Method::GET, Method::HEAD]));

    map_action(&mut table, Arc::new(action))
        .unwrap()
        .require_authorization(Some("reader"));

    let router = table.build().unwrap();
    let endpoint = router.endpoint_by_name("get_post").unwrap();
    assert_eq!(endpoint.metadata().authorization_policy(), Some(Some("reader")));

    let resp = router
        .dispatch(HandlerRequest::new(Method::GET, "/users/3/posts/abc"))
        .unwrap();
    assert_eq!(resp.status, 200);
    assert_eq!(resp.body["user"], "3");
    assert_eq!(resp.body["post"], "abc");

    assert!(router
        .dispatch(HandlerRequest::new(Method::DELETE, "/users/3/posts/abc"))
        .is_none());
}

#[test]
fn test_explicit_order_decides_between_handlers() {
    let mut table = RouteTable::default();
    map_action(
        &mut table,
        Arc::new(handler("fallback").route(RouteAttribute::new("/files/{name}").with_order(10))),
    )
    .unwrap();
    map_action(
        &mut table,
        Arc::new(handler("primary").route(RouteAttribute::new("/files/{path}").with_order(1))),
    )
    .unwrap();

    let router = table.build().unwrap();
    let resp = router
        .dispatch(HandlerRequest::new(Method::GET, "/files/readme"))
        .unwrap();
    assert_eq!(resp.body["handler"], "primary");
}

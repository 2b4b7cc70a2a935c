//! Path resolution: which capabilities run, with what, and what a miss
//! looks like.

mod common;

use halyard_core::path::split_path;
use halyard_runtime::{PathResolver, StatusCode};
use halyard_test::{App, AppVersion, Apps, Health, RecordedCall, Root, body};

#[test]
fn test_version_lookup_manifests_each_level_root_to_leaf() {
    let catalog = common::catalog_with_test_app();

    let response = catalog.get("/apps/test-app/1.2.3");

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(
        body(&response),
        &serde_json::json!({ "id": "1.2.3", "name": "test-app", "version": "v1.2.3" })
    );
    assert_eq!(catalog.recorder.calls(), vec![
        RecordedCall::new("Root", None, ""),
        RecordedCall::new("Apps", Some("Root"), ""),
        RecordedCall::new("App", Some("Apps"), "test-app"),
        RecordedCall::new("AppVersion", Some("App"), "1.2.3"),
    ]);
}

#[test]
fn test_resolved_path_carries_ancestors() {
    let catalog = common::catalog_with_test_app();
    let graph = catalog.api.graph();

    let resolved = PathResolver::new(graph)
        .resolve(&split_path("/apps/test-app/1.2.3"))
        .unwrap();

    let parents = resolved.parents();
    assert_eq!(parents.len(), 3);
    assert!(parents[0].is::<Root>());
    assert!(parents[1].is::<Apps>());
    assert_eq!(parents[2].downcast_ref::<App>().unwrap().name, "test-app");
    assert_eq!(resolved.id(), "1.2.3");
    assert_eq!(graph.node(resolved.node()).type_name(), "AppVersion");
    // the target is manifested by the dispatcher, not the resolver
    assert!(!catalog.recorder.was_called::<AppVersion>());
}

#[test]
fn test_missing_version_is_an_empty_404() {
    let catalog = common::catalog_with_test_app();

    let response = catalog.get("/apps/test-app/9.9.9");

    assert_eq!(response.status, StatusCode::NOT_FOUND);
    assert!(response.body_json().is_none());
    assert_eq!(catalog.recorder.calls().last(), Some(&RecordedCall::new(
        "AppVersion",
        Some("App"),
        "9.9.9"
    )));
}

#[test]
fn test_unmatched_segment_is_named() {
    let catalog = common::catalog_with_test_app();

    let response = catalog.get("/nothing");
    assert_eq!(response.status, StatusCode::NOT_FOUND);
    assert_eq!(body(&response)["message"], "not found: nothing");

    let response = catalog.get("/apps/test-app/1.2.3/extra");
    assert_eq!(response.status, StatusCode::NOT_FOUND);
    assert_eq!(body(&response)["message"], "not found: extra");
}

#[test]
fn test_missing_ancestor_is_named_by_path() {
    let catalog = common::catalog_with_test_app();

    let response = catalog.get("/apps/ghost/1.0");

    assert_eq!(response.status, StatusCode::NOT_FOUND);
    assert_eq!(body(&response)["message"], "not found: /apps/ghost");
    assert!(!catalog.recorder.was_called::<AppVersion>());
}

#[test]
fn test_failing_ancestor_is_a_server_error() {
    let catalog = common::catalog_with_test_app();
    catalog.recorder.fail_on::<Apps>();

    let response = catalog.get("/apps/test-app");

    assert_eq!(response.status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(
        body(&response)["message"],
        "Apps.Manifest: injected failure for Apps"
    );
    assert!(!catalog.recorder.was_called::<App>());
}

#[test]
fn test_named_child_inherits_the_current_id() {
    let catalog = common::catalog_with_test_app();

    let response = catalog.get("/health/database");

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(body(&response)["connected"], true);
    assert_eq!(catalog.recorder.calls(), vec![
        RecordedCall::new("Root", None, ""),
        RecordedCall::new("Health", Some("Root"), ""),
        RecordedCall::new("Database", Some("Health"), ""),
    ]);
    assert!(catalog.recorder.was_called::<Health>());
}

#[test]
fn test_repeated_slashes_are_ignored() {
    let catalog = common::catalog_with_test_app();
    assert_eq!(
        catalog.get("//apps//test-app/1.2.3/").status,
        StatusCode::OK
    );
}

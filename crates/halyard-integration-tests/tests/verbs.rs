//! Verb dispatch: create, replace, delete, and what is refused.

mod common;

use halyard_runtime::{Method, Request, StatusCode};
use halyard_test::{App, body};
use serde_json::json;

#[test]
fn test_put_creates_then_replaces() {
    let catalog = common::empty_catalog();

    let created = catalog.put("/apps/mail", json!({ "name": "mail" }));
    assert_eq!(created.status, StatusCode::CREATED);
    assert_eq!(body(&created), &json!({ "name": "mail", "description": "" }));
    assert_eq!(catalog.store.app("mail"), Some(App::new("mail")));

    let replaced = catalog.put(
        "/apps/mail",
        json!({ "name": "mail", "description": "Reads mail" }),
    );
    assert_eq!(replaced.status, StatusCode::OK);
    assert_eq!(body(&replaced)["description"], "Reads mail");
    assert_eq!(catalog.store.app("mail").unwrap().description, "Reads mail");
}

#[test]
fn test_put_version_uses_custom_exists() {
    let catalog = common::catalog_with_test_app();
    let payload = json!({ "id": "2.0.0", "name": "test-app", "version": "v2" });

    assert_eq!(
        catalog.put("/apps/test-app/2.0.0", payload.clone()).status,
        StatusCode::CREATED
    );
    assert_eq!(
        catalog.put("/apps/test-app/2.0.0", payload).status,
        StatusCode::OK
    );
    assert_eq!(
        catalog.store.version("test-app", "2.0.0").unwrap().version,
        "v2"
    );
}

#[test]
fn test_put_rejects_bad_payloads() {
    let catalog = common::empty_catalog();

    let missing = catalog.request(&Request::new(Method::PUT, "/apps/mail"));
    assert_eq!(missing.status, StatusCode::BAD_REQUEST);
    assert_eq!(body(&missing)["message"], "bad request: request body is required");

    let malformed = catalog.put("/apps/mail", json!({ "name": 5 }));
    assert_eq!(malformed.status, StatusCode::BAD_REQUEST);
    assert!(
        body(&malformed)["message"]
            .as_str()
            .unwrap()
            .starts_with("bad request: invalid App payload")
    );

    let invalid = catalog.put("/apps/mail", json!({ "name": "post" }));
    assert_eq!(invalid.status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(
        body(&invalid)["message"],
        "validation failed: App.Validate: name 'post' does not match id 'mail'"
    );

    assert!(catalog.store.is_empty());
}

#[test]
fn test_delete() {
    let catalog = common::catalog_with_test_app();

    let deleted = catalog.delete("/apps/test-app/1.2.3");
    assert_eq!(deleted.status, StatusCode::OK);
    assert!(deleted.body_json().is_none());
    assert!(catalog.store.version("test-app", "1.2.3").is_none());

    let again = catalog.delete("/apps/test-app/1.2.3");
    assert_eq!(again.status, StatusCode::NOT_FOUND);
    assert_eq!(body(&again)["message"], "not found: /apps/test-app/1.2.3");

    assert_eq!(catalog.delete("/apps/ghost").status, StatusCode::NOT_FOUND);
    assert_eq!(catalog.delete("/apps/test-app").status, StatusCode::OK);
    assert!(catalog.store.is_empty());
}

#[test]
fn test_unsupported_verbs_list_allowed_ones_in_order() {
    let catalog = common::catalog_with_test_app();

    let response = catalog.send(Method::POST, "/");
    assert_eq!(response.status, StatusCode::METHOD_NOT_ALLOWED);
    assert_eq!(response.allow, vec![Method::GET, Method::HEAD]);

    let response = catalog.send(Method::PATCH, "/apps/test-app");
    assert_eq!(response.status, StatusCode::METHOD_NOT_ALLOWED);
    assert_eq!(response.allow, vec![
        Method::GET,
        Method::HEAD,
        Method::PUT,
        Method::DELETE
    ]);
    assert_eq!(
        body(&response)["message"],
        "PATCH not supported. Supported methods: GET, HEAD, PUT, DELETE"
    );

    let response = catalog.delete("/health");
    assert_eq!(response.status, StatusCode::METHOD_NOT_ALLOWED);
    assert_eq!(
        body(&response)["message"],
        "DELETE not supported. Supported methods: GET, HEAD"
    );
}

#[test]
fn test_head_answers_like_get() {
    let catalog = common::catalog_with_test_app();
    let get = catalog.get("/");
    let head = catalog.send(Method::HEAD, "/");
    assert_eq!(get, head);
    assert_eq!(head.status, StatusCode::OK);
}

//! Hypermedia expansion of GET responses.

mod common;

use halyard_capabilities::{FieldDecl, Parent, Registry, ResourceSchema};
use halyard_runtime::{Api, ApiSettings, Request, StatusCode};
use halyard_test::{Apps, Build, CallRecorder, Database, Health, body};
use serde::{Deserialize, Serialize};
use serde_json::json;

#[test]
fn test_root_representation() {
    let catalog = common::catalog_with_test_app();

    let response = catalog.get("/");

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(
        body(&response),
        &json!({
            "welcome": "Welcome to the app catalog",
            "version": "1.0",
            "health": {
                "hello": "world",
                "database": { "_self": "/health/database" }
            },
            "build": { "commit": "4f2a9c1" },
            "apps": { "_self": "/apps" },
            "_links": {
                "apps": { "href": "/apps" },
                "health": { "href": "/health" },
                "self": { "href": "/" }
            }
        })
    );
}

#[test]
fn test_href_embedding_does_not_manifest_the_child() {
    let catalog = common::catalog_with_test_app();

    let response = catalog.get("/");

    assert_eq!(body(&response)["apps"], json!({ "_self": "/apps" }));
    assert!(!catalog.recorder.was_called::<Apps>());
    assert!(!catalog.recorder.was_called::<Database>());
}

#[test]
fn test_full_embedding_inlines_the_expanded_subtree() {
    let catalog = common::catalog_with_test_app();

    let root = catalog.get("/");
    let health = catalog.get("/health");

    assert!(catalog.recorder.was_called::<Health>());
    assert_eq!(body(&root)["health"], *body(&health));
    assert_eq!(
        body(&health)["database"],
        json!({ "_self": "/health/database" })
    );
}

#[test]
fn test_fields_embedding_prunes_the_child() {
    let catalog = common::catalog_with_test_app();

    let root = catalog.get("/");
    let build = catalog.get("/build");

    assert!(catalog.recorder.was_called::<Build>());
    assert_eq!(body(&root)["build"], json!({ "commit": "4f2a9c1" }));
    assert_eq!(body(&build)["date"], "2026-10-01");
}

#[test]
fn test_collection_embedding_is_a_placeholder() {
    let catalog = common::catalog_with_test_app();

    let response = catalog.get("/apps");

    assert_eq!(
        body(&response),
        &json!({
            "number_of_apps": 1,
            "apps": { "message": "embedding map children is not yet supported" }
        })
    );
}

#[test]
fn test_failing_child_embeds_its_error() {
    let catalog = common::catalog_with_test_app();
    catalog.recorder.fail_on::<Health>();

    let response = catalog.get("/");

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(
        body(&response)["health"],
        json!({ "message": "Health.Manifest: injected failure for Health" })
    );
    assert_eq!(body(&response)["welcome"], "Welcome to the app catalog");
}

#[test]
fn test_base_path_prefixes_routes_and_links() {
    let catalog = common::catalog_with_test_app()
        .with_settings(ApiSettings::default().with_base_path("/catalog"));

    let root = catalog.get("/catalog");
    assert_eq!(root.status, StatusCode::OK);
    assert_eq!(body(&root)["apps"], json!({ "_self": "/catalog/apps" }));
    assert_eq!(body(&root)["_links"]["self"], json!({ "href": "/catalog" }));
    assert_eq!(
        body(&root)["health"]["database"],
        json!({ "_self": "/catalog/health/database" })
    );

    assert_eq!(catalog.get("/catalog/apps/test-app/1.2.3").status, StatusCode::OK);

    let outside = catalog.get("/apps");
    assert_eq!(outside.status, StatusCode::NOT_FOUND);
    assert_eq!(body(&outside)["message"], "not found: /apps");
}

#[test]
fn test_depth_limit_replaces_deep_embeds() {
    let catalog = common::catalog_with_test_app()
        .with_settings(ApiSettings::default().with_max_embed_depth(0));

    let root = catalog.get("/");

    assert_eq!(
        body(&root)["health"],
        json!({ "message": "embedding depth limit of 0 reached" })
    );
    // href embedding is not bounded
    assert_eq!(body(&root)["apps"], json!({ "_self": "/apps" }));
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct Page {
    title: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct Banner {
    text: String,
}

#[test]
fn test_absent_child_embeds_null() {
    let registry = Registry::new()
        .with(
            ResourceSchema::<Page>::new()
                .manifest(|| -> Result<Option<Page>, String> {
                    Ok(Some(Page {
                        title: "home".to_owned(),
                    }))
                })
                .field(FieldDecl::scalar::<Banner>("banner").tag("embed()")),
        )
        .with(ResourceSchema::<Banner>::new().manifest(
            |Parent(_): Parent<Page>| -> Result<Option<Banner>, String> { Ok(None) },
        ));
    let api = Api::build::<Page>(&registry).unwrap();

    let response = api.handle(&Request::get("/"));

    assert_eq!(
        response.body_json(),
        Some(&json!({ "title": "home", "banner": null }))
    );
    assert_eq!(api.handle(&Request::get("/banner")).status, StatusCode::NOT_FOUND);
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct Release {
    tag: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct Notes {
    summary: String,
    body: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct Author {
    name: String,
}

fn release_registry(recorder: &CallRecorder) -> Registry {
    let (release_rec, notes_rec, author_rec) =
        (recorder.clone(), recorder.clone(), recorder.clone());
    Registry::new()
        .with(
            ResourceSchema::<Release>::new()
                .manifest(move || -> Result<Option<Release>, String> {
                    release_rec.record::<Release>(None, "")?;
                    Ok(Some(Release {
                        tag: "v2".to_owned(),
                    }))
                })
                .field(FieldDecl::scalar::<Notes>("notes").tag("embed(fields(summary))")),
        )
        .with(
            ResourceSchema::<Notes>::new()
                .manifest(
                    move |Parent(_): Parent<Release>| -> Result<Option<Notes>, String> {
                        notes_rec.record::<Notes>(None, "")?;
                        Ok(Some(Notes {
                            summary: "bug fixes".to_owned(),
                            body: "long text".to_owned(),
                        }))
                    },
                )
                .field(FieldDecl::scalar::<Author>("author").tag("embed(all)")),
        )
        .with(ResourceSchema::<Author>::new().manifest(
            move |Parent(_): Parent<Notes>| -> Result<Option<Author>, String> {
                author_rec.record::<Author>(None, "")?;
                Ok(Some(Author {
                    name: "ada".to_owned(),
                }))
            },
        ))
}

#[test]
fn test_fields_embedding_does_not_expand_the_child() {
    let recorder = CallRecorder::new();
    let api = Api::build::<Release>(&release_registry(&recorder)).unwrap();

    let root = api.handle(&Request::get("/"));

    assert_eq!(
        root.body_json(),
        Some(&json!({ "tag": "v2", "notes": { "summary": "bug fixes" } }))
    );
    assert_eq!(recorder.resources(), vec!["Release", "Notes"]);
    assert!(!recorder.was_called::<Author>());

    // The child itself still expands in full.
    let notes = api.handle(&Request::get("/notes"));
    assert_eq!(notes.body_json().unwrap()["author"], json!({ "name": "ada" }));
    assert!(recorder.was_called::<Author>());
}

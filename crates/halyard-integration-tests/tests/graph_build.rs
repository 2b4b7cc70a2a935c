//! Startup validation: declarations that must not build.

use halyard_capabilities::{FieldDecl, Id, Parent, Registry, ResourceSchema};
use halyard_core::GraphBuildError;
use halyard_graph::Graph;
use halyard_runtime::Api;
use halyard_test::{CallRecorder, CatalogStore, Root, catalog_registry};
use serde::{Deserialize, Serialize};

type Found<T> = Result<Option<T>, String>;

#[derive(Debug, Clone, Serialize, Deserialize)]
struct Library {}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct Shelf {}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct Book {}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct Desk {}

fn library() -> ResourceSchema<Library> {
    ResourceSchema::<Library>::new().manifest(|| -> Found<Library> { Ok(Some(Library {})) })
}

#[test]
fn test_catalog_routes() {
    let registry = catalog_registry(&CatalogStore::new(), &CallRecorder::new());
    let graph = Graph::build::<Root>(&registry).unwrap();

    assert_eq!(graph.routes(), vec![
        "/",
        "/apps",
        "/apps/{app}",
        "/apps/{app}/{appversion}",
        "/build",
        "/health",
        "/health/database",
    ]);
}

#[test]
fn test_named_children_and_collection_conflict() {
    let registry = Registry::new()
        .with(
            library()
                .field(FieldDecl::scalar::<Desk>("Desk"))
                .field(FieldDecl::slice::<Book>("Books")),
        )
        .with(ResourceSchema::<Desk>::new().manifest(
            |Parent(_): Parent<Library>| -> Found<Desk> { Ok(None) },
        ))
        .with(ResourceSchema::<Book>::new().manifest(
            |Parent(_): Parent<Library>, Id(_): Id| -> Found<Book> { Ok(None) },
        ));

    let err = Api::build::<Library>(&registry).unwrap_err();

    assert_eq!(err, GraphBuildError::ConflictingChildren {
        ty: "Library".into(),
        named: "Desk".into(),
        collection: "Books".into(),
    });
    assert_eq!(
        err.to_string(),
        "Library has named children (Desk) and a child collection (Books)"
    );
}

#[test]
fn test_out_of_order_parameters_name_the_correct_order() {
    let registry = Registry::new()
        .with(library().field(FieldDecl::map::<Shelf>("Shelves")))
        .with(ResourceSchema::<Shelf>::new().manifest(
            |Id(_): Id, Parent(_): Parent<Library>| -> Found<Shelf> { Ok(None) },
        ));

    let err = Api::build::<Library>(&registry).unwrap_err();

    assert_eq!(
        err.to_string(),
        "Shelf.Manifest: Parameters out of order (Parent<Library> is misplaced). \
         Correct order is: (Parent<Library>, Id)"
    );
}

#[test]
fn test_missing_manifest_on_tagged_child() {
    let registry = Registry::new()
        .with(library().field(FieldDecl::scalar::<Desk>("Desk").tag("embed(all)")));

    let err = Api::build::<Library>(&registry).unwrap_err();

    assert!(matches!(err, GraphBuildError::TaggedNonResource { ref field, .. } if field == "Desk"));
}

#[test]
fn test_malformed_directive_fails_the_build() {
    let registry = Registry::new()
        .with(library().field(FieldDecl::scalar::<Desk>("Desk").tag("embed(sideways)")))
        .with(ResourceSchema::<Desk>::new().manifest(
            |Parent(_): Parent<Library>| -> Found<Desk> { Ok(None) },
        ));

    let err = Api::build::<Library>(&registry).unwrap_err();

    assert!(err.to_string().starts_with("Library.Desk: malformed directive 'embed(sideways)'"));
}

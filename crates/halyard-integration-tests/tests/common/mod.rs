//! Shared setup for integration tests.

use halyard_test::{CatalogStore, TestCatalog, setup_test_logging_default};

/// The catalog with one app, `test-app`, released as `1.2.3`.
#[allow(dead_code)]
pub fn catalog_with_test_app() -> TestCatalog {
    setup_test_logging_default();
    TestCatalog::with_store(CatalogStore::new().with_app("test-app", &["1.2.3"]))
}

/// The catalog over an empty store.
#[allow(dead_code)]
pub fn empty_catalog() -> TestCatalog {
    setup_test_logging_default();
    TestCatalog::new()
}

//! Test harness helpers.

use std::io::Write;

use halyard_runtime::{Api, ApiSettings, Method, Request, Response};
use serde_json::Value;
use tempfile::NamedTempFile;
use tracing_subscriber::EnvFilter;

use crate::fixtures::{CatalogStore, Root, catalog_registry};
use crate::mocks::CallRecorder;

/// The catalog served by an [`Api`], with its store and call log exposed.
#[derive(Debug, Clone)]
pub struct TestCatalog {
    /// The API under test.
    pub api: Api,
    /// Backing store; mutate it to arrange a test.
    pub store: CatalogStore,
    /// Manifest call log.
    pub recorder: CallRecorder,
}

impl TestCatalog {
    /// Catalog over an empty store.
    ///
    /// # Panics
    ///
    /// Panics if the catalog declarations do not build.
    #[must_use]
    pub fn new() -> Self {
        Self::with_store(CatalogStore::new())
    }

    /// Catalog over `store`.
    ///
    /// # Panics
    ///
    /// Panics if the catalog declarations do not build.
    #[must_use]
    pub fn with_store(store: CatalogStore) -> Self {
        let recorder = CallRecorder::new();
        let api = Api::build::<Root>(&catalog_registry(&store, &recorder))
            .expect("catalog declarations must build");
        Self {
            api,
            store,
            recorder,
        }
    }

    /// Replace the API settings.
    #[must_use]
    pub fn with_settings(mut self, settings: ApiSettings) -> Self {
        self.api = self.api.with_settings(settings);
        self
    }

    /// Send a request.
    #[must_use]
    pub fn request(&self, request: &Request) -> Response {
        self.api.handle(request)
    }

    /// `GET path`.
    #[must_use]
    pub fn get(&self, path: &str) -> Response {
        self.request(&Request::get(path))
    }

    /// `PUT path` with `payload`.
    #[must_use]
    pub fn put(&self, path: &str, payload: Value) -> Response {
        self.request(&Request::put(path, payload))
    }

    /// `DELETE path`.
    #[must_use]
    pub fn delete(&self, path: &str) -> Response {
        self.request(&Request::delete(path))
    }

    /// A bodiless request with any verb.
    #[must_use]
    pub fn send(&self, method: Method, path: &str) -> Response {
        self.request(&Request::new(method, path))
    }
}

impl Default for TestCatalog {
    fn default() -> Self {
        Self::new()
    }
}

/// The JSON body of `response`.
///
/// # Panics
///
/// Panics if the response has no body.
#[must_use]
pub fn body(response: &Response) -> &Value {
    response
        .body_json()
        .unwrap_or_else(|| panic!("expected a JSON body, got {response:?}"))
}

/// Create a temporary config file with the given content.
///
/// # Panics
///
/// Panics if the file cannot be created or written.
#[must_use]
pub fn test_config_file(content: &str) -> NamedTempFile {
    let mut file = tempfile::Builder::new()
        .suffix(".toml")
        .tempfile()
        .expect("Failed to create temp file");
    file.write_all(content.as_bytes())
        .expect("Failed to write to temp file");
    file.flush().expect("Failed to flush temp file");
    file
}

/// Set up test logging with the given filter.
pub fn setup_test_logging(filter: &str) {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .with_test_writer()
        .try_init();
}

/// Set up test logging with the default filter (warn level).
pub fn setup_test_logging_default() {
    setup_test_logging("warn");
}

#[cfg(test)]
mod tests {
    use super::*;
    use halyard_runtime::StatusCode;

    #[test]
    fn test_catalog_builds_and_answers() {
        setup_test_logging_default();
        let catalog = TestCatalog::new();
        let response = catalog.get("/");
        assert_eq!(response.status, StatusCode::OK);
        assert_eq!(body(&response)["version"], "1.0");
    }

    #[test]
    fn test_config_file_has_content() {
        let file = test_config_file("[api]\n");
        assert_eq!(std::fs::read_to_string(file.path()).unwrap(), "[api]\n");
        assert!(file.path().extension().is_some_and(|e| e == "toml"));
    }
}

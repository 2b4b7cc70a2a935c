//! Prelude module - commonly used test helpers.
//!
//! Use `use halyard_test::prelude::*;` in test modules.

// Fixtures
pub use crate::{App, AppVersion, Apps, Build, CatalogStore, Database, Health, Root, catalog_registry};

// Mocks
pub use crate::{CallRecorder, RecordedCall};

// Harness
pub use crate::{TestCatalog, body, setup_test_logging, setup_test_logging_default, test_config_file};

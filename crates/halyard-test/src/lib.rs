//! Halyard Test - Shared test utilities for Halyard.
//!
//! This crate provides the catalog fixture model, a call recorder for
//! asserting which capabilities ran, and harness helpers. Use it as a
//! dev-dependency.
//!
//! # Usage
//!
//! ```rust
//! use halyard_test::prelude::*;
//!
//! let catalog = TestCatalog::with_store(CatalogStore::new().with_app("test-app", &["1.2.3"]));
//! let response = catalog.get("/apps/test-app/1.2.3");
//!
//! assert_eq!(body(&response)["version"], "v1.2.3");
//! assert_eq!(catalog.recorder.resources(), vec!["Root", "Apps", "App", "AppVersion"]);
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]
#![deny(clippy::all)]
#![warn(unreachable_pub)]

pub mod prelude;

pub mod fixtures;
pub mod harness;
pub mod mocks;

pub use fixtures::*;
pub use harness::*;
pub use mocks::*;

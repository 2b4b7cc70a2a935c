//! Halyard Runtime - Answering requests against a resource graph.
//!
//! This crate provides:
//! - [`PathResolver`], which walks a request path down the graph,
//!   manifesting each ancestor
//! - [`Dispatcher`], which maps a verb onto the target's capabilities
//! - [`ExpansionEngine`], which links and embeds declared children
//! - [`Api`], the façade tying them together behind [`Request`] and
//!   [`Response`]
//! - A config bridge from `halyard-config` to runtime and telemetry types
//!
//! # Example
//!
//! ```
//! use halyard_capabilities::prelude::*;
//! use halyard_runtime::{Api, Request, StatusCode};
//! use serde::{Deserialize, Serialize};
//!
//! #[derive(Debug, Clone, Serialize, Deserialize)]
//! struct Root {
//!     welcome: String,
//! }
//!
//! let registry = Registry::new().with(
//!     ResourceSchema::<Root>::new().manifest(|| -> Result<Option<Root>, String> {
//!         Ok(Some(Root { welcome: "hi".into() }))
//!     }),
//! );
//!
//! let api = Api::build::<Root>(&registry).unwrap();
//! let response = api.handle(&Request::get("/"));
//! assert_eq!(response.status, StatusCode::OK);
//! assert_eq!(response.body_json().unwrap()["welcome"], "hi");
//! ```

#![deny(unsafe_code)]
#![deny(missing_docs)]
#![deny(clippy::all)]
#![warn(unreachable_pub)]
#![deny(clippy::unwrap_used)]
#![cfg_attr(test, allow(clippy::unwrap_used))]

pub mod config_bridge;
pub mod prelude;

mod api;
mod dispatcher;
mod error;
mod expansion;
mod request;
mod resolver;

#[cfg(test)]
mod testing;

pub use api::{Api, ApiSettings};
pub use dispatcher::{Dispatch, Dispatcher, METHOD_ORDER};
pub use error::{ApiError, ApiResult, ErrorBody};
pub use expansion::{ExpansionEngine, LINKS_KEY};
pub use request::{Body, Request, Response};
pub use resolver::{PathResolver, ResolvedPath};

// Re-exported so callers can build requests without naming the crate.
pub use http::{Method, StatusCode};

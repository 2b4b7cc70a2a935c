//! Unified prelude for Halyard.
//!
//! This crate provides a single import to bring in all commonly used types
//! from across Halyard.
//!
//! # Usage
//!
//! ```rust,ignore
//! use halyard_prelude::*;
//!
//! // Now you have access to types from:
//! // - halyard-core (entities, capabilities, directives, build errors)
//! // - halyard-capabilities (schemas, extractors, the registry)
//! // - halyard-graph (the built resource graph)
//! // - halyard-runtime (Api, requests, responses)
//! // - halyard-config (Config)
//! // - halyard-telemetry (logging, request spans)
//! ```
//!
//! # Per-Crate Preludes
//!
//! If you only need types from specific crates, use their individual preludes:
//!
//! ```rust,ignore
//! use halyard_capabilities::prelude::*;
//! use halyard_runtime::prelude::*;
//! ```
//!
//! # Example
//!
//! ```rust
//! use halyard_prelude::*;
//! use serde::{Deserialize, Serialize};
//!
//! #[derive(Debug, Clone, Serialize, Deserialize)]
//! struct Root {
//!     motd: String,
//! }
//!
//! # fn main() -> Result<(), GraphBuildError> {
//! let config = Config::default();
//! let registry = Registry::new().with(ResourceSchema::<Root>::new().manifest(
//!     || -> Result<Option<Root>, String> { Ok(Some(Root { motd: "hi".into() })) },
//! ));
//!
//! let api = Api::build::<Root>(&registry)?.with_settings(to_api_settings(&config));
//! assert_eq!(api.handle(&Request::get("/")).status, StatusCode::OK);
//! # Ok(())
//! # }
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]
#![deny(clippy::all)]
#![warn(unreachable_pub)]
#![deny(clippy::unwrap_used)]
#![cfg_attr(test, allow(clippy::unwrap_used))]

// Re-export all crate preludes
pub use halyard_capabilities::prelude::*;
pub use halyard_core::prelude::*;
pub use halyard_graph::prelude::*;
pub use halyard_runtime::prelude::*;
pub use halyard_telemetry::prelude::*;

// Config has no prelude of its own
pub use halyard_config::{Config, ConfigError, ConfigResult};
pub use halyard_runtime::config_bridge::{to_api_settings, to_log_config};

//! Halyard Telemetry - Logging and request tracing.
//!
//! This crate provides:
//! - Configurable logging setup on `tracing-subscriber` with several formats
//! - [`RequestContext`], a per-request correlation id carried in a span
//!
//! # Example
//!
//! ```rust,no_run
//! use halyard_telemetry::{LogConfig, LogFormat, RequestContext, setup_logging};
//!
//! # fn main() -> Result<(), halyard_telemetry::TelemetryError> {
//! let config = LogConfig::new("debug")
//!     .with_format(LogFormat::Compact)
//!     .with_directive("halyard_graph=trace");
//!
//! setup_logging(&config)?;
//!
//! let ctx = RequestContext::new("GET", "/apps");
//! let span = ctx.span();
//! let _guard = span.enter();
//! tracing::info!("Handling request");
//! # Ok(())
//! # }
//! ```

#![deny(unsafe_code)]
#![deny(missing_docs)]
#![deny(clippy::all)]
#![warn(unreachable_pub)]
#![deny(clippy::unwrap_used)]
#![cfg_attr(test, allow(clippy::unwrap_used))]

pub mod prelude;

mod context;
mod error;
mod logging;

pub use context::{RequestContext, RequestGuard};
pub use error::{TelemetryError, TelemetryResult};
pub use logging::{LogConfig, LogFormat, LogTarget, setup_default_logging, setup_logging};

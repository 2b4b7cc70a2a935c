//! Prelude module - commonly used types for convenient import.
//!
//! Use `use halyard_runtime::prelude::*;` to serve a resource graph.

// Errors
pub use crate::{ApiError, ApiResult};

// Request handling
pub use crate::{Api, ApiSettings, Body, Method, Request, Response, StatusCode};

// Pipeline stages
pub use crate::{Dispatcher, ExpansionEngine, PathResolver, ResolvedPath};

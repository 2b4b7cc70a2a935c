//! Prelude module - commonly used types for convenient import.
//!
//! Use `use halyard_core::prelude::*;` to import all essential types.

// Errors
pub use crate::{BoxError, DirectiveError, GraphBuildError, GraphBuildResult};

// Entities
pub use crate::{AnyEntity, Resource, TypeToken};

// Capabilities and fields
pub use crate::{Capability, Directive, Expansion, FieldShape};

// Paths
pub use crate::path::{join_path, split_path};

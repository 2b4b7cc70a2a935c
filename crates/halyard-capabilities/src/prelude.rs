//! Prelude module - commonly used types for convenient import.
//!
//! Use `use halyard_capabilities::prelude::*;` to declare resources.

// Errors
pub use crate::{CapabilityError, CapabilityResult};

// Declaration
pub use crate::{FieldDecl, Registry, ResourceSchema};

// Extractors
pub use crate::{Id, Parent, Payload};

// Compilation
pub use crate::{CapabilityCompiler, CompiledCapabilitySet};

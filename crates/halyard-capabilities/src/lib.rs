//! Halyard Capabilities - Declaring, compiling and invoking resource operations.
//!
//! This crate provides:
//! - The declaration API: [`ResourceSchema`], [`FieldDecl`] and the
//!   [`Registry`] that collects them
//! - Extractors ([`Parent`], [`Id`], [`Payload`]) that make a handler's
//!   parameter list visible without reflection
//! - Outcomes ([`IntoOutcome`]) that make its output list visible
//! - The [`CapabilityCompiler`], which checks every declared operation
//!   against its canonical [`Template`]
//! - [`CompiledCapabilitySet`], the uniform CRUD interface used at request
//!   time
//!
//! # Example
//!
//! ```
//! use halyard_capabilities::prelude::*;
//! use halyard_core::TypeToken;
//! use serde::{Deserialize, Serialize};
//!
//! #[derive(Debug, Clone, Serialize, Deserialize)]
//! struct Greeting {
//!     text: String,
//! }
//!
//! let registry = Registry::new().with(
//!     ResourceSchema::<Greeting>::new().manifest(|| -> Result<Option<Greeting>, String> {
//!         Ok(Some(Greeting { text: "hello".into() }))
//!     }),
//! );
//!
//! let declaration = registry.get(TypeToken::of::<Greeting>()).unwrap();
//! let set = CapabilityCompiler::new(declaration, None).compile().unwrap();
//!
//! assert!(!set.is_identity());
//! assert!(set.exists(None, "").unwrap());
//! ```

#![deny(unsafe_code)]
#![deny(missing_docs)]
#![deny(clippy::all)]
#![warn(unreachable_pub)]
#![deny(clippy::unwrap_used)]
#![cfg_attr(test, allow(clippy::unwrap_used))]

pub mod prelude;

mod compiler;
mod error;
mod extract;
mod handler;
mod outcome;
mod registry;
mod schema;
mod set;
mod template;

pub use compiler::CapabilityCompiler;
pub use error::{CapabilityError, CapabilityResult};
pub use extract::{ExtractError, FromInvocation, Id, Invocation, Param, Parent, Payload};
pub use handler::{Handler, Operation, Signature};
pub use outcome::{IntoOutcome, Outcome, Output};
pub use registry::{Declaration, Registry};
pub use schema::{FieldDecl, ResourceSchema};
pub use set::CompiledCapabilitySet;
pub use template::{ExpectedOutput, Requirement, Slot, Template};

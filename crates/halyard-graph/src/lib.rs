//! Halyard Graph - The immutable resource tree.
//!
//! This crate provides:
//! - [`Graph`], an arena of [`Node`]s addressed by [`NodeId`]
//! - [`Child`] edges carrying the field's [`Directive`](halyard_core::Directive)
//!   and container shape
//! - [`GraphBuilder`], which walks field declarations depth-first from a
//!   root type, compiling each type's capabilities on the way
//!
//! A node has either named children (one per singular resource field) or a
//! single collection child (a map or slice field of identity-bearing
//! resources), never both.
//!
//! # Example
//!
//! ```
//! use halyard_capabilities::prelude::*;
//! use halyard_graph::Graph;
//! use serde::{Deserialize, Serialize};
//!
//! #[derive(Debug, Clone, Serialize, Deserialize)]
//! struct Root {}
//!
//! #[derive(Debug, Clone, Serialize, Deserialize)]
//! struct Status {
//!     ok: bool,
//! }
//!
//! let registry = Registry::new()
//!     .with(
//!         ResourceSchema::<Root>::new()
//!             .manifest(|| -> Result<Option<Root>, String> { Ok(Some(Root {})) })
//!             .field(FieldDecl::scalar::<Status>("Status").tag("embed(href)")),
//!     )
//!     .with(
//!         ResourceSchema::<Status>::new()
//!             .manifest(|| -> Result<Option<Status>, String> { Ok(Some(Status { ok: true })) }),
//!     );
//!
//! let graph = Graph::build::<Root>(&registry).unwrap();
//! assert!(graph.root().select("status").is_some());
//! assert_eq!(graph.routes(), vec!["/", "/status"]);
//! ```

#![deny(unsafe_code)]
#![deny(missing_docs)]
#![deny(clippy::all)]
#![warn(unreachable_pub)]
#![deny(clippy::unwrap_used)]
#![cfg_attr(test, allow(clippy::unwrap_used))]

pub mod prelude;

mod builder;
mod graph;
mod node;

pub use builder::GraphBuilder;
pub use graph::Graph;
pub use node::{Child, Children, Node, NodeId, TypeDescriptor};

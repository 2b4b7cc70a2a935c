//! Halyard Core - Shared vocabulary for the Halyard resource graph.
//!
//! This crate provides:
//! - [`Resource`] and the type-erased [`AnyEntity`] that flows between
//!   capabilities at request time
//! - [`TypeToken`] for comparing entity types without reflection
//! - The [`Capability`] kinds and the [`FieldShape`] of a child field
//! - The field directive mini-language ([`Directive`], [`Expansion`])
//! - [`GraphBuildError`], the fatal startup error taxonomy
//!
//! # Example
//!
//! ```
//! use halyard_core::{AnyEntity, Directive, Expansion};
//!
//! let directive: Directive = "embed(href) link(rel=health)".parse().unwrap();
//! assert_eq!(directive.expansion, Expansion::Href);
//! assert_eq!(directive.link.as_deref(), Some("health"));
//!
//! let entity = AnyEntity::new(String::from("hello"));
//! assert_eq!(entity.downcast_ref::<String>().map(String::as_str), Some("hello"));
//! ```

#![deny(unsafe_code)]
#![deny(missing_docs)]
#![deny(clippy::all)]
#![warn(unreachable_pub)]
#![deny(clippy::unwrap_used)]
#![cfg_attr(test, allow(clippy::unwrap_used))]

pub mod path;
pub mod prelude;

mod capability;
mod directive;
mod entity;
mod error;

pub use capability::{Capability, FieldShape};
pub use directive::{Directive, DirectiveError, Expansion};
pub use entity::{AnyEntity, Resource, TypeToken};
pub use error::{BoxError, GraphBuildError, GraphBuildResult};

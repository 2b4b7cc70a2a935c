//! Prelude module - commonly used types for convenient import.
//!
//! Use `use halyard_graph::prelude::*;` to import all essential types.

pub use crate::{Child, Children, Graph, GraphBuilder, Node, NodeId, TypeDescriptor};

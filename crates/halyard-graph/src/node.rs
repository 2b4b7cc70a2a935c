//! Graph nodes and edges.

use std::collections::BTreeMap;

use halyard_capabilities::CompiledCapabilitySet;
use halyard_core::{Directive, FieldShape, TypeToken};

/// Index of a node in its [`Graph`](crate::Graph).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub(crate) usize);

impl NodeId {
    /// Position in the arena.
    #[must_use]
    pub fn index(self) -> usize {
        self.0
    }
}

/// What a node is: its type, how its field holds it, and where it hangs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TypeDescriptor {
    /// The resource type.
    pub token: TypeToken,
    /// Shape of the field that leads here (`Scalar` for the root).
    pub shape: FieldShape,
    /// Type of the enclosing node; `None` for the root.
    pub parent: Option<TypeToken>,
}

/// An edge from a node to one of its children.
#[derive(Debug, Clone)]
pub struct Child {
    pub(crate) node: NodeId,
    pub(crate) name: String,
    pub(crate) field: String,
    pub(crate) directive: Directive,
    pub(crate) shape: FieldShape,
}

impl Child {
    /// The child node.
    #[must_use]
    pub fn node(&self) -> NodeId {
        self.node
    }

    /// Route name: the lowercase field name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Field name as declared.
    #[must_use]
    pub fn field(&self) -> &str {
        &self.field
    }

    /// Parsed field directive.
    #[must_use]
    pub fn directive(&self) -> &Directive {
        &self.directive
    }

    /// Container shape of the field.
    #[must_use]
    pub fn shape(&self) -> FieldShape {
        self.shape
    }

    /// Whether the child matches any path segment as an id.
    #[must_use]
    pub fn is_collection(&self) -> bool {
        self.shape.is_collection()
    }
}

/// The children of a node.
#[derive(Debug, Clone)]
pub enum Children {
    /// Singular children keyed by route name.
    Named(BTreeMap<String, Child>),
    /// The single id-child.
    Collection(Child),
}

impl Default for Children {
    fn default() -> Self {
        Self::Named(BTreeMap::new())
    }
}

impl Children {
    /// The child a path segment leads to. The collection child matches
    /// every segment.
    #[must_use]
    pub fn select(&self, segment: &str) -> Option<&Child> {
        match self {
            Self::Named(named) => named.get(segment),
            Self::Collection(child) => Some(child),
        }
    }

    /// All children; named children in route-name order.
    pub fn iter(&self) -> impl Iterator<Item = &Child> {
        let (named, collection) = match self {
            Self::Named(named) => (Some(named.values()), None),
            Self::Collection(child) => (None, Some(child)),
        };
        named.into_iter().flatten().chain(collection)
    }

    /// Number of children.
    #[must_use]
    pub fn len(&self) -> usize {
        match self {
            Self::Named(named) => named.len(),
            Self::Collection(_) => 1,
        }
    }

    /// Whether the node is a leaf.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// A resource node.
#[derive(Debug, Clone)]
pub struct Node {
    pub(crate) descriptor: TypeDescriptor,
    pub(crate) capabilities: CompiledCapabilitySet,
    pub(crate) children: Children,
}

impl Node {
    /// Type descriptor.
    #[must_use]
    pub fn descriptor(&self) -> &TypeDescriptor {
        &self.descriptor
    }

    /// Compiled capabilities.
    #[must_use]
    pub fn capabilities(&self) -> &CompiledCapabilitySet {
        &self.capabilities
    }

    /// Whether resolving this node consumes an id.
    #[must_use]
    pub fn is_identity(&self) -> bool {
        self.capabilities.is_identity()
    }

    /// Children of this node.
    #[must_use]
    pub fn children(&self) -> &Children {
        &self.children
    }

    /// Shorthand for [`Children::select`].
    #[must_use]
    pub fn select(&self, segment: &str) -> Option<&Child> {
        self.children.select(segment)
    }

    /// Short type name, for messages.
    #[must_use]
    pub fn type_name(&self) -> String {
        self.descriptor.token.name()
    }
}

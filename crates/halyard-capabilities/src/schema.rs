//! Per-type resource declarations.

use std::fmt;
use std::marker::PhantomData;

use halyard_core::{Capability, FieldShape, Resource, TypeToken};

use crate::{Handler, Operation};

/// A declared field of a resource type.
///
/// Fields pointing at types that declare no Manifest are ignored by the
/// graph builder unless they carry a tag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldDecl {
    name: String,
    target: TypeToken,
    shape: FieldShape,
    tag: Option<String>,
}

impl FieldDecl {
    fn new<C: ?Sized + 'static>(name: impl Into<String>, shape: FieldShape) -> Self {
        Self {
            name: name.into(),
            target: TypeToken::of::<C>(),
            shape,
            tag: None,
        }
    }

    /// A single-valued field of type `C`.
    #[must_use]
    pub fn scalar<C: ?Sized + 'static>(name: impl Into<String>) -> Self {
        Self::new::<C>(name, FieldShape::Scalar)
    }

    /// A string-keyed map of `C`.
    #[must_use]
    pub fn map<C: ?Sized + 'static>(name: impl Into<String>) -> Self {
        Self::new::<C>(name, FieldShape::Map)
    }

    /// A list of `C`.
    #[must_use]
    pub fn slice<C: ?Sized + 'static>(name: impl Into<String>) -> Self {
        Self::new::<C>(name, FieldShape::Slice)
    }

    /// Attach a directive tag, e.g. `embed(all) link(rel=apps)`.
    #[must_use]
    pub fn tag(mut self, tag: impl Into<String>) -> Self {
        self.tag = Some(tag.into());
        self
    }

    /// Field name as declared.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Element type (after map/slice unwrapping).
    #[must_use]
    pub fn target(&self) -> TypeToken {
        self.target
    }

    /// Container shape.
    #[must_use]
    pub fn shape(&self) -> FieldShape {
        self.shape
    }

    /// Directive tag, if any.
    #[must_use]
    pub fn directive_tag(&self) -> Option<&str> {
        self.tag.as_deref()
    }
}

/// Builder for the capabilities and fields of resource type `T`.
pub struct ResourceSchema<T> {
    pub(crate) operations: Vec<Operation>,
    pub(crate) fields: Vec<FieldDecl>,
    _marker: PhantomData<fn() -> T>,
}

impl<T: Resource> ResourceSchema<T> {
    /// Empty schema.
    #[must_use]
    pub fn new() -> Self {
        Self {
            operations: Vec::new(),
            fields: Vec::new(),
            _marker: PhantomData,
        }
    }

    /// Register a handler for `capability`.
    #[must_use]
    pub fn operation<H, Args>(mut self, capability: Capability, handler: H) -> Self
    where
        H: Handler<Args>,
        Args: 'static,
    {
        self.operations.push(Operation::new(capability, handler));
        self
    }

    /// Register the Manifest handler.
    #[must_use]
    pub fn manifest<H: Handler<Args>, Args: 'static>(self, handler: H) -> Self {
        self.operation(Capability::Manifest, handler)
    }

    /// Register an Exists handler.
    #[must_use]
    pub fn exists<H: Handler<Args>, Args: 'static>(self, handler: H) -> Self {
        self.operation(Capability::Exists, handler)
    }

    /// Register a Validate handler.
    #[must_use]
    pub fn validate<H: Handler<Args>, Args: 'static>(self, handler: H) -> Self {
        self.operation(Capability::Validate, handler)
    }

    /// Register a Write handler.
    #[must_use]
    pub fn write<H: Handler<Args>, Args: 'static>(self, handler: H) -> Self {
        self.operation(Capability::Write, handler)
    }

    /// Register a Delete handler.
    #[must_use]
    pub fn delete<H: Handler<Args>, Args: 'static>(self, handler: H) -> Self {
        self.operation(Capability::Delete, handler)
    }

    /// Register a Process handler.
    #[must_use]
    pub fn process<H: Handler<Args>, Args: 'static>(self, handler: H) -> Self {
        self.operation(Capability::Process, handler)
    }

    /// Declare a field.
    #[must_use]
    pub fn field(mut self, field: FieldDecl) -> Self {
        self.fields.push(field);
        self
    }
}

impl<T: Resource> Default for ResourceSchema<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: 'static> fmt::Debug for ResourceSchema<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ResourceSchema")
            .field("type", &TypeToken::of::<T>().name())
            .field("operations", &self.operations)
            .field("fields", &self.fields)
            .finish()
    }
}

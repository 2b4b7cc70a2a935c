//! The registry of declared resource types.

use std::collections::HashMap;

use halyard_core::{AnyEntity, Capability, Resource, TypeToken};
use serde_json::Value;
use tracing::debug;

use crate::{FieldDecl, Operation, ResourceSchema};

pub(crate) type Decoder = fn(Value) -> serde_json::Result<AnyEntity>;

fn decode_as<T: Resource>(value: Value) -> serde_json::Result<AnyEntity> {
    serde_json::from_value::<T>(value).map(AnyEntity::new)
}

/// Everything declared for one resource type.
#[derive(Debug, Clone)]
pub struct Declaration {
    token: TypeToken,
    operations: Vec<Operation>,
    fields: Vec<FieldDecl>,
    decode: Decoder,
}

impl Declaration {
    /// The declared type.
    #[must_use]
    pub fn token(&self) -> TypeToken {
        self.token
    }

    /// Declared operations, in registration order.
    #[must_use]
    pub fn operations(&self) -> &[Operation] {
        &self.operations
    }

    /// Declared fields, in registration order.
    #[must_use]
    pub fn fields(&self) -> &[FieldDecl] {
        &self.fields
    }

    /// Whether any operation implements `capability`.
    #[must_use]
    pub fn declares(&self, capability: Capability) -> bool {
        self.operations
            .iter()
            .any(|op| op.capability() == capability)
    }

    pub(crate) fn decoder(&self) -> Decoder {
        self.decode
    }
}

/// Declarations keyed by type.
#[derive(Debug, Clone, Default)]
pub struct Registry {
    declarations: HashMap<TypeToken, Declaration>,
}

impl Registry {
    /// Empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a schema. A second schema for the same type is merged into the
    /// first; repeated capabilities are reported when the graph is built.
    pub fn register<T: Resource>(&mut self, schema: ResourceSchema<T>) -> &mut Self {
        let token = TypeToken::of::<T>();
        debug!(
            resource = %token,
            operations = schema.operations.len(),
            fields = schema.fields.len(),
            "Registering resource"
        );

        let declaration = self
            .declarations
            .entry(token)
            .or_insert_with(|| Declaration {
                token,
                operations: Vec::new(),
                fields: Vec::new(),
                decode: decode_as::<T>,
            });
        declaration.operations.extend(schema.operations);
        declaration.fields.extend(schema.fields);
        self
    }

    /// Builder form of [`register`](Self::register).
    #[must_use]
    pub fn with<T: Resource>(mut self, schema: ResourceSchema<T>) -> Self {
        self.register(schema);
        self
    }

    /// Declaration for a type.
    #[must_use]
    pub fn get(&self, token: TypeToken) -> Option<&Declaration> {
        self.declarations.get(&token)
    }

    /// Whether the type is registered with a Manifest operation, i.e. is a
    /// resource the graph can route to.
    #[must_use]
    pub fn declares_manifest(&self, token: TypeToken) -> bool {
        self.get(token)
            .is_some_and(|d| d.declares(Capability::Manifest))
    }

    /// Number of registered types.
    #[must_use]
    pub fn len(&self) -> usize {
        self.declarations.len()
    }

    /// Whether nothing is registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.declarations.is_empty()
    }
}

//! Compiled capability sets.

use halyard_core::{AnyEntity, Capability, TypeToken};
use serde_json::Value;
use tracing::trace;

use crate::error::{CapabilityError, CapabilityResult};
use crate::handler::InvokeError;
use crate::registry::Decoder;
use crate::{Invocation, Operation, Outcome};

/// The validated, uniform CRUD interface of one resource type.
///
/// Every entry point accepts the full parent/id/payload arity and binds
/// only what the underlying handler declared.
#[derive(Debug, Clone)]
pub struct CompiledCapabilitySet {
    owner: TypeToken,
    identity: bool,
    manifest: Operation,
    exists: Option<Operation>,
    validate: Option<Operation>,
    write: Option<Operation>,
    delete: Option<Operation>,
    process: Option<Operation>,
    decode: Decoder,
}

impl CompiledCapabilitySet {
    pub(crate) fn new(
        owner: TypeToken,
        identity: bool,
        manifest: Operation,
        operations: impl IntoIterator<Item = Operation>,
        decode: Decoder,
    ) -> Self {
        let mut set = Self {
            owner,
            identity,
            manifest,
            exists: None,
            validate: None,
            write: None,
            delete: None,
            process: None,
            decode,
        };
        for op in operations {
            let slot = match op.capability() {
                Capability::Manifest => continue,
                Capability::Exists => &mut set.exists,
                Capability::Validate => &mut set.validate,
                Capability::Write => &mut set.write,
                Capability::Delete => &mut set.delete,
                Capability::Process => &mut set.process,
            };
            *slot = Some(op);
        }
        set
    }

    /// The resource type this set belongs to.
    #[must_use]
    pub fn owner(&self) -> TypeToken {
        self.owner
    }

    /// Whether resolving this type consumes an id.
    #[must_use]
    pub fn is_identity(&self) -> bool {
        self.identity
    }

    /// Whether the user declared a handler for `capability`.
    #[must_use]
    pub fn is_supplied(&self, capability: Capability) -> bool {
        match capability {
            Capability::Manifest => true,
            Capability::Exists => self.exists.is_some(),
            Capability::Validate => self.validate.is_some(),
            Capability::Write => self.write.is_some(),
            Capability::Delete => self.delete.is_some(),
            Capability::Process => self.process.is_some(),
        }
    }

    /// Whether `capability` can be invoked. Exists is always available,
    /// synthesized from Manifest when not supplied.
    #[must_use]
    pub fn supports(&self, capability: Capability) -> bool {
        capability == Capability::Exists || self.is_supplied(capability)
    }

    /// Fetch the entity.
    ///
    /// # Errors
    ///
    /// Returns a [`CapabilityError`] if the handler fails.
    pub fn manifest(
        &self,
        parent: Option<&AnyEntity>,
        id: &str,
    ) -> CapabilityResult<Option<AnyEntity>> {
        let invocation = Invocation::new(parent, id);
        match self.run(Some(&self.manifest), Capability::Manifest, &invocation)? {
            Outcome::Entity(entity) => Ok(entity),
            _ => Err(self.unexpected(Capability::Manifest)),
        }
    }

    /// Whether the entity exists.
    ///
    /// # Errors
    ///
    /// Returns a [`CapabilityError`] if the handler (or Manifest, when
    /// Exists is synthesized) fails.
    pub fn exists(&self, parent: Option<&AnyEntity>, id: &str) -> CapabilityResult<bool> {
        let Some(op) = &self.exists else {
            return self.manifest(parent, id).map(|entity| entity.is_some());
        };
        let invocation = Invocation::new(parent, id);
        match self.run(Some(op), Capability::Exists, &invocation)? {
            Outcome::Flag(flag) => Ok(flag),
            _ => Err(self.unexpected(Capability::Exists)),
        }
    }

    /// Check a payload before it is written.
    ///
    /// # Errors
    ///
    /// Returns a [`CapabilityError`] if Validate is unsupported or rejects
    /// the payload.
    pub fn validate(
        &self,
        payload: &AnyEntity,
        id: &str,
        parent: Option<&AnyEntity>,
    ) -> CapabilityResult<()> {
        let invocation = Invocation::new(parent, id).with_payload(payload);
        self.run_done(self.validate.as_ref(), Capability::Validate, &invocation)
    }

    /// Create or replace the entity.
    ///
    /// # Errors
    ///
    /// Returns a [`CapabilityError`] if Write is unsupported or fails.
    pub fn write(
        &self,
        payload: &AnyEntity,
        id: &str,
        parent: Option<&AnyEntity>,
    ) -> CapabilityResult<()> {
        let invocation = Invocation::new(parent, id).with_payload(payload);
        self.run_done(self.write.as_ref(), Capability::Write, &invocation)
    }

    /// Remove the entity.
    ///
    /// # Errors
    ///
    /// Returns a [`CapabilityError`] if Delete is unsupported or fails.
    pub fn delete(&self, id: &str, parent: Option<&AnyEntity>) -> CapabilityResult<()> {
        let invocation = Invocation::new(parent, id);
        self.run_done(self.delete.as_ref(), Capability::Delete, &invocation)
    }

    /// Process a payload into a secondary entity.
    ///
    /// # Errors
    ///
    /// Returns a [`CapabilityError`] if Process is unsupported or fails.
    pub fn process(
        &self,
        payload: &AnyEntity,
        id: &str,
        parent: Option<&AnyEntity>,
    ) -> CapabilityResult<Option<AnyEntity>> {
        let invocation = Invocation::new(parent, id).with_payload(payload);
        match self.run(self.process.as_ref(), Capability::Process, &invocation)? {
            Outcome::Entity(entity) => Ok(entity),
            _ => Err(self.unexpected(Capability::Process)),
        }
    }

    /// Deserialize a request payload into this set's resource type.
    ///
    /// # Errors
    ///
    /// Returns [`CapabilityError::Decode`] if the value does not match the
    /// type.
    pub fn decode(&self, value: Value) -> CapabilityResult<AnyEntity> {
        (self.decode)(value).map_err(|source| CapabilityError::Decode {
            ty: self.owner.name(),
            source,
        })
    }

    fn run(
        &self,
        op: Option<&Operation>,
        capability: Capability,
        invocation: &Invocation,
    ) -> CapabilityResult<Outcome> {
        let op = op.ok_or_else(|| CapabilityError::Unsupported {
            ty: self.owner.name(),
            capability,
        })?;

        trace!(
            resource = %self.owner,
            %capability,
            id = %invocation.id,
            has_parent = invocation.parent.is_some(),
            "Invoking capability"
        );

        op.invoke(invocation).map_err(|e| match e {
            InvokeError::Extract(source) => CapabilityError::Binding {
                ty: self.owner.name(),
                capability,
                source,
            },
            InvokeError::Handler(source) => CapabilityError::Failed {
                ty: self.owner.name(),
                capability,
                source,
            },
        })
    }

    fn run_done(
        &self,
        op: Option<&Operation>,
        capability: Capability,
        invocation: &Invocation,
    ) -> CapabilityResult<()> {
        match self.run(op, capability, invocation)? {
            Outcome::Done => Ok(()),
            _ => Err(self.unexpected(capability)),
        }
    }

    fn unexpected(&self, capability: Capability) -> CapabilityError {
        CapabilityError::UnexpectedOutcome {
            ty: self.owner.name(),
            capability,
        }
    }
}

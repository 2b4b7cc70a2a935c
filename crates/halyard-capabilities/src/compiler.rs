//! The capability compiler.
//!
//! Checks every operation declared for a type against its [`Template`]
//! and produces a [`CompiledCapabilitySet`]. Checks run in a fixed order so
//! that a declaration with several problems always reports the same one:
//!
//! 1. duplicate capabilities, then a missing Manifest
//! 2. per capability (in [`Capability::ALL`] order): outputs, then
//!    parameters (duplicates, forbidden, missing, order, types)
//! 3. identity consistency across capabilities

use std::collections::BTreeMap;

use halyard_core::{Capability, GraphBuildError, GraphBuildResult, TypeToken};
use tracing::debug;

use crate::{
    CompiledCapabilitySet, Declaration, Operation, Output, Param, Requirement, Signature, Slot,
    Template,
};

/// Compiles the declaration of one type, positioned in the tree below
/// `parent`.
#[derive(Debug)]
pub struct CapabilityCompiler<'a> {
    declaration: &'a Declaration,
    parent: Option<TypeToken>,
}

impl<'a> CapabilityCompiler<'a> {
    /// Compiler for `declaration`. `parent` is the type of the enclosing
    /// node, `None` for the root.
    #[must_use]
    pub fn new(declaration: &'a Declaration, parent: Option<TypeToken>) -> Self {
        Self {
            declaration,
            parent,
        }
    }

    /// Validate and bind.
    ///
    /// # Errors
    ///
    /// Returns the first [`GraphBuildError`] found.
    pub fn compile(&self) -> GraphBuildResult<CompiledCapabilitySet> {
        let mut operations: BTreeMap<Capability, &Operation> = BTreeMap::new();
        for op in self.declaration.operations() {
            if operations.insert(op.capability(), op).is_some() {
                return Err(GraphBuildError::DuplicateCapability {
                    ty: self.ty(),
                    capability: op.capability(),
                });
            }
        }

        let manifest = operations
            .get(&Capability::Manifest)
            .copied()
            .ok_or_else(|| GraphBuildError::MissingManifest { ty: self.ty() })?;

        let mut identity: Option<bool> = None;
        for (&capability, op) in &operations {
            self.check_outputs(capability, op.signature())?;
            let takes_id = self.check_params(capability, op.signature())?;
            match identity {
                Some(previous) if previous != takes_id => {
                    return Err(GraphBuildError::InconsistentIdentity { ty: self.ty() });
                },
                _ => identity = Some(takes_id),
            }
        }
        let identity = identity.unwrap_or(false);

        debug!(
            resource = %self.owner(),
            identity,
            capabilities = ?operations.keys().collect::<Vec<_>>(),
            "Compiled capability set"
        );

        Ok(CompiledCapabilitySet::new(
            self.owner(),
            identity,
            manifest.clone(),
            operations.values().map(|op| (*op).clone()),
            self.declaration.decoder(),
        ))
    }

    fn owner(&self) -> TypeToken {
        self.declaration.token()
    }

    fn ty(&self) -> String {
        self.owner().name()
    }

    fn check_outputs(&self, capability: Capability, signature: &Signature) -> GraphBuildResult<()> {
        let expected = Template::of(capability).outputs();
        let actual = &signature.outputs;

        if expected.len() != actual.len() {
            return Err(GraphBuildError::OutputArity {
                ty: self.ty(),
                capability,
                expected: expected
                    .iter()
                    .map(|e| e.describe(self.owner()))
                    .collect::<Vec<_>>()
                    .join(", "),
                actual: actual
                    .iter()
                    .map(Output::to_string)
                    .collect::<Vec<_>>()
                    .join(", "),
            });
        }

        for (want, got) in expected.iter().zip(actual) {
            if !want.matches(got, self.owner()) {
                return Err(GraphBuildError::OutputType {
                    ty: self.ty(),
                    capability,
                    expected: want.describe(self.owner()),
                    actual: got.to_string(),
                });
            }
        }
        Ok(())
    }

    /// Returns whether the operation takes an id.
    fn check_params(&self, capability: Capability, signature: &Signature) -> GraphBuildResult<bool> {
        let template = Template::of(capability);
        let params = &signature.params;

        let mut slots: Vec<Slot> = Vec::with_capacity(params.len());
        for param in params {
            let slot = param.slot();
            if slots.contains(&slot) {
                return Err(GraphBuildError::DuplicateParameter {
                    ty: self.ty(),
                    capability,
                    parameter: param.to_string(),
                });
            }
            if template.requirement(slot) == Requirement::Forbidden {
                return Err(GraphBuildError::ForbiddenParameter {
                    ty: self.ty(),
                    capability,
                    parameter: param.to_string(),
                });
            }
            slots.push(slot);
        }

        for slot in Slot::ALL {
            if template.requirement(slot) == Requirement::Required && !slots.contains(&slot) {
                return Err(GraphBuildError::MissingParameter {
                    ty: self.ty(),
                    capability,
                    parameter: self.describe_slot(slot),
                });
            }
        }

        if let Some((_, misplaced)) = params
            .iter()
            .zip(params.iter().skip(1))
            .find(|(a, b)| a.slot() > b.slot())
        {
            let mut canonical = params.clone();
            canonical.sort_by_key(Param::slot);
            return Err(GraphBuildError::ParameterOrder {
                ty: self.ty(),
                capability,
                parameter: misplaced.to_string(),
                order: Signature::describe_params(&canonical),
            });
        }

        for param in params {
            match (param, self.parent) {
                (Param::Parent(_), None) => {
                    return Err(GraphBuildError::ParentlessRoot {
                        ty: self.ty(),
                        capability,
                    });
                },
                (Param::Parent(declared), Some(expected)) if *declared != expected => {
                    return Err(GraphBuildError::ParentTypeMismatch {
                        ty: self.ty(),
                        capability,
                        expected: expected.name(),
                        actual: declared.name(),
                    });
                },
                (Param::Payload(declared), _) if *declared != self.owner() => {
                    return Err(GraphBuildError::ParameterType {
                        ty: self.ty(),
                        capability,
                        parameter: param.to_string(),
                        expected: Param::Payload(self.owner()).to_string(),
                        actual: declared.name(),
                    });
                },
                _ => {},
            }
        }

        Ok(slots.contains(&Slot::Id))
    }

    fn describe_slot(&self, slot: Slot) -> String {
        match slot {
            Slot::Parent => self
                .parent
                .map_or_else(|| slot.to_string(), |p| Param::Parent(p).to_string()),
            Slot::Id => Param::Id.to_string(),
            Slot::Payload => Param::Payload(self.owner()).to_string(),
        }
    }
}

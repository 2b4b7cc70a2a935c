//! Canonical parameter and output templates, one per capability.

use std::fmt;

use halyard_core::{Capability, TypeToken};

use crate::Output;

/// Whether a template slot must, may or must not be declared.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Requirement {
    /// The handler must declare the parameter.
    Required,
    /// The handler may declare the parameter.
    Optional,
    /// The handler must not declare the parameter.
    Forbidden,
}

/// A parameter position. Declaration order follows `Ord`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Slot {
    /// The manifested parent entity.
    Parent,
    /// The current id.
    Id,
    /// The decoded request payload.
    Payload,
}

impl Slot {
    /// All slots in canonical order.
    pub const ALL: [Slot; 3] = [Slot::Parent, Slot::Id, Slot::Payload];
}

impl fmt::Display for Slot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Parent => f.write_str("Parent"),
            Self::Id => f.write_str("Id"),
            Self::Payload => f.write_str("Payload"),
        }
    }
}

/// One expected output position.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExpectedOutput {
    /// An entity of the resource's own type.
    OwnEntity,
    /// An entity of any resource type.
    AnyEntity,
    /// A boolean flag.
    Flag,
    /// The trailing error.
    Error,
}

impl ExpectedOutput {
    /// Whether a declared output satisfies this position.
    #[must_use]
    pub fn matches(self, output: &Output, own: TypeToken) -> bool {
        match (self, output) {
            (Self::OwnEntity, Output::Entity(token)) => *token == own,
            (Self::AnyEntity, Output::Entity(_))
            | (Self::Flag, Output::Flag)
            | (Self::Error, Output::Error) => true,
            _ => false,
        }
    }

    /// Human-readable form used in build errors.
    #[must_use]
    pub fn describe(self, own: TypeToken) -> String {
        match self {
            Self::OwnEntity => format!("Option<{}>", own.name()),
            Self::AnyEntity => "Option<entity>".to_owned(),
            Self::Flag => "bool".to_owned(),
            Self::Error => "error".to_owned(),
        }
    }
}

/// The canonical signature of a capability.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Template {
    /// Capability described.
    pub capability: Capability,
    parent: Requirement,
    id: Requirement,
    payload: Requirement,
    outputs: &'static [ExpectedOutput],
}

impl Template {
    /// Template for `capability`.
    #[must_use]
    pub fn of(capability: Capability) -> Self {
        use ExpectedOutput::{AnyEntity, Error, Flag, OwnEntity};
        use Requirement::{Forbidden, Optional, Required};

        let (payload, outputs): (Requirement, &'static [ExpectedOutput]) = match capability {
            Capability::Exists => (Forbidden, &[Flag, Error]),
            Capability::Manifest => (Forbidden, &[OwnEntity, Error]),
            Capability::Validate | Capability::Write => (Required, &[Error]),
            Capability::Delete => (Forbidden, &[Error]),
            Capability::Process => (Required, &[AnyEntity, Error]),
        };

        Self {
            capability,
            parent: Optional,
            id: Optional,
            payload,
            outputs,
        }
    }

    /// Requirement for a slot.
    #[must_use]
    pub fn requirement(&self, slot: Slot) -> Requirement {
        match slot {
            Slot::Parent => self.parent,
            Slot::Id => self.id,
            Slot::Payload => self.payload,
        }
    }

    /// Expected outputs, error last.
    #[must_use]
    pub fn outputs(&self) -> &'static [ExpectedOutput] {
        self.outputs
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_payload_requirements() {
        for cap in [Capability::Validate, Capability::Write, Capability::Process] {
            assert_eq!(Template::of(cap).requirement(Slot::Payload), Requirement::Required);
        }
        for cap in [Capability::Exists, Capability::Manifest, Capability::Delete] {
            assert_eq!(Template::of(cap).requirement(Slot::Payload), Requirement::Forbidden);
        }
        for cap in Capability::ALL {
            let template = Template::of(cap);
            assert_eq!(template.requirement(Slot::Parent), Requirement::Optional);
            assert_eq!(template.requirement(Slot::Id), Requirement::Optional);
            assert_eq!(template.outputs().last(), Some(&ExpectedOutput::Error));
        }
    }

    #[test]
    fn test_expected_output_matching() {
        let own = TypeToken::of::<String>();
        let other = TypeToken::of::<u32>();

        assert!(ExpectedOutput::OwnEntity.matches(&Output::Entity(own), own));
        assert!(!ExpectedOutput::OwnEntity.matches(&Output::Entity(other), own));
        assert!(ExpectedOutput::AnyEntity.matches(&Output::Entity(other), own));
        assert!(!ExpectedOutput::Flag.matches(&Output::Error, own));
        assert_eq!(ExpectedOutput::OwnEntity.describe(own), "Option<String>");
    }

    #[test]
    fn test_slot_order() {
        assert!(Slot::Parent < Slot::Id);
        assert!(Slot::Id < Slot::Payload);
    }
}

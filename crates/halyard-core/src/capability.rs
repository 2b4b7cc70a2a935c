//! Capability kinds and field shapes.

use std::fmt;

use serde::{Deserialize, Serialize};

/// An operation kind a resource type may support.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Capability {
    /// Cheap existence check. Synthesized from `Manifest` when absent.
    Exists,
    /// Fetch the entity. Mandatory for every resource.
    Manifest,
    /// Check a payload before it is written.
    Validate,
    /// Create or replace the entity.
    Write,
    /// Remove the entity.
    Delete,
    /// Process a payload and produce a secondary entity.
    Process,
}

impl Capability {
    /// Every capability, in compilation order.
    pub const ALL: [Capability; 6] = [
        Capability::Exists,
        Capability::Manifest,
        Capability::Validate,
        Capability::Write,
        Capability::Delete,
        Capability::Process,
    ];

    /// The capability's name as it appears in messages.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Exists => "Exists",
            Self::Manifest => "Manifest",
            Self::Validate => "Validate",
            Self::Write => "Write",
            Self::Delete => "Delete",
            Self::Process => "Process",
        }
    }
}

impl fmt::Display for Capability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Container shape of a field that points at a resource.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldShape {
    /// A single value (plain, boxed or optional).
    #[default]
    Scalar,
    /// A string-keyed map of values.
    Map,
    /// A list of values.
    Slice,
}

impl FieldShape {
    /// Whether the field holds many elements addressed by id.
    #[must_use]
    pub fn is_collection(self) -> bool {
        matches!(self, Self::Map | Self::Slice)
    }

    /// Lowercase name used in messages.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Scalar => "scalar",
            Self::Map => "map",
            Self::Slice => "slice",
        }
    }
}

impl fmt::Display for FieldShape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

//! Errors raised while invoking compiled capabilities.

use halyard_core::{BoxError, Capability};
use thiserror::Error;

use crate::ExtractError;

/// A capability invocation that did not produce a result.
#[derive(Debug, Error)]
pub enum CapabilityError {
    /// The user handler returned an error.
    #[error("{ty}.{capability}: {source}")]
    Failed {
        /// Resource type
        ty: String,
        /// Invoked capability
        capability: Capability,
        /// The handler's error
        #[source]
        source: BoxError,
    },

    /// The capability is not supported by the type.
    #[error("{ty} does not support {capability}")]
    Unsupported {
        /// Resource type
        ty: String,
        /// Requested capability
        capability: Capability,
    },

    /// Arguments could not be bound.
    #[error("{ty}.{capability}: cannot bind arguments: {source}")]
    Binding {
        /// Resource type
        ty: String,
        /// Invoked capability
        capability: Capability,
        /// Binding failure
        #[source]
        source: ExtractError,
    },

    /// The handler produced an outcome of another kind than compiled.
    #[error("{ty}.{capability} returned an unexpected outcome")]
    UnexpectedOutcome {
        /// Resource type
        ty: String,
        /// Invoked capability
        capability: Capability,
    },

    /// A payload that does not deserialize into the resource type.
    #[error("invalid {ty} payload: {source}")]
    Decode {
        /// Resource type
        ty: String,
        /// Deserialization failure
        #[source]
        source: serde_json::Error,
    },
}

impl CapabilityError {
    /// Whether the failure originated in user code rather than in the
    /// framework.
    #[must_use]
    pub fn is_handler_failure(&self) -> bool {
        matches!(self, Self::Failed { .. })
    }
}

/// Result type for capability invocations.
pub type CapabilityResult<T> = Result<T, CapabilityError>;

//! Errors raised while the resource graph is built.
//!
//! Every variant is fatal: the graph is built once at startup and a
//! malformed declaration must stop the process rather than surface later as
//! a request failure. Type names in messages are short names (see
//! [`TypeToken::name`](crate::TypeToken::name)).

use thiserror::Error;

use crate::{Capability, DirectiveError};

/// Boxed error returned by user capability handlers.
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// A resource declaration that cannot be turned into a graph.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GraphBuildError {
    // Capability set errors
    /// The type has no Manifest handler.
    #[error("{ty} does not declare a Manifest capability")]
    MissingManifest {
        /// Offending type
        ty: String,
    },

    /// The same capability was registered twice for one type.
    #[error("{ty} declares {capability} more than once")]
    DuplicateCapability {
        /// Offending type
        ty: String,
        /// Repeated capability
        capability: Capability,
    },

    // Parameter errors
    /// Parameters are not a subsequence of the canonical template.
    #[error(
        "{ty}.{capability}: Parameters out of order ({parameter} is misplaced). Correct order is: ({order})"
    )]
    ParameterOrder {
        /// Offending type
        ty: String,
        /// Capability being compiled
        capability: Capability,
        /// The misplaced parameter
        parameter: String,
        /// Canonical order of the permitted parameters
        order: String,
    },

    /// A parameter the capability forbids.
    #[error("{ty}.{capability} may not have a {parameter} parameter")]
    ForbiddenParameter {
        /// Offending type
        ty: String,
        /// Capability being compiled
        capability: Capability,
        /// The forbidden parameter
        parameter: String,
    },

    /// A parameter the capability requires is absent.
    #[error("{ty}.{capability} must specify a {parameter} parameter")]
    MissingParameter {
        /// Offending type
        ty: String,
        /// Capability being compiled
        capability: Capability,
        /// The missing parameter
        parameter: String,
    },

    /// The same parameter kind appears twice.
    #[error("{ty}.{capability} declares the {parameter} parameter more than once")]
    DuplicateParameter {
        /// Offending type
        ty: String,
        /// Capability being compiled
        capability: Capability,
        /// The repeated parameter
        parameter: String,
    },

    /// A payload parameter of the wrong type.
    #[error("{ty}.{capability}: {parameter} has type {actual}, expected {expected}")]
    ParameterType {
        /// Offending type
        ty: String,
        /// Capability being compiled
        capability: Capability,
        /// The mistyped parameter
        parameter: String,
        /// The type it must have
        expected: String,
        /// The type it was declared with
        actual: String,
    },

    /// A parent parameter whose type is not the tree parent's type.
    #[error("{ty}.{capability}: parent parameter is {actual}, but {ty} is a child of {expected}")]
    ParentTypeMismatch {
        /// Offending type
        ty: String,
        /// Capability being compiled
        capability: Capability,
        /// The type of the enclosing node
        expected: String,
        /// The declared parent type
        actual: String,
    },

    /// A parent parameter on the root type.
    #[error("{ty}.{capability}: {ty} is the root resource and has no parent")]
    ParentlessRoot {
        /// Offending type
        ty: String,
        /// Capability being compiled
        capability: Capability,
    },

    // Output errors
    /// Wrong number of outputs.
    #[error("{ty}.{capability}: expected outputs ({expected}), found ({actual})")]
    OutputArity {
        /// Offending type
        ty: String,
        /// Capability being compiled
        capability: Capability,
        /// Expected output list
        expected: String,
        /// Declared output list
        actual: String,
    },

    /// An output of the wrong kind or type.
    #[error("{ty}.{capability}: expected {expected} (not {actual})")]
    OutputType {
        /// Offending type
        ty: String,
        /// Capability being compiled
        capability: Capability,
        /// Expected output
        expected: String,
        /// Declared output
        actual: String,
    },

    /// Some capabilities take an id and others do not.
    #[error("{ty} has inconsistent methods: some require an id parameter, others do not")]
    InconsistentIdentity {
        /// Offending type
        ty: String,
    },

    // Tree errors
    /// A map/slice field whose element type is not identity-bearing.
    #[error("{ty}.{field} points to a resource type, but {child} is not identity-bearing")]
    CollectionNotIdentity {
        /// Parent type
        ty: String,
        /// Field name
        field: String,
        /// Element type
        child: String,
    },

    /// A singular field whose type is identity-bearing.
    #[error(
        "{ty}.{field} is a single value, but {child} is identity-bearing (use a map or slice field)"
    )]
    ScalarIsIdentity {
        /// Parent type
        ty: String,
        /// Field name
        field: String,
        /// Field type
        child: String,
    },

    /// More than one map/slice resource field.
    #[error("{ty} has more than one child collection: {first} and {second}")]
    MultipleCollections {
        /// Parent type
        ty: String,
        /// First collection field
        first: String,
        /// Second collection field
        second: String,
    },

    /// Named children and a collection on the same type.
    #[error("{ty} has named children ({named}) and a child collection ({collection})")]
    ConflictingChildren {
        /// Parent type
        ty: String,
        /// Comma-separated named children
        named: String,
        /// Collection field
        collection: String,
    },

    /// Two fields resolve to the same route name.
    #[error("{ty} has more than one child named '{name}'")]
    DuplicateChild {
        /// Parent type
        ty: String,
        /// Route name
        name: String,
    },

    /// A tagged field whose type is not a resource.
    #[error("{ty}.{field} is tagged as a child, but {child} does not declare a Manifest capability")]
    TaggedNonResource {
        /// Parent type
        ty: String,
        /// Field name
        field: String,
        /// Field type
        child: String,
    },

    /// A field tag that does not parse.
    #[error("{ty}.{field}: {source}")]
    Directive {
        /// Parent type
        ty: String,
        /// Field name
        field: String,
        /// Parse failure
        #[source]
        source: DirectiveError,
    },

    /// A type that contains itself.
    #[error("{ty} contains itself ({path}); recursive resources are not supported")]
    RecursiveResource {
        /// Offending type
        ty: String,
        /// Field path from the first occurrence back to the type
        path: String,
    },
}

/// Result type for graph construction.
pub type GraphBuildResult<T> = Result<T, GraphBuildError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages_name_the_problem() {
        let err = GraphBuildError::ParameterOrder {
            ty: "AppVersion".into(),
            capability: Capability::Manifest,
            parameter: "Parent<App>".into(),
            order: "Parent<App>, Id".into(),
        };
        assert_eq!(
            err.to_string(),
            "AppVersion.Manifest: Parameters out of order (Parent<App> is misplaced). \
             Correct order is: (Parent<App>, Id)"
        );

        let err = GraphBuildError::InconsistentIdentity { ty: "App".into() };
        assert!(err.to_string().contains("has inconsistent methods"));
    }

    #[test]
    fn test_directive_error_is_source() {
        use std::error::Error as _;

        let source = crate::Directive::parse("bogus()").unwrap_err();
        let err = GraphBuildError::Directive {
            ty: "Root".into(),
            field: "health".into(),
            source,
        };
        assert!(err.source().is_some());
        assert!(err.to_string().starts_with("Root.health: malformed directive 'bogus()'"));
    }
}

//! Handler arguments.
//!
//! A handler declares what it needs by the types of its arguments. Each
//! extractor knows which template slot it occupies, so the compiler can
//! check a handler's parameter list at startup and the set can bind
//! arguments at request time.

use std::fmt;
use std::ops::Deref;
use std::sync::Arc;

use halyard_core::{AnyEntity, Resource, TypeToken};
use thiserror::Error;

use crate::Slot;

/// Everything a capability may be called with.
#[derive(Debug, Clone, Default)]
pub struct Invocation {
    /// Entity manifested one level up, if any.
    pub parent: Option<AnyEntity>,
    /// Current id; empty when no id has been consumed.
    pub id: String,
    /// Decoded request payload.
    pub payload: Option<AnyEntity>,
}

impl Invocation {
    /// Invocation without a payload.
    #[must_use]
    pub fn new(parent: Option<&AnyEntity>, id: &str) -> Self {
        Self {
            parent: parent.cloned(),
            id: id.to_owned(),
            payload: None,
        }
    }

    /// Attach a payload.
    #[must_use]
    pub fn with_payload(mut self, payload: &AnyEntity) -> Self {
        self.payload = Some(payload.clone());
        self
    }
}

/// A declared handler parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Param {
    /// Parent entity of the given type.
    Parent(TypeToken),
    /// The id string.
    Id,
    /// Payload of the given type.
    Payload(TypeToken),
}

impl Param {
    /// Template slot occupied by this parameter.
    #[must_use]
    pub fn slot(&self) -> Slot {
        match self {
            Self::Parent(_) => Slot::Parent,
            Self::Id => Slot::Id,
            Self::Payload(_) => Slot::Payload,
        }
    }
}

impl fmt::Display for Param {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Parent(token) => write!(f, "Parent<{token}>"),
            Self::Id => f.write_str("Id"),
            Self::Payload(token) => write!(f, "Payload<{token}>"),
        }
    }
}

/// Argument binding failure.
///
/// Binding only fails when the graph hands a capability something its
/// compiled signature ruled out.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ExtractError {
    /// A parent parameter with no parent entity.
    #[error("no parent entity available")]
    MissingParent,

    /// A payload parameter with no payload.
    #[error("no payload available")]
    MissingPayload,

    /// The entity is of another type.
    #[error("expected {expected}, found {actual}")]
    TypeMismatch {
        /// Declared type
        expected: String,
        /// Supplied type
        actual: String,
    },
}

/// A type that can be bound from an [`Invocation`].
pub trait FromInvocation: Sized {
    /// The parameter this extractor declares.
    fn param() -> Param;

    /// Bind the argument.
    ///
    /// # Errors
    ///
    /// Returns an [`ExtractError`] if the invocation lacks the value or holds
    /// one of another type.
    fn from_invocation(invocation: &Invocation) -> Result<Self, ExtractError>;
}

fn downcast_entity<T: Resource>(entity: &AnyEntity) -> Result<Arc<T>, ExtractError> {
    entity
        .downcast::<T>()
        .ok_or_else(|| ExtractError::TypeMismatch {
            expected: TypeToken::of::<T>().name(),
            actual: entity.type_token().name(),
        })
}

/// The manifested parent entity.
#[derive(Debug, Clone)]
pub struct Parent<P>(pub Arc<P>);

impl<P: Resource> FromInvocation for Parent<P> {
    fn param() -> Param {
        Param::Parent(TypeToken::of::<P>())
    }

    fn from_invocation(invocation: &Invocation) -> Result<Self, ExtractError> {
        let parent = invocation
            .parent
            .as_ref()
            .ok_or(ExtractError::MissingParent)?;
        downcast_entity::<P>(parent).map(Parent)
    }
}

impl<P> Deref for Parent<P> {
    type Target = P;

    fn deref(&self) -> &P {
        &self.0
    }
}

/// The current id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Id(pub String);

impl FromInvocation for Id {
    fn param() -> Param {
        Param::Id
    }

    fn from_invocation(invocation: &Invocation) -> Result<Self, ExtractError> {
        Ok(Id(invocation.id.clone()))
    }
}

impl Deref for Id {
    type Target = str;

    fn deref(&self) -> &str {
        &self.0
    }
}

/// The decoded request payload, owned by the handler.
#[derive(Debug, Clone)]
pub struct Payload<T>(pub T);

impl<T: Resource> FromInvocation for Payload<T> {
    fn param() -> Param {
        Param::Payload(TypeToken::of::<T>())
    }

    fn from_invocation(invocation: &Invocation) -> Result<Self, ExtractError> {
        let payload = invocation
            .payload
            .as_ref()
            .ok_or(ExtractError::MissingPayload)?;
        downcast_entity::<T>(payload).map(|arc| Payload(T::clone(&arc)))
    }
}

impl<T> Deref for Payload<T> {
    type Target = T;

    fn deref(&self) -> &T {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_params_and_slots() {
        assert_eq!(Id::param(), Param::Id);
        assert_eq!(
            Parent::<String>::param(),
            Param::Parent(TypeToken::of::<String>())
        );
        assert_eq!(Payload::<u32>::param().slot(), Slot::Payload);
        assert_eq!(Parent::<String>::param().to_string(), "Parent<String>");
    }

    #[test]
    fn test_binding() {
        let parent = AnyEntity::new(String::from("shelf"));
        let payload = AnyEntity::new(7u32);
        let inv = Invocation::new(Some(&parent), "b-1").with_payload(&payload);

        assert_eq!(&*Id::from_invocation(&inv).unwrap(), "b-1");
        assert_eq!(Parent::<String>::from_invocation(&inv).unwrap().as_str(), "shelf");
        assert_eq!(*Payload::<u32>::from_invocation(&inv).unwrap(), 7);
    }

    #[test]
    fn test_binding_failures() {
        let inv = Invocation::new(None, "");
        assert_eq!(
            Parent::<String>::from_invocation(&inv).unwrap_err(),
            ExtractError::MissingParent
        );
        assert_eq!(
            Payload::<u32>::from_invocation(&inv).unwrap_err(),
            ExtractError::MissingPayload
        );

        let parent = AnyEntity::new(1u8);
        let inv = Invocation::new(Some(&parent), "");
        assert!(matches!(
            Parent::<String>::from_invocation(&inv),
            Err(ExtractError::TypeMismatch { .. })
        ));
    }
}

//! Handler return values.

use std::fmt;

use halyard_core::{AnyEntity, BoxError, Resource, TypeToken};

/// A declared handler output.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Output {
    /// An optional entity of the given type.
    Entity(TypeToken),
    /// A boolean flag.
    Flag,
    /// A failure channel.
    Error,
}

impl fmt::Display for Output {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Entity(token) => write!(f, "Option<{token}>"),
            Self::Flag => f.write_str("bool"),
            Self::Error => f.write_str("error"),
        }
    }
}

/// The successful result of an invoked capability.
#[derive(Debug, Clone)]
pub enum Outcome {
    /// An entity, or none.
    Entity(Option<AnyEntity>),
    /// A flag.
    Flag(bool),
    /// Completed without a value.
    Done,
}

/// A handler return type.
///
/// Implemented for the fallible forms the templates accept and for their
/// infallible counterparts. The latter compile, and are then rejected by the
/// capability compiler with an error naming the missing output.
pub trait IntoOutcome {
    /// Declared outputs, in order.
    fn outputs() -> Vec<Output>;

    /// Convert into an outcome.
    ///
    /// # Errors
    ///
    /// Returns the handler's own error, boxed.
    fn into_outcome(self) -> Result<Outcome, BoxError>;
}

impl<T, E> IntoOutcome for Result<Option<T>, E>
where
    T: Resource,
    E: Into<BoxError>,
{
    fn outputs() -> Vec<Output> {
        vec![Output::Entity(TypeToken::of::<T>()), Output::Error]
    }

    fn into_outcome(self) -> Result<Outcome, BoxError> {
        self.map(|entity| Outcome::Entity(entity.map(AnyEntity::new)))
            .map_err(Into::into)
    }
}

impl<E: Into<BoxError>> IntoOutcome for Result<bool, E> {
    fn outputs() -> Vec<Output> {
        vec![Output::Flag, Output::Error]
    }

    fn into_outcome(self) -> Result<Outcome, BoxError> {
        self.map(Outcome::Flag).map_err(Into::into)
    }
}

impl<E: Into<BoxError>> IntoOutcome for Result<(), E> {
    fn outputs() -> Vec<Output> {
        vec![Output::Error]
    }

    fn into_outcome(self) -> Result<Outcome, BoxError> {
        self.map(|()| Outcome::Done).map_err(Into::into)
    }
}

impl<T: Resource> IntoOutcome for Option<T> {
    fn outputs() -> Vec<Output> {
        vec![Output::Entity(TypeToken::of::<T>())]
    }

    fn into_outcome(self) -> Result<Outcome, BoxError> {
        Ok(Outcome::Entity(self.map(AnyEntity::new)))
    }
}

impl IntoOutcome for bool {
    fn outputs() -> Vec<Output> {
        vec![Output::Flag]
    }

    fn into_outcome(self) -> Result<Outcome, BoxError> {
        Ok(Outcome::Flag(self))
    }
}

impl IntoOutcome for () {
    fn outputs() -> Vec<Output> {
        Vec::new()
    }

    fn into_outcome(self) -> Result<Outcome, BoxError> {
        Ok(Outcome::Done)
    }
}

//! Handlers and their type-erased form.

use std::fmt;
use std::sync::Arc;

use halyard_core::{BoxError, Capability};
use thiserror::Error;

use crate::{ExtractError, FromInvocation, IntoOutcome, Invocation, Outcome, Output, Param};

/// A function usable as a capability handler.
///
/// Implemented for `Fn` closures and functions of up to four extractor
/// arguments returning an [`IntoOutcome`]. `Args` is the tuple of argument
/// types; it only exists to keep the implementations apart.
pub trait Handler<Args>: Send + Sync + 'static {
    /// The handler's return type.
    type Output: IntoOutcome;

    /// Declared parameters, in declaration order.
    fn params() -> Vec<Param>;

    /// Bind the arguments and run the handler.
    ///
    /// # Errors
    ///
    /// Returns an [`ExtractError`] if an argument cannot be bound.
    fn call(&self, invocation: &Invocation) -> Result<Self::Output, ExtractError>;
}

macro_rules! impl_handler {
    ($($ty:ident),*) => {
        #[allow(non_snake_case, unused_variables)]
        impl<F, R, $($ty,)*> Handler<($($ty,)*)> for F
        where
            F: Fn($($ty),*) -> R + Send + Sync + 'static,
            R: IntoOutcome,
            $($ty: FromInvocation,)*
        {
            type Output = R;

            fn params() -> Vec<Param> {
                vec![$($ty::param()),*]
            }

            fn call(&self, invocation: &Invocation) -> Result<R, ExtractError> {
                $(let $ty = $ty::from_invocation(invocation)?;)*
                Ok(self($($ty),*))
            }
        }
    };
}

impl_handler!();
impl_handler!(T1);
impl_handler!(T1, T2);
impl_handler!(T1, T2, T3);
impl_handler!(T1, T2, T3, T4);

/// The declared shape of a handler.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Signature {
    /// Parameters, in declaration order.
    pub params: Vec<Param>,
    /// Outputs, in declaration order.
    pub outputs: Vec<Output>,
}

impl Signature {
    /// Render the parameter list, e.g. `Parent<App>, Id`.
    #[must_use]
    pub fn describe_params(params: &[Param]) -> String {
        params
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(", ")
    }
}

#[derive(Debug, Error)]
pub(crate) enum InvokeError {
    #[error(transparent)]
    Extract(#[from] ExtractError),
    #[error(transparent)]
    Handler(BoxError),
}

type Invoker = Arc<dyn Fn(&Invocation) -> Result<Outcome, InvokeError> + Send + Sync>;

/// A handler bound to a capability, with its type erased.
#[derive(Clone)]
pub struct Operation {
    capability: Capability,
    signature: Signature,
    invoke: Invoker,
}

impl Operation {
    /// Erase a handler.
    pub fn new<H, Args>(capability: Capability, handler: H) -> Self
    where
        H: Handler<Args>,
        Args: 'static,
    {
        let signature = Signature {
            params: H::params(),
            outputs: <H::Output as IntoOutcome>::outputs(),
        };
        let invoke: Invoker = Arc::new(
            move |invocation: &Invocation| -> Result<Outcome, InvokeError> {
                let output = handler.call(invocation)?;
                output.into_outcome().map_err(InvokeError::Handler)
            },
        );
        Self {
            capability,
            signature,
            invoke,
        }
    }

    /// Capability this operation implements.
    #[must_use]
    pub fn capability(&self) -> Capability {
        self.capability
    }

    /// Declared signature.
    #[must_use]
    pub fn signature(&self) -> &Signature {
        &self.signature
    }

    pub(crate) fn invoke(&self, invocation: &Invocation) -> Result<Outcome, InvokeError> {
        (self.invoke)(invocation)
    }
}

impl fmt::Debug for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Operation")
            .field("capability", &self.capability)
            .field("signature", &self.signature)
            .finish_non_exhaustive()
    }
}

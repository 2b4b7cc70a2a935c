//! Mock collaborators for testing.

use std::collections::HashSet;
use std::sync::{Arc, Mutex, PoisonError};

use halyard_core::TypeToken;

/// One recorded capability invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedCall {
    /// Short type name of the resource whose capability ran.
    pub resource: String,
    /// Short type name of the parent entity it received, if any.
    pub parent: Option<String>,
    /// The id it received.
    pub id: String,
}

impl RecordedCall {
    /// Build an expected call for comparisons.
    #[must_use]
    pub fn new(resource: &str, parent: Option<&str>, id: &str) -> Self {
        Self {
            resource: resource.to_owned(),
            parent: parent.map(str::to_owned),
            id: id.to_owned(),
        }
    }
}

/// Records Manifest invocations and injects failures on demand.
///
/// Cheap to clone; clones share the same log.
#[derive(Debug, Clone, Default)]
pub struct CallRecorder {
    calls: Arc<Mutex<Vec<RecordedCall>>>,
    failing: Arc<Mutex<HashSet<String>>>,
}

impl CallRecorder {
    /// Create an empty recorder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a call on `R`, with the type of the parent it received.
    ///
    /// # Errors
    ///
    /// Returns an error if failures were injected for `R`.
    pub fn record<R: ?Sized + 'static>(
        &self,
        parent: Option<TypeToken>,
        id: &str,
    ) -> Result<(), String> {
        let resource = TypeToken::of::<R>().name();
        tracing::trace!(%resource, id, "Recorded manifest call");
        self.calls
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(RecordedCall {
                resource: resource.clone(),
                parent: parent.map(|p| p.name()),
                id: id.to_owned(),
            });

        if self
            .failing
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .contains(&resource)
        {
            return Err(format!("injected failure for {resource}"));
        }
        Ok(())
    }

    /// Make every later call on `R` fail.
    pub fn fail_on<R: ?Sized + 'static>(&self) {
        self.failing
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(TypeToken::of::<R>().name());
    }

    /// Every call so far, oldest first.
    #[must_use]
    pub fn calls(&self) -> Vec<RecordedCall> {
        self.calls
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Names of the resources called so far, oldest first.
    #[must_use]
    pub fn resources(&self) -> Vec<String> {
        self.calls().into_iter().map(|c| c.resource).collect()
    }

    /// Whether `R` was called at all.
    #[must_use]
    pub fn was_called<R: ?Sized + 'static>(&self) -> bool {
        let name = TypeToken::of::<R>().name();
        self.calls().iter().any(|c| c.resource == name)
    }

    /// Forget recorded calls. Injected failures stay.
    pub fn clear(&self) {
        self.calls
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clear();
    }
}

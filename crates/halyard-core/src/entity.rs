//! Entity types and their type-erased runtime form.

use std::any::{Any, TypeId};
use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

use serde::Serialize;
use serde::de::DeserializeOwned;

/// A type that can be exposed as a resource.
///
/// Blanket-implemented for every serializable, cloneable, thread-safe type.
/// Whether a resource is actually *routable* depends on the capabilities
/// registered for it, not on this trait.
pub trait Resource:
    Serialize + DeserializeOwned + Clone + fmt::Debug + Send + Sync + 'static
{
}

impl<T> Resource for T where
    T: Serialize + DeserializeOwned + Clone + fmt::Debug + Send + Sync + 'static
{
}

/// Identity of a Rust type, comparable at graph-build time.
#[derive(Clone, Copy)]
pub struct TypeToken {
    id: TypeId,
    name: &'static str,
}

impl TypeToken {
    /// Token for `T`.
    #[must_use]
    pub fn of<T: ?Sized + 'static>() -> Self {
        Self {
            id: TypeId::of::<T>(),
            name: std::any::type_name::<T>(),
        }
    }

    /// The underlying [`TypeId`].
    #[must_use]
    pub fn id(&self) -> TypeId {
        self.id
    }

    /// Fully qualified type name, as reported by the compiler.
    #[must_use]
    pub fn full_name(&self) -> &'static str {
        self.name
    }

    /// Type name with module paths stripped (`Vec<App>` rather than
    /// `alloc::vec::Vec<my_crate::App>`).
    #[must_use]
    pub fn name(&self) -> String {
        let mut out = String::with_capacity(self.name.len());
        let mut segment = String::new();
        for c in self.name.chars() {
            match c {
                ':' => segment.clear(),
                '<' | '>' | ',' | ' ' | '(' | ')' | '[' | ']' | '&' | ';' => {
                    out.push_str(&segment);
                    segment.clear();
                    out.push(c);
                },
                _ => segment.push(c),
            }
        }
        out.push_str(&segment);
        out
    }
}

impl PartialEq for TypeToken {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for TypeToken {}

impl Hash for TypeToken {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl fmt::Debug for TypeToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "TypeToken({})", self.name)
    }
}

impl fmt::Display for TypeToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name())
    }
}

/// Object-safe view of a [`Resource`].
trait ErasedEntity: Any + Send + Sync {
    fn as_any(&self) -> &dyn Any;
    fn into_any(self: Arc<Self>) -> Arc<dyn Any + Send + Sync>;
    fn to_json(&self) -> serde_json::Result<serde_json::Value>;
    fn token(&self) -> TypeToken;
    fn debug(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result;
}

impl<T: Resource> ErasedEntity for T {
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn into_any(self: Arc<Self>) -> Arc<dyn Any + Send + Sync> {
        self
    }

    fn to_json(&self) -> serde_json::Result<serde_json::Value> {
        serde_json::to_value(self)
    }

    fn token(&self) -> TypeToken {
        TypeToken::of::<T>()
    }

    fn debug(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

/// A manifested entity of some resource type.
///
/// Cheap to clone; the entity itself is shared.
#[derive(Clone)]
pub struct AnyEntity {
    inner: Arc<dyn ErasedEntity>,
}

impl AnyEntity {
    /// Wrap a concrete entity.
    #[must_use]
    pub fn new<T: Resource>(entity: T) -> Self {
        Self {
            inner: Arc::new(entity),
        }
    }

    /// Type token of the wrapped entity.
    #[must_use]
    pub fn type_token(&self) -> TypeToken {
        (*self.inner).token()
    }

    /// Whether the wrapped entity is a `T`.
    #[must_use]
    pub fn is<T: Resource>(&self) -> bool {
        self.type_token() == TypeToken::of::<T>()
    }

    /// Borrow the entity as a `T`.
    #[must_use]
    pub fn downcast_ref<T: Resource>(&self) -> Option<&T> {
        (*self.inner).as_any().downcast_ref::<T>()
    }

    /// Share the entity as an `Arc<T>`.
    #[must_use]
    pub fn downcast<T: Resource>(&self) -> Option<Arc<T>> {
        Arc::clone(&self.inner).into_any().downcast::<T>().ok()
    }

    /// Serialize the entity into a JSON tree.
    ///
    /// # Errors
    ///
    /// Returns an error if the entity's `Serialize` implementation fails or
    /// produces a map with non-string keys.
    pub fn to_json(&self) -> serde_json::Result<serde_json::Value> {
        (*self.inner).to_json()
    }
}

impl fmt::Debug for AnyEntity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        (*self.inner).debug(f)
    }
}

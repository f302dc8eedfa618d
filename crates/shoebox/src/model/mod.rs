mod reference;

pub use reference::ModelRef;

use crate::error::{Error, ShapeError};
use derive_more::{Deref, Display};
use serde::{Deserialize, Serialize};
use std::{any::Any, fmt, rc::Rc};

///
/// Model
///
/// Shared, type-erased handle to one entity instance.
///
/// The protocol addresses entities of arbitrary resource types through one
/// uniform surface; `Model` is that surface. Reference-counted sharing keeps
/// the single-threaded request model explicit in the types: clones are cheap
/// and alias the same entity.
///

#[derive(Clone)]
pub struct Model {
    value: Rc<dyn Any>,
    type_name: &'static str,
}

impl Model {
    #[must_use]
    pub fn new<T: Any>(entity: T) -> Self {
        Self {
            value: Rc::new(entity),
            type_name: std::any::type_name::<T>(),
        }
    }

    /// Is the underlying entity of type `T`?
    #[must_use]
    pub fn is<T: Any>(&self) -> bool {
        self.value.is::<T>()
    }

    #[must_use]
    pub fn downcast_ref<T: Any>(&self) -> Option<&T> {
        self.value.downcast_ref::<T>()
    }

    /// Produce a typed clone of the underlying entity.
    ///
    /// A type mismatch is a shape error naming both types; it indicates a
    /// resource was wired against the wrong entity type.
    pub fn cast<T: Any + Clone>(&self) -> Result<T, Error> {
        self.downcast_ref::<T>().cloned().ok_or_else(|| {
            ShapeError::EntityType {
                expected: std::any::type_name::<T>(),
                found: self.type_name,
            }
            .into()
        })
    }

    /// Concrete type name of the underlying entity (diagnostics only).
    #[must_use]
    pub const fn type_name(&self) -> &'static str {
        self.type_name
    }
}

impl fmt::Debug for Model {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Model").field(&self.type_name).finish()
    }
}

///
/// ResourceType
///
/// The external name of a resource category (e.g. "sites").
///

#[derive(
    Clone,
    Debug,
    Deref,
    Deserialize,
    Display,
    Eq,
    Hash,
    Ord,
    PartialEq,
    PartialOrd,
    Serialize,
)]
#[serde(transparent)]
pub struct ResourceType(String);

impl ResourceType {
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for ResourceType {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl From<String> for ResourceType {
    fn from(value: String) -> Self {
        Self(value)
    }
}

///
/// Identifier
///
/// A `{type, id}` resource identifier, the cross-resource addressing unit
/// used by relationship operations.
///

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct Identifier {
    #[serde(rename = "type")]
    pub kind: ResourceType,
    pub id: String,
}

impl Identifier {
    pub fn new(kind: impl Into<ResourceType>, id: impl Into<String>) -> Self {
        Self {
            kind: kind.into(),
            id: id.into(),
        }
    }
}

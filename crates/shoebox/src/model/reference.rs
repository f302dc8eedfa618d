use crate::model::Model;
use std::any::Any;

///
/// ModelRef
///
/// A resolved-identity reference: either a concrete entity instance or a
/// string resource id still to be resolved through a repository.
///
/// Exactly one variant is populated by construction. Resolution is never
/// cached; callers that resolve twice observe mutations made in between.
///

#[derive(Clone, Debug)]
pub enum ModelRef {
    /// A concrete entity instance.
    Model(Model),
    /// A resource id, resolvable via a repository.
    Id(String),
}

impl ModelRef {
    pub fn id(resource_id: impl Into<String>) -> Self {
        Self::Id(resource_id.into())
    }

    #[must_use]
    pub fn model<T: Any>(entity: T) -> Self {
        Self::Model(Model::new(entity))
    }
}

impl From<Model> for ModelRef {
    fn from(model: Model) -> Self {
        Self::Model(model)
    }
}

impl From<&str> for ModelRef {
    fn from(resource_id: &str) -> Self {
        Self::id(resource_id)
    }
}

impl From<String> for ModelRef {
    fn from(resource_id: String) -> Self {
        Self::Id(resource_id)
    }
}

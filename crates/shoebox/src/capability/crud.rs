use crate::{
    capability::{Capability, Environment, ResourceData, Target},
    contracts::{QueryOneBuilder, ResourceBuilder},
    error::{ConfigError, CrudOp, Error},
    model::{Model, ModelRef},
    query::{FilterMap, SortKey},
    repository::Repository,
};

///
/// CrudHooks
///
/// The user-supplied CRUD operations for one resource type. Every operation
/// is optional: the default bodies realize the dispatch rule, so a resource
/// implements only what it supports and callers get a uniform configuration
/// error for anything else.
///

pub trait CrudHooks {
    type Entity: Clone + 'static;

    /// Refine a fetched entity. Returning `None` means "exists but filtered
    /// out" and is not an error; the default passes the entity through.
    fn read(&self, cx: &Capability, entity: Self::Entity) -> Result<Option<Self::Entity>, Error> {
        let _ = cx;
        Ok(Some(entity))
    }

    /// Create a new entity from validated input.
    fn create(&self, cx: &Capability, data: &ResourceData) -> Result<Self::Entity, Error> {
        let _ = (cx, data);
        Err(ConfigError::UnsupportedCrudOp { op: CrudOp::Create }.into())
    }

    /// Apply validated input to an existing entity. Returning `None` keeps
    /// the entity as resolved (identity-preserving no-op); an override that
    /// mutates must return the updated entity.
    fn update(
        &self,
        cx: &Capability,
        entity: Self::Entity,
        data: &ResourceData,
    ) -> Result<Option<Self::Entity>, Error> {
        let _ = (cx, entity, data);
        Err(ConfigError::UnsupportedCrudOp { op: CrudOp::Update }.into())
    }

    /// Delete an existing entity.
    fn delete(&self, cx: &Capability, entity: Self::Entity) -> Result<(), Error> {
        let _ = (cx, entity);
        Err(ConfigError::UnsupportedCrudOp { op: CrudOp::Delete }.into())
    }
}

///
/// CrudResource
///
/// The CRUD capability builder. A referenced target selects the update path
/// for `store`; an absent target selects the create path.
///

pub struct CrudResource<'a, H: CrudHooks> {
    capability: Capability,
    target: Target<'a>,
    hooks: H,
}

impl<'a, H: CrudHooks> CrudResource<'a, H> {
    #[must_use]
    pub fn new(env: Environment, hooks: H) -> Self {
        Self {
            capability: Capability::new(env),
            target: Target::default(),
            hooks,
        }
    }

    // ------------------------------------------------------------------
    // Configuration
    // ------------------------------------------------------------------

    #[must_use]
    pub fn with_repository(mut self, repository: &'a dyn Repository) -> Self {
        self.target.set_repository(repository);
        self
    }

    #[must_use]
    pub fn with_target(mut self, target: ModelRef) -> Self {
        self.target.set_model(target);
        self
    }

    #[must_use]
    pub fn filter(mut self, filters: FilterMap) -> Self {
        self.capability.query_mut().set_filters(filters);
        self
    }

    #[must_use]
    pub fn sort(mut self, keys: Vec<SortKey>) -> Self {
        self.capability.query_mut().set_sort(keys);
        self
    }

    #[must_use]
    pub fn include<I, S>(mut self, paths: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.capability.query_mut().set_include_paths(paths);
        self
    }

    // ------------------------------------------------------------------
    // Terminals
    // ------------------------------------------------------------------

    /// Resolve the referenced entity and pass it through the `read` hook.
    /// An id that matches nothing resolves to `None` without error.
    pub fn first(&self) -> Result<Option<H::Entity>, Error> {
        self.read_entity()
    }

    /// Store validated input: update when a target is referenced (fail-fast
    /// resolution), create otherwise.
    pub fn store(&self, data: &ResourceData) -> Result<H::Entity, Error> {
        self.store_entity(data)
    }

    /// Destroy the referenced entity. The entity must exist.
    pub fn destroy(&self) -> Result<(), Error> {
        let entity = self.target.model_or_fail()?.cast::<H::Entity>()?;

        tracing::debug!(op = "delete", "dispatching CRUD operation");
        self.hooks.delete(&self.capability, entity)
    }

    fn read_entity(&self) -> Result<Option<H::Entity>, Error> {
        let Some(model) = self.target.model()? else {
            return Ok(None);
        };

        let entity = model.cast::<H::Entity>()?;
        self.hooks.read(&self.capability, entity)
    }

    fn store_entity(&self, data: &ResourceData) -> Result<H::Entity, Error> {
        if self.target.is_set() {
            let entity = self.target.model_or_fail()?.cast::<H::Entity>()?;

            tracing::debug!(op = "update", "dispatching CRUD operation");
            return match self.hooks.update(&self.capability, entity.clone(), data)? {
                Some(updated) => Ok(updated),
                None => Ok(entity),
            };
        }

        tracing::debug!(op = "create", "dispatching CRUD operation");
        self.hooks.create(&self.capability, data)
    }
}

impl<H: CrudHooks> QueryOneBuilder for CrudResource<'_, H> {
    fn first(&self) -> Result<Option<Model>, Error> {
        Ok(self.read_entity()?.map(Model::new))
    }
}

impl<H: CrudHooks> ResourceBuilder for CrudResource<'_, H> {
    fn store(&self, data: &ResourceData) -> Result<Model, Error> {
        self.store_entity(data).map(Model::new)
    }
}

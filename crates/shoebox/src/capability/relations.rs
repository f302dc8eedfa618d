use crate::{
    capability::{Capability, Environment, Target, paginate_models},
    contracts::{
        CollectionResponse, QueryManyBuilder, QueryOneBuilder, RelationData, ToManyBuilder,
        ToOneBuilder,
    },
    error::{ConfigError, Error, RelationOp},
    model::{Identifier, Model, ModelRef},
    page::PageRequest,
    query::{FilterMap, SortKey},
    repository::Repository,
};
use std::collections::BTreeMap;

type GetRelationFn<E> = Box<dyn Fn(&Capability, &E) -> Result<RelationData, Error>>;
type SetRelationFn<E> = Box<dyn Fn(&Capability, E, RelationData) -> Result<(), Error>>;
type ModifyManyFn<E> = Box<dyn Fn(&Capability, E, Vec<Model>) -> Result<(), Error>>;

///
/// RelationHooks
///
/// The optional operations for one relationship field: a reader, a
/// replacement writer, and plural attach/detach writers. Registered at
/// wiring time; a missing reader falls back to the entity's resource
/// representation, while a missing writer is a fatal configuration error.
///
/// The core performs no set algebra: union/difference and de-duplication by
/// a stable key belong to the resource author's hooks.
///

#[derive(Default)]
pub struct RelationHooks<E> {
    get: Option<GetRelationFn<E>>,
    set: Option<SetRelationFn<E>>,
    attach: Option<ModifyManyFn<E>>,
    detach: Option<ModifyManyFn<E>>,
}

impl<E> RelationHooks<E> {
    #[must_use]
    pub fn new() -> Self {
        Self {
            get: None,
            set: None,
            attach: None,
            detach: None,
        }
    }

    #[must_use]
    pub fn get(mut self, hook: impl Fn(&Capability, &E) -> Result<RelationData, Error> + 'static) -> Self {
        self.get = Some(Box::new(hook));
        self
    }

    #[must_use]
    pub fn set(
        mut self,
        hook: impl Fn(&Capability, E, RelationData) -> Result<(), Error> + 'static,
    ) -> Self {
        self.set = Some(Box::new(hook));
        self
    }

    #[must_use]
    pub fn attach(
        mut self,
        hook: impl Fn(&Capability, E, Vec<Model>) -> Result<(), Error> + 'static,
    ) -> Self {
        self.attach = Some(Box::new(hook));
        self
    }

    #[must_use]
    pub fn detach(
        mut self,
        hook: impl Fn(&Capability, E, Vec<Model>) -> Result<(), Error> + 'static,
    ) -> Self {
        self.detach = Some(Box::new(hook));
        self
    }
}

///
/// RelationHookMap
///
/// The registered relationship operations for one resource type, keyed by
/// field name.
///

#[derive(Default)]
pub struct RelationHookMap<E> {
    relations: BTreeMap<String, RelationHooks<E>>,
}

impl<E> RelationHookMap<E> {
    #[must_use]
    pub fn new() -> Self {
        Self {
            relations: BTreeMap::new(),
        }
    }

    #[must_use]
    pub fn relation(mut self, field: impl Into<String>, hooks: RelationHooks<E>) -> Self {
        self.relations.insert(field.into(), hooks);
        self
    }

    fn hooks(&self, field: &str) -> Option<&RelationHooks<E>> {
        self.relations.get(field)
    }
}

///
/// CrudRelations
///
/// The relationship capability builder, addressing one relation field of one
/// target entity. Reads prefer a registered `get` hook and fall back to the
/// entity's resource representation; every mutation requires its hook.
///

pub struct CrudRelations<'a, E> {
    capability: Capability,
    target: Target<'a>,
    field: Option<String>,
    hooks: RelationHookMap<E>,
}

impl<'a, E: Clone + 'static> CrudRelations<'a, E> {
    #[must_use]
    pub fn new(env: Environment, hooks: RelationHookMap<E>) -> Self {
        Self {
            capability: Capability::new(env),
            target: Target::default(),
            field: None,
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
    pub fn with_field(mut self, field: impl Into<String>) -> Self {
        self.field = Some(field.into());
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
    // Resolution
    // ------------------------------------------------------------------

    fn field(&self) -> Result<&str, Error> {
        self.field
            .as_deref()
            .ok_or_else(|| ConfigError::MissingField.into())
    }

    fn entity_or_fail(&self) -> Result<E, Error> {
        self.target.model_or_fail()?.cast::<E>()
    }

    /// The relation's current value: the registered reader when one exists,
    /// else the entity's resource representation.
    fn value(&self, field: &str) -> Result<RelationData, Error> {
        if let Some(get) = self.hooks.hooks(field).and_then(|hooks| hooks.get.as_ref()) {
            let entity = self.entity_or_fail()?;
            return get(&self.capability, &entity);
        }

        let model = self.target.model_or_fail()?;
        self.capability
            .server()?
            .resources()
            .relationship(&model, field)
    }

    fn require_set(&self, field: &str) -> Result<&SetRelationFn<E>, Error> {
        self.hooks
            .hooks(field)
            .and_then(|hooks| hooks.set.as_ref())
            .ok_or_else(|| Self::unsupported(RelationOp::Set, field))
    }

    fn unsupported(op: RelationOp, field: &str) -> Error {
        ConfigError::UnsupportedRelationOp {
            op,
            field: field.to_string(),
        }
        .into()
    }
}

impl<E: Clone + 'static> QueryOneBuilder for CrudRelations<'_, E> {
    fn first(&self) -> Result<Option<Model>, Error> {
        let field = self.field()?;

        self.value(field)?.into_to_one(field)
    }
}

impl<E: Clone + 'static> QueryManyBuilder for CrudRelations<'_, E> {
    fn get(&self) -> Result<Vec<Model>, Error> {
        let field = self.field()?;

        self.value(field)?.into_to_many(field)
    }

    fn get_or_paginate(&self, page: Option<&PageRequest>) -> Result<CollectionResponse, Error> {
        match page.filter(|request| !request.is_empty()) {
            None => Ok(CollectionResponse::Many(self.get()?)),
            Some(request) => Ok(CollectionResponse::Page(paginate_models(
                &self.capability,
                self.get()?,
                request,
            )?)),
        }
    }
}

impl<E: Clone + 'static> ToOneBuilder for CrudRelations<'_, E> {
    fn associate(&self, identifier: Option<&Identifier>) -> Result<Option<Model>, Error> {
        let field = self.field()?;
        let set = self.require_set(field)?;

        let related = self.capability.resolve_to_one(identifier)?;
        let entity = self.entity_or_fail()?;

        tracing::debug!(field, found = related.is_some(), "associating to-one relation");
        set(&self.capability, entity, RelationData::ToOne(related.clone()))?;

        Ok(related)
    }
}

impl<E: Clone + 'static> ToManyBuilder for CrudRelations<'_, E> {
    fn sync(&self, identifiers: &[Identifier]) -> Result<Vec<Model>, Error> {
        let field = self.field()?;
        let set = self.require_set(field)?;

        let related = self.capability.resolve_to_many(identifiers)?;
        let entity = self.entity_or_fail()?;

        tracing::debug!(field, count = related.len(), "replacing to-many relation");
        set(&self.capability, entity, RelationData::ToMany(related.clone()))?;

        Ok(related)
    }

    fn attach(&self, identifiers: &[Identifier]) -> Result<Vec<Model>, Error> {
        let field = self.field()?;
        let attach = self
            .hooks
            .hooks(field)
            .and_then(|hooks| hooks.attach.as_ref())
            .ok_or_else(|| Self::unsupported(RelationOp::Attach, field))?;

        let related = self.capability.resolve_to_many(identifiers)?;
        let entity = self.entity_or_fail()?;

        tracing::debug!(field, count = related.len(), "attaching to to-many relation");
        attach(&self.capability, entity, related.clone())?;

        Ok(related)
    }

    fn detach(&self, identifiers: &[Identifier]) -> Result<Vec<Model>, Error> {
        let field = self.field()?;
        let detach = self
            .hooks
            .hooks(field)
            .and_then(|hooks| hooks.detach.as_ref())
            .ok_or_else(|| Self::unsupported(RelationOp::Detach, field))?;

        let related = self.capability.resolve_to_many(identifiers)?;
        let entity = self.entity_or_fail()?;

        tracing::debug!(field, count = related.len(), "detaching from to-many relation");
        detach(&self.capability, entity, related.clone())?;

        Ok(related)
    }
}

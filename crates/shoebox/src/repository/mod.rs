//! Repository contract and facades.
//!
//! A repository is the per-resource-type contract for identity-based lookup
//! and, optionally, mutation. The facade traits here are the only places
//! that know how to assemble a fully-injected capability from a bare
//! operation request; the per-operation traits are the uniform surface the
//! store layer consumes.

use crate::{
    capability::{
        CrudHooks, CrudRelations, CrudResource, Environment, QueryOne, QueryToMany, QueryToOne,
        RelationHookMap,
    },
    contracts::{
        QueryManyBuilder, QueryOneBuilder, ResourceBuilder, ToManyBuilder, ToOneBuilder,
    },
    error::Error,
    model::{Model, ModelRef},
};

///
/// Repository
///
/// Identity-based lookup for one resource type. Only `find` is required;
/// the fail-fast, batch, and existence forms derive from it.
///

pub trait Repository {
    fn find(&self, resource_id: &str) -> Option<Model>;

    /// Fail-fast lookup: absence is a not-found error.
    fn find_or_fail(&self, resource_id: &str) -> Result<Model, Error> {
        self.find(resource_id)
            .ok_or_else(|| Error::not_found(resource_id))
    }

    /// Best-effort batch lookup: unmatched ids are skipped, ordering follows
    /// the id list.
    fn find_many(&self, resource_ids: &[&str]) -> Vec<Model> {
        resource_ids.iter().filter_map(|id| self.find(id)).collect()
    }

    fn exists(&self, resource_id: &str) -> bool {
        self.find(resource_id).is_some()
    }
}

///
/// ResourceRepository
///
/// A repository wired into a server: it knows its entity type and its
/// injected environment, and provides the default (hook-free) read paths.
///

pub trait ResourceRepository: Repository {
    type Entity: Clone + 'static;

    /// The environment handles injected at registration.
    fn environment(&self) -> Environment;

    #[must_use]
    fn default_query_one(&self, target: ModelRef) -> QueryOne<'_>
    where
        Self: Sized,
    {
        QueryOne::new(self).with_target(target)
    }

    #[must_use]
    fn default_query_to_one(&self, target: ModelRef, field: &str) -> QueryToOne<'_>
    where
        Self: Sized,
    {
        QueryToOne::new(self.environment(), self)
            .with_target(target)
            .with_field(field)
    }

    #[must_use]
    fn default_query_to_many(&self, target: ModelRef, field: &str) -> QueryToMany<'_>
    where
        Self: Sized,
    {
        QueryToMany::new(self.environment(), self)
            .with_target(target)
            .with_field(field)
    }
}

///
/// CrudRepository
///
/// A repository whose resource type supplies CRUD hooks. `crud_resource`
/// assembles the fully-injected capability; a fresh hooks value is built for
/// every operation, keeping capabilities single-use.
///

pub trait CrudRepository: ResourceRepository {
    type Hooks: CrudHooks<Entity = Self::Entity>;

    fn crud(&self) -> Self::Hooks;

    #[must_use]
    fn crud_resource(&self) -> CrudResource<'_, Self::Hooks>
    where
        Self: Sized,
    {
        CrudResource::new(self.environment(), self.crud()).with_repository(self)
    }
}

///
/// RelationsRepository
///
/// A repository whose resource type supplies relationship hooks.
///

pub trait RelationsRepository: ResourceRepository {
    fn relations(&self) -> RelationHookMap<Self::Entity>;

    #[must_use]
    fn crud_relations(&self, target: ModelRef, field: &str) -> CrudRelations<'_, Self::Entity>
    where
        Self: Sized,
    {
        CrudRelations::new(self.environment(), self.relations())
            .with_repository(self)
            .with_target(target)
            .with_field(field)
    }
}

// ----------------------------------------------------------------------
// Per-operation store surface
//
// A resource type implements exactly the operations it supports; the store
// layer presents a uniform surface over whichever are present.
// ----------------------------------------------------------------------

///
/// QueriesOne
///

pub trait QueriesOne {
    type Builder<'a>: QueryOneBuilder
    where
        Self: 'a;

    fn query_one(&self, target: ModelRef) -> Self::Builder<'_>;
}

///
/// QueriesAll
///

pub trait QueriesAll {
    type Builder<'a>: QueryManyBuilder
    where
        Self: 'a;

    fn query_all(&self) -> Self::Builder<'_>;
}

///
/// QueriesToOne
///

pub trait QueriesToOne {
    type Builder<'a>: QueryOneBuilder
    where
        Self: 'a;

    fn query_to_one(&self, target: ModelRef, field: &str) -> Self::Builder<'_>;
}

///
/// QueriesToMany
///

pub trait QueriesToMany {
    type Builder<'a>: QueryManyBuilder
    where
        Self: 'a;

    fn query_to_many(&self, target: ModelRef, field: &str) -> Self::Builder<'_>;
}

///
/// CreatesResources
///

pub trait CreatesResources {
    type Builder<'a>: ResourceBuilder
    where
        Self: 'a;

    fn create(&self) -> Self::Builder<'_>;
}

///
/// UpdatesResources
///

pub trait UpdatesResources {
    type Builder<'a>: ResourceBuilder
    where
        Self: 'a;

    fn update(&self, target: ModelRef) -> Self::Builder<'_>;
}

///
/// DeletesResources
///

pub trait DeletesResources {
    fn delete(&self, target: ModelRef) -> Result<(), Error>;
}

///
/// ModifiesToOne
///

pub trait ModifiesToOne {
    type Builder<'a>: ToOneBuilder
    where
        Self: 'a;

    fn modify_to_one(&self, target: ModelRef, field: &str) -> Self::Builder<'_>;
}

///
/// ModifiesToMany
///

pub trait ModifiesToMany {
    type Builder<'a>: ToManyBuilder
    where
        Self: 'a;

    fn modify_to_many(&self, target: ModelRef, field: &str) -> Self::Builder<'_>;
}

//! Shoebox exposes arbitrary, non-database-backed data sources through a
//! uniform resource-oriented CRUD and relationship-query protocol, modeled
//! on JSON:API semantics.
//!
//! ## Crate layout
//! - `capability`: the operation builders (CRUD, relationships, read-only
//!   query paths, whole-collection queries) and their hook contracts.
//! - `contracts`: collaborator traits (server, store, resource factory) and
//!   the terminal builder contracts the store layer consumes.
//! - `error`: the error taxonomy (configuration, shape, not-found).
//! - `model`: type-erased entity handles, model-or-id references, resource
//!   identifiers.
//! - `page`: the in-memory pagination adapter.
//! - `query`: per-operation filter/sort/include parameters.
//! - `repository`: the repository contract and the facades that assemble
//!   fully-injected capabilities.
//! - `schema`: the narrow schema metadata contract (fields, relations,
//!   filters, pagination support).
//!
//! The `prelude` module mirrors the surface a resource author touches when
//! wiring a repository.

pub mod capability;
pub mod contracts;
pub mod error;
pub mod ident;
pub mod model;
pub mod page;
pub mod query;
pub mod repository;
pub mod schema;

pub use error::Error;

///
/// Prelude
/// Brings the wiring surface and the terminal builder traits into scope.
///

pub mod prelude {
    pub use crate::{
        capability::{
            CollectionHooks, CrudHooks, CrudRelations, CrudResource, Capability, Environment,
            QueryAll, QueryOne, QueryToMany, QueryToOne, RelationHookMap, RelationHooks,
            ResourceData,
        },
        contracts::{
            CollectionResponse, QueryManyBuilder, QueryOneBuilder, RelationData, ResourceBuilder,
            Resources, Server, Store, ToManyBuilder, ToOneBuilder,
        },
        error::Error,
        model::{Identifier, Model, ModelRef, ResourceType},
        page::{Page, PageRequest, PageSettings},
        query::{Direction, FilterMap, FilterValue, QueryContext, SortKey},
        repository::{
            CreatesResources, CrudRepository, DeletesResources, ModifiesToMany, ModifiesToOne,
            QueriesAll, QueriesOne, QueriesToMany, QueriesToOne, RelationsRepository, Repository,
            ResourceRepository, UpdatesResources,
        },
        schema::{Attribute, Field, FilterDef, IdField, Relation, Schema},
    };
}

//! Collaborator and builder contracts.
//!
//! Capability logic never depends on a concrete server, store, or resource
//! serializer; everything flows through the traits in this module. The
//! terminal builder traits are the uniform surface the store layer consumes,
//! regardless of which capability implements an operation.

use crate::{
    capability::ResourceData,
    error::{Error, ShapeError},
    model::{Identifier, Model, ResourceType},
    page::{Page, PageRequest},
};
use std::any::Any;

///
/// Store
///
/// Cross-resource-type lookup, used when resolving relationship identifiers.
/// `find_many` is a best-effort fetch: unmatched identifiers are skipped,
/// never raised, and ordering follows the identifier list.
///

pub trait Store {
    fn find(&self, kind: &ResourceType, id: &str) -> Option<Model>;

    fn find_many(&self, identifiers: &[Identifier]) -> Vec<Model> {
        identifiers
            .iter()
            .filter_map(|identifier| self.find(&identifier.kind, &identifier.id))
            .collect()
    }

    fn exists(&self, kind: &ResourceType, id: &str) -> bool {
        self.find(kind, id).is_some()
    }
}

///
/// Resources
///
/// The serializer-side relationship accessor. Fallback relationship reads ask
/// the entity's resource representation for a relation's current value.
///

pub trait Resources {
    fn relationship(&self, model: &Model, field: &str) -> Result<RelationData, Error>;
}

///
/// Server
///
/// The environment a capability runs in: access to the cross-resource store
/// and the resource-representation factory.
///

pub trait Server {
    fn store(&self) -> &dyn Store;
    fn resources(&self) -> &dyn Resources;
}

///
/// RelationData
///
/// The value of one relationship read: an optional entity for a to-one
/// relation, an entity list for a to-many relation.
///

#[derive(Clone, Debug)]
pub enum RelationData {
    ToOne(Option<Model>),
    ToMany(Vec<Model>),
}

impl RelationData {
    pub fn one<T: Any>(value: Option<T>) -> Self {
        Self::ToOne(value.map(Model::new))
    }

    pub fn many<I, T>(values: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Any,
    {
        Self::ToMany(values.into_iter().map(Model::new).collect())
    }

    /// Require this value to be to-one shaped.
    pub fn into_to_one(self, field: &str) -> Result<Option<Model>, Error> {
        match self {
            Self::ToOne(value) => Ok(value),
            Self::ToMany(_) => Err(ShapeError::ExpectedToOne {
                field: field.to_string(),
            }
            .into()),
        }
    }

    /// Require this value to be to-many shaped.
    pub fn into_to_many(self, field: &str) -> Result<Vec<Model>, Error> {
        match self {
            Self::ToMany(values) => Ok(values),
            Self::ToOne(_) => Err(ShapeError::ExpectedToMany {
                field: field.to_string(),
            }
            .into()),
        }
    }
}

///
/// CollectionResponse
///
/// A whole-collection result that can take several shapes, depending on the
/// singular-filter and pagination policies.
///

#[derive(Clone, Debug)]
pub enum CollectionResponse {
    /// A singular filter matched (or matched nothing).
    One(Option<Model>),
    /// The full (possibly filtered) collection.
    Many(Vec<Model>),
    /// One page of the collection.
    Page(Page<Model>),
}

// ----------------------------------------------------------------------
// Terminal builder contracts
// ----------------------------------------------------------------------

///
/// QueryOneBuilder
/// Terminal contract for builders that yield at most one entity.
///

pub trait QueryOneBuilder {
    fn first(&self) -> Result<Option<Model>, Error>;
}

///
/// QueryManyBuilder
/// Terminal contract for builders that yield an entity collection.
///

pub trait QueryManyBuilder {
    fn get(&self) -> Result<Vec<Model>, Error>;

    /// Return the full collection when no page parameters are supplied,
    /// else one page of it.
    fn get_or_paginate(&self, page: Option<&PageRequest>)
        -> Result<CollectionResponse, Error>;
}

///
/// ResourceBuilder
/// Terminal contract for create/update operations.
///

pub trait ResourceBuilder {
    fn store(&self, data: &ResourceData) -> Result<Model, Error>;
}

///
/// ToOneBuilder
/// Terminal contract for replacing a singular relationship.
///

pub trait ToOneBuilder {
    fn associate(&self, identifier: Option<&Identifier>) -> Result<Option<Model>, Error>;
}

///
/// ToManyBuilder
/// Terminal contract for mutating a plural relationship.
///

pub trait ToManyBuilder {
    fn sync(&self, identifiers: &[Identifier]) -> Result<Vec<Model>, Error>;
    fn attach(&self, identifiers: &[Identifier]) -> Result<Vec<Model>, Error>;
    fn detach(&self, identifiers: &[Identifier]) -> Result<Vec<Model>, Error>;
}

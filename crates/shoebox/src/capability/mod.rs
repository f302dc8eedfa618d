//! Capability builders.
//!
//! A capability is a short-lived builder implementing one family of
//! operations for one resource type. It is created by a repository facade,
//! configured fluently, invoked exactly once through a terminal method, and
//! discarded. Capabilities are never shared across operations; the only
//! state they touch is the injected environment and the target reference.

mod crud;
mod data;
mod query_all;
mod query_one;
mod query_to_many;
mod query_to_one;
mod relations;

pub use crud::{CrudHooks, CrudResource};
pub use data::ResourceData;
pub use query_all::{CollectionHooks, QueryAll};
pub use query_one::QueryOne;
pub use query_to_many::QueryToMany;
pub use query_to_one::QueryToOne;
pub use relations::{CrudRelations, RelationHookMap, RelationHooks};

use crate::{
    contracts::Server,
    error::{ConfigError, Error},
    model::{Identifier, Model, ModelRef},
    page::{Page, PageRequest},
    query::QueryContext,
    repository::Repository,
    schema::Schema,
};
use std::rc::Rc;

///
/// Environment
///
/// The injected handles a capability runs against: the server (store and
/// resource factory) and the resource type's schema. Either may be absent;
/// accessing an absent handle is a fatal configuration error.
///

#[derive(Clone, Default)]
pub struct Environment {
    server: Option<Rc<dyn Server>>,
    schema: Option<Rc<Schema>>,
}

impl Environment {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_server(mut self, server: Rc<dyn Server>) -> Self {
        self.server = Some(server);
        self
    }

    #[must_use]
    pub fn with_schema(mut self, schema: Rc<Schema>) -> Self {
        self.schema = Some(schema);
        self
    }

    pub fn server(&self) -> Result<&dyn Server, Error> {
        self.server
            .as_deref()
            .ok_or_else(|| ConfigError::NotInjected { dependency: "server" }.into())
    }

    pub fn schema(&self) -> Result<&Schema, Error> {
        self.schema
            .as_deref()
            .ok_or_else(|| ConfigError::NotInjected { dependency: "schema" }.into())
    }
}

///
/// Capability
///
/// The shared base of every operation builder: environment access, the
/// operation's query context, and the identifier-resolution helpers used by
/// relationship operations.
///

#[derive(Clone, Default)]
pub struct Capability {
    env: Environment,
    query: QueryContext,
}

impl Capability {
    #[must_use]
    pub fn new(env: Environment) -> Self {
        Self {
            env,
            query: QueryContext::new(),
        }
    }

    #[must_use]
    pub const fn query(&self) -> &QueryContext {
        &self.query
    }

    pub(crate) const fn query_mut(&mut self) -> &mut QueryContext {
        &mut self.query
    }

    pub fn server(&self) -> Result<&dyn Server, Error> {
        self.env.server()
    }

    pub fn schema(&self) -> Result<&Schema, Error> {
        self.env.schema()
    }

    /// Resolve an optional `{type, id}` identifier to an entity. A null
    /// identifier and an unmatched lookup both resolve to `None`.
    pub fn resolve_to_one(&self, identifier: Option<&Identifier>) -> Result<Option<Model>, Error> {
        let Some(identifier) = identifier else {
            return Ok(None);
        };

        Ok(self.server()?.store().find(&identifier.kind, &identifier.id))
    }

    /// Resolve a list of identifiers, silently dropping unmatched entries
    /// and preserving the store's ordering.
    pub fn resolve_to_many(&self, identifiers: &[Identifier]) -> Result<Vec<Model>, Error> {
        let found = self.server()?.store().find_many(identifiers);

        tracing::trace!(
            requested = identifiers.len(),
            resolved = found.len(),
            "resolved relationship identifiers"
        );

        Ok(found)
    }
}

///
/// Target
///
/// Pairs an optional model-or-id reference with the repository able to
/// resolve ids. Resolution is never cached.
///

#[derive(Clone, Default)]
pub(crate) struct Target<'a> {
    model: Option<ModelRef>,
    repository: Option<&'a dyn Repository>,
}

impl<'a> Target<'a> {
    pub(crate) fn set_model(&mut self, model: ModelRef) {
        self.model = Some(model);
    }

    pub(crate) fn set_repository(&mut self, repository: &'a dyn Repository) {
        self.repository = Some(repository);
    }

    pub(crate) const fn is_set(&self) -> bool {
        self.model.is_some()
    }

    /// Lenient resolution: an id that matches nothing is `Ok(None)`, not an
    /// error. No reference (or an id without a repository) is a fatal
    /// configuration error.
    pub(crate) fn model(&self) -> Result<Option<Model>, Error> {
        match &self.model {
            Some(ModelRef::Model(model)) => Ok(Some(model.clone())),
            Some(ModelRef::Id(id)) => match self.repository {
                Some(repository) => Ok(repository.find(id)),
                None => Err(ConfigError::UnresolvedTarget.into()),
            },
            None => Err(ConfigError::UnresolvedTarget.into()),
        }
    }

    /// Fail-fast resolution: the entity must exist.
    pub(crate) fn model_or_fail(&self) -> Result<Model, Error> {
        match &self.model {
            Some(ModelRef::Model(model)) => Ok(model.clone()),
            Some(ModelRef::Id(id)) => match self.repository {
                Some(repository) => repository.find_or_fail(id),
                None => Err(ConfigError::UnresolvedTarget.into()),
            },
            None => Err(ConfigError::UnresolvedTarget.into()),
        }
    }
}

// Shared pagination terminal: requires the schema to declare page settings.
pub(crate) fn paginate_models(
    capability: &Capability,
    items: Vec<Model>,
    request: &PageRequest,
) -> Result<Page<Model>, Error> {
    let Some(settings) = capability.schema()?.pagination() else {
        return Err(ConfigError::MissingPagination.into());
    };

    Ok(settings.paginate(items, request))
}

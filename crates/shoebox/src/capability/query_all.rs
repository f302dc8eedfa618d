use crate::{
    capability::{Capability, Environment, paginate_models},
    contracts::{CollectionResponse, QueryManyBuilder},
    error::{ConfigError, Error},
    model::Model,
    page::{Page, PageRequest},
    query::{FilterMap, FilterValue, SortKey},
};

///
/// CollectionHooks
///
/// The user-supplied whole-collection source for one resource type. The
/// singular lookup is optional; resource types that declare a singular
/// filter on their schema must supply it.
///

pub trait CollectionHooks {
    /// The full (possibly filtered) collection, in storage order.
    fn get(&self, cx: &Capability) -> Result<Vec<Model>, Error>;

    /// Fetch at most one entity for a singular filter key.
    fn find_singular(
        &self,
        cx: &Capability,
        key: &str,
        value: &FilterValue,
    ) -> Result<Option<Model>, Error> {
        let _ = (cx, value);
        Err(ConfigError::UnsupportedSingularFilter {
            key: key.to_string(),
        }
        .into())
    }
}

///
/// QueryAll
///
/// The whole-collection capability builder: filter/sort configuration plus
/// the singular-filter and pagination policies.
///

pub struct QueryAll<H: CollectionHooks> {
    capability: Capability,
    hooks: H,
}

impl<H: CollectionHooks> QueryAll<H> {
    #[must_use]
    pub fn new(env: Environment, hooks: H) -> Self {
        Self {
            capability: Capability::new(env),
            hooks,
        }
    }

    // ------------------------------------------------------------------
    // Configuration
    // ------------------------------------------------------------------

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

    fn all(&self) -> Result<Vec<Model>, Error> {
        self.hooks.get(&self.capability)
    }

    /// One page of the collection. The schema must declare pagination.
    pub fn paginate(&self, request: &PageRequest) -> Result<Page<Model>, Error> {
        paginate_models(&self.capability, self.all()?, request)
    }

    /// Singular-filter policy: when the schema declares a singular filter
    /// whose key is present in the context filters, return at most one
    /// entity (found-or-null); otherwise the full filtered collection.
    pub fn first_or_many(&self) -> Result<CollectionResponse, Error> {
        if let Some(filters) = self.capability.query().filters() {
            let schema = self.capability.schema()?;

            for def in schema.filters().iter().filter(|def| def.is_singular()) {
                if let Some(value) = filters.get(def.key()) {
                    tracing::debug!(key = def.key(), "singular filter present");
                    let found = self.hooks.find_singular(&self.capability, def.key(), value)?;
                    return Ok(CollectionResponse::One(found));
                }
            }
        }

        Ok(CollectionResponse::Many(self.all()?))
    }

    /// `first_or_many` when no page parameters are supplied, else one page.
    pub fn first_or_paginate(
        &self,
        page: Option<&PageRequest>,
    ) -> Result<CollectionResponse, Error> {
        match page.filter(|request| !request.is_empty()) {
            None => self.first_or_many(),
            Some(request) => Ok(CollectionResponse::Page(self.paginate(request)?)),
        }
    }
}

impl<H: CollectionHooks> QueryManyBuilder for QueryAll<H> {
    fn get(&self) -> Result<Vec<Model>, Error> {
        self.all()
    }

    fn get_or_paginate(&self, page: Option<&PageRequest>) -> Result<CollectionResponse, Error> {
        match page.filter(|request| !request.is_empty()) {
            None => Ok(CollectionResponse::Many(self.all()?)),
            Some(request) => Ok(CollectionResponse::Page(self.paginate(request)?)),
        }
    }
}

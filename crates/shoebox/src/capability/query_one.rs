use crate::{
    capability::Capability,
    contracts::QueryOneBuilder,
    error::{ConfigError, Error},
    model::{Model, ModelRef},
    query::FilterMap,
    repository::Repository,
};

///
/// QueryOne
///
/// The default single-resource read path: resolves model-or-id directly
/// through the repository, with no capability-level dispatch.
///

pub struct QueryOne<'a> {
    capability: Capability,
    repository: &'a dyn Repository,
    target: Option<ModelRef>,
}

impl<'a> QueryOne<'a> {
    #[must_use]
    pub fn new(repository: &'a dyn Repository) -> Self {
        Self {
            capability: Capability::default(),
            repository,
            target: None,
        }
    }

    #[must_use]
    pub fn with_target(mut self, target: ModelRef) -> Self {
        self.target = Some(target);
        self
    }

    #[must_use]
    pub fn filter(mut self, filters: FilterMap) -> Self {
        self.capability.query_mut().set_filters(filters);
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
}

impl QueryOneBuilder for QueryOne<'_> {
    fn first(&self) -> Result<Option<Model>, Error> {
        match &self.target {
            Some(ModelRef::Id(id)) => Ok(self.repository.find(id)),
            Some(ModelRef::Model(model)) => Ok(Some(model.clone())),
            None => Err(ConfigError::MissingTarget.into()),
        }
    }
}

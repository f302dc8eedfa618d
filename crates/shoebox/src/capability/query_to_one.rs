use crate::{
    capability::{Capability, Environment},
    contracts::QueryOneBuilder,
    error::{ConfigError, Error},
    model::{Model, ModelRef},
    query::FilterMap,
    repository::Repository,
};

///
/// QueryToOne
///
/// The default singular-relationship read path: fail-fast target resolution
/// followed by the fallback read from the entity's resource representation.
/// No hook lookup exists at this level.
///

pub struct QueryToOne<'a> {
    capability: Capability,
    repository: &'a dyn Repository,
    target: Option<ModelRef>,
    field: Option<String>,
}

impl<'a> QueryToOne<'a> {
    #[must_use]
    pub fn new(env: Environment, repository: &'a dyn Repository) -> Self {
        Self {
            capability: Capability::new(env),
            repository,
            target: None,
            field: None,
        }
    }

    #[must_use]
    pub fn with_target(mut self, target: ModelRef) -> Self {
        self.target = Some(target);
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
    pub fn include<I, S>(mut self, paths: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.capability.query_mut().set_include_paths(paths);
        self
    }

    fn resolve(&self) -> Result<Model, Error> {
        match &self.target {
            Some(ModelRef::Id(id)) => self.repository.find_or_fail(id),
            Some(ModelRef::Model(model)) => Ok(model.clone()),
            None => Err(ConfigError::MissingTarget.into()),
        }
    }
}

impl QueryOneBuilder for QueryToOne<'_> {
    fn first(&self) -> Result<Option<Model>, Error> {
        let field = self
            .field
            .as_deref()
            .ok_or(ConfigError::MissingField)?;
        let model = self.resolve()?;

        self.capability
            .server()?
            .resources()
            .relationship(&model, field)?
            .into_to_one(field)
    }
}

//! The tags resource: read-only, served entirely by the default query path.

use crate::entities::{Tag, TagStorage};
use shoebox::prelude::*;
use std::rc::{Rc, Weak};

pub fn tag_schema() -> Schema {
    Schema::new("tags")
        .field(IdField::new())
        .field(Attribute::new("displayName").sortable())
        .field(Attribute::new("slug"))
}

///
/// TagRepository
///

pub struct TagRepository {
    storage: Rc<TagStorage>,
    server: Weak<dyn Server>,
    schema: Rc<Schema>,
}

impl TagRepository {
    #[must_use]
    pub fn new(storage: Rc<TagStorage>, server: Weak<dyn Server>, schema: Rc<Schema>) -> Self {
        Self {
            storage,
            server,
            schema,
        }
    }
}

impl Repository for TagRepository {
    fn find(&self, resource_id: &str) -> Option<Model> {
        self.storage.find(resource_id).map(Model::new)
    }
}

impl ResourceRepository for TagRepository {
    type Entity = Tag;

    fn environment(&self) -> Environment {
        let mut env = Environment::new().with_schema(self.schema.clone());
        if let Some(server) = self.server.upgrade() {
            env = env.with_server(server);
        }

        env
    }
}

impl QueriesOne for TagRepository {
    type Builder<'a>
        = QueryOne<'a>
    where
        Self: 'a;

    fn query_one(&self, target: ModelRef) -> Self::Builder<'_> {
        self.default_query_one(target)
    }
}

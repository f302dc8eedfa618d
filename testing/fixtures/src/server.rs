use crate::{
    entities::{Site, SiteStorage, Tag, TagStorage, User, UserStorage},
    resources::{SiteRepository, TagRepository, UserRepository, site_schema, tag_schema, user_schema},
};
use shoebox::{
    error::ShapeError,
    prelude::*,
};
use std::rc::{Rc, Weak};

///
/// TestServer
///
/// The embedding environment for the worked example: owns the storages and
/// schemas, dispatches cross-type lookups to the per-type repositories, and
/// serves fallback relationship reads. Repositories are assembled fresh per
/// operation and hold only a weak handle back to the server.
///

pub struct TestServer {
    sites: Rc<SiteStorage>,
    tags: Rc<TagStorage>,
    users: Rc<UserStorage>,
    site_schema: Rc<Schema>,
    tag_schema: Rc<Schema>,
    user_schema: Rc<Schema>,
    weak: Weak<TestServer>,
}

impl TestServer {
    #[must_use]
    pub fn new() -> Rc<Self> {
        Rc::new_cyclic(|weak| {
            let users = Rc::new(UserStorage::seeded());
            let tags = Rc::new(TagStorage::seeded());
            let sites = Rc::new(SiteStorage::seeded(users.clone(), tags.clone()));

            Self {
                sites,
                tags,
                users,
                site_schema: Rc::new(site_schema()),
                tag_schema: Rc::new(tag_schema()),
                user_schema: Rc::new(user_schema()),
                weak: weak.clone(),
            }
        })
    }

    // ------------------------------------------------------------------
    // Storage access (test assertions)
    // ------------------------------------------------------------------

    #[must_use]
    pub fn sites(&self) -> &SiteStorage {
        &self.sites
    }

    #[must_use]
    pub fn tags(&self) -> &TagStorage {
        &self.tags
    }

    #[must_use]
    pub fn users(&self) -> &UserStorage {
        &self.users
    }

    // ------------------------------------------------------------------
    // Repositories
    // ------------------------------------------------------------------

    #[must_use]
    pub fn site_repository(&self) -> SiteRepository {
        SiteRepository::new(
            self.sites.clone(),
            self.weak_server(),
            self.site_schema.clone(),
        )
    }

    #[must_use]
    pub fn tag_repository(&self) -> TagRepository {
        TagRepository::new(
            self.tags.clone(),
            self.weak_server(),
            self.tag_schema.clone(),
        )
    }

    #[must_use]
    pub fn user_repository(&self) -> UserRepository {
        UserRepository::new(
            self.users.clone(),
            self.weak_server(),
            self.user_schema.clone(),
        )
    }

    fn weak_server(&self) -> Weak<dyn Server> {
        self.weak.clone()
    }
}

impl Server for TestServer {
    fn store(&self) -> &dyn Store {
        self
    }

    fn resources(&self) -> &dyn Resources {
        self
    }
}

impl Store for TestServer {
    fn find(&self, kind: &ResourceType, id: &str) -> Option<Model> {
        match kind.as_str() {
            "sites" => self.site_repository().find(id),
            "tags" => self.tag_repository().find(id),
            "users" => self.user_repository().find(id),
            _ => None,
        }
    }
}

impl Resources for TestServer {
    fn relationship(&self, model: &Model, field: &str) -> Result<RelationData, Error> {
        if let Some(site) = model.downcast_ref::<Site>() {
            return match field {
                "owner" => Ok(RelationData::one(site.owner().cloned())),
                "tags" => Ok(RelationData::many(site.tags().to_vec())),
                _ => Err(unknown_relation("sites", field)),
            };
        }

        let kind = if model.is::<Tag>() {
            "tags"
        } else if model.is::<User>() {
            "users"
        } else {
            model.type_name()
        };

        Err(unknown_relation(kind, field))
    }
}

fn unknown_relation(kind: &str, field: &str) -> Error {
    ShapeError::UnknownRelation {
        kind: ResourceType::from(kind),
        field: field.to_string(),
    }
    .into()
}

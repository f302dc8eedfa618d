//! The users resource: CRUD without a `read` refinement.

use crate::entities::{User, UserStorage};
use shoebox::prelude::*;
use std::rc::{Rc, Weak};

pub fn user_schema() -> Schema {
    Schema::new("users")
        .field(IdField::new())
        .field(Attribute::new("name").sortable())
        .field(Attribute::new("username"))
}

///
/// UserRepository
///

pub struct UserRepository {
    storage: Rc<UserStorage>,
    server: Weak<dyn Server>,
    schema: Rc<Schema>,
}

impl UserRepository {
    #[must_use]
    pub fn new(storage: Rc<UserStorage>, server: Weak<dyn Server>, schema: Rc<Schema>) -> Self {
        Self {
            storage,
            server,
            schema,
        }
    }
}

impl Repository for UserRepository {
    fn find(&self, resource_id: &str) -> Option<Model> {
        self.storage.find(resource_id).map(Model::new)
    }
}

impl ResourceRepository for UserRepository {
    type Entity = User;

    fn environment(&self) -> Environment {
        let mut env = Environment::new().with_schema(self.schema.clone());
        if let Some(server) = self.server.upgrade() {
            env = env.with_server(server);
        }

        env
    }
}

impl CrudRepository for UserRepository {
    type Hooks = CrudUser;

    fn crud(&self) -> CrudUser {
        CrudUser::new(self.storage.clone())
    }
}

impl QueriesOne for UserRepository {
    type Builder<'a>
        = CrudResource<'a, CrudUser>
    where
        Self: 'a;

    fn query_one(&self, target: ModelRef) -> Self::Builder<'_> {
        self.crud_resource().with_target(target)
    }
}

impl CreatesResources for UserRepository {
    type Builder<'a>
        = CrudResource<'a, CrudUser>
    where
        Self: 'a;

    fn create(&self) -> Self::Builder<'_> {
        self.crud_resource()
    }
}

impl UpdatesResources for UserRepository {
    type Builder<'a>
        = CrudResource<'a, CrudUser>
    where
        Self: 'a;

    fn update(&self, target: ModelRef) -> Self::Builder<'_> {
        self.crud_resource().with_target(target)
    }
}

impl DeletesResources for UserRepository {
    fn delete(&self, target: ModelRef) -> Result<(), Error> {
        self.crud_resource().with_target(target).destroy()
    }
}

///
/// CrudUser
///

pub struct CrudUser {
    storage: Rc<UserStorage>,
}

impl CrudUser {
    #[must_use]
    pub fn new(storage: Rc<UserStorage>) -> Self {
        Self { storage }
    }
}

impl CrudHooks for CrudUser {
    type Entity = User;

    fn create(&self, _cx: &Capability, data: &ResourceData) -> Result<User, Error> {
        let user = User::new(data.require_str("username")?, data.require_str("name")?);
        self.storage.store(&user);

        Ok(user)
    }

    fn update(
        &self,
        _cx: &Capability,
        mut user: User,
        data: &ResourceData,
    ) -> Result<Option<User>, Error> {
        if let Some(name) = data.str("name") {
            user.set_name(name);
        }
        self.storage.store(&user);

        Ok(Some(user))
    }

    fn delete(&self, _cx: &Capability, user: User) -> Result<(), Error> {
        self.storage.remove(user.username());

        Ok(())
    }
}

//! The sites resource: the full capability surface (CRUD, relationships,
//! whole-collection queries with a singular filter and pagination).

use crate::entities::{Site, SiteStorage, Tag, User};
use shoebox::{error::ConfigError, prelude::*};
use std::{
    collections::BTreeSet,
    rc::{Rc, Weak},
};

pub fn site_schema() -> Schema {
    Schema::new("sites")
        .field(IdField::new())
        .field(Attribute::new("domain"))
        .field(Attribute::new("name").sortable())
        .field(Relation::to_one("owner").with_type("users"))
        .field(Relation::to_many("tags"))
        .filter(FilterDef::new("slug").singular())
        .filter(FilterDef::new("slugs"))
        .with_pagination(PageSettings::default())
}

///
/// SiteRepository
///

pub struct SiteRepository {
    storage: Rc<SiteStorage>,
    server: Weak<dyn Server>,
    schema: Rc<Schema>,
}

impl SiteRepository {
    #[must_use]
    pub fn new(storage: Rc<SiteStorage>, server: Weak<dyn Server>, schema: Rc<Schema>) -> Self {
        Self {
            storage,
            server,
            schema,
        }
    }
}

impl Repository for SiteRepository {
    fn find(&self, resource_id: &str) -> Option<Model> {
        self.storage.find(resource_id).map(Model::new)
    }
}

impl ResourceRepository for SiteRepository {
    type Entity = Site;

    fn environment(&self) -> Environment {
        let mut env = Environment::new().with_schema(self.schema.clone());
        if let Some(server) = self.server.upgrade() {
            env = env.with_server(server);
        }

        env
    }
}

impl CrudRepository for SiteRepository {
    type Hooks = CrudSite;

    fn crud(&self) -> CrudSite {
        CrudSite::new(self.storage.clone())
    }
}

impl RelationsRepository for SiteRepository {
    fn relations(&self) -> RelationHookMap<Site> {
        site_relations(self.storage.clone())
    }
}

impl QueriesOne for SiteRepository {
    type Builder<'a>
        = CrudResource<'a, CrudSite>
    where
        Self: 'a;

    fn query_one(&self, target: ModelRef) -> Self::Builder<'_> {
        self.crud_resource().with_target(target)
    }
}

impl QueriesAll for SiteRepository {
    type Builder<'a>
        = QueryAll<QuerySites>
    where
        Self: 'a;

    fn query_all(&self) -> Self::Builder<'_> {
        QueryAll::new(self.environment(), QuerySites::new(self.storage.clone()))
    }
}

impl QueriesToOne for SiteRepository {
    type Builder<'a>
        = CrudRelations<'a, Site>
    where
        Self: 'a;

    fn query_to_one(&self, target: ModelRef, field: &str) -> Self::Builder<'_> {
        self.crud_relations(target, field)
    }
}

impl QueriesToMany for SiteRepository {
    type Builder<'a>
        = CrudRelations<'a, Site>
    where
        Self: 'a;

    fn query_to_many(&self, target: ModelRef, field: &str) -> Self::Builder<'_> {
        self.crud_relations(target, field)
    }
}

impl CreatesResources for SiteRepository {
    type Builder<'a>
        = CrudResource<'a, CrudSite>
    where
        Self: 'a;

    fn create(&self) -> Self::Builder<'_> {
        self.crud_resource()
    }
}

impl UpdatesResources for SiteRepository {
    type Builder<'a>
        = CrudResource<'a, CrudSite>
    where
        Self: 'a;

    fn update(&self, target: ModelRef) -> Self::Builder<'_> {
        self.crud_resource().with_target(target)
    }
}

impl DeletesResources for SiteRepository {
    fn delete(&self, target: ModelRef) -> Result<(), Error> {
        self.crud_resource().with_target(target).destroy()
    }
}

impl ModifiesToOne for SiteRepository {
    type Builder<'a>
        = CrudRelations<'a, Site>
    where
        Self: 'a;

    fn modify_to_one(&self, target: ModelRef, field: &str) -> Self::Builder<'_> {
        self.crud_relations(target, field)
    }
}

impl ModifiesToMany for SiteRepository {
    type Builder<'a>
        = CrudRelations<'a, Site>
    where
        Self: 'a;

    fn modify_to_many(&self, target: ModelRef, field: &str) -> Self::Builder<'_> {
        self.crud_relations(target, field)
    }
}

///
/// CrudSite
///

pub struct CrudSite {
    storage: Rc<SiteStorage>,
}

impl CrudSite {
    #[must_use]
    pub fn new(storage: Rc<SiteStorage>) -> Self {
        Self { storage }
    }

    fn owner_from(cx: &Capability, data: &ResourceData) -> Result<Option<User>, Error> {
        match cx.resolve_to_one(data.identifier("owner")?.as_ref())? {
            Some(model) => Ok(Some(model.cast::<User>()?)),
            None => Ok(None),
        }
    }

    fn tags_from(cx: &Capability, data: &ResourceData) -> Result<Vec<Tag>, Error> {
        cast_tags(&cx.resolve_to_many(&data.identifiers("tags")?)?)
    }
}

impl CrudHooks for CrudSite {
    type Entity = Site;

    /// A `name` filter turns the lookup into a contains-match; anything else
    /// passes the site through.
    fn read(&self, cx: &Capability, site: Site) -> Result<Option<Site>, Error> {
        if let Some(name) = cx.query().filters().and_then(|f| f.value("name")) {
            if !site.name().is_some_and(|n| n.contains(name)) {
                return Ok(None);
            }
        }

        Ok(Some(site))
    }

    fn create(&self, cx: &Capability, data: &ResourceData) -> Result<Site, Error> {
        let owner = Self::owner_from(cx, data)?;
        let tags = Self::tags_from(cx, data)?;

        let mut site = Site::new(data.require_str("slug")?);
        site.set_domain(data.str("domain").map(ToString::to_string));
        site.set_name(data.str("name").map(ToString::to_string));
        site.set_owner(owner);
        site.set_tags(tags);

        self.storage.store(&site);

        Ok(site)
    }

    fn update(
        &self,
        cx: &Capability,
        mut site: Site,
        data: &ResourceData,
    ) -> Result<Option<Site>, Error> {
        if data.has("domain") {
            site.set_domain(data.str("domain").map(ToString::to_string));
        }
        if data.has("name") {
            site.set_name(data.str("name").map(ToString::to_string));
        }
        if data.has("owner") {
            site.set_owner(Self::owner_from(cx, data)?);
        }
        if data.has("tags") {
            site.set_tags(Self::tags_from(cx, data)?);
        }

        self.storage.store(&site);

        Ok(Some(site))
    }

    fn delete(&self, _cx: &Capability, site: Site) -> Result<(), Error> {
        self.storage.remove(site.slug());

        Ok(())
    }
}

///
/// Relationship hooks
///
/// Writers persist through the storage; attach/detach de-duplicate by slug.
///

pub fn site_relations(storage: Rc<SiteStorage>) -> RelationHookMap<Site> {
    let set_owner = {
        let storage = storage.clone();
        move |_cx: &Capability, mut site: Site, value: RelationData| {
            let owner = match value.into_to_one("owner")? {
                Some(model) => Some(model.cast::<User>()?),
                None => None,
            };
            site.set_owner(owner);
            storage.store(&site);

            Ok(())
        }
    };

    let set_tags = {
        let storage = storage.clone();
        move |_cx: &Capability, mut site: Site, value: RelationData| {
            let tags = cast_tags(&value.into_to_many("tags")?)?;
            site.set_tags(dedupe_tags(tags));
            storage.store(&site);

            Ok(())
        }
    };

    let attach_tags = {
        let storage = storage.clone();
        move |_cx: &Capability, mut site: Site, related: Vec<Model>| {
            let mut tags = site.tags().to_vec();
            tags.extend(cast_tags(&related)?);
            site.set_tags(dedupe_tags(tags));
            storage.store(&site);

            Ok(())
        }
    };

    let detach_tags = {
        let storage = storage.clone();
        move |_cx: &Capability, mut site: Site, related: Vec<Model>| {
            let remove: BTreeSet<String> = cast_tags(&related)?
                .into_iter()
                .map(|tag| tag.slug().to_string())
                .collect();
            let kept = site
                .tags()
                .iter()
                .filter(|tag| !remove.contains(tag.slug()))
                .cloned()
                .collect();
            site.set_tags(kept);
            storage.store(&site);

            Ok(())
        }
    };

    RelationHookMap::new()
        .relation("owner", RelationHooks::new().set(set_owner))
        .relation(
            "tags",
            RelationHooks::new()
                .get(|_cx, site: &Site| Ok(RelationData::many(site.tags().to_vec())))
                .set(set_tags)
                .attach(attach_tags)
                .detach(detach_tags),
        )
}

///
/// QuerySites
///

pub struct QuerySites {
    storage: Rc<SiteStorage>,
}

impl QuerySites {
    #[must_use]
    pub fn new(storage: Rc<SiteStorage>) -> Self {
        Self { storage }
    }
}

impl CollectionHooks for QuerySites {
    fn get(&self, cx: &Capability) -> Result<Vec<Model>, Error> {
        let mut sites = self.storage.all();

        if let Some(slugs) = cx.query().filters().and_then(|f| f.values("slugs")) {
            sites.retain(|site| slugs.iter().any(|slug| slug.as_str() == site.slug()));
        }

        Ok(sites.into_iter().map(Model::new).collect())
    }

    fn find_singular(
        &self,
        _cx: &Capability,
        key: &str,
        value: &FilterValue,
    ) -> Result<Option<Model>, Error> {
        if key == "slug" {
            return Ok(value
                .as_str()
                .and_then(|slug| self.storage.find(slug))
                .map(Model::new));
        }

        Err(ConfigError::UnsupportedSingularFilter {
            key: key.to_string(),
        }
        .into())
    }
}

fn cast_tags(models: &[Model]) -> Result<Vec<Tag>, Error> {
    models.iter().map(Model::cast::<Tag>).collect()
}

fn dedupe_tags(tags: Vec<Tag>) -> Vec<Tag> {
    let mut seen = BTreeSet::new();

    tags.into_iter()
        .filter(|tag| seen.insert(tag.slug().to_string()))
        .collect()
}

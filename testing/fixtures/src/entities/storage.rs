//! In-memory storages for the worked example.
//!
//! Each storage keeps plain records behind a `RefCell` and re-materializes a
//! fresh entity on every `find`, the way a remote API or flat file would.
//! Site records reference owners and tags by id; materialization resolves
//! them through the sibling storages.

use crate::entities::{Site, Tag, User};
use std::{cell::RefCell, collections::BTreeMap, rc::Rc};

///
/// SiteStorage
///

#[derive(Clone, Debug, Default)]
struct SiteRecord {
    domain: Option<String>,
    name: Option<String>,
    owner_id: Option<String>,
    tag_ids: Vec<String>,
}

pub struct SiteStorage {
    users: Rc<UserStorage>,
    tags: Rc<TagStorage>,
    records: RefCell<BTreeMap<String, SiteRecord>>,
}

impl SiteStorage {
    #[must_use]
    pub fn new(users: Rc<UserStorage>, tags: Rc<TagStorage>) -> Self {
        Self {
            users,
            tags,
            records: RefCell::new(BTreeMap::new()),
        }
    }

    /// A storage pre-loaded with the canonical dataset.
    #[must_use]
    pub fn seeded(users: Rc<UserStorage>, tags: Rc<TagStorage>) -> Self {
        let storage = Self::new(users, tags);

        {
            let mut records = storage.records.borrow_mut();
            records.insert(
                "example".to_string(),
                SiteRecord {
                    domain: Some("example.com".to_string()),
                    name: Some("Example Site".to_string()),
                    owner_id: Some("john.doe".to_string()),
                    tag_ids: Vec::new(),
                },
            );
            records.insert(
                "facebook".to_string(),
                SiteRecord {
                    domain: Some("facebook.com".to_string()),
                    name: Some("Facebook".to_string()),
                    ..SiteRecord::default()
                },
            );
            records.insert(
                "google".to_string(),
                SiteRecord {
                    domain: Some("google.com".to_string()),
                    name: Some("Google".to_string()),
                    ..SiteRecord::default()
                },
            );
            records.insert(
                "twitter".to_string(),
                SiteRecord {
                    domain: Some("twitter.com".to_string()),
                    name: Some("Twitter".to_string()),
                    ..SiteRecord::default()
                },
            );
            records.insert(
                "shoebox".to_string(),
                SiteRecord {
                    domain: Some("shoebox.dev".to_string()),
                    name: Some("Shoebox".to_string()),
                    owner_id: None,
                    tag_ids: vec!["rust".to_string(), "json-api".to_string()],
                },
            );
        }

        storage
    }

    /// Find a site by slug, materializing a fresh entity with its owner and
    /// tags resolved.
    #[must_use]
    pub fn find(&self, slug: &str) -> Option<Site> {
        let records = self.records.borrow();
        let record = records.get(slug)?;

        Some(self.materialize(slug, record))
    }

    #[must_use]
    pub fn exists(&self, slug: &str) -> bool {
        self.records.borrow().contains_key(slug)
    }

    /// All sites in slug order.
    #[must_use]
    pub fn all(&self) -> Vec<Site> {
        self.records
            .borrow()
            .iter()
            .map(|(slug, record)| self.materialize(slug, record))
            .collect()
    }

    pub fn store(&self, site: &Site) {
        let record = SiteRecord {
            domain: site.domain().map(ToString::to_string),
            name: site.name().map(ToString::to_string),
            owner_id: site.owner().map(|owner| owner.username().to_string()),
            tag_ids: site
                .tags()
                .iter()
                .map(|tag| tag.slug().to_string())
                .collect(),
        };

        self.records
            .borrow_mut()
            .insert(site.slug().to_string(), record);
    }

    pub fn remove(&self, slug: &str) {
        self.records.borrow_mut().remove(slug);
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.records.borrow().len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.borrow().is_empty()
    }

    fn materialize(&self, slug: &str, record: &SiteRecord) -> Site {
        let mut site = Site::new(slug);
        site.set_domain(record.domain.clone());
        site.set_name(record.name.clone());
        site.set_owner(
            record
                .owner_id
                .as_deref()
                .and_then(|username| self.users.find(username)),
        );
        site.set_tags(
            record
                .tag_ids
                .iter()
                .filter_map(|tag_slug| self.tags.find(tag_slug))
                .collect(),
        );

        site
    }
}

///
/// UserStorage
///

pub struct UserStorage {
    records: RefCell<BTreeMap<String, String>>,
}

impl Default for UserStorage {
    fn default() -> Self {
        Self::new()
    }
}

impl UserStorage {
    #[must_use]
    pub fn new() -> Self {
        Self {
            records: RefCell::new(BTreeMap::new()),
        }
    }

    #[must_use]
    pub fn seeded() -> Self {
        let storage = Self::new();
        storage.store(&User::new("john.doe", "John Doe"));
        storage.store(&User::new("jane.doe", "Jane Doe"));

        storage
    }

    #[must_use]
    pub fn find(&self, username: &str) -> Option<User> {
        self.records
            .borrow()
            .get(username)
            .map(|name| User::new(username, name))
    }

    #[must_use]
    pub fn exists(&self, username: &str) -> bool {
        self.records.borrow().contains_key(username)
    }

    #[must_use]
    pub fn all(&self) -> Vec<User> {
        self.records
            .borrow()
            .iter()
            .map(|(username, name)| User::new(username, name))
            .collect()
    }

    pub fn store(&self, user: &User) {
        self.records
            .borrow_mut()
            .insert(user.username().to_string(), user.name().to_string());
    }

    pub fn remove(&self, username: &str) {
        self.records.borrow_mut().remove(username);
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.records.borrow().len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.borrow().is_empty()
    }
}

///
/// TagStorage
///

pub struct TagStorage {
    records: RefCell<BTreeMap<String, String>>,
}

impl Default for TagStorage {
    fn default() -> Self {
        Self::new()
    }
}

impl TagStorage {
    #[must_use]
    pub fn new() -> Self {
        Self {
            records: RefCell::new(BTreeMap::new()),
        }
    }

    #[must_use]
    pub fn seeded() -> Self {
        let storage = Self::new();
        storage.store(&Tag::new("rust", "Rust"));
        storage.store(&Tag::new("json-api", "JSON:API"));
        storage.store(&Tag::new("test", "Test"));

        storage
    }

    #[must_use]
    pub fn find(&self, slug: &str) -> Option<Tag> {
        self.records
            .borrow()
            .get(slug)
            .map(|display_name| Tag::new(slug, display_name))
    }

    #[must_use]
    pub fn find_many(&self, slugs: &[&str]) -> Vec<Tag> {
        slugs.iter().filter_map(|slug| self.find(slug)).collect()
    }

    #[must_use]
    pub fn exists(&self, slug: &str) -> bool {
        self.records.borrow().contains_key(slug)
    }

    #[must_use]
    pub fn all(&self) -> Vec<Tag> {
        self.records
            .borrow()
            .iter()
            .map(|(slug, display_name)| Tag::new(slug, display_name))
            .collect()
    }

    pub fn store(&self, tag: &Tag) {
        self.records
            .borrow_mut()
            .insert(tag.slug().to_string(), tag.display_name().to_string());
    }

    pub fn remove(&self, slug: &str) {
        self.records.borrow_mut().remove(slug);
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.records.borrow().len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.borrow().is_empty()
    }
}

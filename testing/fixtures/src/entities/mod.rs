mod storage;

pub use storage::{SiteStorage, TagStorage, UserStorage};

///
/// Site
///
/// A website keyed by slug, with an optional owner and a tag list.
///

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Site {
    slug: String,
    domain: Option<String>,
    name: Option<String>,
    owner: Option<User>,
    tags: Vec<Tag>,
}

impl Site {
    pub fn new(slug: impl Into<String>) -> Self {
        let slug = slug.into();
        assert!(!slug.is_empty(), "expecting a non-empty slug");

        Self {
            slug,
            domain: None,
            name: None,
            owner: None,
            tags: Vec::new(),
        }
    }

    #[must_use]
    pub fn slug(&self) -> &str {
        &self.slug
    }

    #[must_use]
    pub fn domain(&self) -> Option<&str> {
        self.domain.as_deref()
    }

    pub fn set_domain(&mut self, domain: Option<String>) -> &mut Self {
        self.domain = domain.filter(|d| !d.is_empty());
        self
    }

    #[must_use]
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn set_name(&mut self, name: Option<String>) -> &mut Self {
        self.name = name.filter(|n| !n.is_empty());
        self
    }

    #[must_use]
    pub const fn owner(&self) -> Option<&User> {
        self.owner.as_ref()
    }

    pub fn set_owner(&mut self, owner: Option<User>) -> &mut Self {
        self.owner = owner;
        self
    }

    #[must_use]
    pub const fn has_owner(&self) -> bool {
        self.owner.is_some()
    }

    #[must_use]
    pub fn tags(&self) -> &[Tag] {
        &self.tags
    }

    pub fn set_tags(&mut self, tags: Vec<Tag>) -> &mut Self {
        self.tags = tags;
        self
    }

    #[must_use]
    pub fn has_tags(&self) -> bool {
        !self.tags.is_empty()
    }

    /// The slugs of this site's tags, in order.
    #[must_use]
    pub fn tag_slugs(&self) -> Vec<&str> {
        self.tags.iter().map(Tag::slug).collect()
    }
}

///
/// User
///

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct User {
    username: String,
    name: String,
}

impl User {
    pub fn new(username: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            name: name.into(),
        }
    }

    #[must_use]
    pub fn username(&self) -> &str {
        &self.username
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn set_name(&mut self, name: impl Into<String>) -> &mut Self {
        self.name = name.into();
        self
    }
}

///
/// Tag
///

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Tag {
    slug: String,
    display_name: String,
}

impl Tag {
    pub fn new(slug: impl Into<String>, display_name: impl Into<String>) -> Self {
        Self {
            slug: slug.into(),
            display_name: display_name.into(),
        }
    }

    #[must_use]
    pub fn slug(&self) -> &str {
        &self.slug
    }

    #[must_use]
    pub fn display_name(&self) -> &str {
        &self.display_name
    }

    pub fn set_display_name(&mut self, display_name: impl Into<String>) -> &mut Self {
        self.display_name = display_name.into();
        self
    }
}

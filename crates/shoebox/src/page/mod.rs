
use serde::Serialize;
use std::collections::BTreeMap;

/// Page size applied when a request carries no explicit size.
pub const DEFAULT_PAGE_SIZE: u64 = 15;

///
/// PageSettings
///
/// Pagination support for one resource type: the page-parameter key names
/// and the default page size. Declared on the schema; absence means the
/// resource cannot paginate.
///

#[derive(Clone, Debug)]
pub struct PageSettings {
    page_key: String,
    size_key: String,
    default_size: u64,
}

impl Default for PageSettings {
    fn default() -> Self {
        Self {
            page_key: "number".to_string(),
            size_key: "size".to_string(),
            default_size: DEFAULT_PAGE_SIZE,
        }
    }
}

impl PageSettings {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_page_key(mut self, key: impl Into<String>) -> Self {
        let key = key.into();
        assert!(!key.is_empty(), "page parameter cannot be an empty string");

        self.page_key = key;
        self
    }

    #[must_use]
    pub fn with_size_key(mut self, key: impl Into<String>) -> Self {
        let key = key.into();
        assert!(
            !key.is_empty(),
            "per-page parameter cannot be an empty string"
        );

        self.size_key = key;
        self
    }

    #[must_use]
    pub const fn with_default_size(mut self, size: u64) -> Self {
        assert!(size > 0, "default page size must be positive");

        self.default_size = size;
        self
    }

    /// The configured `(page, size)` parameter key names.
    #[must_use]
    pub fn keys(&self) -> (&str, &str) {
        (&self.page_key, &self.size_key)
    }

    /// Parse raw page parameters (as received from the wire) using the
    /// configured key names. Unparseable values are treated as absent.
    #[must_use]
    pub fn request(&self, params: &BTreeMap<String, String>) -> PageRequest {
        let number = params.get(&self.page_key).and_then(|v| v.parse().ok());
        let size = params.get(&self.size_key).and_then(|v| v.parse().ok());

        PageRequest { number, size }
    }

    /// Slice an in-memory sequence into one page.
    #[must_use]
    pub fn paginate<T>(&self, all_items: Vec<T>, request: &PageRequest) -> Page<T> {
        Page::new(
            all_items,
            request.number.unwrap_or(1).max(1),
            request.size.unwrap_or(self.default_size).max(1),
            &self.page_key,
            &self.size_key,
        )
    }
}

///
/// PageRequest
///
/// Requested page number and size; both optional.
///

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct PageRequest {
    pub number: Option<u64>,
    pub size: Option<u64>,
}

impl PageRequest {
    #[must_use]
    pub const fn new(number: u64, size: u64) -> Self {
        Self {
            number: Some(number),
            size: Some(size),
        }
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.number.is_none() && self.size.is_none()
    }
}

///
/// Page
///
/// One slice of an in-memory sequence, with totals and pure page-number
/// navigation. `last_page` is never below 1, even for an empty sequence.
///

#[derive(Clone, Debug)]
pub struct Page<T> {
    items: Vec<T>,
    number: u64,
    per_page: u64,
    total: u64,
    last_page: u64,
    page_key: String,
    size_key: String,
}

impl<T> Page<T> {
    #[expect(clippy::cast_possible_truncation)]
    fn new(all_items: Vec<T>, number: u64, per_page: u64, page_key: &str, size_key: &str) -> Self {
        let total = all_items.len() as u64;
        let last_page = total.div_ceil(per_page).max(1);

        let skip = (number - 1).saturating_mul(per_page) as usize;
        let items: Vec<T> = all_items
            .into_iter()
            .skip(skip)
            .take(per_page as usize)
            .collect();

        Self {
            items,
            number,
            per_page,
            total,
            last_page,
            page_key: page_key.to_string(),
            size_key: size_key.to_string(),
        }
    }

    // ------------------------------------------------------------------
    // Contents
    // ------------------------------------------------------------------

    #[must_use]
    pub fn items(&self) -> &[T] {
        &self.items
    }

    #[must_use]
    pub fn into_items(self) -> Vec<T> {
        self.items
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    // ------------------------------------------------------------------
    // Position
    // ------------------------------------------------------------------

    #[must_use]
    pub const fn current_page(&self) -> u64 {
        self.number
    }

    #[must_use]
    pub const fn per_page(&self) -> u64 {
        self.per_page
    }

    #[must_use]
    pub const fn total(&self) -> u64 {
        self.total
    }

    #[must_use]
    pub const fn last_page(&self) -> u64 {
        self.last_page
    }

    #[must_use]
    pub const fn has_more_pages(&self) -> bool {
        self.number < self.last_page
    }

    /// 1-based ordinal of the first item in this slice, absent when empty.
    #[must_use]
    pub fn first_item(&self) -> Option<u64> {
        if self.items.is_empty() {
            return None;
        }

        Some((self.number - 1) * self.per_page + 1)
    }

    /// 1-based ordinal of the last item in this slice, absent when empty.
    #[must_use]
    pub fn last_item(&self) -> Option<u64> {
        self.first_item()
            .map(|first| first + self.items.len() as u64 - 1)
    }

    // ------------------------------------------------------------------
    // Navigation
    // ------------------------------------------------------------------

    /// Page metadata in the wire shape (camelCase keys, absent ordinals
    /// omitted).
    #[must_use]
    pub fn meta(&self) -> PageMeta {
        PageMeta {
            current_page: self.number,
            from: self.first_item(),
            last_page: self.last_page,
            per_page: self.per_page,
            to: self.last_item(),
            total: self.total,
        }
    }

    /// Navigation links for this page, rooted at `path`. First and last are
    /// always present; prev exists above page 1; next exists only below the
    /// last page.
    #[must_use]
    pub fn links(&self, path: &str) -> PageLinks {
        PageLinks {
            first: self.url(path, 1),
            prev: (self.number > 1).then(|| self.url(path, self.number - 1)),
            next: self.has_more_pages().then(|| self.url(path, self.number + 1)),
            last: self.url(path, self.last_page),
        }
    }

    fn url(&self, path: &str, page: u64) -> Link {
        Link {
            href: format!(
                "{path}?page[{}]={page}&page[{}]={}",
                self.page_key, self.size_key, self.per_page
            ),
        }
    }
}

impl<T> IntoIterator for Page<T> {
    type Item = T;
    type IntoIter = std::vec::IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.into_iter()
    }
}

impl<'a, T> IntoIterator for &'a Page<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

///
/// PageMeta
///

#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PageMeta {
    pub current_page: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub from: Option<u64>,
    pub last_page: u64,
    pub per_page: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub to: Option<u64>,
    pub total: u64,
}

///
/// Link / PageLinks
///

#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct Link {
    pub href: String,
}

#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct PageLinks {
    pub first: Link,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub prev: Option<Link>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next: Option<Link>,
    pub last: Link,
}

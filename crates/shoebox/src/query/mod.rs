mod filter;
#[cfg(test)]
mod tests;

pub use filter::{FilterMap, FilterValue};

use std::collections::BTreeSet;

///
/// QueryContext
///
/// The filter/sort/include-path parameters for one operation.
///
/// Populated only through the owning builder's fluent configuration and
/// read-only to the terminal operation; discarded with the capability.
///

#[derive(Clone, Debug, Default)]
pub struct QueryContext {
    filters: Option<FilterMap>,
    sort: Option<Vec<SortKey>>,
    include: Option<BTreeSet<String>>,
}

impl QueryContext {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub const fn filters(&self) -> Option<&FilterMap> {
        self.filters.as_ref()
    }

    #[must_use]
    pub fn sort(&self) -> &[SortKey] {
        self.sort.as_deref().unwrap_or_default()
    }

    #[must_use]
    pub const fn include_paths(&self) -> Option<&BTreeSet<String>> {
        self.include.as_ref()
    }

    pub(crate) fn set_filters(&mut self, filters: FilterMap) {
        self.filters = Some(filters);
    }

    pub(crate) fn set_sort(&mut self, keys: Vec<SortKey>) {
        self.sort = Some(keys);
    }

    pub(crate) fn set_include_paths<I, S>(&mut self, paths: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.include = Some(paths.into_iter().map(Into::into).collect());
    }
}

///
/// SortKey
///
/// One sort field with its direction, parseable from JSON:API sort syntax
/// (`"-name"` sorts descending).
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct SortKey {
    pub field: String,
    pub direction: Direction,
}

impl SortKey {
    pub fn asc(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            direction: Direction::Asc,
        }
    }

    pub fn desc(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            direction: Direction::Desc,
        }
    }

    #[must_use]
    pub fn parse(value: &str) -> Self {
        value
            .strip_prefix('-')
            .map_or_else(|| Self::asc(value), Self::desc)
    }

    /// Parse a comma-separated sort parameter (`"name,-createdAt"`).
    #[must_use]
    pub fn parse_list(value: &str) -> Vec<Self> {
        value
            .split(',')
            .map(str::trim)
            .filter(|field| !field.is_empty())
            .map(Self::parse)
            .collect()
    }
}

///
/// Direction
///

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum Direction {
    #[default]
    Asc,
    Desc,
}

impl Direction {
    #[must_use]
    pub const fn is_ascending(self) -> bool {
        matches!(self, Self::Asc)
    }
}

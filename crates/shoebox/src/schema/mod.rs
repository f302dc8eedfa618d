mod field;
#[cfg(test)]
mod tests;

pub use field::{Attribute, Field, IdField, Relation, RelationKind};

use crate::{
    error::{Error, ShapeError},
    model::ResourceType,
    page::PageSettings,
};

///
/// Schema
///
/// Read-only metadata for one resource type: its ordered field set, its
/// filter declarations, and (optionally) its pagination support.
///
/// The core consumes only this narrow contract; the full schema system
/// (serialization, validation, authorization metadata) lives outside it.
///

#[derive(Clone, Debug)]
pub struct Schema {
    kind: ResourceType,
    fields: Vec<Field>,
    filters: Vec<FilterDef>,
    pagination: Option<PageSettings>,
}

impl Schema {
    #[must_use]
    pub fn new(kind: impl Into<ResourceType>) -> Self {
        Self {
            kind: kind.into(),
            fields: Vec::new(),
            filters: Vec::new(),
            pagination: None,
        }
    }

    // ------------------------------------------------------------------
    // Declaration
    // ------------------------------------------------------------------

    #[must_use]
    pub fn field(mut self, field: impl Into<Field>) -> Self {
        self.fields.push(field.into());
        self
    }

    #[must_use]
    pub fn filter(mut self, filter: FilterDef) -> Self {
        self.filters.push(filter);
        self
    }

    /// Declare pagination support for whole-collection queries.
    #[must_use]
    pub fn with_pagination(mut self, settings: PageSettings) -> Self {
        self.pagination = Some(settings);
        self
    }

    // ------------------------------------------------------------------
    // Accessors
    // ------------------------------------------------------------------

    #[must_use]
    pub const fn kind(&self) -> &ResourceType {
        &self.kind
    }

    #[must_use]
    pub fn fields(&self) -> &[Field] {
        &self.fields
    }

    /// Look up a declared relation field by name.
    pub fn relation(&self, field: &str) -> Result<&Relation, Error> {
        self.fields
            .iter()
            .find_map(|f| match f {
                Field::Relation(relation) if relation.name() == field => Some(relation),
                _ => None,
            })
            .ok_or_else(|| {
                ShapeError::UnknownRelation {
                    kind: self.kind.clone(),
                    field: field.to_string(),
                }
                .into()
            })
    }

    #[must_use]
    pub fn filters(&self) -> &[FilterDef] {
        &self.filters
    }

    #[must_use]
    pub const fn pagination(&self) -> Option<&PageSettings> {
        self.pagination.as_ref()
    }
}

///
/// FilterDef
///
/// A schema-level filter declaration. A singular filter signals "return at
/// most one match" to whole-collection queries.
///

#[derive(Clone, Debug)]
pub struct FilterDef {
    key: String,
    singular: bool,
}

impl FilterDef {
    pub fn new(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            singular: false,
        }
    }

    #[must_use]
    pub const fn singular(mut self) -> Self {
        self.singular = true;
        self
    }

    #[must_use]
    pub fn key(&self) -> &str {
        &self.key
    }

    #[must_use]
    pub const fn is_singular(&self) -> bool {
        self.singular
    }
}

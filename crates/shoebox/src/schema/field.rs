use crate::{
    ident::{dasherize, pluralize},
    model::ResourceType,
};

///
/// Field
///
/// One entry in a resource type's ordered field set.
///

#[derive(Clone, Debug)]
pub enum Field {
    Id(IdField),
    Attribute(Attribute),
    Relation(Relation),
}

impl Field {
    #[must_use]
    pub fn name(&self) -> &str {
        match self {
            Self::Id(id) => id.name(),
            Self::Attribute(attribute) => attribute.name(),
            Self::Relation(relation) => relation.name(),
        }
    }
}

impl From<IdField> for Field {
    fn from(field: IdField) -> Self {
        Self::Id(field)
    }
}

impl From<Attribute> for Field {
    fn from(field: Attribute) -> Self {
        Self::Attribute(field)
    }
}

impl From<Relation> for Field {
    fn from(field: Relation) -> Self {
        Self::Relation(field)
    }
}

///
/// IdField
///
/// The resource id field. Always named `id` and never a sparse field.
///

#[derive(Clone, Debug, Default)]
pub struct IdField {
    sortable: bool,
}

impl IdField {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub const fn sortable(mut self) -> Self {
        self.sortable = true;
        self
    }

    #[must_use]
    pub const fn name(&self) -> &'static str {
        "id"
    }

    #[must_use]
    pub const fn is_sortable(&self) -> bool {
        self.sortable
    }

    #[must_use]
    pub const fn is_sparse_field(&self) -> bool {
        false
    }
}

///
/// Attribute
///

#[derive(Clone, Debug)]
pub struct Attribute {
    name: String,
    sortable: bool,
    sparse: bool,
}

impl Attribute {
    pub fn new(name: impl Into<String>) -> Self {
        let name = name.into();
        assert!(!name.is_empty(), "expecting a non-empty field name");

        Self {
            name,
            sortable: false,
            sparse: true,
        }
    }

    #[must_use]
    pub const fn sortable(mut self) -> Self {
        self.sortable = true;
        self
    }

    #[must_use]
    pub const fn not_sparse_field(mut self) -> Self {
        self.sparse = false;
        self
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub const fn is_sortable(&self) -> bool {
        self.sortable
    }

    #[must_use]
    pub const fn is_sparse_field(&self) -> bool {
        self.sparse
    }
}

///
/// RelationKind
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum RelationKind {
    ToOne,
    ToMany,
}

///
/// Relation
///
/// A declared relationship field and its cardinality, plus the metadata the
/// wider system reads off it: URI name, inverse resource type(s), and the
/// include-path/filterable/sparse/validation flags.
///

#[derive(Clone, Debug)]
pub struct Relation {
    name: String,
    kind: RelationKind,
    uri: Option<String>,
    inverse: Option<ResourceType>,
    all_inverse: Option<Vec<ResourceType>>,
    include_path: bool,
    filterable: bool,
    sparse: bool,
    required: bool,
}

impl Relation {
    pub fn to_one(name: impl Into<String>) -> Self {
        Self::new(name, RelationKind::ToOne)
    }

    pub fn to_many(name: impl Into<String>) -> Self {
        Self::new(name, RelationKind::ToMany)
    }

    fn new(name: impl Into<String>, kind: RelationKind) -> Self {
        let name = name.into();
        assert!(!name.is_empty(), "expecting a non-empty field name");

        Self {
            name,
            kind,
            uri: None,
            inverse: None,
            all_inverse: None,
            include_path: true,
            filterable: false,
            sparse: true,
            required: false,
        }
    }

    // ------------------------------------------------------------------
    // Declaration
    // ------------------------------------------------------------------

    /// Set the inverse resource type.
    #[must_use]
    pub fn with_type(mut self, kind: impl Into<ResourceType>) -> Self {
        self.inverse = Some(kind.into());
        self
    }

    /// Declare a polymorphic inverse set (at least two resource types).
    #[must_use]
    pub fn with_types<I, T>(mut self, kinds: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<ResourceType>,
    {
        let kinds: Vec<ResourceType> = kinds.into_iter().map(Into::into).collect();
        assert!(
            kinds.len() >= 2,
            "expecting at least two inverse resource types"
        );

        self.all_inverse = Some(kinds);
        self
    }

    /// Use the supplied URI fragment instead of the dasherized field name.
    #[must_use]
    pub fn with_uri_name(mut self, uri: impl Into<String>) -> Self {
        let uri = uri.into();
        assert!(!uri.is_empty(), "expecting a non-empty URI fragment");

        self.uri = Some(uri);
        self
    }

    /// Expose the field name verbatim as its URI fragment.
    #[must_use]
    pub fn retain_field_name(mut self) -> Self {
        self.uri = Some(self.name.clone());
        self
    }

    #[must_use]
    pub const fn cannot_eager_load(mut self) -> Self {
        self.include_path = false;
        self
    }

    #[must_use]
    pub const fn filterable(mut self) -> Self {
        self.filterable = true;
        self
    }

    #[must_use]
    pub const fn must_validate(mut self) -> Self {
        self.required = true;
        self
    }

    #[must_use]
    pub const fn not_sparse_field(mut self) -> Self {
        self.sparse = false;
        self
    }

    // ------------------------------------------------------------------
    // Accessors
    // ------------------------------------------------------------------

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub const fn is_to_one(&self) -> bool {
        matches!(self.kind, RelationKind::ToOne)
    }

    #[must_use]
    pub const fn is_to_many(&self) -> bool {
        !self.is_to_one()
    }

    /// The field name as it appears in a URI. Defaults to the dasherized
    /// field name.
    #[must_use]
    pub fn uri_name(&self) -> String {
        self.uri
            .clone()
            .unwrap_or_else(|| dasherize(&self.name))
    }

    /// The inverse resource type: the explicitly-set singular type, else the
    /// first entry of an explicitly-set polymorphic set, else a guess from
    /// the field name.
    #[must_use]
    pub fn inverse(&self) -> ResourceType {
        if let Some(inverse) = &self.inverse {
            return inverse.clone();
        }
        if let Some(first) = self.all_inverse.as_ref().and_then(|all| all.first()) {
            return first.clone();
        }

        self.guess_inverse()
    }

    /// All inverse resource types: the polymorphic set when declared, else
    /// the singular inverse alone.
    #[must_use]
    pub fn all_inverse(&self) -> Vec<ResourceType> {
        self.all_inverse
            .clone()
            .unwrap_or_else(|| vec![self.inverse()])
    }

    #[must_use]
    pub const fn is_include_path(&self) -> bool {
        self.include_path
    }

    #[must_use]
    pub const fn is_filterable(&self) -> bool {
        self.filterable
    }

    #[must_use]
    pub const fn is_sparse_field(&self) -> bool {
        self.sparse
    }

    #[must_use]
    pub const fn is_validated(&self) -> bool {
        self.required
    }

    // A to-one field named `owner` points at `owners`; a to-many field is
    // assumed to already carry a plural name.
    fn guess_inverse(&self) -> ResourceType {
        let guess = match self.kind {
            RelationKind::ToOne => dasherize(&pluralize(&self.name)),
            RelationKind::ToMany => dasherize(&self.name),
        };

        ResourceType::from(guess)
    }
}

use crate::model::ResourceType;
use std::fmt;
use thiserror::Error as ThisError;

///
/// Error
///
/// Top-level runtime error for capability dispatch and resolution.
/// Every fatal condition propagates to the caller; nothing is retried.
///

#[derive(Debug, ThisError)]
#[remain::sorted]
pub enum Error {
    /// A resource type was wired incorrectly (programmer-caused).
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// The operation requires the entity to exist.
    #[error("resource {id} does not exist")]
    NotFound { id: String },

    /// Data of the wrong shape crossed a capability boundary.
    #[error(transparent)]
    Shape(#[from] ShapeError),
}

impl Error {
    pub fn not_found(id: impl Into<String>) -> Self {
        Self::NotFound { id: id.into() }
    }

    #[must_use]
    pub const fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}

///
/// ConfigError
///
/// Fatal configuration errors. These indicate a resource type was wired
/// incorrectly and are never recoverable at request time.
///

#[derive(Debug, ThisError)]
#[remain::sorted]
pub enum ConfigError {
    #[error("expecting relation field name to be set")]
    MissingField,

    #[error("expecting schema to declare pagination for collection queries")]
    MissingPagination,

    #[error("expecting model or resource id to be set")]
    MissingTarget,

    #[error("no {dependency} injected into capability")]
    NotInjected { dependency: &'static str },

    #[error("unable to resolve model: missing resource id and/or repository")]
    UnresolvedTarget,

    #[error("expecting {op} operation to be supported by the CRUD capability")]
    UnsupportedCrudOp { op: CrudOp },

    #[error("expecting {op} hook to modify relation {field}")]
    UnsupportedRelationOp { op: RelationOp, field: String },

    #[error("expecting singular filter {key} to be supported by the collection capability")]
    UnsupportedSingularFilter { key: String },
}

///
/// ShapeError
///
/// Type-contract violations: a custom or fallback accessor produced a value
/// of the wrong shape. Messages name the offending field or type so that a
/// misconfigured resource is immediately diagnosable.
///

#[derive(Debug, ThisError)]
#[remain::sorted]
pub enum ShapeError {
    #[error("expecting {expected} entity, found {found}")]
    EntityType {
        expected: &'static str,
        found: &'static str,
    },

    #[error("expecting validated data to be an object")]
    ExpectedObject,

    #[error("expecting resource to return an iterable value for relation {field}")]
    ExpectedToMany { field: String },

    #[error("expecting resource to return an object or null for relation {field}")]
    ExpectedToOne { field: String },

    #[error("expecting {key} to hold a resource identifier: {reason}")]
    InvalidIdentifier { key: String, reason: String },

    #[error("expecting {key} to be present in validated data")]
    MissingKey { key: String },

    #[error("{kind} resources do not define relation {field}")]
    UnknownRelation { kind: ResourceType, field: String },
}

///
/// CrudOp
/// The optional CRUD operations a resource type may support.
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum CrudOp {
    Create,
    Delete,
    Update,
}

impl fmt::Display for CrudOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Create => "create",
            Self::Delete => "delete",
            Self::Update => "update",
        };
        write!(f, "{label}")
    }
}

///
/// RelationOp
/// The optional relationship operations a resource type may support.
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum RelationOp {
    Attach,
    Detach,
    Get,
    Set,
}

impl fmt::Display for RelationOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Attach => "attach",
            Self::Detach => "detach",
            Self::Get => "get",
            Self::Set => "set",
        };
        write!(f, "{label}")
    }
}

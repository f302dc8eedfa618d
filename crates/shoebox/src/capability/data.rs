use crate::{
    error::{Error, ShapeError},
    model::Identifier,
};
use serde_json::{Map, Value};

///
/// ResourceData
///
/// Validated input for a create or update operation: a JSON object keyed by
/// field name. Attribute values are plain JSON; relationship values are
/// `{type, id}` identifiers (or identifier lists).
///
/// Validation itself is an upstream concern; this type only provides shaped
/// access, surfacing malformed identifier values as shape errors.
///

#[derive(Clone, Debug, Default)]
pub struct ResourceData(Map<String, Value>);

impl ResourceData {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Interpret an arbitrary JSON value as validated input. Anything other
    /// than an object is a shape error.
    pub fn from_value(value: Value) -> Result<Self, Error> {
        match value {
            Value::Object(map) => Ok(Self(map)),
            _ => Err(ShapeError::ExpectedObject.into()),
        }
    }

    /// Is the key present at all? (Present-but-null counts, which is how a
    /// nullable field is cleared.)
    #[must_use]
    pub fn has(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    /// The string value for `key`, when present and a string.
    #[must_use]
    pub fn str(&self, key: &str) -> Option<&str> {
        self.get(key).and_then(Value::as_str)
    }

    /// The string value for `key`, required to be present.
    pub fn require_str(&self, key: &str) -> Result<&str, Error> {
        self.str(key).ok_or_else(|| {
            ShapeError::MissingKey {
                key: key.to_string(),
            }
            .into()
        })
    }

    /// The resource identifier for `key`. Absent and null both mean "no
    /// related resource"; any other non-identifier value is a shape error.
    pub fn identifier(&self, key: &str) -> Result<Option<Identifier>, Error> {
        match self.get(key) {
            None | Some(Value::Null) => Ok(None),
            Some(value) => serde_json::from_value(value.clone())
                .map(Some)
                .map_err(|err| Self::invalid(key, &err)),
        }
    }

    /// The resource identifier list for `key`. An absent key is an empty
    /// list; a non-list or malformed entry is a shape error.
    pub fn identifiers(&self, key: &str) -> Result<Vec<Identifier>, Error> {
        match self.get(key) {
            None | Some(Value::Null) => Ok(Vec::new()),
            Some(value) => serde_json::from_value(value.clone())
                .map_err(|err| Self::invalid(key, &err)),
        }
    }

    fn invalid(key: &str, err: &serde_json::Error) -> Error {
        ShapeError::InvalidIdentifier {
            key: key.to_string(),
            reason: err.to_string(),
        }
        .into()
    }
}

impl From<Map<String, Value>> for ResourceData {
    fn from(map: Map<String, Value>) -> Self {
        Self(map)
    }
}

use std::fmt;

use hbnb_types::{ClassName, Value};
use tracing::trace;

use crate::error::{SchemaError, SchemaResult};

/// Declared type of a coerced attribute.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum AttributeKind {
    Integer,
    Float,
}

impl AttributeKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Integer => "integer",
            Self::Float => "float",
        }
    }

    /// Convert trimmed raw text into a value of this kind.
    ///
    /// Floats must be finite so they survive a JSON snapshot round-trip.
    fn parse(&self, raw: &str) -> Option<Value> {
        let raw = raw.trim();
        match self {
            Self::Integer => raw.parse::<i64>().ok().map(Value::Int),
            Self::Float => raw
                .parse::<f64>()
                .ok()
                .filter(|v| v.is_finite())
                .map(Value::Float),
        }
    }
}

impl fmt::Display for AttributeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Attributes with a declared numeric type. Everything else is stored as text.
const ATTRIBUTE_TYPES: &[(&str, AttributeKind)] = &[
    ("number_rooms", AttributeKind::Integer),
    ("number_bathrooms", AttributeKind::Integer),
    ("max_guest", AttributeKind::Integer),
    ("price_by_night", AttributeKind::Integer),
    ("latitude", AttributeKind::Float),
    ("longitude", AttributeKind::Float),
];

/// Static registry of known classes and attribute coercions.
#[derive(Clone, Copy, Debug, Default)]
pub struct SchemaRegistry;

impl SchemaRegistry {
    pub fn new() -> Self {
        Self
    }

    /// Returns `true` if `class_name` names a known class.
    pub fn is_known(&self, class_name: &str) -> bool {
        self.resolve(class_name).is_some()
    }

    /// Resolve a class name by exact match.
    pub fn resolve(&self, class_name: &str) -> Option<ClassName> {
        ClassName::lookup(class_name)
    }

    /// Declared type of an attribute, if it has one.
    pub fn attribute_kind(&self, attribute: &str) -> Option<AttributeKind> {
        ATTRIBUTE_TYPES
            .iter()
            .find(|(name, _)| *name == attribute)
            .map(|(_, kind)| *kind)
    }

    /// Apply the registered coercion for `attribute` to `raw`.
    ///
    /// Attributes without a declared type are returned unchanged as text.
    pub fn coerce(&self, attribute: &str, raw: &str) -> SchemaResult<Value> {
        let Some(kind) = self.attribute_kind(attribute) else {
            return Ok(Value::Text(raw.to_string()));
        };
        trace!(attribute, raw, %kind, "coercing attribute");
        kind.parse(raw).ok_or_else(|| SchemaError::InvalidValue {
            attribute: attribute.to_string(),
            value: raw.to_string(),
            expected: kind.as_str(),
        })
    }
}

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::class::ClassName;
use crate::error::TypeError;
use crate::identity::{composite_key, RecordId};
use crate::temporal::Timestamp;
use crate::value::Value;

/// Attribute names owned by the record itself. They appear in the string
/// form but can never be assigned through the attribute map.
pub const RESERVED_ATTRIBUTES: &[&str] = &["id", "class_name", "__class__", "created_at", "updated_at"];

/// A typed entity with identity, creation/update timestamps, and named
/// attributes.
///
/// `id` and `class_name` are fixed at construction. `updated_at` is never
/// earlier than `created_at`. Deserialization goes through
/// [`Record::from_parts`], so stored records obey the same rules.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RecordRepr")]
pub struct Record {
    id: RecordId,
    class_name: ClassName,
    created_at: Timestamp,
    updated_at: Timestamp,
    attributes: BTreeMap<String, Value>,
}

impl Record {
    /// Create a fresh record of the given class with a new random id.
    pub fn new(class_name: ClassName) -> Self {
        let now = Timestamp::now();
        Self {
            id: RecordId::generate(),
            class_name,
            created_at: now,
            updated_at: now,
            attributes: BTreeMap::new(),
        }
    }

    /// Rebuild a record from stored parts. `updated_at` is clamped to
    /// `created_at` if the stored value is earlier.
    pub fn from_parts(
        id: RecordId,
        class_name: ClassName,
        created_at: Timestamp,
        updated_at: Timestamp,
        attributes: BTreeMap<String, Value>,
    ) -> Self {
        Self {
            id,
            class_name,
            created_at,
            updated_at: updated_at.max(created_at),
            attributes,
        }
    }

    pub fn id(&self) -> &RecordId {
        &self.id
    }

    pub fn class_name(&self) -> ClassName {
        self.class_name
    }

    pub fn created_at(&self) -> Timestamp {
        self.created_at
    }

    pub fn updated_at(&self) -> Timestamp {
        self.updated_at
    }

    /// The composite key `"<class>.<id>"` under which the record is indexed.
    pub fn key(&self) -> String {
        composite_key(self.class_name, self.id.as_str())
    }

    pub fn attributes(&self) -> &BTreeMap<String, Value> {
        &self.attributes
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.attributes.get(name)
    }

    /// Returns `true` if `name` refers to a field the record owns.
    pub fn is_reserved(name: &str) -> bool {
        RESERVED_ATTRIBUTES.contains(&name)
    }

    /// Set an attribute without touching `updated_at`. Returns the previous
    /// value. Reserved names are ignored and return `None`.
    pub fn set(&mut self, name: impl Into<String>, value: Value) -> Option<Value> {
        let name = name.into();
        if Self::is_reserved(&name) {
            return None;
        }
        self.attributes.insert(name, value)
    }

    /// Refresh `updated_at` to the current time.
    pub fn touch(&mut self) {
        self.updated_at = Timestamp::now().max(self.created_at);
    }
}

/// Wire shape of a stored record, validated on the way in.
#[derive(Deserialize)]
struct RecordRepr {
    id: String,
    class_name: ClassName,
    created_at: Timestamp,
    updated_at: Timestamp,
    #[serde(default)]
    attributes: BTreeMap<String, Value>,
}

impl TryFrom<RecordRepr> for Record {
    type Error = TypeError;

    fn try_from(repr: RecordRepr) -> Result<Self, Self::Error> {
        if let Some(name) = repr.attributes.keys().find(|name| Self::is_reserved(name)) {
            return Err(TypeError::ReservedAttribute(name.clone()));
        }
        Ok(Self::from_parts(
            RecordId::parse(&repr.id)?,
            repr.class_name,
            repr.created_at,
            repr.updated_at,
            repr.attributes,
        ))
    }
}

/// Canonical string form:
/// `[User] (<id>) {id='<id>', created_at='...', updated_at='...', name='Bob'}`.
impl fmt::Display for Record {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{}] ({}) {{id='{}', created_at='{}', updated_at='{}'",
            self.class_name, self.id, self.id, self.created_at, self.updated_at
        )?;
        for (name, value) in &self.attributes {
            write!(f, ", {name}={value}")?;
        }
        f.write_str("}")
    }
}

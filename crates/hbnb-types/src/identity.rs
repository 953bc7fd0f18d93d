use std::fmt;

use serde::{Deserialize, Serialize};

use crate::class::ClassName;
use crate::error::TypeError;

/// Opaque unique identity of a record.
///
/// Generated as a random hyphenated UUID v4 when a record is created and
/// never changed afterwards. Ids loaded from a snapshot are kept verbatim,
/// so any non-empty string is accepted by [`RecordId::parse`].
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RecordId(String);

impl RecordId {
    /// Generate a fresh random id.
    pub fn generate() -> Self {
        Self(uuid::Uuid::new_v4().to_string())
    }

    /// Wrap an existing id string.
    pub fn parse(s: &str) -> Result<Self, TypeError> {
        if s.is_empty() {
            return Err(TypeError::EmptyId);
        }
        Ok(Self(s.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Short representation (first 8 characters).
    pub fn short_id(&self) -> &str {
        let end = self.0.char_indices().nth(8).map_or(self.0.len(), |(i, _)| i);
        &self.0[..end]
    }
}

impl fmt::Debug for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "RecordId({})", self.short_id())
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Build the composite index key `"<class>.<id>"`.
pub fn composite_key(class: ClassName, id: &str) -> String {
    format!("{}.{}", class.as_str(), id)
}

/// Split a composite key back into its class and id parts.
pub fn split_key(key: &str) -> Result<(ClassName, RecordId), TypeError> {
    let (class, id) = key
        .split_once('.')
        .ok_or_else(|| TypeError::InvalidKey(key.to_string()))?;
    let class = ClassName::lookup(class).ok_or_else(|| TypeError::InvalidKey(key.to_string()))?;
    let id = RecordId::parse(id).map_err(|_| TypeError::InvalidKey(key.to_string()))?;
    Ok((class, id))
}

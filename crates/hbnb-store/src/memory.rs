use std::collections::BTreeMap;

use hbnb_types::Record;

use crate::error::StoreResult;
use crate::traits::RecordStore;

/// In-memory, `BTreeMap`-based record store.
///
/// Intended for tests and embedding. `save` and `reload` are no-ops: the
/// index is the only copy of the data.
#[derive(Clone, Default)]
pub struct InMemoryStore {
    records: BTreeMap<String, Record>,
}

impl InMemoryStore {
    /// Create a new empty in-memory store.
    pub fn new() -> Self {
        Self::default()
    }
}

impl FromIterator<Record> for InMemoryStore {
    fn from_iter<I: IntoIterator<Item = Record>>(iter: I) -> Self {
        Self {
            records: iter.into_iter().map(|r| (r.key(), r)).collect(),
        }
    }
}

impl RecordStore for InMemoryStore {
    fn all(&self) -> &BTreeMap<String, Record> {
        &self.records
    }

    fn insert(&mut self, record: Record) -> Option<Record> {
        self.records.insert(record.key(), record)
    }

    fn get_mut(&mut self, key: &str) -> Option<&mut Record> {
        self.records.get_mut(key)
    }

    fn remove(&mut self, key: &str) -> Option<Record> {
        self.records.remove(key)
    }

    fn save(&self) -> StoreResult<()> {
        Ok(())
    }

    fn reload(&mut self) -> StoreResult<()> {
        Ok(())
    }
}

impl std::fmt::Debug for InMemoryStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InMemoryStore")
            .field("record_count", &self.records.len())
            .finish()
    }
}

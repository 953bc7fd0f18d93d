use std::collections::BTreeMap;

use hbnb_types::{ClassName, Record};

use crate::error::StoreResult;

/// Keyed record storage with snapshot persistence.
///
/// All implementations must satisfy these invariants:
/// - Every entry is stored under its record's composite key `"<class>.<id>"`.
/// - `save` is atomic from a reader's perspective.
/// - A failed `reload` leaves the in-memory index unchanged.
pub trait RecordStore {
    /// Read-only view of the full index, ordered by key.
    fn all(&self) -> &BTreeMap<String, Record>;

    /// Insert or replace the entry for `record`'s composite key.
    ///
    /// Returns the record previously stored under that key, if any. No schema
    /// validation is performed.
    fn insert(&mut self, record: Record) -> Option<Record>;

    /// Mutable access to a record by composite key.
    fn get_mut(&mut self, key: &str) -> Option<&mut Record>;

    /// Remove and return the entry for `key`.
    fn remove(&mut self, key: &str) -> Option<Record>;

    /// Flush the entire index to durable storage.
    fn save(&self) -> StoreResult<()>;

    /// Replace the index with the durable snapshot contents.
    ///
    /// A missing snapshot yields an empty index.
    fn reload(&mut self) -> StoreResult<()>;

    /// Look up a record by composite key.
    fn get(&self, key: &str) -> Option<&Record> {
        self.all().get(key)
    }

    /// Remove the entry for `key`. Returns `true` if an entry existed.
    fn delete(&mut self, key: &str) -> bool {
        self.remove(key).is_some()
    }

    fn len(&self) -> usize {
        self.all().len()
    }

    fn is_empty(&self) -> bool {
        self.all().is_empty()
    }

    /// Records in key order, optionally restricted to one class.
    fn records_of(&self, class: Option<ClassName>) -> Vec<&Record> {
        self.all()
            .values()
            .filter(|r| class.map_or(true, |c| r.class_name() == c))
            .collect()
    }

    /// Number of records of the given class.
    fn count_class(&self, class: ClassName) -> usize {
        self.all().values().filter(|r| r.class_name() == class).count()
    }
}

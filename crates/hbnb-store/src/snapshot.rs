//! JSON snapshot codec.
//!
//! A snapshot is a single JSON object mapping composite keys to records:
//!
//! ```text
//! {
//!   "User.6f1c...": {
//!     "id": "6f1c...",
//!     "class_name": "User",
//!     "created_at": "2026-10-16T09:00:00.123456Z",
//!     "updated_at": "2026-10-16T09:00:00.123456Z",
//!     "attributes": { "name": { "text": "Bob" } }
//!   }
//! }
//! ```
//!
//! Output is pretty-printed with keys sorted so snapshots diff cleanly.

use std::collections::BTreeMap;
use std::path::Path;

use hbnb_types::{split_key, Record};

use crate::error::{StoreError, StoreResult};

/// Serialize an index to snapshot bytes.
pub fn encode(index: &BTreeMap<String, Record>) -> StoreResult<Vec<u8>> {
    let mut bytes =
        serde_json::to_vec_pretty(index).map_err(|e| StoreError::Serialization(e.to_string()))?;
    bytes.push(b'\n');
    Ok(bytes)
}

/// Decode snapshot bytes read from `path`.
///
/// Fails with [`StoreError::CorruptSnapshot`] if the bytes are not a valid
/// snapshot, if a record breaks the record rules (empty id, reserved
/// attribute), if a key is not a `<Class>.<id>` composite key, or if an entry
/// is stored under a key other than its record's composite key. A stored
/// `updated_at` earlier than `created_at` is clamped on load.
pub fn decode(bytes: &[u8], path: &Path) -> StoreResult<BTreeMap<String, Record>> {
    let corrupt = |reason: String| StoreError::CorruptSnapshot {
        path: path.to_path_buf(),
        reason,
    };

    let index: BTreeMap<String, Record> =
        serde_json::from_slice(bytes).map_err(|e| corrupt(e.to_string()))?;

    for (key, record) in &index {
        let (class, id) = split_key(key).map_err(|e| corrupt(e.to_string()))?;
        if class != record.class_name() || id != *record.id() {
            let expected = record.key();
            return Err(corrupt(format!(
                "entry {key:?} holds record {expected:?}"
            )));
        }
    }
    Ok(index)
}

#[cfg(test)]
mod tests {
    use super::*;
    use hbnb_types::{ClassName, Value};

    fn sample_index() -> BTreeMap<String, Record> {
        let mut user = Record::new(ClassName::User);
        user.set("name", Value::from("Bob"));
        let mut place = Record::new(ClassName::Place);
        place.set("max_guest", Value::from(4i64));
        place.set("latitude", Value::from(37.5f64));
        place.set("description", Value::from("12"));
        [user, place].into_iter().map(|r| (r.key(), r)).collect()
    }

    #[test]
    fn encode_then_decode_preserves_index() {
        let index = sample_index();
        let bytes = encode(&index).unwrap();
        let decoded = decode(&bytes, Path::new("file.json")).unwrap();
        assert_eq!(decoded, index);
    }

    #[test]
    fn numeric_kinds_survive() {
        let index = sample_index();
        let decoded = decode(&encode(&index).unwrap(), Path::new("file.json")).unwrap();
        let place = decoded.values().find(|r| r.class_name() == ClassName::Place).unwrap();
        assert_eq!(place.get("max_guest"), Some(&Value::Int(4)));
        assert_eq!(place.get("latitude"), Some(&Value::Float(37.5)));
        assert_eq!(place.get("description"), Some(&Value::from("12")));
    }

    #[test]
    fn empty_object_is_empty_index() {
        let decoded = decode(b"{}", Path::new("file.json")).unwrap();
        assert!(decoded.is_empty());
    }

    #[test]
    fn garbage_is_corrupt() {
        let cases: [&[u8]; 4] = [b"", b"not json", b"[]", b"{\"User.x\": 3}"];
        for bytes in cases {
            let err = decode(bytes, Path::new("file.json")).unwrap_err();
            assert!(matches!(err, StoreError::CorruptSnapshot { .. }), "{bytes:?}");
        }
    }

    #[test]
    fn mismatched_key_is_corrupt() {
        let record = Record::new(ClassName::City);
        let mut index = BTreeMap::new();
        index.insert("City.someone-else".to_string(), record);
        let bytes = encode(&index).unwrap();
        let err = decode(&bytes, Path::new("file.json")).unwrap_err();
        assert!(matches!(err, StoreError::CorruptSnapshot { .. }));
    }

    fn entry(key: &str, id: &str, created_at: &str, updated_at: &str) -> String {
        format!(
            r#"{{"{key}": {{"id": "{id}", "class_name": "User",
                "created_at": "{created_at}", "updated_at": "{updated_at}"}}}}"#
        )
    }

    #[test]
    fn stale_updated_at_is_clamped() {
        let bytes = entry("User.x", "x", "2026-01-01T00:00:00.000000Z", "2020-01-01T00:00:00.000000Z");
        let decoded = decode(bytes.as_bytes(), Path::new("file.json")).unwrap();
        let record = &decoded["User.x"];
        assert_eq!(record.updated_at(), record.created_at());
    }

    #[test]
    fn empty_id_is_corrupt() {
        let ts = "2026-01-01T00:00:00.000000Z";
        for key in ["User.", "User.x"] {
            let bytes = entry(key, "", ts, ts);
            let err = decode(bytes.as_bytes(), Path::new("file.json")).unwrap_err();
            assert!(matches!(err, StoreError::CorruptSnapshot { .. }), "{key}");
        }
    }

    #[test]
    fn malformed_key_is_corrupt() {
        let ts = "2026-01-01T00:00:00.000000Z";
        for key in ["x", "Town.x", "user.x"] {
            let bytes = entry(key, "x", ts, ts);
            let err = decode(bytes.as_bytes(), Path::new("file.json")).unwrap_err();
            assert!(matches!(err, StoreError::CorruptSnapshot { .. }), "{key}");
        }
    }

    #[test]
    fn output_is_human_readable() {
        let bytes = encode(&sample_index()).unwrap();
        let text = String::from_utf8(bytes).unwrap();
        assert!(text.contains("\"class_name\": \"User\""));
        assert!(text.contains("\"text\": \"Bob\""));
        assert!(text.ends_with('\n'));
    }
}

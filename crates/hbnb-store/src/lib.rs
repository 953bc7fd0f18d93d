//! Record storage engine for the HBnB console.
//!
//! The engine keeps every [`Record`] in an in-memory index keyed by the
//! composite key `"<class>.<id>"` and can flush the whole index to a durable
//! JSON snapshot.
//!
//! # Storage Backends
//!
//! All backends implement the [`RecordStore`] trait:
//!
//! - [`FileStorage`] -- snapshot-backed store used by the console
//! - [`InMemoryStore`] -- `BTreeMap`-only store for tests and embedding
//!
//! # Design Rules
//!
//! 1. The engine owns every record; callers borrow through the trait.
//! 2. `insert` performs no schema validation. Callers validate first.
//! 3. `save` rewrites the snapshot wholesale via temp file + rename, so a
//!    reader never observes a partially written snapshot.
//! 4. `reload` either replaces the index completely or leaves it untouched.
//! 5. All I/O errors are propagated, never silently ignored.
//!
//! [`Record`]: hbnb_types::Record

pub mod error;
pub mod file;
pub mod memory;
pub mod snapshot;
pub mod traits;

pub use error::{StoreError, StoreResult};
pub use file::{FileStorage, DEFAULT_SNAPSHOT};
pub use memory::InMemoryStore;
pub use traits::RecordStore;

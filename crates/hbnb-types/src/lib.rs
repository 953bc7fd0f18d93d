//! Foundation types for the HBnB console.
//!
//! This crate provides the record model shared by every other HBnB crate:
//! the schema registry, the storage engine, and the command interpreter.
//!
//! # Key Types
//!
//! - [`Record`] — A typed entity with identity, timestamps, and attributes
//! - [`RecordId`] — Random UUID v4 identity, immutable after creation
//! - [`ClassName`] — Closed set of record classes the console knows about
//! - [`Value`] — Tagged attribute value (text, integer, or float)
//! - [`Timestamp`] — UTC creation/update instant

pub mod class;
pub mod error;
pub mod identity;
pub mod record;
pub mod temporal;
pub mod value;

pub use class::ClassName;
pub use error::TypeError;
pub use identity::{composite_key, split_key, RecordId};
pub use record::Record;
pub use temporal::Timestamp;
pub use value::Value;

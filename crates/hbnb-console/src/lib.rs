//! Line-oriented command interpreter for the HBnB record store.
//!
//! The interpreter accepts canonical command lines
//! (`show User 1234`) and the call-style shorthand (`User.show("1234")`),
//! resolves class names through the static [`SchemaRegistry`], and reads or
//! writes records through a [`RecordStore`]. Every mutating command is
//! flushed to the snapshot before the next line is read.
//!
//! # Modules
//!
//! - [`normalize`] -- call-style parsing and rewriting
//! - [`tokenize`] -- quote- and brace-aware argument splitting
//! - [`mapping`] -- `{key: value}` literals for `update`
//! - [`interpreter`] -- dispatch and the six record commands
//! - [`session`] -- store bootstrap and the REPL loop
//! - [`clean`] -- pruning of deployment archives
//!
//! [`SchemaRegistry`]: hbnb_schema::SchemaRegistry
//! [`RecordStore`]: hbnb_store::RecordStore

pub mod clean;
pub mod config;
pub mod error;
pub mod help;
pub mod interpreter;
pub mod mapping;
pub mod normalize;
pub mod session;
pub mod tokenize;

pub use config::{CleanConfig, ConsoleConfig, CorruptSnapshotPolicy};
pub use error::{CleanError, CommandError, CommandResult, ConfigError, MappingError, NormalizeError};
pub use interpreter::{Interpreter, Reply};

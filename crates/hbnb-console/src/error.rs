//! Error types for the console crate.

use std::io;
use std::path::PathBuf;

use hbnb_schema::SchemaError;
use hbnb_store::StoreError;

/// User-facing command failures.
///
/// The `Display` form is exactly the line printed to the user. None of these
/// end the session, and a command that fails is never partially applied.
#[derive(Debug, thiserror::Error)]
pub enum CommandError {
    #[error("** class name missing **")]
    MissingClassName,

    #[error("** class doesn't exist **")]
    UnknownClass,

    #[error("** instance id missing **")]
    MissingId,

    #[error("** no instance found **")]
    UnknownInstance,

    #[error("** attribute name missing **")]
    MissingAttributeName,

    #[error("** value missing **")]
    MissingValue,

    #[error("** attribute '{0}' is read-only **")]
    ReadOnlyAttribute(String),

    #[error("** {0} **")]
    InvalidValue(#[from] SchemaError),

    #[error("** invalid attribute mapping: {0} **")]
    InvalidMapping(#[from] MappingError),

    #[error("** storage error: {0} **")]
    Storage(#[from] StoreError),
}

/// Convenience alias for command results.
pub type CommandResult<T> = Result<T, CommandError>;

/// Failure to parse a `{key: value, ...}` mapping literal.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MappingError {
    #[error("expected '{{' ... '}}'")]
    NotBraced,

    #[error("entry {0:?} has no ':'")]
    MissingColon(String),

    #[error("empty key")]
    EmptyKey,

    #[error("missing value for {0:?}")]
    EmptyValue(String),

    #[error("empty entry")]
    EmptyEntry,

    #[error("nested structures are not supported")]
    Nested,

    #[error("unterminated quote")]
    UnterminatedQuote,
}

/// Reasons a line is not accepted as call-style syntax.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum NormalizeError {
    /// The line lacks one of `.`, `(`, `)`; it is plain canonical input.
    #[error("not call-style syntax")]
    NotCallStyle,

    #[error("unknown call-style command {0:?}")]
    UnknownVerb(String),

    #[error("malformed class segment {0:?}")]
    MalformedClass(String),

    #[error("'(' appears before '.'")]
    MisplacedParen,

    #[error("unexpected text after ')': {0:?}")]
    TrailingText(String),

    #[error("invalid mapping argument: {0}")]
    InvalidMapping(#[from] MappingError),
}

/// Errors loading the console configuration file.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("cannot read config {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("invalid config {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

/// Errors from pruning archive artifacts.
#[derive(Debug, thiserror::Error)]
pub enum CleanError {
    #[error("cannot prune {path}: {source}")]
    Local {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("remote operation on {host} failed: {source}")]
    Remote {
        host: String,
        #[source]
        source: io::Error,
    },
}

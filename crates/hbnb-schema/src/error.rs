/// Errors from schema lookups and attribute coercion.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SchemaError {
    /// Raw text could not be converted to the attribute's declared type.
    #[error("invalid value for {attribute}: '{value}' is not a valid {expected}")]
    InvalidValue {
        attribute: String,
        value: String,
        expected: &'static str,
    },
}

/// Result alias for schema operations.
pub type SchemaResult<T> = Result<T, SchemaError>;

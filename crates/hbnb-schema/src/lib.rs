//! Schema registry for the HBnB console.
//!
//! Maps class-name strings to the closed [`ClassName`] set and attribute
//! names to coercion rules. The registry is static for the lifetime of the
//! process; there is no runtime registration.
//!
//! Class names are resolved by exact lookup only. User text is never
//! evaluated to find a class.
//!
//! [`ClassName`]: hbnb_types::ClassName

pub mod error;
pub mod registry;

pub use error::{SchemaError, SchemaResult};
pub use registry::{AttributeKind, SchemaRegistry};

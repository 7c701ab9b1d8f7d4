//! Core error types.

use thiserror::Error;

/// Errors from compiling or applying a JSON Schema.
#[derive(Debug, Error)]
pub enum SchemaError {
    /// The schema document itself could not be compiled into a validator.
    #[error("schema compile error: {0}")]
    Compile(String),

    /// A JSON value did not pass schema validation.
    #[error("validation failed: {errors:?}")]
    ValidationFailed {
        /// Individual error messages from the validator, one per violation.
        errors: Vec<String>,
    },
}

/// Errors raised while resolving an [`crate::EndpointMap`] into a client.
///
/// All of these surface at construction time, before any request is made.
#[derive(Debug, Error)]
pub enum BuildError {
    /// The descriptor's `method` field is not a recognized HTTP verb.
    #[error("unknown HTTP method: {0}")]
    UnknownMethod(String),

    /// The descriptor's `request_format` field is not a recognized encoding.
    #[error("unknown request format: {0}")]
    UnknownFormat(String),

    /// A response schema failed to compile.
    #[error(transparent)]
    Schema(#[from] SchemaError),
}

//! Client error types.
//!
//! The taxonomy keeps "didn't get a usable response" ([`CallError::Transport`])
//! and "got a response we cannot trust" ([`CallError::Validation`]) as
//! distinct variants end to end; nothing in this crate converts one into the
//! other.

use thiserror::Error;

use tether_core::SchemaError;

/// Errors from the transport layer: the request never produced a usable
/// raw response.
#[derive(Debug, Error)]
pub enum TransportError {
    /// HTTP transport error (connectivity, timeout, protocol).
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The server answered with a non-success status code.
    #[error("status {status}: {body}")]
    Status {
        /// HTTP status code returned by the server.
        status: u16,
        /// Response body, for debugging.
        body: String,
    },

    /// The response declared a JSON body that could not be parsed.
    #[error("decode error: {0}")]
    Decode(String),
}

/// Errors from invoking a generated operation.
#[derive(Debug, Error)]
pub enum CallError {
    /// The path template references a placeholder the caller did not supply.
    /// Raised before any request is dispatched.
    #[error("unresolved placeholder `{name}` in template `{template}`")]
    UnresolvedPlaceholder {
        /// Placeholder name without braces.
        name: String,
        /// The full template, for debugging.
        template: String,
    },

    /// Parameters were supplied to an operation whose descriptor declares
    /// none. Raised before any request is dispatched.
    #[error("operation `{operation}` takes no parameters")]
    UnexpectedParams {
        /// Operation name from the endpoint map.
        operation: String,
    },

    /// The underlying request failed; surfaced unchanged.
    #[error(transparent)]
    Transport(#[from] TransportError),

    /// The raw response did not conform to the selected success schema.
    #[error("response validation failed: {errors:?}")]
    Validation {
        /// Individual violation messages from the validator.
        errors: Vec<String>,
    },

    /// The validated response could not be deserialized into the requested
    /// Rust type. Only raised by the typed `call_as` variants.
    #[error("response deserialization failed: {0}")]
    Deserialize(String),
}

impl From<SchemaError> for CallError {
    fn from(err: SchemaError) -> Self {
        match err {
            SchemaError::ValidationFailed { errors } => Self::Validation { errors },
            // Schemas are compiled at build time; a compile failure reaching
            // call time still surfaces as a validation outcome.
            SchemaError::Compile(msg) => Self::Validation { errors: vec![msg] },
        }
    }
}

//! # tether-core
//!
//! Endpoint descriptor model and JSON Schema validation for Tether.
//!
//! This crate provides the foundational types shared across the Tether crates:
//! - [`EndpointDescriptor`] and [`EndpointMap`]: the declarative contract for
//!   one HTTP operation and the insertion-ordered collection a client is
//!   built from
//! - [`Method`] and [`RequestFormat`]: the literal verb and body-encoding
//!   hints, parsed once at client-build time
//! - [`CompiledSchema`]: a compiled JSON Schema validator (`jsonschema`)
//! - Core error types ([`BuildError`], [`SchemaError`])
//!
//! Schemas are plain `serde_json::Value` JSON Schema documents. In practice
//! they come from `schemars::schema_for!` on a Rust type, but any valid
//! schema document works — the descriptor treats them as opaque validators.

pub mod descriptor;
pub mod error;
pub mod schema;

pub use descriptor::{EndpointDescriptor, EndpointMap, Method, ParameterShapes, RequestFormat, Responses};
pub use error::{BuildError, SchemaError};
pub use schema::CompiledSchema;

//! Compiled JSON Schema validation.
//!
//! Thin wrapper over [`jsonschema::validator_for`]. Descriptors carry raw
//! `serde_json::Value` schema documents; the client builder compiles each
//! selected schema exactly once and the compiled form is reused for every
//! call of the generated operation.

use crate::error::SchemaError;

/// A JSON Schema compiled into a reusable validator.
pub struct CompiledSchema {
    validator: jsonschema::Validator,
}

impl CompiledSchema {
    /// Compile a schema document into a validator.
    ///
    /// # Errors
    ///
    /// Returns [`SchemaError::Compile`] if the document is not a valid
    /// JSON Schema.
    pub fn compile(schema: &serde_json::Value) -> Result<Self, SchemaError> {
        let validator =
            jsonschema::validator_for(schema).map_err(|e| SchemaError::Compile(format!("{e}")))?;
        Ok(Self { validator })
    }

    /// Validate a JSON value against this schema.
    ///
    /// # Errors
    ///
    /// Returns [`SchemaError::ValidationFailed`] carrying one message per
    /// violation. All violations are collected, not just the first.
    pub fn validate(&self, instance: &serde_json::Value) -> Result<(), SchemaError> {
        let errors: Vec<String> = self
            .validator
            .iter_errors(instance)
            .map(|e| format!("{e}"))
            .collect();

        if errors.is_empty() {
            Ok(())
        } else {
            Err(SchemaError::ValidationFailed { errors })
        }
    }
}

impl std::fmt::Debug for CompiledSchema {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CompiledSchema").finish_non_exhaustive()
    }
}

//! Construction-time descriptor resolution.
//!
//! Pure derivation over descriptor data: parse the literal verb and format
//! strings, pick the success-response schema, and compile it once. The
//! resulting [`ResolvedEndpoint`] is captured by the generated operation and
//! never mutated afterward.

use tether_core::{BuildError, CompiledSchema, EndpointDescriptor, Method, ParameterShapes, RequestFormat};

/// Precomputed per-descriptor bundle owned by one generated operation.
#[derive(Debug)]
pub(crate) struct ResolvedEndpoint {
    pub method: Method,
    pub format: RequestFormat,
    pub template: String,
    /// Declared parameter channels; presence decides the operation's arity.
    pub parameters: Option<ParameterShapes>,
    /// Selected success schema and the status key it was declared under.
    /// `None` means raw responses pass through unvalidated.
    pub success: Option<(String, CompiledSchema)>,
}

/// Resolve one descriptor.
///
/// Success-schema policy: scan response keys in declaration order; the first
/// key whose string starts with `'2'` wins. Repeated 2xx keys are allowed and
/// the earliest declared one is used. No 2xx key at all is not an error —
/// such operations return the raw response unvalidated.
pub(crate) fn resolve(descriptor: &EndpointDescriptor) -> Result<ResolvedEndpoint, BuildError> {
    let method: Method = descriptor.method.parse()?;
    let format: RequestFormat = descriptor.request_format.parse()?;

    let success = descriptor
        .responses
        .iter()
        .find(|(key, _)| key.starts_with('2'))
        .map(|(key, schema)| {
            CompiledSchema::compile(schema).map(|compiled| (key.to_string(), compiled))
        })
        .transpose()?;

    Ok(ResolvedEndpoint {
        method,
        format,
        template: descriptor.path.clone(),
        parameters: descriptor.parameters.clone(),
        success,
    })
}

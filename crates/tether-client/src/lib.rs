//! # tether-client
//!
//! Schema-validated HTTP client generation from endpoint descriptors.
//!
//! [`Client::build`] walks an [`EndpointMap`] once, resolving each
//! descriptor's literal verb, format, and success-response schema up front,
//! and produces one [`Operation`] per entry. Calling an operation assembles
//! the request from [`CallParams`], dispatches it through the injected
//! [`Transport`], and validates the raw result against the schema selected
//! for the descriptor's first 2xx response key.
//!
//! ```no_run
//! use std::sync::Arc;
//! use tether_core::{EndpointDescriptor, EndpointMap};
//! use tether_client::{Client, HttpTransport};
//!
//! # async fn run() -> Result<(), Box<dyn std::error::Error>> {
//! let endpoints = EndpointMap::new().endpoint(
//!     "getCustomPets",
//!     EndpointDescriptor::new("GET", "/pet/custom")
//!         .response("200", serde_json::json!({"type": "object"})),
//! );
//!
//! let transport = Arc::new(HttpTransport::new("https://petstore.example"));
//! let client = Client::build(transport, &endpoints)?;
//! let pet = client.get("getCustomPets").unwrap().call().await?;
//! # Ok(())
//! # }
//! ```
//!
//! Failure semantics stay distinguishable end to end:
//! [`CallError::Transport`] means no usable response arrived;
//! [`CallError::Validation`] means a response arrived but did not conform.

mod assemble;
mod error;
mod resolve;
pub mod transport;

pub use assemble::CallParams;
pub use error::{CallError, TransportError};
pub use transport::{HttpTransport, RequestOptions, Transport};

use std::sync::Arc;

use serde::de::DeserializeOwned;

use tether_core::{BuildError, EndpointMap, Method, ParameterShapes};

use crate::resolve::ResolvedEndpoint;

/// One callable operation, bound to its resolved descriptor and a transport.
///
/// Construction-time data is written once and never mutated; concurrent and
/// repeated calls share nothing beyond these immutable references.
pub struct Operation {
    name: String,
    resolved: ResolvedEndpoint,
    transport: Arc<dyn Transport>,
}

impl Operation {
    /// Invoke a parameter-less operation.
    ///
    /// # Errors
    ///
    /// Returns [`CallError`] on transport or validation failure; a template
    /// with placeholders also fails here since no path values are supplied.
    pub async fn call(&self) -> Result<serde_json::Value, CallError> {
        self.invoke(CallParams::new()).await
    }

    /// Invoke with a parameter object.
    ///
    /// # Errors
    ///
    /// Returns [`CallError::UnexpectedParams`] if the descriptor declares no
    /// parameters yet `params` carries values; otherwise propagates assembly,
    /// transport, and validation failures.
    pub async fn call_with(&self, params: CallParams) -> Result<serde_json::Value, CallError> {
        if self.resolved.parameters.is_none() && !params.is_empty() {
            return Err(CallError::UnexpectedParams {
                operation: self.name.clone(),
            });
        }
        self.invoke(params).await
    }

    /// Invoke a parameter-less operation and deserialize the validated
    /// result into `T`.
    ///
    /// # Errors
    ///
    /// As [`Operation::call`], plus [`CallError::Deserialize`] if the
    /// validated value does not map onto `T`.
    pub async fn call_as<T: DeserializeOwned>(&self) -> Result<T, CallError> {
        deserialize(self.call().await?)
    }

    /// Invoke with parameters and deserialize the validated result into `T`.
    ///
    /// # Errors
    ///
    /// As [`Operation::call_with`], plus [`CallError::Deserialize`] if the
    /// validated value does not map onto `T`.
    pub async fn call_with_as<T: DeserializeOwned>(
        &self,
        params: CallParams,
    ) -> Result<T, CallError> {
        deserialize(self.call_with(params).await?)
    }

    /// Operation name from the endpoint map.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Resolved verb (lower-case via [`Method::as_str`]).
    #[must_use]
    pub const fn method(&self) -> Method {
        self.resolved.method
    }

    /// The descriptor's path template, unsubstituted.
    #[must_use]
    pub fn path_template(&self) -> &str {
        &self.resolved.template
    }

    /// Declared parameter shapes, if the descriptor has any.
    #[must_use]
    pub const fn parameters(&self) -> Option<&ParameterShapes> {
        self.resolved.parameters.as_ref()
    }

    async fn invoke(&self, params: CallParams) -> Result<serde_json::Value, CallError> {
        let url = assemble::substitute(&self.resolved.template, &params.path)?;
        let options = RequestOptions {
            body: params.body,
            query: params.query,
            headers: params.headers,
            format: self.resolved.format,
        };

        tracing::debug!(
            operation = %self.name,
            method = %self.resolved.method,
            %url,
            "dispatching request"
        );
        let raw = self.transport.request(self.resolved.method, &url, options).await?;

        match &self.resolved.success {
            Some((key, schema)) => {
                schema.validate(&raw).map_err(|e| {
                    tracing::debug!(operation = %self.name, status_key = %key, "response failed validation");
                    CallError::from(e)
                })?;
                Ok(raw)
            }
            // No 2xx schema declared: documented pass-through, not an error.
            None => Ok(raw),
        }
    }
}

fn deserialize<T: DeserializeOwned>(value: serde_json::Value) -> Result<T, CallError> {
    serde_json::from_value(value).map_err(|e| CallError::Deserialize(format!("{e}")))
}

/// Generated client: one [`Operation`] per endpoint-map entry, in the map's
/// insertion order.
///
/// Built once, immutable afterward. Building the same map twice produces two
/// fully independent clients.
pub struct Client {
    operations: Vec<(String, Operation)>,
}

impl std::fmt::Debug for Client {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Client")
            .field(
                "operations",
                &self.operations.iter().map(|(name, _)| name).collect::<Vec<_>>(),
            )
            .finish()
    }
}

impl Client {
    /// Resolve every descriptor in `endpoints` and bind the resulting
    /// operations to `transport`.
    ///
    /// # Errors
    ///
    /// Returns [`BuildError`] if any descriptor carries an unknown verb or
    /// format, or a success schema that fails to compile. Nothing is
    /// dispatched during construction.
    pub fn build(transport: Arc<dyn Transport>, endpoints: &EndpointMap) -> Result<Self, BuildError> {
        let mut operations = Vec::with_capacity(endpoints.len());
        for (name, descriptor) in endpoints.iter() {
            let resolved = resolve::resolve(descriptor)?;
            tracing::debug!(
                operation = name,
                method = %resolved.method,
                template = %resolved.template,
                validated = resolved.success.is_some(),
                "resolved endpoint"
            );
            operations.push((
                name.to_string(),
                Operation {
                    name: name.to_string(),
                    resolved,
                    transport: Arc::clone(&transport),
                },
            ));
        }
        Ok(Self { operations })
    }

    /// Look up an operation by name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Operation> {
        self.operations
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, op)| op)
    }

    /// Operation names in the order captured at construction (endpoint-map
    /// insertion order).
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.operations.iter().map(|(n, _)| n.as_str())
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.operations.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.operations.is_empty()
    }
}

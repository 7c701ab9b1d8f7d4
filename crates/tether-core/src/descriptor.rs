//! Endpoint descriptor data model.
//!
//! An [`EndpointDescriptor`] is the declarative contract for one HTTP
//! operation: its verb, URL template, body-encoding hint, declared parameter
//! channels, and per-status response schemas. An [`EndpointMap`] collects
//! named descriptors in insertion order; the client builder consumes it once
//! and never mutates it afterward.
//!
//! `method` and `request_format` are stored as the author wrote them
//! (string literals) and parsed into [`Method`] / [`RequestFormat`] when the
//! client is built, so a typo fails construction rather than the first call.

use std::str::FromStr;

use crate::error::BuildError;

/// HTTP verb, parsed from a descriptor's `method` field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Method {
    Get,
    Post,
    Put,
    Delete,
    Patch,
    Head,
    Options,
}

impl Method {
    /// Lower-cased verb string used for transport dispatch and logging.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Get => "get",
            Self::Post => "post",
            Self::Put => "put",
            Self::Delete => "delete",
            Self::Patch => "patch",
            Self::Head => "head",
            Self::Options => "options",
        }
    }
}

impl std::fmt::Display for Method {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Method {
    type Err = BuildError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "get" => Ok(Self::Get),
            "post" => Ok(Self::Post),
            "put" => Ok(Self::Put),
            "delete" => Ok(Self::Delete),
            "patch" => Ok(Self::Patch),
            "head" => Ok(Self::Head),
            "options" => Ok(Self::Options),
            _ => Err(BuildError::UnknownMethod(s.to_string())),
        }
    }
}

/// Body-encoding hint, parsed from a descriptor's `request_format` field.
///
/// The core carries this through untouched; only the transport interprets it
/// when encoding an outgoing body.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum RequestFormat {
    /// `application/json` body (the default).
    #[default]
    Json,
    /// `application/x-www-form-urlencoded` body.
    Form,
    /// Plain text body.
    Text,
}

impl RequestFormat {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Json => "json",
            Self::Form => "form",
            Self::Text => "text",
        }
    }
}

impl FromStr for RequestFormat {
    type Err = BuildError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "json" => Ok(Self::Json),
            "form" => Ok(Self::Form),
            "text" => Ok(Self::Text),
            _ => Err(BuildError::UnknownFormat(s.to_string())),
        }
    }
}

/// Declared shapes for the four parameter channels of an operation.
///
/// Each shape is an opaque JSON Schema document describing what the caller is
/// expected to supply on that channel. The presence of a `ParameterShapes`
/// value on a descriptor — not the shapes themselves — is what decides the
/// generated operation's arity: descriptors without one produce zero-argument
/// operations.
#[derive(Debug, Clone, Default)]
pub struct ParameterShapes {
    /// Shape of the request body payload.
    pub body: Option<serde_json::Value>,
    /// Shape of the path-placeholder values.
    pub path: Option<serde_json::Value>,
    /// Shape of the query-string values.
    pub query: Option<serde_json::Value>,
    /// Shape of the header values.
    pub header: Option<serde_json::Value>,
}

impl ParameterShapes {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn body(mut self, shape: serde_json::Value) -> Self {
        self.body = Some(shape);
        self
    }

    #[must_use]
    pub fn path(mut self, shape: serde_json::Value) -> Self {
        self.path = Some(shape);
        self
    }

    #[must_use]
    pub fn query(mut self, shape: serde_json::Value) -> Self {
        self.query = Some(shape);
        self
    }

    #[must_use]
    pub fn header(mut self, shape: serde_json::Value) -> Self {
        self.header = Some(shape);
        self
    }
}

/// Response schemas keyed by status-code string, in declaration order.
///
/// Backed by a vector of pairs rather than a hash map so that iteration
/// order is exactly insertion order. The client builder's success-schema
/// selection ("first key starting with `'2'`") depends on this.
#[derive(Debug, Clone, Default)]
pub struct Responses {
    entries: Vec<(String, serde_json::Value)>,
}

impl Responses {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a status-key → schema entry. A repeated key is appended, not
    /// replaced; the earlier entry keeps winning any first-match scan.
    pub fn insert(&mut self, status: impl Into<String>, schema: serde_json::Value) {
        self.entries.push((status.into(), schema));
    }

    /// Iterate entries in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &serde_json::Value)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Look up the first schema declared for a status key.
    #[must_use]
    pub fn get(&self, status: &str) -> Option<&serde_json::Value> {
        self.entries
            .iter()
            .find(|(k, _)| k == status)
            .map(|(_, v)| v)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Declarative contract for one HTTP operation.
///
/// `method` and `request_format` stay as literal strings here; they are
/// resolved into [`Method`] and [`RequestFormat`] when a client is built.
#[derive(Debug, Clone)]
pub struct EndpointDescriptor {
    /// HTTP verb literal, e.g. `"GET"`. Case-insensitive.
    pub method: String,
    /// URL path template, e.g. `"/pet/custom/{id}"`.
    pub path: String,
    /// Body-encoding hint literal, e.g. `"json"`.
    pub request_format: String,
    /// Declared parameter channels, or `None` for a zero-argument operation.
    pub parameters: Option<ParameterShapes>,
    /// Per-status response schemas in declaration order.
    pub responses: Responses,
}

impl EndpointDescriptor {
    /// Start a descriptor for `method` on `path`, defaulting to JSON bodies,
    /// no parameters, and no declared responses.
    #[must_use]
    pub fn new(method: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            method: method.into(),
            path: path.into(),
            request_format: "json".to_string(),
            parameters: None,
            responses: Responses::new(),
        }
    }

    #[must_use]
    pub fn request_format(mut self, format: impl Into<String>) -> Self {
        self.request_format = format.into();
        self
    }

    #[must_use]
    pub fn parameters(mut self, shapes: ParameterShapes) -> Self {
        self.parameters = Some(shapes);
        self
    }

    /// Declare a response schema for a status key. Declaration order matters:
    /// the first key starting with `'2'` becomes the success schema.
    #[must_use]
    pub fn response(mut self, status: impl Into<String>, schema: serde_json::Value) -> Self {
        self.responses.insert(status, schema);
        self
    }
}

/// Named descriptors in insertion order.
///
/// Operation names are caller-chosen identifiers; the client built from this
/// map exposes one operation per entry, in the same order.
#[derive(Debug, Clone, Default)]
pub struct EndpointMap {
    entries: Vec<(String, EndpointDescriptor)>,
}

impl EndpointMap {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a named descriptor, builder style.
    #[must_use]
    pub fn endpoint(mut self, name: impl Into<String>, descriptor: EndpointDescriptor) -> Self {
        self.entries.push((name.into(), descriptor));
        self
    }

    /// Append a named descriptor in place.
    pub fn insert(&mut self, name: impl Into<String>, descriptor: EndpointDescriptor) {
        self.entries.push((name.into(), descriptor));
    }

    /// Iterate entries in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &EndpointDescriptor)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    #[must_use]
    pub fn get(&self, name: &str) -> Option<&EndpointDescriptor> {
        self.entries.iter().find(|(k, _)| k == name).map(|(_, v)| v)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

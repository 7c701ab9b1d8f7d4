//! Call-time request assembly.
//!
//! Turns a caller-supplied [`CallParams`] and a descriptor's path template
//! into a resolved URL plus transport options. Pure value construction, no
//! I/O: a template placeholder with no matching path value fails here,
//! before any request is dispatched.

use std::collections::BTreeMap;

use crate::error::CallError;

/// Caller-supplied values for the four parameter channels of one call.
///
/// Body, query, and header values pass through to the transport untouched;
/// path values are stringified and substituted into the URL template.
#[derive(Debug, Clone, Default)]
pub struct CallParams {
    /// Request body payload.
    pub body: Option<serde_json::Value>,
    /// Path-placeholder values by placeholder name.
    pub path: BTreeMap<String, serde_json::Value>,
    /// Query-string key/value pairs.
    pub query: Vec<(String, String)>,
    /// Header name/value pairs.
    pub headers: Vec<(String, String)>,
}

impl CallParams {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn body(mut self, body: impl Into<serde_json::Value>) -> Self {
        self.body = Some(body.into());
        self
    }

    #[must_use]
    pub fn path(mut self, name: impl Into<String>, value: impl Into<serde_json::Value>) -> Self {
        self.path.insert(name.into(), value.into());
        self
    }

    #[must_use]
    pub fn query(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.query.push((key.into(), value.into()));
        self
    }

    #[must_use]
    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    /// True when no channel carries a value. Used to enforce the zero-argument
    /// contract of parameter-less operations.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.body.is_none() && self.path.is_empty() && self.query.is_empty() && self.headers.is_empty()
    }
}

/// Substitute every `{name}` placeholder in `template` from `path` values.
///
/// Substituted values are stringified (JSON strings without their quotes)
/// and percent-encoded. An unterminated `{` is treated as literal text.
///
/// # Errors
///
/// Returns [`CallError::UnresolvedPlaceholder`] for the first placeholder
/// with no matching value.
pub(crate) fn substitute(
    template: &str,
    path: &BTreeMap<String, serde_json::Value>,
) -> Result<String, CallError> {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(start) = rest.find('{') {
        out.push_str(&rest[..start]);
        let after = &rest[start + 1..];
        let Some(end) = after.find('}') else {
            out.push_str(&rest[start..]);
            rest = "";
            break;
        };
        let name = &after[..end];
        let value = path
            .get(name)
            .ok_or_else(|| CallError::UnresolvedPlaceholder {
                name: name.to_string(),
                template: template.to_string(),
            })?;
        out.push_str(&urlencoding::encode(&stringify(value)));
        rest = &after[end + 1..];
    }

    out.push_str(rest);
    Ok(out)
}

fn stringify(value: &serde_json::Value) -> String {
    match value {
        serde_json::Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

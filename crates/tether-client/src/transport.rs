//! Transport abstraction and the reqwest-backed implementation.
//!
//! The client core never talks HTTP directly; it hands a verb, a resolved
//! URL, and [`RequestOptions`] to whatever [`Transport`] it was built with.
//! [`HttpTransport`] is the production implementation; tests inject mocks
//! that record the assembled request instead of dispatching it.

use async_trait::async_trait;

use tether_core::{Method, RequestFormat};

use crate::error::TransportError;

/// Call arguments beyond verb and URL: body, query pairs, headers, and the
/// descriptor's body-encoding hint. The core passes these through untouched;
/// only the transport interprets them.
#[derive(Debug, Clone, Default)]
pub struct RequestOptions {
    /// Request body payload, if any.
    pub body: Option<serde_json::Value>,
    /// Query-string key/value pairs.
    pub query: Vec<(String, String)>,
    /// Header name/value pairs.
    pub headers: Vec<(String, String)>,
    /// How to encode `body` on the wire.
    pub format: RequestFormat,
}

/// A single-shot request primitive: one invocation, one eventual raw result.
///
/// Implementations must not retry or recover; every failure surfaces as a
/// [`TransportError`] for the caller to interpret. Cancellation is dropping
/// the returned future.
#[async_trait]
pub trait Transport: Send + Sync {
    /// Perform one request and return the raw response body as JSON.
    ///
    /// # Errors
    ///
    /// Returns [`TransportError`] on connectivity failure, a non-success
    /// status, or an undecodable declared-JSON body.
    async fn request(
        &self,
        method: Method,
        url: &str,
        options: RequestOptions,
    ) -> Result<serde_json::Value, TransportError>;
}

/// Transport backed by a shared [`reqwest::Client`].
///
/// Prepends `base_url` to every resolved path, treats non-success statuses
/// as [`TransportError::Status`], and decodes bodies as JSON (falling back
/// to a plain string value when the server did not declare JSON).
pub struct HttpTransport {
    http: reqwest::Client,
    base_url: String,
}

impl HttpTransport {
    /// Create a transport with default client settings (10 s timeout).
    ///
    /// # Panics
    ///
    /// Panics if the underlying `reqwest::Client` fails to build.
    #[must_use]
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_client(
            reqwest::Client::builder()
                .user_agent("tether/0.1")
                .timeout(std::time::Duration::from_secs(10))
                .build()
                .expect("reqwest client should build"),
            base_url,
        )
    }

    /// Create a transport over an existing client, e.g. one with custom
    /// timeouts or TLS settings.
    #[must_use]
    pub fn with_client(http: reqwest::Client, base_url: impl Into<String>) -> Self {
        let mut base_url = base_url.into();
        while base_url.ends_with('/') {
            base_url.pop();
        }
        Self { http, base_url }
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn request(
        &self,
        method: Method,
        url: &str,
        options: RequestOptions,
    ) -> Result<serde_json::Value, TransportError> {
        let full_url = format!("{}{url}", self.base_url);
        let mut req = self.http.request(to_reqwest(method), &full_url);

        if !options.query.is_empty() {
            req = req.query(&options.query);
        }
        for (name, value) in &options.headers {
            req = req.header(name, value);
        }
        if let Some(body) = &options.body {
            req = match options.format {
                RequestFormat::Json => req.json(body),
                RequestFormat::Form => req.form(body),
                RequestFormat::Text => req
                    .header(reqwest::header::CONTENT_TYPE, "text/plain")
                    .body(stringify_body(body)),
            };
        }

        let resp = check_status(req.send().await?).await?;
        decode_body(resp).await
    }
}

const fn to_reqwest(method: Method) -> reqwest::Method {
    match method {
        Method::Get => reqwest::Method::GET,
        Method::Post => reqwest::Method::POST,
        Method::Put => reqwest::Method::PUT,
        Method::Delete => reqwest::Method::DELETE,
        Method::Patch => reqwest::Method::PATCH,
        Method::Head => reqwest::Method::HEAD,
        Method::Options => reqwest::Method::OPTIONS,
    }
}

fn stringify_body(body: &serde_json::Value) -> String {
    match body {
        serde_json::Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Map non-success statuses to [`TransportError::Status`] with the body
/// attached for debugging. Returns the response unchanged on success.
async fn check_status(resp: reqwest::Response) -> Result<reqwest::Response, TransportError> {
    if !resp.status().is_success() {
        return Err(TransportError::Status {
            status: resp.status().as_u16(),
            body: resp.text().await.unwrap_or_default(),
        });
    }
    Ok(resp)
}

/// Decode a success response body.
///
/// An empty body decodes to `null`. A body that parses as JSON is returned
/// as-is. A body that does not parse is a [`TransportError::Decode`] when
/// the server declared a JSON content type, and a plain string value
/// otherwise.
async fn decode_body(resp: reqwest::Response) -> Result<serde_json::Value, TransportError> {
    let declared_json = resp
        .headers()
        .get(reqwest::header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|v| v.contains("json"));

    let text = resp.text().await?;
    if text.is_empty() {
        return Ok(serde_json::Value::Null);
    }
    match serde_json::from_str(&text) {
        Ok(value) => Ok(value),
        Err(e) if declared_json => Err(TransportError::Decode(format!("{e}"))),
        Err(_) => Ok(serde_json::Value::String(text)),
    }
}

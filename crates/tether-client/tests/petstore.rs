//! End-to-end client-generation tests against a scripted transport.
//!
//! Exercises the petstore descriptors from the original service contract:
//! conforming and non-conforming responses, path substitution, zero-argument
//! operations, success-key selection, and the transport-vs-validation error
//! boundary.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use pretty_assertions::assert_eq;
use serde::Deserialize;
use serde_json::json;

use tether_client::{CallError, CallParams, Client, RequestOptions, Transport, TransportError};
use tether_core::{EndpointDescriptor, EndpointMap, Method, ParameterShapes, RequestFormat};

#[derive(Debug, Deserialize, PartialEq, schemars::JsonSchema)]
struct Pet {
    id: i64,
    name: String,
}

fn pet_schema() -> serde_json::Value {
    serde_json::to_value(schemars::schema_for!(Pet)).unwrap()
}

#[derive(Debug, Clone)]
struct Recorded {
    method: Method,
    url: String,
    options: RequestOptions,
}

enum Reply {
    Value(serde_json::Value),
    Status(u16, &'static str),
}

/// Scripted transport: returns a fixed reply and records every dispatch.
struct MockTransport {
    reply: Reply,
    seen: Mutex<Vec<Recorded>>,
}

impl MockTransport {
    fn returning(value: serde_json::Value) -> Arc<Self> {
        Arc::new(Self {
            reply: Reply::Value(value),
            seen: Mutex::new(Vec::new()),
        })
    }

    fn failing(status: u16, body: &'static str) -> Arc<Self> {
        Arc::new(Self {
            reply: Reply::Status(status, body),
            seen: Mutex::new(Vec::new()),
        })
    }

    fn seen(&self) -> Vec<Recorded> {
        self.seen.lock().unwrap().clone()
    }
}

#[async_trait]
impl Transport for MockTransport {
    async fn request(
        &self,
        method: Method,
        url: &str,
        options: RequestOptions,
    ) -> Result<serde_json::Value, TransportError> {
        self.seen.lock().unwrap().push(Recorded {
            method,
            url: url.to_string(),
            options,
        });
        match &self.reply {
            Reply::Value(value) => Ok(value.clone()),
            Reply::Status(status, body) => Err(TransportError::Status {
                status: *status,
                body: (*body).to_string(),
            }),
        }
    }
}

fn get_custom_pets() -> EndpointDescriptor {
    EndpointDescriptor::new("GET", "/pet/custom").response("200", pet_schema())
}

fn update_custom_pet() -> EndpointDescriptor {
    EndpointDescriptor::new("PUT", "/pet/custom/{id}")
        .parameters(
            ParameterShapes::new()
                .path(json!({"type": "object", "properties": {"id": {"type": "integer"}}}))
                .body(pet_schema()),
        )
        .response("200", pet_schema())
}

fn build(transport: Arc<MockTransport>, map: EndpointMap) -> Client {
    Client::build(transport, &map).unwrap()
}

#[tokio::test]
async fn conforming_response_passes_through() {
    // Scenario A.
    let transport = MockTransport::returning(json!({"id": 1, "name": "Fido"}));
    let map = EndpointMap::new().endpoint("getCustomPets", get_custom_pets());
    let client = build(Arc::clone(&transport), map);

    let value = client.get("getCustomPets").unwrap().call().await.unwrap();
    assert_eq!(value, json!({"id": 1, "name": "Fido"}));

    let seen = transport.seen();
    assert_eq!(seen.len(), 1);
    assert_eq!(seen[0].method, Method::Get);
    assert_eq!(seen[0].url, "/pet/custom");
}

#[tokio::test]
async fn nonconforming_response_is_a_validation_error() {
    // Scenario B.
    let transport = MockTransport::returning(json!({"wrongField": "oops"}));
    let map = EndpointMap::new().endpoint("getCustomPets", get_custom_pets());
    let client = build(transport, map);

    let err = client.get("getCustomPets").unwrap().call().await.unwrap_err();
    let CallError::Validation { errors } = err else {
        panic!("expected Validation, got {err:?}");
    };
    assert!(!errors.is_empty());
}

#[tokio::test]
async fn put_with_path_and_body_assembles_the_request() {
    // Scenario C.
    let transport = MockTransport::returning(json!({"id": 1, "name": "Fluffy"}));
    let map = EndpointMap::new().endpoint("updateCustomPet", update_custom_pet());
    let client = build(Arc::clone(&transport), map);

    let value = client
        .get("updateCustomPet")
        .unwrap()
        .call_with(
            CallParams::new()
                .path("id", 1)
                .body(json!({"id": 1, "name": "Fluffy"})),
        )
        .await
        .unwrap();
    assert_eq!(value, json!({"id": 1, "name": "Fluffy"}));

    let seen = transport.seen();
    assert_eq!(seen.len(), 1);
    assert_eq!(seen[0].method, Method::Put);
    assert_eq!(seen[0].url, "/pet/custom/1");
    assert_eq!(seen[0].options.body, Some(json!({"id": 1, "name": "Fluffy"})));
    assert_eq!(seen[0].options.format, RequestFormat::Json);
}

#[tokio::test]
async fn parameterless_operation_is_zero_argument() {
    let transport = MockTransport::returning(json!({"id": 2, "name": "Rex"}));
    let map = EndpointMap::new().endpoint("getCustomPets", get_custom_pets());
    let client = build(transport, map);

    // `call()` takes nothing; the typed variant works the same way.
    let pet: Pet = client.get("getCustomPets").unwrap().call_as().await.unwrap();
    assert_eq!(pet, Pet { id: 2, name: "Rex".to_string() });
}

#[tokio::test]
async fn params_to_parameterless_operation_are_rejected() {
    let transport = MockTransport::returning(json!({"id": 1, "name": "Fido"}));
    let map = EndpointMap::new().endpoint("getCustomPets", get_custom_pets());
    let client = build(Arc::clone(&transport), map);

    let err = client
        .get("getCustomPets")
        .unwrap()
        .call_with(CallParams::new().query("page", "2"))
        .await
        .unwrap_err();
    assert!(matches!(err, CallError::UnexpectedParams { ref operation } if operation == "getCustomPets"));
    assert!(transport.seen().is_empty());
}

#[tokio::test]
async fn missing_placeholder_fails_before_dispatch() {
    let transport = MockTransport::returning(json!({"id": 1, "name": "Fido"}));
    let map = EndpointMap::new().endpoint("updateCustomPet", update_custom_pet());
    let client = build(Arc::clone(&transport), map);

    let err = client
        .get("updateCustomPet")
        .unwrap()
        .call_with(CallParams::new().body(json!({"id": 1, "name": "Fluffy"})))
        .await
        .unwrap_err();
    assert!(matches!(err, CallError::UnresolvedPlaceholder { ref name, .. } if name == "id"));
    assert!(transport.seen().is_empty(), "no request may leave before assembly succeeds");
}

#[tokio::test]
async fn first_declared_2xx_schema_is_the_one_applied() {
    // "204" is declared before "200" and demands null; the object reply must
    // therefore fail validation, proving the 204 schema was selected.
    let transport = MockTransport::returning(json!({"id": 1, "name": "Fido"}));
    let descriptor = EndpointDescriptor::new("GET", "/pet/custom")
        .response("404", json!({"type": "object"}))
        .response("204", json!({"type": "null"}))
        .response("200", pet_schema());
    let map = EndpointMap::new().endpoint("getCustomPets", descriptor);
    let client = build(transport, map);

    let err = client.get("getCustomPets").unwrap().call().await.unwrap_err();
    assert!(matches!(err, CallError::Validation { .. }));
}

#[tokio::test]
async fn no_2xx_key_passes_raw_response_through() {
    let transport = MockTransport::returning(json!({"anything": ["goes", 1, null]}));
    let descriptor = EndpointDescriptor::new("GET", "/pet/raw")
        .response("400", json!({"type": "object"}));
    let map = EndpointMap::new().endpoint("rawPets", descriptor);
    let client = build(transport, map);

    let value = client.get("rawPets").unwrap().call().await.unwrap();
    assert_eq!(value, json!({"anything": ["goes", 1, null]}));
}

#[tokio::test]
async fn transport_failure_is_never_a_validation_error() {
    let transport = MockTransport::failing(503, "unavailable");
    let map = EndpointMap::new().endpoint("getCustomPets", get_custom_pets());
    let client = build(transport, map);

    let err = client.get("getCustomPets").unwrap().call().await.unwrap_err();
    let CallError::Transport(TransportError::Status { status, body }) = err else {
        panic!("expected Transport, got {err:?}");
    };
    assert_eq!(status, 503);
    assert_eq!(body, "unavailable");
}

#[tokio::test]
async fn query_and_header_channels_reach_the_transport_untouched() {
    let transport = MockTransport::returning(json!({"id": 1, "name": "Fido"}));
    let descriptor = EndpointDescriptor::new("GET", "/pet/search")
        .parameters(
            ParameterShapes::new()
                .query(json!({"type": "object"}))
                .header(json!({"type": "object"})),
        )
        .response("200", pet_schema());
    let map = EndpointMap::new().endpoint("searchPets", descriptor);
    let client = build(Arc::clone(&transport), map);

    client
        .get("searchPets")
        .unwrap()
        .call_with(
            CallParams::new()
                .query("name", "fido")
                .query("limit", "10")
                .header("X-Request-Id", "abc-123"),
        )
        .await
        .unwrap();

    let seen = transport.seen();
    assert_eq!(
        seen[0].options.query,
        vec![("name".to_string(), "fido".to_string()), ("limit".to_string(), "10".to_string())]
    );
    assert_eq!(
        seen[0].options.headers,
        vec![("X-Request-Id".to_string(), "abc-123".to_string())]
    );
}

#[tokio::test]
async fn repeated_calls_share_no_state() {
    let transport = MockTransport::returning(json!({"id": 1, "name": "Fido"}));
    let map = EndpointMap::new().endpoint("updateCustomPet", update_custom_pet());
    let client = build(Arc::clone(&transport), map);
    let op = client.get("updateCustomPet").unwrap();

    for id in 1..=3 {
        op.call_with(CallParams::new().path("id", id).body(json!({"id": id, "name": "Fido"})))
            .await
            .unwrap();
    }

    let urls: Vec<String> = transport.seen().into_iter().map(|r| r.url).collect();
    assert_eq!(urls, vec!["/pet/custom/1", "/pet/custom/2", "/pet/custom/3"]);
}

//! Tests for the API gateway.

use std::sync::Arc;

use rstest::{fixture, rstest};
use serde::Deserialize;
use serde_json::json;

use super::*;
use crate::domain::ports::{
    InMemorySessionStore, MockAuthRejectionReaction, MockHttpTransport, MockSessionStore,
    NoOpAuthRejection, SessionStoreError, TransportError, TransportResponse,
};

const BASE: &str = "http://backend.test/api";

#[fixture]
fn token() -> SessionToken {
    SessionToken::new("abc123").expect("valid token")
}

fn base_url() -> ApiBaseUrl {
    ApiBaseUrl::parse(BASE).expect("valid base url")
}

fn json_response(status: u16, status_text: &str, body: serde_json::Value) -> TransportResponse {
    let body = serde_json::to_vec(&body).expect("serialise body");
    TransportResponse {
        status,
        status_text: status_text.to_owned(),
        content_type: Some("application/json".to_owned()),
        content_length: Some(body.len() as u64),
        body,
    }
}

fn make_gateway(
    transport: MockHttpTransport,
    store: Arc<dyn SessionStore>,
    reaction: Arc<dyn AuthRejectionReaction>,
) -> ApiGateway {
    ApiGateway::new(
        ApiGatewayPorts {
            transport: Arc::new(transport),
            store,
            reaction,
        },
        base_url(),
    )
}

fn rejection_expected_once(status: u16, endpoint: &'static str) -> MockAuthRejectionReaction {
    let mut reaction = MockAuthRejectionReaction::new();
    reaction
        .expect_session_rejected()
        .withf(move |rejection| rejection.status == status && rejection.endpoint == endpoint)
        .times(1)
        .return_const(());
    reaction
}

fn no_rejection() -> MockAuthRejectionReaction {
    let mut reaction = MockAuthRejectionReaction::new();
    reaction.expect_session_rejected().never();
    reaction
}

#[rstest]
#[tokio::test]
async fn held_token_is_sent_as_bearer_credential(token: SessionToken) {
    let mut transport = MockHttpTransport::new();
    transport
        .expect_send()
        .withf(|request| {
            request.url.as_str() == "http://backend.test/api/users/me"
                && request.header("Authorization") == Some("Bearer abc123")
                && request.header("Content-Type") == Some("application/json")
        })
        .times(1)
        .returning(|_| Ok(json_response(200, "OK", json!({ "id": "u1" }))));

    let gateway = make_gateway(
        transport,
        Arc::new(InMemorySessionStore::with_token(token)),
        Arc::new(no_rejection()),
    );
    let me = gateway
        .request_value(ApiRequest::get("/users/me"))
        .await
        .expect("request succeeds");
    assert_eq!(me, json!({ "id": "u1" }));
}

#[tokio::test]
async fn anonymous_requests_carry_no_authorization() {
    let mut transport = MockHttpTransport::new();
    transport
        .expect_send()
        .withf(|request| request.header("Authorization").is_none())
        .times(1)
        .returning(|_| Ok(json_response(200, "OK", json!({ "items": [] }))));

    let gateway = make_gateway(
        transport,
        Arc::new(InMemorySessionStore::new()),
        Arc::new(no_rejection()),
    );
    gateway
        .request_value(ApiRequest::get("/feed"))
        .await
        .expect("request succeeds");
}

#[rstest]
#[case::delete_no_content(ApiRequest::delete("/forum/messages/m1"), 204)]
#[case::post_zero_length(ApiRequest::post("/chat/messages/m1/reactions"), 200)]
#[tokio::test]
async fn bodiless_success_resolves_to_empty_object(#[case] request: ApiRequest, #[case] status: u16) {
    let mut transport = MockHttpTransport::new();
    transport.expect_send().times(1).returning(move |_| {
        Ok(TransportResponse {
            status,
            status_text: String::new(),
            content_type: None,
            content_length: Some(0),
            body: Vec::new(),
        })
    });

    let gateway = make_gateway(
        transport,
        Arc::new(InMemorySessionStore::new()),
        Arc::new(no_rejection()),
    );
    let value = gateway.request_value(request).await.expect("success");
    assert_eq!(value, json!({}));
}

#[rstest]
#[case(401, "Unauthorized")]
#[case(403, "Forbidden")]
#[tokio::test]
async fn auth_rejection_clears_session_and_reacts_once(
    token: SessionToken,
    #[case] status: u16,
    #[case] status_text: &'static str,
) {
    let store = Arc::new(InMemorySessionStore::with_token(token));
    store
        .set_current_user(&json!({ "id": "u1" }))
        .expect("cache user");

    let mut transport = MockHttpTransport::new();
    transport.expect_send().times(1).returning(move |_| {
        Ok(json_response(status, status_text, json!({ "message": "Session expired" })))
    });

    let gateway = make_gateway(
        transport,
        store.clone(),
        Arc::new(rejection_expected_once(status, "/users/me/notifications")),
    );
    let err = gateway
        .request_value(ApiRequest::get("/users/me/notifications"))
        .await
        .expect_err("rejection surfaces");

    assert_eq!(err.status(), Some(status));
    assert_eq!(err.to_string(), "Session expired");
    assert!(!gateway.is_authenticated());
    assert_eq!(store.token().expect("read token"), None);
    assert_eq!(store.current_user().expect("read user"), None);
}

#[rstest]
#[tokio::test]
async fn other_failures_leave_the_session_alone(token: SessionToken) {
    let mut transport = MockHttpTransport::new();
    transport.expect_send().times(1).returning(|_| {
        Ok(json_response(
            404,
            "Not Found",
            json!({ "message": "Idea not found", "error": "NotFound" }),
        ))
    });

    let gateway = make_gateway(
        transport,
        Arc::new(InMemorySessionStore::with_token(token)),
        Arc::new(no_rejection()),
    );
    let err = gateway
        .request_value(ApiRequest::get("/ideas/missing"))
        .await
        .expect_err("404 surfaces");

    assert_eq!(err.to_string(), "Idea not found");
    assert_eq!(
        err.details(),
        Some(&json!({ "message": "Idea not found", "error": "NotFound", "status": 404 }))
    );
    assert!(gateway.is_authenticated());
}

#[rstest]
#[case::timeout(TransportError::timeout("operation timed out"))]
#[case::refused(TransportError::unreachable("connection refused"))]
#[tokio::test]
async fn transport_failures_are_network_errors(token: SessionToken, #[case] failure: TransportError) {
    let mut transport = MockHttpTransport::new();
    transport
        .expect_send()
        .times(1)
        .returning(move |_| Err(failure.clone()));

    let gateway = make_gateway(
        transport,
        Arc::new(InMemorySessionStore::with_token(token)),
        Arc::new(no_rejection()),
    );
    let err = gateway
        .request_value(ApiRequest::get("/feed"))
        .await
        .expect_err("network failure surfaces");

    assert!(err.is_network());
    assert_eq!(err.status(), None);
    assert!(gateway.is_authenticated());
}

#[tokio::test]
async fn relative_endpoints_are_rejected_before_sending() {
    let mut transport = MockHttpTransport::new();
    transport.expect_send().never();

    let gateway = make_gateway(
        transport,
        Arc::new(InMemorySessionStore::new()),
        Arc::new(NoOpAuthRejection),
    );
    let err = gateway
        .request_value(ApiRequest::get("feed"))
        .await
        .expect_err("relative endpoint rejected");
    assert!(matches!(err, ApiError::InvalidRequest { .. }));
}

#[derive(Debug, Deserialize, PartialEq)]
struct Idea {
    id: String,
    title: String,
}

#[tokio::test]
async fn typed_requests_deserialize_results() {
    let mut transport = MockHttpTransport::new();
    transport.expect_send().times(1).returning(|_| {
        Ok(json_response(200, "OK", json!({ "id": "i1", "title": "Solar kiosk", "votes": 3 })))
    });

    let gateway = make_gateway(
        transport,
        Arc::new(InMemorySessionStore::new()),
        Arc::new(NoOpAuthRejection),
    );
    let idea: Idea = gateway
        .request(ApiRequest::get("/ideas/i1"))
        .await
        .expect("typed result");
    assert_eq!(
        idea,
        Idea {
            id: "i1".to_owned(),
            title: "Solar kiosk".to_owned(),
        }
    );
}

#[tokio::test]
async fn mismatched_shapes_are_decode_errors() {
    let mut transport = MockHttpTransport::new();
    transport
        .expect_send()
        .times(1)
        .returning(|_| Ok(json_response(200, "OK", json!({ "unexpected": true }))));

    let gateway = make_gateway(
        transport,
        Arc::new(InMemorySessionStore::new()),
        Arc::new(NoOpAuthRejection),
    );
    let err = gateway
        .request::<Idea>(ApiRequest::get("/ideas/i1"))
        .await
        .expect_err("shape mismatch");
    assert!(matches!(err, ApiError::Decode { .. }));
}

#[rstest]
fn set_auth_token_round_trips_through_the_store(token: SessionToken) {
    let store = Arc::new(InMemorySessionStore::new());
    let gateway = make_gateway(
        MockHttpTransport::new(),
        store.clone(),
        Arc::new(NoOpAuthRejection),
    );

    gateway
        .set_auth_token(Some(token.clone()))
        .expect("persist token");
    assert_eq!(store.token().expect("read"), Some(token.clone()));
    assert_eq!(gateway.auth_token(), Some(token));

    gateway.set_auth_token(None).expect("remove token");
    assert_eq!(store.token().expect("read"), None);
    assert!(!gateway.is_authenticated());
}

#[rstest]
fn construction_adopts_the_persisted_token(token: SessionToken) {
    let gateway = make_gateway(
        MockHttpTransport::new(),
        Arc::new(InMemorySessionStore::with_token(token.clone())),
        Arc::new(NoOpAuthRejection),
    );
    assert_eq!(gateway.auth_token(), Some(token));
}

#[test]
fn unreadable_store_starts_signed_out() {
    let mut store = MockSessionStore::new();
    store
        .expect_token()
        .returning(|| Err(SessionStoreError::corrupt("auth_token", "not utf-8")));

    let gateway = make_gateway(
        MockHttpTransport::new(),
        Arc::new(store),
        Arc::new(NoOpAuthRejection),
    );
    assert!(!gateway.is_authenticated());
}

#[rstest]
fn logout_clears_token_and_cached_user(token: SessionToken) {
    let store = Arc::new(InMemorySessionStore::with_token(token));
    store
        .set_current_user(&json!({ "id": "u1" }))
        .expect("cache user");
    let gateway = make_gateway(
        MockHttpTransport::new(),
        store.clone(),
        Arc::new(NoOpAuthRejection),
    );

    gateway.logout().expect("logout");
    assert_eq!(store.token().expect("read"), None);
    assert_eq!(gateway.current_user().expect("read"), None);
}

#[rstest]
#[tokio::test]
async fn storage_failures_do_not_mask_the_rejection(token: SessionToken) {
    let mut store = MockSessionStore::new();
    store
        .expect_token()
        .returning(move || Ok(Some(token.clone())));
    store
        .expect_clear_token()
        .times(1)
        .returning(|| Err(SessionStoreError::io("read-only filesystem")));
    store
        .expect_clear_current_user()
        .times(1)
        .returning(|| Err(SessionStoreError::io("read-only filesystem")));

    let mut transport = MockHttpTransport::new();
    transport
        .expect_send()
        .times(1)
        .returning(|_| Ok(json_response(401, "Unauthorized", json!({}))));

    let gateway = make_gateway(
        transport,
        Arc::new(store),
        Arc::new(rejection_expected_once(401, "/auth/verify")),
    );
    let err = gateway
        .request_value(ApiRequest::get("/auth/verify"))
        .await
        .expect_err("rejection surfaces");
    assert!(err.is_auth_rejection());
    assert_eq!(err.to_string(), "Unauthorized");
    assert!(!gateway.is_authenticated());
}

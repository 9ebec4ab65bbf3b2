//! Abuse Scenario Tests
//!
//! Each test represents a misuse pattern the service must block:
//! - account enumeration through the login endpoint
//! - forged and expired bearer tokens
//! - cross-tenant reads by citizens
//! - double settlement

use std::sync::Arc;

use axum::{
    body::Body,
    http::{header, Request, StatusCode},
    Router,
};
use http_body_util::BodyExt;
use serde_json::{json, Value};
use tower::ServiceExt;

use chrono::Duration;
use citation_auth::TokenSigner;
use citation_server::{create_router, storage, AppState, MemoryStore, ServerConfig};

const SIGNING_SECRET: &[u8] = b"abuse-test-secret";

// =============================================================================
// Test Helpers
// =============================================================================

async fn test_app() -> Router {
    let store = Arc::new(MemoryStore::new());
    storage::seed_reference_data(store.as_ref()).await.unwrap();

    let state = Arc::new(AppState {
        store,
        tokens: TokenSigner::new(SIGNING_SECRET),
        config: ServerConfig {
            owner_email_domain: "traffic.example".into(),
        },
    });
    create_router(state)
}

fn request(method: &str, uri: &str, token: Option<&str>, body: Option<Value>) -> Request<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
    }
    match body {
        Some(body) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    }
}

async fn send(app: &Router, req: Request<Body>) -> (StatusCode, Value) {
    let response = app.clone().oneshot(req).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, body)
}

async fn register(app: &Router, email: &str, role: &str) -> String {
    let (status, body) = send(
        app,
        request(
            "POST",
            "/auth/register",
            None,
            Some(json!({
                "handle": email.split('@').next().unwrap(),
                "displayName": format!("User {email}"),
                "email": email,
                "secret": "pw1",
                "role": role,
            })),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    body["token"].as_str().unwrap().to_string()
}

async fn file_citation(app: &Router, token: &str, owner_name: &str) -> Value {
    let (_, types) = send(app, request("GET", "/violations/types", Some(token), None)).await;
    let (_, areas) = send(app, request("GET", "/violations/areas", Some(token), None)).await;

    let (status, body) = send(
        app,
        request(
            "POST",
            "/violations",
            Some(token),
            Some(json!({
                "vehicle": "KA-01-AB-1234",
                "ownerName": owner_name,
                "typeRef": types[0]["id"],
                "areaRef": areas[0]["id"],
            })),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    body
}

async fn login(app: &Router, email: &Value, secret: &Value) -> String {
    let (status, body) = send(
        app,
        request(
            "POST",
            "/auth/login",
            None,
            Some(json!({ "email": email, "secret": secret })),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    body["token"].as_str().unwrap().to_string()
}

// =============================================================================
// ABUSE: Account Enumeration
// =============================================================================

/// Probing the login endpoint with known and unknown emails must yield
/// byte-identical error bodies, or the endpoint doubles as a directory of
/// registered accounts.
#[tokio::test]
async fn abuse_login_enumeration_blocked() {
    let app = test_app().await;
    register(&app, "real@x.example", "citizen").await;

    let (s1, b1) = send(
        &app,
        request(
            "POST",
            "/auth/login",
            None,
            Some(json!({ "email": "real@x.example", "secret": "wrong" })),
        ),
    )
    .await;
    let (s2, b2) = send(
        &app,
        request(
            "POST",
            "/auth/login",
            None,
            Some(json!({ "email": "ghost@x.example", "secret": "wrong" })),
        ),
    )
    .await;

    assert_eq!(s1, StatusCode::UNAUTHORIZED);
    assert_eq!(s2, StatusCode::UNAUTHORIZED);
    assert_eq!(b1, b2);
}

// =============================================================================
// ABUSE: Token Forgery
// =============================================================================

/// A token signed with a different secret must be rejected even though its
/// claims are well-formed.
#[tokio::test]
async fn abuse_forged_token_rejected() {
    let app = test_app().await;
    register(&app, "victim@x.example", "admin").await;

    let forger = TokenSigner::new(b"attacker-controlled-secret");
    let forged = forger.issue(uuid::Uuid::new_v4()).unwrap();

    let (status, body) = send(&app, request("GET", "/auth/me", Some(&forged), None)).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["code"], "UNAUTHORIZED");
}

/// A correctly signed but expired token must be rejected.
#[tokio::test]
async fn abuse_expired_token_rejected() {
    let app = test_app().await;
    register(&app, "victim@x.example", "admin").await;

    // Same secret as the server, issued already expired
    let stale = TokenSigner::with_ttl(SIGNING_SECRET, Duration::hours(-2));
    let expired = stale.issue(uuid::Uuid::new_v4()).unwrap();

    let (status, _) = send(&app, request("GET", "/auth/me", Some(&expired), None)).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

/// Garbage in the Authorization header must not reach a handler.
#[tokio::test]
async fn abuse_malformed_tokens_rejected() {
    let app = test_app().await;

    for token in ["", "not-a-jwt", "a.b", "a.b.c.d"] {
        let (status, _) = send(&app, request("GET", "/violations", Some(token), None)).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED, "token: {token:?}");
    }
}

// =============================================================================
// ABUSE: Cross-Tenant Reads
// =============================================================================

/// A citizen must never see another citizen's citations, whether through the
/// list endpoint or by registering fresh accounts.
#[tokio::test]
async fn abuse_cross_tenant_read_blocked() {
    let app = test_app().await;
    let officer = register(&app, "officer@dept.example", "officer").await;

    let ravi_filed = file_citation(&app, &officer, "Ravi Kumar").await;
    file_citation(&app, &officer, "Asha Rao").await;

    // A self-registered citizen unrelated to either owner sees nothing
    let snoop = register(&app, "snoop@x.example", "citizen").await;
    let (_, list) = send(&app, request("GET", "/violations", Some(&snoop), None)).await;
    assert!(list.as_array().unwrap().is_empty());

    // Ravi sees only his own, never Asha's
    let creds = &ravi_filed["ownerCredentials"];
    let ravi = login(&app, &creds["email"], &creds["secret"]).await;
    let (_, list) = send(&app, request("GET", "/violations", Some(&ravi), None)).await;
    let list = list.as_array().unwrap();
    assert_eq!(list.len(), 1);
    assert_eq!(list[0]["ownerName"], "Ravi Kumar");
}

/// Role escalation by re-registering the same email with a higher role must
/// fail on the uniqueness constraint.
#[tokio::test]
async fn abuse_role_escalation_via_reregistration_blocked() {
    let app = test_app().await;
    register(&app, "citizen@x.example", "citizen").await;

    let (status, _) = send(
        &app,
        request(
            "POST",
            "/auth/register",
            None,
            Some(json!({
                "handle": "citizen2",
                "displayName": "Citizen Again",
                "email": "citizen@x.example",
                "secret": "pw2",
                "role": "admin",
            })),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

// =============================================================================
// ABUSE: Double Settlement
// =============================================================================

/// Replaying a settlement must not double-count collected fines.
#[tokio::test]
async fn abuse_settlement_replay_blocked() {
    let app = test_app().await;
    let officer = register(&app, "officer@dept.example", "officer").await;
    let admin = register(&app, "admin@dept.example", "admin").await;

    let filed = file_citation(&app, &officer, "Ravi Kumar").await;
    let id = filed["citation"]["id"].as_str().unwrap().to_string();
    let fine = filed["citation"]["fineAmount"].as_i64().unwrap();
    let uri = format!("/violations/{id}/pay");

    let (status, _) = send(&app, request("PUT", &uri, Some(&officer), None)).await;
    assert_eq!(status, StatusCode::OK);

    for _ in 0..3 {
        let (status, body) = send(&app, request("PUT", &uri, Some(&officer), None)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["code"], "ALREADY_SETTLED");
    }

    let (_, stats) = send(&app, request("GET", "/analytics/stats", Some(&admin), None)).await;
    assert_eq!(stats["collectedFines"].as_i64().unwrap(), fine);
}

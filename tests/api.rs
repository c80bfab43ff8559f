//! End-to-end tests of the Foo endpoints through the router.
//!
//! Requests go through `Router::respond`, the same path the server takes
//! after reading a body, without opening a socket.

use foo_api::{AppState, Method, Request, Router, api};
use serde_json::{Value, json};

// ---------------------------------------------------------------------------
// Test helpers
// ---------------------------------------------------------------------------

fn test_app() -> (AppState, Router) {
    let state = AppState::new();
    let app = api::routes(state.clone());
    (state, app)
}

async fn send(app: &Router, method: Method, path: &str, body: &[u8]) -> (u16, Value) {
    let resp = app.respond(Request::new(method, path, body.to_vec())).await;
    assert_eq!(resp.header("content-type"), Some("application/json"));
    let json = serde_json::from_slice(resp.body()).unwrap_or(Value::Null);
    (resp.status_code(), json)
}

async fn create(app: &Router, name: &str) -> Value {
    let body = serde_json::to_vec(&json!({ "name": name })).unwrap();
    let (status, foo) = send(app, Method::Post, "/foo", &body).await;
    assert_eq!(status, 200, "create failed: {foo}");
    foo
}

// ---------------------------------------------------------------------------
// Create / Read / Delete
// ---------------------------------------------------------------------------

#[tokio::test]
async fn create_read_delete_lifecycle() {
    let (state, app) = test_app();

    let foo = create(&app, "Al").await;
    assert_eq!(foo["name"], "Al");
    let id = foo["id"].as_str().unwrap().to_owned();
    assert!(!id.is_empty());

    let (status, read) = send(&app, Method::Get, &format!("/foo/{id}"), b"").await;
    assert_eq!(status, 200);
    assert_eq!(read, foo);

    let resp = app.respond(Request::new(Method::Delete, format!("/foo/{id}"), Vec::new())).await;
    assert_eq!(resp.status_code(), 204);
    assert!(resp.body().is_empty());

    let (status, _) = send(&app, Method::Get, &format!("/foo/{id}"), b"").await;
    assert_eq!(status, 404);
    assert!(state.store.lock().await.is_empty());
}

#[tokio::test]
async fn create_serialises_name_before_id() {
    let (_, app) = test_app();
    let resp = app.respond(Request::new(Method::Post, "/foo", br#"{"name":"Al"}"#.to_vec())).await;
    let text = String::from_utf8(resp.body().to_vec()).unwrap();
    assert!(text.starts_with(r#"{"name":"Al","id":""#), "{text}");
}

#[tokio::test]
async fn create_accepts_capitalised_name_key() {
    let (_, app) = test_app();
    let (status, foo) = send(&app, Method::Post, "/foo", br#"{"Name":"Al"}"#).await;
    assert_eq!(status, 200, "{foo}");
    assert_eq!(foo["name"], "Al");

    let (status, read) = send(&app, Method::Get, &format!("/foo/{}", foo["id"].as_str().unwrap()), b"").await;
    assert_eq!(status, 200);
    assert_eq!(read, foo);
}

#[tokio::test]
async fn create_ignores_caller_supplied_id() {
    let (_, app) = test_app();
    let (status, foo) = send(&app, Method::Post, "/foo", br#"{"name":"Bo","id":"mine"}"#).await;
    assert_eq!(status, 200);
    assert_ne!(foo["id"], "mine");

    let (status, _) = send(&app, Method::Get, "/foo/mine", b"").await;
    assert_eq!(status, 404);
}

#[tokio::test]
async fn creates_get_distinct_ids() {
    let (state, app) = test_app();
    let a = create(&app, "same").await;
    let b = create(&app, "same").await;
    assert_ne!(a["id"], b["id"]);
    assert_eq!(state.store.lock().await.len(), 2);
}

// ---------------------------------------------------------------------------
// Failures
// ---------------------------------------------------------------------------

#[tokio::test]
async fn create_without_name_is_not_found_and_stores_nothing() {
    let (state, app) = test_app();
    let nameless: [&[u8]; 2] = [b"{}", br#"{"name":""}"#];
    for body in nameless {
        let (status, err) = send(&app, Method::Post, "/foo", body).await;
        assert_eq!(status, 404);
        assert_eq!(err["error"], "missing field `name`");
    }
    assert!(state.store.lock().await.is_empty());
}

#[tokio::test]
async fn create_with_malformed_body_is_bad_request() {
    let (state, app) = test_app();
    let malformed: [&[u8]; 4] = [b"not json", br#""not json""#, b"", br#"{"name":["x"]}"#];
    for body in malformed {
        let (status, err) = send(&app, Method::Post, "/foo", body).await;
        assert_eq!(status, 400, "body {:?}", String::from_utf8_lossy(body));
        assert!(err["error"].as_str().unwrap().starts_with("malformed input"));
    }
    assert!(state.store.lock().await.is_empty());
}

#[tokio::test]
async fn read_unknown_id_is_not_found() {
    let (_, app) = test_app();
    let (status, err) = send(&app, Method::Get, "/foo/does-not-exist", b"").await;
    assert_eq!(status, 404);
    assert_eq!(err["error"], "foo `does-not-exist` not found");
}

#[tokio::test]
async fn delete_unknown_id_leaves_store_unchanged() {
    let (state, app) = test_app();
    let kept = create(&app, "kept").await;

    let (status, _) = send(&app, Method::Delete, "/foo/unknown", b"").await;
    assert_eq!(status, 404);

    let store = state.store.lock().await;
    assert_eq!(store.len(), 1);
    assert!(store.get(kept["id"].as_str().unwrap()).is_some());
}

#[tokio::test]
async fn seeded_record_is_readable() {
    let (state, seed) = AppState::with_seed("seed");
    let app = api::routes(state);

    let (status, read) = send(&app, Method::Get, &format!("/foo/{}", seed.id), b"").await;
    assert_eq!(status, 200);
    assert_eq!(read, json!({ "name": "seed", "id": seed.id }));
}

// ---------------------------------------------------------------------------
// Routing
// ---------------------------------------------------------------------------

#[tokio::test]
async fn unsupported_verbs_are_method_not_allowed() {
    let (_, app) = test_app();
    let foo = create(&app, "Al").await;
    let path = format!("/foo/{}", foo["id"].as_str().unwrap());

    let resp = app.respond(Request::new(Method::Put, path.clone(), br#"{"name":"B"}"#.to_vec())).await;
    assert_eq!(resp.status_code(), 405);
    assert_eq!(resp.header("allow"), Some("DELETE, GET"));

    let resp = app.respond(Request::new(Method::Patch, path, Vec::new())).await;
    assert_eq!(resp.status_code(), 405);

    // No listing endpoint.
    let resp = app.respond(Request::new(Method::Get, "/foo", Vec::new())).await;
    assert_eq!(resp.status_code(), 405);
    assert_eq!(resp.header("allow"), Some("POST"));
}

#[tokio::test]
async fn trailing_slash_redirects_to_canonical_path() {
    let (_, app) = test_app();
    let resp = app.respond(Request::new(Method::Get, "/foo/abc/", Vec::new())).await;
    assert_eq!(resp.status_code(), 301);
    assert_eq!(resp.header("location"), Some("/foo/abc"));
}

#[tokio::test]
async fn health_probes() {
    let (_, app) = test_app();
    let (status, body) = send(&app, Method::Get, "/healthz", b"").await;
    assert_eq!((status, body), (200, json!({ "status": "ok" })));
    let (status, body) = send(&app, Method::Get, "/readyz", b"").await;
    assert_eq!((status, body), (200, json!({ "status": "ready" })));
}

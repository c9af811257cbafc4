//! Integration tests for the HTTP gateway against a stub backend.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::extract::Json;
use axum::http::{HeaderMap, StatusCode};
use axum::routing::{get, post};
use axum::Router;
use serde_json::json;

use userdesk::api;
use userdesk::auth::guard::{Destination, Navigator};
use userdesk::auth::store::{MemoryTokenStore, TokenStore};
use userdesk::client::ApiClient;
use userdesk::Error;

#[derive(Default)]
struct RecordingNavigator {
    visits: Mutex<Vec<Destination>>,
}

impl Navigator for RecordingNavigator {
    fn navigate(&self, to: Destination) {
        self.visits.lock().unwrap().push(to);
    }
}

async fn spawn(router: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    format!("http://{addr}")
}

fn client_with(
    base_url: &str,
) -> (ApiClient, Arc<MemoryTokenStore>, Arc<RecordingNavigator>) {
    let store = Arc::new(MemoryTokenStore::new());
    let navigator = Arc::new(RecordingNavigator::default());
    let client = ApiClient::new(
        base_url,
        Duration::from_secs(5),
        store.clone(),
        navigator.clone(),
    )
    .unwrap();
    (client, store, navigator)
}

#[tokio::test]
async fn attaches_bearer_token_when_present() {
    let router = Router::new().route(
        "/echo",
        get(|headers: HeaderMap| async move {
            headers
                .get("authorization")
                .and_then(|value| value.to_str().ok())
                .unwrap_or("")
                .to_string()
        }),
    );
    let base_url = spawn(router).await;
    let (client, store, _) = client_with(&base_url);

    // No token stored: the request goes out unauthenticated.
    let response = client.get("/echo").await.unwrap();
    assert_eq!(response.text().await.unwrap(), "");

    // Token stored: the bearer header is attached at send time.
    store.set("tok-123");
    let response = client.get("/echo").await.unwrap();
    assert_eq!(response.text().await.unwrap(), "Bearer tok-123");
}

#[tokio::test]
async fn unauthorized_clears_session_and_redirects() {
    let router = Router::new().route(
        "/guarded",
        get(|| async { StatusCode::UNAUTHORIZED }),
    );
    let base_url = spawn(router).await;
    let (client, store, navigator) = client_with(&base_url);
    store.set("stale-token");

    let result = client.get("/guarded").await;

    // The caller still receives the failure...
    assert!(matches!(result, Err(Error::Unauthorized)));
    // ...the token is gone...
    assert_eq!(store.get(), None);
    // ...and a redirect to login was issued.
    assert_eq!(*navigator.visits.lock().unwrap(), vec![Destination::Login]);
}

#[tokio::test]
async fn non_401_failures_pass_through() {
    let router = Router::new().route(
        "/broken",
        get(|| async { (StatusCode::INTERNAL_SERVER_ERROR, "boom") }),
    );
    let base_url = spawn(router).await;
    let (client, store, navigator) = client_with(&base_url);
    store.set("tok");

    let response = client.get("/broken").await.unwrap();
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    // Nothing was cleared, nothing was redirected.
    assert_eq!(store.get(), Some("tok".to_string()));
    assert!(navigator.visits.lock().unwrap().is_empty());
}

#[tokio::test]
async fn login_persists_the_returned_token() {
    let router = Router::new().route(
        "/auth/login",
        post(|Json(body): Json<serde_json::Value>| async move {
            assert_eq!(body["email"], "admin@example.com");
            Json(json!({
                "status": true,
                "data": {
                    "accessToken": "issued-token",
                    "id": "7f1c3f61-9f6e-4a7e-8a8a-2f4f2d6b1c0a",
                    "email": "admin@example.com",
                    "username": "admin",
                    "role": "Admin"
                }
            }))
        }),
    );
    let base_url = spawn(router).await;
    let (client, store, _) = client_with(&base_url);

    let request = api::auth::LoginRequest {
        email: "admin@example.com".to_string(),
        password: "hunter2".to_string(),
    };
    let data = api::auth::login(&client, &request).await.unwrap();

    assert_eq!(data.role, "Admin");
    assert_eq!(store.get(), Some("issued-token".to_string()));
}

#[tokio::test]
async fn envelope_failure_surfaces_backend_message() {
    let router = Router::new().route(
        "/auth/login",
        post(|| async {
            Json(json!({ "status": false, "error": "Invalid credentials" }))
        }),
    );
    let base_url = spawn(router).await;
    let (client, store, _) = client_with(&base_url);

    let request = api::auth::LoginRequest {
        email: "admin@example.com".to_string(),
        password: "wrong".to_string(),
    };
    let err = api::auth::login(&client, &request).await.unwrap_err();

    assert!(matches!(err, Error::Api(message) if message == "Invalid credentials"));
    assert_eq!(store.get(), None);
}

#[tokio::test]
async fn role_count_unwraps_the_envelope() {
    let router = Router::new().route(
        "/role/data/count",
        get(|| async { Json(json!({ "status": true, "data": { "count": 3 } })) }),
    );
    let base_url = spawn(router).await;
    let (client, _, _) = client_with(&base_url);

    assert_eq!(api::roles::count(&client).await.unwrap(), 3);
}

#[tokio::test]
async fn user_listing_tolerates_legacy_shapes() {
    let router = Router::new().route(
        "/admin/users",
        get(|| async {
            Json(json!({
                "users": [
                    { "id": "7f1c3f61-9f6e-4a7e-8a8a-2f4f2d6b1c0a",
                      "email": "a@x.io", "username": "a", "isActive": true }
                ],
                "totalCount": 11,
                "activeCount": 5
            }))
        }),
    );
    let base_url = spawn(router).await;
    let (client, _, _) = client_with(&base_url);

    let page = api::users::list(&client, 2).await.unwrap();
    assert_eq!(page.users.len(), 1);
    assert_eq!(page.total, 11);
    assert_eq!(page.active_count, 5);
}

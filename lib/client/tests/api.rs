//! End-to-end tests of the API client against an in-process backend.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::http::header::AUTHORIZATION;
use axum::http::{HeaderMap, StatusCode};
use axum::routing::{delete, get, post};
use axum::{Json, Router};
use base64::Engine;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use groupdesk_client::{ApiClient, ClientConfig, Registration};
use groupdesk_session::{Role, SessionContext, SessionState, SessionToken};
use serde::Deserialize;
use serde_json::{Value, json};

fn issued_token() -> String {
    let payload = URL_SAFE_NO_PAD.encode(r#"{"id":1,"username":"ada","role":"Admin"}"#);
    format!("eyJhbGciOiJIUzI1NiJ9.{payload}.c2ln")
}

fn is_authorized(headers: &HeaderMap) -> bool {
    headers
        .get(AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .is_some_and(|value| value == format!("Bearer {}", issued_token()))
}

async fn login(Json(body): Json<Value>) -> (StatusCode, Json<Value>) {
    if body["username"] == "ada" && body["password"] == "secret" {
        (StatusCode::OK, Json(json!({ "token": issued_token() })))
    } else {
        (
            StatusCode::UNAUTHORIZED,
            Json(json!({ "message": "invalid credentials" })),
        )
    }
}

async fn register(Json(body): Json<Value>) -> (StatusCode, Json<Value>) {
    if body["username"] == "taken" {
        (
            StatusCode::CONFLICT,
            Json(json!({ "message": "username taken" })),
        )
    } else {
        (StatusCode::CREATED, Json(json!({})))
    }
}

async fn projects(headers: HeaderMap) -> (StatusCode, Json<Value>) {
    if is_authorized(&headers) {
        (
            StatusCode::OK,
            Json(json!([{ "id": 1, "name": "Compilers" }, { "id": 2, "name": "Robotics" }])),
        )
    } else {
        (
            StatusCode::UNAUTHORIZED,
            Json(json!({ "message": "jwt expired" })),
        )
    }
}

async fn archive(headers: HeaderMap) -> (StatusCode, Json<Value>) {
    if is_authorized(&headers) {
        (StatusCode::FORBIDDEN, Json(json!({ "message": "admins only" })))
    } else {
        (StatusCode::UNAUTHORIZED, Json(json!({})))
    }
}

async fn create_group(headers: HeaderMap, Json(body): Json<Value>) -> (StatusCode, Json<Value>) {
    if is_authorized(&headers) {
        (
            StatusCode::CREATED,
            Json(json!({ "id": 10, "name": body["name"] })),
        )
    } else {
        (StatusCode::UNAUTHORIZED, Json(json!({})))
    }
}

async fn delete_group(headers: HeaderMap) -> StatusCode {
    if is_authorized(&headers) {
        StatusCode::NO_CONTENT
    } else {
        StatusCode::UNAUTHORIZED
    }
}

async fn spawn_backend() -> String {
    let app = Router::new()
        .route("/api/auth/login", post(login))
        .route("/api/auth/register", post(register))
        .route("/api/projects", get(projects))
        .route("/api/archive", get(archive))
        .route("/api/groups", post(create_group))
        .route("/api/groups/10", delete(delete_group));

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind");
    let addr = listener.local_addr().expect("local addr");
    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("serve");
    });

    format!("http://{addr}/api")
}

async fn client() -> ApiClient {
    let base_url = spawn_backend().await;
    ApiClient::new(&ClientConfig::new(base_url), SessionContext::in_memory()).expect("client")
}

#[derive(Debug, Deserialize, PartialEq)]
struct Project {
    id: u32,
    name: String,
}

#[tokio::test]
async fn login_persists_token_and_authorizes_calls() {
    let api = client().await;

    let token = api.login("ada", "secret").await.expect("login");
    assert_eq!(token.as_str(), issued_token());
    assert_eq!(api.session().state(), SessionState::Authenticated);
    assert!(api.session().capabilities().admin);

    let projects: Vec<Project> = api.get_json("/projects").await.expect("projects");
    assert_eq!(projects.len(), 2);
    assert_eq!(projects[0].name, "Compilers");
}

#[tokio::test]
async fn rejected_login_stays_unauthenticated() {
    let api = client().await;

    let err = api.login("ada", "wrong").await.expect_err("should fail");
    assert!(err.to_string().contains("invalid credentials"));
    assert_eq!(api.session().state(), SessionState::Unauthenticated);
}

#[tokio::test]
async fn rejected_token_clears_the_session() {
    let api = client().await;
    api.session().set_token(&SessionToken::new("stale.token.value"));

    let transitions = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&transitions);
    api.session()
        .subscribe(move |state| sink.lock().expect("lock").push(state));

    let err = api
        .get_json::<Vec<Project>>("/projects")
        .await
        .expect_err("should fail");

    assert!(err.to_string().contains("jwt expired"));
    assert_eq!(api.session().state(), SessionState::Unauthenticated);
    assert_eq!(
        *transitions.lock().expect("lock"),
        vec![SessionState::Unauthenticated]
    );
}

#[tokio::test]
async fn forbidden_response_keeps_the_session() {
    let api = client().await;
    api.login("ada", "secret").await.expect("login");

    let err = api
        .get_json::<Value>("/archive")
        .await
        .expect_err("should fail");

    assert!(err.to_string().contains("403"));
    assert!(err.to_string().contains("admins only"));
    assert!(api.session().state().is_authenticated());
}

#[tokio::test]
async fn register_does_not_log_in() {
    let api = client().await;
    let registration = Registration {
        username: "bo".to_string(),
        email: "bo@example.edu".to_string(),
        password: "pw".to_string(),
        role: Role::Student,
    };

    api.register(&registration).await.expect("register");
    assert_eq!(api.session().state(), SessionState::Unauthenticated);

    let taken = Registration {
        username: "taken".to_string(),
        ..registration
    };
    let err = api.register(&taken).await.expect_err("should fail");
    assert!(err.to_string().contains("username taken"));
}

#[tokio::test]
async fn create_and_delete_group() {
    let api = client().await;
    api.login("ada", "secret").await.expect("login");

    let created: Value = api
        .post_json("/groups", &json!({ "name": "Team Rocket" }))
        .await
        .expect("create");
    assert_eq!(created["id"], 10);
    assert_eq!(created["name"], "Team Rocket");

    api.delete("/groups/10").await.expect("delete");
}

#[tokio::test]
async fn poll_delivers_updates_until_stopped() {
    let api = client().await;
    api.login("ada", "secret").await.expect("login");

    let updates = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&updates);
    let handle = api.poll_json::<Vec<Project>, _>(
        "/projects",
        Duration::from_millis(20),
        move |result| {
            sink.lock()
                .expect("lock")
                .push(result.map(|p| p.len()).ok());
        },
    );

    tokio::time::sleep(Duration::from_millis(120)).await;
    handle.stop().await;

    let seen = updates.lock().expect("lock").clone();
    assert!(seen.len() >= 2, "expected several updates, got {}", seen.len());
    assert!(seen.iter().all(|count| *count == Some(2)));

    tokio::time::sleep(Duration::from_millis(60)).await;
    assert_eq!(updates.lock().expect("lock").len(), seen.len());
}

#[tokio::test]
async fn poll_goes_quiet_after_logout() {
    let api = client().await;
    api.login("ada", "secret").await.expect("login");

    let updates = Arc::new(Mutex::new(0usize));
    let sink = Arc::clone(&updates);
    let handle = api.poll_json::<Value, _>("/projects", Duration::from_millis(20), move |_| {
        *sink.lock().expect("lock") += 1;
    });

    tokio::time::sleep(Duration::from_millis(50)).await;
    api.logout();
    tokio::time::sleep(Duration::from_millis(30)).await;
    let after_logout = *updates.lock().expect("lock");

    tokio::time::sleep(Duration::from_millis(80)).await;
    assert_eq!(*updates.lock().expect("lock"), after_logout);
    handle.stop().await;
}

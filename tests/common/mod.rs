#![allow(dead_code)]

use axum::body::Body;
use axum::http::{Method, Request, StatusCode};
use axum::Router;
use leadline::{create_app, create_state, AppState, Config};
use serde_json::{json, Value};
use tempfile::TempDir;
use tower::ServiceExt;

pub const BOOTSTRAP_TOKEN: &str = "let-me-in";
pub const ADMIN_PASSWORD: &str = "admin-password";

pub async fn read_json(response: axum::response::Response) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body");
    if bytes.is_empty() {
        return Value::Null;
    }
    serde_json::from_slice(&bytes)
        .unwrap_or_else(|_| Value::String(String::from_utf8_lossy(&bytes).into_owned()))
}

/// A router over a throwaway data directory
pub struct TestApp {
    pub app: Router,
    pub state: AppState,
    _dir: TempDir,
}

impl TestApp {
    pub async fn new(bootstrap_token: Option<&str>) -> Self {
        let dir = tempfile::tempdir().expect("tempdir");
        let mut config = Config::for_data_dir(dir.path().to_string_lossy().into_owned());
        config.auth.bootstrap_token = bootstrap_token.map(str::to_string);
        let state = create_state(config).await.expect("state");
        Self {
            app: create_app(state.clone()),
            state,
            _dir: dir,
        }
    }

    pub async fn send(
        &self,
        method: Method,
        uri: &str,
        token: Option<&str>,
        body: Option<Value>,
    ) -> (StatusCode, Value) {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(token) = token {
            builder = builder.header("authorization", format!("Bearer {token}"));
        }
        let body = match body {
            Some(body) => {
                builder = builder.header("content-type", "application/json");
                Body::from(body.to_string())
            }
            None => Body::empty(),
        };
        let response = self
            .app
            .clone()
            .oneshot(builder.body(body).expect("request"))
            .await
            .expect("response");
        let status = response.status();
        (status, read_json(response).await)
    }

    pub async fn get(&self, uri: &str, token: &str) -> (StatusCode, Value) {
        self.send(Method::GET, uri, Some(token), None).await
    }

    pub async fn post(&self, uri: &str, token: &str, body: Value) -> (StatusCode, Value) {
        self.send(Method::POST, uri, Some(token), Some(body)).await
    }

    pub async fn put(&self, uri: &str, token: &str, body: Value) -> (StatusCode, Value) {
        self.send(Method::PUT, uri, Some(token), Some(body)).await
    }

    pub async fn delete(&self, uri: &str, token: &str) -> (StatusCode, Value) {
        self.send(Method::DELETE, uri, Some(token), None).await
    }

    /// POST /api/tenants with the bootstrap header
    pub async fn create_tenant(&self, slug: &str, admin_email: &str) -> (StatusCode, Value) {
        let request = Request::builder()
            .method(Method::POST)
            .uri("/api/tenants")
            .header("content-type", "application/json")
            .header("X-Bootstrap-Token", BOOTSTRAP_TOKEN)
            .body(Body::from(
                json!({
                    "slug": slug,
                    "name": format!("{slug} inc"),
                    "admin": {
                        "name": "Ada Admin",
                        "email": admin_email,
                        "password": ADMIN_PASSWORD
                    }
                })
                .to_string(),
            ))
            .expect("request");
        let response = self.app.clone().oneshot(request).await.expect("response");
        let status = response.status();
        (status, read_json(response).await)
    }

    pub async fn login(&self, tenant: &str, email: &str, password: &str) -> (StatusCode, Value) {
        self.send(
            Method::POST,
            "/api/auth/login",
            None,
            Some(json!({ "tenant": tenant, "email": email, "password": password })),
        )
        .await
    }

    /// Provision `slug` and return the admin's bearer token
    pub async fn admin_token(&self, slug: &str) -> String {
        let email = format!("admin@{slug}.test");
        let (status, _) = self.create_tenant(slug, &email).await;
        assert_eq!(status, StatusCode::CREATED);
        let (status, body) = self.login(slug, &email, ADMIN_PASSWORD).await;
        assert_eq!(status, StatusCode::OK);
        body["token"].as_str().expect("token").to_string()
    }

    /// Create a user through the API and sign them in; returns (id, token)
    pub async fn user_token(&self, tenant: &str, admin: &str, name: &str, role: &str) -> (i64, String) {
        let email = format!("{}@{tenant}.test", name.to_lowercase());
        let (status, user) = self
            .post(
                "/api/users",
                admin,
                json!({ "name": name, "email": email, "role": role, "password": "password-123" }),
            )
            .await;
        assert_eq!(status, StatusCode::CREATED, "{user}");
        let (status, body) = self.login(tenant, &email, "password-123").await;
        assert_eq!(status, StatusCode::OK);
        (
            user["id"].as_i64().expect("id"),
            body["token"].as_str().expect("token").to_string(),
        )
    }
}

#![allow(dead_code)]

use std::sync::Arc;

use axum::body::Body;
use axum::http::header::{AUTHORIZATION, CONTENT_TYPE};
use axum::http::{Method, Request, Response};
use axum::Router;
use baralga_api::auth::jwt::{Claims, JwtConfig};
use baralga_api::config::ServerConfig;
use baralga_api::router::build_app_router;
use baralga_api::state::AppState;
use baralga_core::roles::{ROLE_ADMIN, ROLE_USER};
use http_body_util::BodyExt;
use jsonwebtoken::{encode, EncodingKey, Header};
use sqlx::PgPool;
use tower::ServiceExt;
use uuid::Uuid;

const TEST_SECRET: &str = "integration-test-secret-long-enough";

/// Build a test `ServerConfig` with safe defaults.
pub fn test_config(production: bool) -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        database_url: String::new(),
        db_max_connections: 5,
        db_acquire_timeout_secs: 5,
        cors_origins: vec!["http://localhost:8080".to_string()],
        request_timeout_secs: 30,
        production,
        jwt: JwtConfig {
            secret: TEST_SECRET.to_string(),
        },
    }
}

/// Build the full application router in development mode.
pub fn build_test_app(pool: PgPool) -> Router {
    build_app_with_mode(pool, false)
}

/// Build the full application router, choosing the error redaction mode.
pub fn build_app_with_mode(pool: PgPool, production: bool) -> Router {
    build_app_with_config(pool, test_config(production))
}

/// Build the full application router from an explicit configuration.
pub fn build_app_with_config(pool: PgPool, config: ServerConfig) -> Router {
    let state = AppState {
        pool,
        config: Arc::new(config),
    };
    build_app_router(state)
}

/// A principal for tests: user id, organization and role.
#[derive(Debug, Clone)]
pub struct TestUser {
    pub user_id: Uuid,
    pub org_id: Uuid,
    pub role: &'static str,
}

impl TestUser {
    pub fn admin(org_id: Uuid) -> Self {
        Self {
            user_id: Uuid::new_v4(),
            org_id,
            role: ROLE_ADMIN,
        }
    }

    pub fn user(org_id: Uuid) -> Self {
        Self {
            user_id: Uuid::new_v4(),
            org_id,
            role: ROLE_USER,
        }
    }

    /// A signed access token valid for fifteen minutes.
    pub fn token(&self) -> String {
        let now = chrono::Utc::now().timestamp();
        let claims = Claims {
            sub: self.user_id,
            org_id: self.org_id,
            role: self.role.to_string(),
            exp: now + 900,
            iat: now,
        };
        encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(TEST_SECRET.as_bytes()),
        )
        .unwrap()
    }
}

async fn send(
    app: Router,
    method: Method,
    uri: &str,
    user: Option<&TestUser>,
    body: Option<serde_json::Value>,
) -> Response<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(user) = user {
        builder = builder.header(AUTHORIZATION, format!("Bearer {}", user.token()));
    }
    let request = match body {
        Some(json) => builder
            .header(CONTENT_TYPE, "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };
    app.oneshot(request).await.unwrap()
}

/// Send a request with an arbitrary, possibly malformed, JSON body.
pub async fn send_raw(
    app: Router,
    method: Method,
    uri: &str,
    user: &TestUser,
    body: &'static str,
) -> Response<Body> {
    let request = Request::builder()
        .method(method)
        .uri(uri)
        .header(AUTHORIZATION, format!("Bearer {}", user.token()))
        .header(CONTENT_TYPE, "application/json")
        .body(Body::from(body))
        .unwrap();
    app.oneshot(request).await.unwrap()
}

pub async fn get(app: Router, uri: &str, user: Option<&TestUser>) -> Response<Body> {
    send(app, Method::GET, uri, user, None).await
}

pub async fn post_json(
    app: Router,
    uri: &str,
    user: &TestUser,
    body: serde_json::Value,
) -> Response<Body> {
    send(app, Method::POST, uri, Some(user), Some(body)).await
}

pub async fn put_json(
    app: Router,
    uri: &str,
    user: &TestUser,
    body: serde_json::Value,
) -> Response<Body> {
    send(app, Method::PUT, uri, Some(user), Some(body)).await
}

pub async fn delete(app: Router, uri: &str, user: &TestUser) -> Response<Body> {
    send(app, Method::DELETE, uri, Some(user), None).await
}

/// Collect a response body and parse it as JSON.
pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

pub fn content_type(response: &Response<Body>) -> String {
    response
        .headers()
        .get(CONTENT_TYPE)
        .map(|v| v.to_str().unwrap().to_string())
        .unwrap_or_default()
}

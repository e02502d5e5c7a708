//! Shared helpers for database-backed integration tests.
//!
//! Every test gets a freshly created database migrated from scratch, so
//! bootstrap state never leaks between tests. Tests are skipped when
//! `DATABASE_URL` is not set.

#![allow(dead_code)]

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use http_body_util::BodyExt;
use serde_json::Value;
use sqlx::postgres::{PgPool, PgPoolOptions};
use tower::ServiceExt;

use booru_api::{AppState, build_app};
use booru_core::config::{
    AppConfig, ApplicationConfig, AuthConfig, DatabaseConfig, LoggingConfig, ServerConfig,
};
use booru_database::migration::run_migrations;
use booru_service::NewAccount;

/// Password accepted by the default policy.
pub const PASSWORD: &str = "correct horse battery";

/// An isolated, migrated database.
pub struct TestDb {
    /// Pool on the test database.
    pub pool: PgPool,
    url: String,
    name: String,
    server: PgPool,
}

impl TestDb {
    /// Creates and migrates a new database, or `None` without `DATABASE_URL`.
    pub async fn create() -> Option<Self> {
        let Ok(base) = std::env::var("DATABASE_URL") else {
            eprintln!("DATABASE_URL not set, skipping");
            return None;
        };

        let server = PgPool::connect(&base).await.expect("connect to DATABASE_URL");
        let name = format!("booru_test_{}", uuid::Uuid::new_v4().simple());
        sqlx::query(&format!(r#"CREATE DATABASE "{name}""#))
            .execute(&server)
            .await
            .expect("create test database");

        let url = match base.rfind('/') {
            Some(pos) => format!("{}/{name}", &base[..pos]),
            None => panic!("DATABASE_URL has no database path"),
        };
        let pool = PgPoolOptions::new()
            .max_connections(16)
            .connect(&url)
            .await
            .expect("connect to test database");
        run_migrations(&pool).await.expect("migrate test database");

        Some(Self {
            pool,
            url,
            name,
            server,
        })
    }

    /// Application configuration pointing at this database.
    pub fn config(&self, enforce_email: bool) -> AppConfig {
        AppConfig {
            server: ServerConfig::default(),
            database: DatabaseConfig {
                url: self.url.clone(),
                max_connections: 16,
                min_connections: 0,
                connect_timeout_seconds: 5,
                idle_timeout_seconds: 60,
            },
            auth: AuthConfig {
                jwt_secret: "integration-test-secret".to_string(),
                token_lifetime_minutes: 60,
                password_min_length: 8,
                password_min_strength: 0,
            },
            app: ApplicationConfig {
                enforce_email,
                development: true,
            },
            logging: LoggingConfig::default(),
        }
    }

    /// Wired application state with the bootstrap flag loaded.
    pub async fn state(&self, enforce_email: bool) -> AppState {
        let state = AppState::new(self.config(enforce_email), self.pool.clone());
        state.settings_service.load().await.expect("load settings");
        state
    }

    /// Drops the database.
    pub async fn cleanup(self) {
        self.pool.close().await;
        let _ = sqlx::query(&format!(r#"DROP DATABASE IF EXISTS "{}" WITH (FORCE)"#, self.name))
            .execute(&self.server)
            .await;
    }
}

/// Account input with the shared password.
pub fn account(name: &str, email: Option<&str>) -> NewAccount {
    NewAccount::new(name, email.map(str::to_string), PASSWORD)
}

/// Sends one request through the full application stack.
pub async fn call(app: &Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.clone().oneshot(request).await.expect("request");
    let status = response.status();
    let bytes = response
        .into_body()
        .collect()
        .await
        .expect("body")
        .to_bytes();
    let body = serde_json::from_slice(&bytes)
        .unwrap_or_else(|_| Value::String(String::from_utf8_lossy(&bytes).into_owned()));
    (status, body)
}

/// Builds a JSON request, with a bearer token when given.
pub fn json_request(method: &str, uri: &str, token: Option<&str>, body: Value) -> Request<Body> {
    let mut builder = Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json");
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
    }
    builder.body(Body::from(body.to_string())).expect("request")
}

/// Builds a body-less request, with a bearer token when given.
pub fn empty_request(method: &str, uri: &str, token: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
    }
    builder.body(Body::empty()).expect("request")
}

/// The full application for a state.
pub fn app(state: AppState) -> Router {
    build_app(state)
}

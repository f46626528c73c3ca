#![allow(dead_code)]

use std::net::SocketAddr;
use std::path::PathBuf;
use std::str::FromStr;

use chrono::{Duration, Utc};
use reqwest::{Client, StatusCode};
use serde_json::{json, Value};
use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions};
use sqlx::SqlitePool;

use formsink::auth::token;
use formsink::config::Config;
use formsink::db;

/// A running test server instance with a dedicated throwaway database.
pub struct TestApp {
    pub addr: SocketAddr,
    pub pool: SqlitePool,
    pub client: Client,
    pub db_path: PathBuf,
}

impl TestApp {
    pub fn url(&self, path: &str) -> String {
        format!("http://{}{}", self.addr, path)
    }

    /// Register a user, return (body, status).
    pub async fn register(&self, name: &str, email: &str, password: &str) -> (Value, StatusCode) {
        let resp = self
            .client
            .post(self.url("/v1/users"))
            .json(&json!({ "name": name, "email": email, "password": password }))
            .send()
            .await
            .expect("register request failed");
        let status = resp.status();
        let body: Value = resp.json().await.unwrap_or(json!(null));
        (body, status)
    }

    /// Forge an activation token for the user and drive the real activation
    /// endpoint with it. Returns (body, status).
    pub async fn activate(&self, user_id: i64) -> (Value, StatusCode) {
        let (plaintext, token_hash) = token::generate();
        db::tokens::create(
            &self.pool,
            user_id,
            &token_hash,
            token::SCOPE_ACTIVATION,
            Utc::now() + Duration::hours(1),
        )
        .await
        .expect("failed to forge activation token");

        let resp = self
            .client
            .put(self.url("/v1/users/activated"))
            .json(&json!({ "token": plaintext }))
            .send()
            .await
            .expect("activate request failed");
        let status = resp.status();
        let body: Value = resp.json().await.unwrap_or(json!(null));
        (body, status)
    }

    /// Login, return the authentication token plaintext.
    pub async fn login(&self, email: &str, password: &str) -> String {
        let resp = self
            .client
            .post(self.url("/v1/tokens/authentication"))
            .json(&json!({ "email": email, "password": password }))
            .send()
            .await
            .expect("login request failed");
        assert_eq!(resp.status(), StatusCode::CREATED, "login non-201");
        let body: Value = resp.json().await.unwrap();
        body["authentication_token"]["token"]
            .as_str()
            .unwrap()
            .to_string()
    }

    /// Register + activate a user, grant the given permissions, and return an
    /// authentication token for them.
    pub async fn bootstrap_user(&self, email: &str, permissions: &[&str]) -> String {
        let (body, status) = self.register("Test User", email, "password123").await;
        assert_eq!(status, StatusCode::ACCEPTED, "register failed: {body}");
        let user_id = body["user"]["id"].as_i64().unwrap();

        let (body, status) = self.activate(user_id).await;
        assert_eq!(status, StatusCode::OK, "activate failed: {body}");

        for code in permissions {
            db::permissions::add_for_user(&self.pool, user_id, code)
                .await
                .expect("failed to grant permission");
        }

        self.login(email, "password123").await
    }

    /// POST a raw JSON value to /submit-form, return (body, status).
    pub async fn submit(&self, payload: &Value) -> (Value, StatusCode) {
        let resp = self
            .client
            .post(self.url("/submit-form"))
            .json(payload)
            .send()
            .await
            .expect("submit request failed");
        let status = resp.status();
        let body: Value = resp.json().await.unwrap_or(json!(null));
        (body, status)
    }

    /// Make an authenticated GET request.
    pub async fn get_auth(&self, path: &str, auth_token: &str) -> (Value, StatusCode) {
        let resp = self
            .client
            .get(self.url(path))
            .bearer_auth(auth_token)
            .send()
            .await
            .expect("get request failed");
        let status = resp.status();
        let body: Value = resp.json().await.unwrap_or(json!(null));
        (body, status)
    }

    /// Make an authenticated POST request with JSON body.
    pub async fn post_auth(&self, path: &str, auth_token: &str, body: &Value) -> (Value, StatusCode) {
        let resp = self
            .client
            .post(self.url(path))
            .bearer_auth(auth_token)
            .json(body)
            .send()
            .await
            .expect("post request failed");
        let status = resp.status();
        let body: Value = resp.json().await.unwrap_or(json!(null));
        (body, status)
    }

    /// Make an authenticated PUT request with JSON body.
    pub async fn put_auth(&self, path: &str, auth_token: &str, body: &Value) -> (Value, StatusCode) {
        let resp = self
            .client
            .put(self.url(path))
            .bearer_auth(auth_token)
            .json(body)
            .send()
            .await
            .expect("put request failed");
        let status = resp.status();
        let body: Value = resp.json().await.unwrap_or(json!(null));
        (body, status)
    }

    /// Make an authenticated DELETE request.
    pub async fn delete_auth(&self, path: &str, auth_token: &str) -> (Value, StatusCode) {
        let resp = self
            .client
            .delete(self.url(path))
            .bearer_auth(auth_token)
            .send()
            .await
            .expect("delete request failed");
        let status = resp.status();
        let body: Value = resp.json().await.unwrap_or(json!(null));
        (body, status)
    }
}

/// Spawn a test app with a fresh temporary database and default test config.
pub async fn spawn_app() -> TestApp {
    spawn_app_with(|_| {}).await
}

/// Spawn a test app, letting the caller tweak the config first.
pub async fn spawn_app_with(tweak: impl FnOnce(&mut Config)) -> TestApp {
    let db_path = std::env::temp_dir().join(format!(
        "formsink_test_{}.db",
        hex::encode(rand::random::<[u8; 8]>())
    ));
    let database_url = format!("sqlite://{}", db_path.display());

    let connect_options = SqliteConnectOptions::from_str(&database_url)
        .expect("invalid test database url")
        .create_if_missing(true)
        .journal_mode(SqliteJournalMode::Wal)
        .busy_timeout(std::time::Duration::from_secs(5))
        .foreign_keys(true);

    let pool = SqlitePoolOptions::new()
        .max_connections(5)
        .connect_with(connect_options)
        .await
        .expect("Failed to connect to test database");

    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .expect("Failed to run migrations on test database");

    let mut config = Config {
        database_url,
        db_max_connections: 5,
        host: "127.0.0.1".parse().unwrap(),
        port: 0, // unused, we bind to a random port
        env: "test".to_string(),
        cors_origins: vec![],
        max_body_size: 1_048_576,
        rate_limit: 1000,
        rate_window_secs: 60,
        log_level: "warn".to_string(),
        smtp: None,
    };
    tweak(&mut config);

    let app = formsink::build_app(pool.clone(), config);

    // Bind to random port
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind to random port");
    let addr = listener.local_addr().unwrap();

    // Spawn server in background
    tokio::spawn(async move {
        axum::serve(
            listener,
            app.into_make_service_with_connect_info::<SocketAddr>(),
        )
        .await
        .expect("Server failed");
    });

    let client = Client::builder()
        .redirect(reqwest::redirect::Policy::none())
        .build()
        .unwrap();

    TestApp {
        addr,
        pool,
        client,
        db_path,
    }
}

/// Drop the test database files after tests complete.
pub async fn cleanup(app: TestApp) {
    app.pool.close().await;

    let _ = std::fs::remove_file(&app.db_path);
    for suffix in ["-wal", "-shm"] {
        let mut side = app.db_path.as_os_str().to_owned();
        side.push(suffix);
        let _ = std::fs::remove_file(PathBuf::from(side));
    }
}

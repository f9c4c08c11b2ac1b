use std::sync::Arc;

use auth::TokenService;
use calculation_service::domain::calculation::service::CalculationService;
use calculation_service::domain::user::service::AccountService;
use calculation_service::inbound::http::router::create_router;
use calculation_service::outbound::repositories::SqliteCalculationRepository;
use calculation_service::outbound::repositories::SqliteUserRepository;
use sqlx::sqlite::SqliteConnectOptions;
use sqlx::sqlite::SqlitePoolOptions;
use sqlx::SqlitePool;
use tempfile::TempDir;

pub const TEST_SECRET: &[u8] = b"test-secret-key-for-token-signing-at-least-32-bytes";

/// Test application that spawns a real server
pub struct TestApp {
    pub address: String,
    pub db: TestDb,
    pub api_client: reqwest::Client,
    pub token_service: TokenService,
}

/// Test database helper: a private SQLite file per test
pub struct TestDb {
    pub pool: SqlitePool,
    _dir: TempDir,
}

impl TestApp {
    /// Spawn the application in a background task and return TestApp
    pub async fn spawn() -> Self {
        let db = TestDb::new().await;

        // Use random port (0 = OS assigns)
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind random port");
        let port = listener.local_addr().unwrap().port();
        let address = format!("http://127.0.0.1:{}", port);

        let user_repository = Arc::new(SqliteUserRepository::new(db.pool.clone()));
        let calculation_repository = Arc::new(SqliteCalculationRepository::new(db.pool.clone()));

        let account_service = Arc::new(AccountService::new(user_repository));
        let calculation_service = Arc::new(CalculationService::new(calculation_repository));
        let token_service = Arc::new(TokenService::new(TEST_SECRET, 30));

        let router = create_router(account_service, calculation_service, token_service);

        // Spawn server in background
        tokio::spawn(async move {
            axum::serve(listener, router).await.expect("Server error");
        });

        Self {
            address,
            db,
            api_client: reqwest::Client::new(),
            token_service: TokenService::new(TEST_SECRET, 30),
        }
    }

    /// Helper to make GET request
    pub fn get(&self, path: &str) -> reqwest::RequestBuilder {
        self.api_client.get(format!("{}{}", self.address, path))
    }

    /// Helper to make POST request
    pub fn post(&self, path: &str) -> reqwest::RequestBuilder {
        self.api_client.post(format!("{}{}", self.address, path))
    }

    /// Helper to make GET request with Bearer token
    pub fn get_authenticated(&self, path: &str, token: &str) -> reqwest::RequestBuilder {
        self.get(path).bearer_auth(token)
    }

    /// Helper to make POST request with Bearer token
    pub fn post_authenticated(&self, path: &str, token: &str) -> reqwest::RequestBuilder {
        self.post(path).bearer_auth(token)
    }

    /// Helper to make PUT request with Bearer token
    pub fn put_authenticated(&self, path: &str, token: &str) -> reqwest::RequestBuilder {
        self.api_client
            .put(format!("{}{}", self.address, path))
            .bearer_auth(token)
    }

    /// Helper to make PATCH request with Bearer token
    pub fn patch_authenticated(&self, path: &str, token: &str) -> reqwest::RequestBuilder {
        self.api_client
            .patch(format!("{}{}", self.address, path))
            .bearer_auth(token)
    }

    /// Helper to make DELETE request with Bearer token
    pub fn delete_authenticated(&self, path: &str, token: &str) -> reqwest::RequestBuilder {
        self.api_client
            .delete(format!("{}{}", self.address, path))
            .bearer_auth(token)
    }

    /// Register a user and log in, returning the bearer token
    pub async fn register_and_login(&self, username: &str, email: &str, password: &str) -> String {
        let response = self
            .post("/auth/register")
            .json(&serde_json::json!({
                "username": username,
                "email": email,
                "password": password
            }))
            .send()
            .await
            .expect("Failed to execute register request");
        assert!(
            response.status().is_success(),
            "Registration failed: {}",
            response.status()
        );

        let response = self
            .post("/auth/token")
            .form(&[("username", username), ("password", password)])
            .send()
            .await
            .expect("Failed to execute login request");
        assert!(
            response.status().is_success(),
            "Login failed: {}",
            response.status()
        );

        let body: serde_json::Value = response.json().await.expect("Failed to parse login body");
        body["access_token"]
            .as_str()
            .expect("Missing access_token")
            .to_string()
    }

    /// Create a calculation and return its response body
    pub async fn create_calculation(
        &self,
        token: &str,
        operation: &str,
        operand1: f64,
        operand2: f64,
    ) -> serde_json::Value {
        let response = self
            .post_authenticated("/calculations/", token)
            .json(&serde_json::json!({
                "operation": operation,
                "operand1": operand1,
                "operand2": operand2
            }))
            .send()
            .await
            .expect("Failed to execute create request");
        assert_eq!(response.status(), reqwest::StatusCode::CREATED);

        response.json().await.expect("Failed to parse create body")
    }
}

impl TestDb {
    /// Create a new test database in a private temporary directory
    pub async fn new() -> Self {
        let dir = TempDir::new().expect("Failed to create temp dir");
        let db_path = dir.path().join("test.db");

        let options = SqliteConnectOptions::new()
            .filename(&db_path)
            .create_if_missing(true);

        let pool = SqlitePoolOptions::new()
            .max_connections(5)
            .connect_with(options)
            .await
            .expect("Failed to connect to test database");

        sqlx::migrate!("./migrations")
            .run(&pool)
            .await
            .expect("Failed to run migrations");

        Self { pool, _dir: dir }
    }
}

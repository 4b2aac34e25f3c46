#![allow(dead_code)]

use std::sync::Arc;
use std::time::Duration;

use auth::PasswordHasher;
use auth::SessionClaims;
use jsonwebtoken::Algorithm;
use jsonwebtoken::DecodingKey;
use jsonwebtoken::Validation;
use sqlx::postgres::PgConnectOptions;
use sqlx::postgres::PgPoolOptions;
use sqlx::Connection;
use sqlx::Executor;
use sqlx::PgConnection;
use sqlx::PgPool;
use sso_service::domain::auth::service::AuthService;
use sso_service::inbound::grpc::AuthGrpcService;
use sso_service::inbound::http::router::create_router;
use sso_service::outbound::repositories::PostgresStorage;
use sso_service::outbound::repositories::SqliteStorage;
use sso_service::proto::auth_client::AuthClient;
use sso_service::proto::auth_server::AuthServer;
use tokio_stream::wrappers::TcpListenerStream;
use tonic::transport::Channel;
use tonic::transport::Server;

pub const APP_ID: i32 = 1;
pub const APP_SECRET: &str = "test-app-secret";
pub const TOKEN_TTL_SECONDS: i64 = 3600;

/// Test application that serves both transports over one in-memory store
pub struct TestApp {
    pub address: String,
    pub storage: Arc<SqliteStorage>,
    pub api_client: reqwest::Client,
    pub grpc_client: AuthClient<Channel>,
}

impl TestApp {
    /// Spawn the HTTP and gRPC servers in background tasks and return TestApp
    pub async fn spawn() -> Self {
        let storage = SqliteStorage::connect("sqlite::memory:", 1)
            .await
            .expect("Failed to open in-memory sqlite");
        storage.migrate().await.expect("Failed to run migrations");

        sqlx::query("INSERT INTO apps (id, name, secret) VALUES (?, ?, ?)")
            .bind(APP_ID)
            .bind("test")
            .bind(APP_SECRET)
            .execute(storage.pool())
            .await
            .expect("Failed to seed application");

        let storage = Arc::new(storage);

        // Cheap work factor keeps the suite fast
        let password_hasher =
            PasswordHasher::with_params(8 * 1024, 1, 1).expect("Failed to build hasher");
        let auth_service = Arc::new(AuthService::new(
            Arc::clone(&storage),
            Arc::clone(&storage),
            password_hasher,
            chrono::Duration::seconds(TOKEN_TTL_SECONDS),
        ));
        let request_timeout = Duration::from_secs(10);

        // Use random ports (0 = OS assigns)
        let http_listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind random port");
        let http_port = http_listener.local_addr().unwrap().port();
        let address = format!("http://127.0.0.1:{}", http_port);

        let router = create_router(Arc::clone(&auth_service), request_timeout);
        tokio::spawn(async move {
            axum::serve(http_listener, router).await.expect("Server error");
        });

        let grpc_listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind random port");
        let grpc_port = grpc_listener.local_addr().unwrap().port();

        let grpc_service = AuthGrpcService::new(Arc::clone(&auth_service), request_timeout);
        tokio::spawn(async move {
            Server::builder()
                .add_service(AuthServer::new(grpc_service))
                .serve_with_incoming(TcpListenerStream::new(grpc_listener))
                .await
                .expect("gRPC server error");
        });

        let grpc_client = AuthClient::connect(format!("http://127.0.0.1:{}", grpc_port))
            .await
            .expect("Failed to connect gRPC client");

        Self {
            address,
            storage,
            api_client: reqwest::Client::new(),
            grpc_client,
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

    /// Grant the admin flag directly in storage; no operation exposes it.
    pub async fn promote_to_admin(&self, user_id: i64) {
        sqlx::query("UPDATE users SET is_admin = TRUE WHERE id = ?")
            .bind(user_id)
            .execute(self.storage.pool())
            .await
            .expect("Failed to promote user");
    }
}

/// Verify a token with the seeded application's secret and return its claims
pub fn decode_claims(token: &str) -> SessionClaims {
    jsonwebtoken::decode::<SessionClaims>(
        token,
        &DecodingKey::from_secret(APP_SECRET.as_bytes()),
        &Validation::new(Algorithm::HS256),
    )
    .expect("Failed to decode token")
    .claims
}

/// Per-test Postgres database, dropped when the helper goes out of scope
pub struct TestDb {
    pub storage: PostgresStorage,
    pub pool: PgPool,
    pub db_name: String,
    admin_url: String,
}

impl TestDb {
    /// Create a fresh migrated database on the server named by `DATABASE_URL`.
    ///
    /// Returns `None` when `DATABASE_URL` is not set, so suites without a Postgres
    /// server skip instead of failing.
    pub async fn new() -> Option<Self> {
        let Ok(admin_url) = std::env::var("DATABASE_URL") else {
            eprintln!("DATABASE_URL not set, skipping postgres test");
            return None;
        };

        let db_name = format!("test_sso_{}", uuid::Uuid::new_v4().simple());

        let mut conn = PgConnection::connect(&admin_url)
            .await
            .expect("Failed to connect to Postgres");
        conn.execute(format!(r#"CREATE DATABASE "{}";"#, db_name).as_str())
            .await
            .expect("Failed to create test database");

        let options = admin_url
            .parse::<PgConnectOptions>()
            .expect("Failed to parse DATABASE_URL")
            .database(&db_name);
        let pool = PgPoolOptions::new()
            .max_connections(5)
            .connect_with(options)
            .await
            .expect("Failed to connect to test database");

        let storage = PostgresStorage::new(pool.clone());
        storage.migrate().await.expect("Failed to run migrations");

        Some(Self {
            storage,
            pool,
            db_name,
            admin_url,
        })
    }
}

impl Drop for TestDb {
    fn drop(&mut self) {
        // Database cleanup happens asynchronously
        let db_name = self.db_name.clone();
        let admin_url = self.admin_url.clone();
        tokio::spawn(async move {
            if let Ok(mut conn) = PgConnection::connect(&admin_url).await {
                let _ = conn
                    .execute(
                        format!(
                            r#"SELECT pg_terminate_backend(pid) FROM pg_stat_activity WHERE datname = '{}';"#,
                            db_name
                        )
                        .as_str(),
                    )
                    .await;

                let _ = conn
                    .execute(format!(r#"DROP DATABASE IF EXISTS "{}";"#, db_name).as_str())
                    .await;
            }
        });
    }
}

use std::str::FromStr;

use anyhow::Context;
use async_trait::async_trait;
use sqlx::sqlite::SqliteConnectOptions;
use sqlx::sqlite::SqlitePoolOptions;
use sqlx::SqlitePool;

use crate::domain::auth::errors::StorageError;
use crate::domain::auth::models::AppId;
use crate::domain::auth::models::Application;
use crate::domain::auth::models::User;
use crate::domain::auth::models::UserId;
use crate::domain::auth::ports::ApplicationRegistry;
use crate::domain::auth::ports::CredentialStore;
use crate::outbound::repositories::rows::AppRow;
use crate::outbound::repositories::rows::UserRow;

/// Embedded, file-backed credential store and application registry.
pub struct SqliteStorage {
    pool: SqlitePool,
}

impl SqliteStorage {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Open (or create) the database at `url`, creating missing parent directories.
    ///
    /// An in-memory database lives only as long as its connection, so `sqlite::memory:`
    /// is pinned to a single connection that is never recycled.
    pub async fn connect(url: &str, max_connections: u32) -> Result<Self, anyhow::Error> {
        let options = SqliteConnectOptions::from_str(url)
            .with_context(|| format!("parse sqlite url {url}"))?
            .create_if_missing(true)
            .foreign_keys(true);

        let in_memory = url.contains(":memory:") || url.contains("mode=memory");
        if !in_memory {
            let filename = options.clone().get_filename();
            if let Some(parent) = filename.parent() {
                if !parent.as_os_str().is_empty() {
                    tokio::fs::create_dir_all(parent)
                        .await
                        .with_context(|| format!("create sqlite directory {}", parent.display()))?;
                }
            }
        }

        let pool_options = if in_memory {
            SqlitePoolOptions::new()
                .max_connections(1)
                .min_connections(1)
                .idle_timeout(None)
                .max_lifetime(None)
        } else {
            SqlitePoolOptions::new().max_connections(max_connections)
        };

        let pool = pool_options
            .connect_with(options)
            .await
            .context("open sqlite database")?;

        Ok(Self::new(pool))
    }

    pub async fn migrate(&self) -> Result<(), anyhow::Error> {
        sqlx::migrate!("./migrations/sqlite")
            .run(&self.pool)
            .await
            .context("run sqlite migrations")
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }
}

#[async_trait]
impl CredentialStore for SqliteStorage {
    async fn save_user(&self, email: &str, password_hash: &str) -> Result<UserId, StorageError> {
        let result = sqlx::query(
            r#"
            INSERT INTO users (email, pass_hash)
            VALUES (?, ?)
            "#,
        )
        .bind(email)
        .bind(password_hash)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            if let Some(db_err) = e.as_database_error() {
                if db_err.is_unique_violation() {
                    return StorageError::UserExists;
                }
            }
            StorageError::Database(anyhow::Error::new(e).context("insert user"))
        })?;

        Ok(UserId(result.last_insert_rowid()))
    }

    async fn find_user_by_email(&self, email: &str) -> Result<User, StorageError> {
        let row = sqlx::query_as::<_, UserRow>(
            r#"
            SELECT id, email, pass_hash, is_admin
            FROM users
            WHERE email = ?
            "#,
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| StorageError::Database(anyhow::Error::new(e).context("select user")))?;

        row.map(User::from).ok_or(StorageError::UserNotFound)
    }

    async fn find_admin_flag(&self, user_id: UserId) -> Result<bool, StorageError> {
        sqlx::query_scalar::<_, bool>(
            r#"
            SELECT is_admin
            FROM users
            WHERE id = ?
            "#,
        )
        .bind(user_id.0)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| StorageError::Database(anyhow::Error::new(e).context("select admin flag")))?
        .ok_or(StorageError::UserNotFound)
    }
}

#[async_trait]
impl ApplicationRegistry for SqliteStorage {
    async fn get_application(&self, app_id: AppId) -> Result<Application, StorageError> {
        let row = sqlx::query_as::<_, AppRow>(
            r#"
            SELECT id, name, secret
            FROM apps
            WHERE id = ?
            "#,
        )
        .bind(app_id.0)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| StorageError::Database(anyhow::Error::new(e).context("select app")))?;

        row.map(Application::from).ok_or(StorageError::AppNotFound)
    }
}

use anyhow::Context;
use async_trait::async_trait;
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;

use crate::domain::auth::errors::StorageError;
use crate::domain::auth::models::AppId;
use crate::domain::auth::models::Application;
use crate::domain::auth::models::User;
use crate::domain::auth::models::UserId;
use crate::domain::auth::ports::ApplicationRegistry;
use crate::domain::auth::ports::CredentialStore;
use crate::outbound::repositories::rows::AppRow;
use crate::outbound::repositories::rows::UserRow;

/// Credential store and application registry backed by PostgreSQL.
pub struct PostgresStorage {
    pool: PgPool,
}

impl PostgresStorage {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn connect(url: &str, max_connections: u32) -> Result<Self, anyhow::Error> {
        let pool = PgPoolOptions::new()
            .max_connections(max_connections)
            .connect(url)
            .await
            .context("connect to postgres")?;

        Ok(Self::new(pool))
    }

    pub async fn migrate(&self) -> Result<(), anyhow::Error> {
        sqlx::migrate!("./migrations/postgres")
            .run(&self.pool)
            .await
            .context("run postgres migrations")
    }
}

#[async_trait]
impl CredentialStore for PostgresStorage {
    async fn save_user(&self, email: &str, password_hash: &str) -> Result<UserId, StorageError> {
        let id: i64 = sqlx::query_scalar(
            r#"
            INSERT INTO users (email, pass_hash)
            VALUES ($1, $2)
            RETURNING id
            "#,
        )
        .bind(email)
        .bind(password_hash)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            if let Some(db_err) = e.as_database_error() {
                if db_err.is_unique_violation() {
                    return StorageError::UserExists;
                }
            }
            StorageError::Database(anyhow::Error::new(e).context("insert user"))
        })?;

        Ok(UserId(id))
    }

    async fn find_user_by_email(&self, email: &str) -> Result<User, StorageError> {
        let row = sqlx::query_as::<_, UserRow>(
            r#"
            SELECT id, email, pass_hash, is_admin
            FROM users
            WHERE email = $1
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
            WHERE id = $1
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
impl ApplicationRegistry for PostgresStorage {
    async fn get_application(&self, app_id: AppId) -> Result<Application, StorageError> {
        let row = sqlx::query_as::<_, AppRow>(
            r#"
            SELECT id, name, secret
            FROM apps
            WHERE id = $1
            "#,
        )
        .bind(app_id.0)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| StorageError::Database(anyhow::Error::new(e).context("select app")))?;

        row.map(Application::from).ok_or(StorageError::AppNotFound)
    }
}

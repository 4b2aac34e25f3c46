pub mod postgres;
mod rows;
pub mod sqlite;

use async_trait::async_trait;

pub use postgres::PostgresStorage;
pub use sqlite::SqliteStorage;

use crate::config::StorageBackend;
use crate::config::StorageConfig;
use crate::domain::auth::errors::StorageError;
use crate::domain::auth::models::AppId;
use crate::domain::auth::models::Application;
use crate::domain::auth::models::User;
use crate::domain::auth::models::UserId;
use crate::domain::auth::ports::ApplicationRegistry;
use crate::domain::auth::ports::CredentialStore;

/// Storage backend selected from configuration at the composition root.
pub enum Storage {
    Postgres(PostgresStorage),
    Sqlite(SqliteStorage),
}

impl Storage {
    /// Connect to the configured backend.
    ///
    /// # Errors
    /// Returns error if the URL is invalid or the database is unreachable
    pub async fn connect(config: &StorageConfig) -> Result<Self, anyhow::Error> {
        match config.backend {
            StorageBackend::Postgres => Ok(Storage::Postgres(
                PostgresStorage::connect(&config.url, config.max_connections).await?,
            )),
            StorageBackend::Sqlite => Ok(Storage::Sqlite(
                SqliteStorage::connect(&config.url, config.max_connections).await?,
            )),
        }
    }

    /// Apply the backend's embedded migrations.
    pub async fn migrate(&self) -> Result<(), anyhow::Error> {
        match self {
            Storage::Postgres(storage) => storage.migrate().await,
            Storage::Sqlite(storage) => storage.migrate().await,
        }
    }

    pub fn backend(&self) -> StorageBackend {
        match self {
            Storage::Postgres(_) => StorageBackend::Postgres,
            Storage::Sqlite(_) => StorageBackend::Sqlite,
        }
    }
}

#[async_trait]
impl CredentialStore for Storage {
    async fn save_user(&self, email: &str, password_hash: &str) -> Result<UserId, StorageError> {
        match self {
            Storage::Postgres(storage) => storage.save_user(email, password_hash).await,
            Storage::Sqlite(storage) => storage.save_user(email, password_hash).await,
        }
    }

    async fn find_user_by_email(&self, email: &str) -> Result<User, StorageError> {
        match self {
            Storage::Postgres(storage) => storage.find_user_by_email(email).await,
            Storage::Sqlite(storage) => storage.find_user_by_email(email).await,
        }
    }

    async fn find_admin_flag(&self, user_id: UserId) -> Result<bool, StorageError> {
        match self {
            Storage::Postgres(storage) => storage.find_admin_flag(user_id).await,
            Storage::Sqlite(storage) => storage.find_admin_flag(user_id).await,
        }
    }
}

#[async_trait]
impl ApplicationRegistry for Storage {
    async fn get_application(&self, app_id: AppId) -> Result<Application, StorageError> {
        match self {
            Storage::Postgres(storage) => storage.get_application(app_id).await,
            Storage::Sqlite(storage) => storage.get_application(app_id).await,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_connect_selects_configured_backend() {
        let config = StorageConfig {
            backend: StorageBackend::Sqlite,
            url: "sqlite::memory:".to_string(),
            max_connections: 1,
        };

        let storage = Storage::connect(&config).await.unwrap();
        storage.migrate().await.unwrap();

        assert_eq!(storage.backend(), StorageBackend::Sqlite);
        let id = storage.save_user("alice@example.com", "h").await.unwrap();
        assert!(!storage.find_admin_flag(id).await.unwrap());
    }
}

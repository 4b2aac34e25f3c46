use secrecy::SecretString;

use crate::domain::auth::models::AppId;
use crate::domain::auth::models::Application;
use crate::domain::auth::models::User;
use crate::domain::auth::models::UserId;

/// `users` row, shared by every SQL backend.
#[derive(sqlx::FromRow)]
pub(crate) struct UserRow {
    id: i64,
    email: String,
    pass_hash: String,
    is_admin: bool,
}

impl From<UserRow> for User {
    fn from(row: UserRow) -> Self {
        Self {
            id: UserId(row.id),
            email: row.email,
            password_hash: row.pass_hash,
            is_admin: row.is_admin,
        }
    }
}

/// `apps` row, shared by every SQL backend.
#[derive(sqlx::FromRow)]
pub(crate) struct AppRow {
    id: i32,
    name: String,
    secret: String,
}

impl From<AppRow> for Application {
    fn from(row: AppRow) -> Self {
        Self {
            id: AppId(row.id),
            name: row.name,
            secret: SecretString::from(row.secret),
        }
    }
}

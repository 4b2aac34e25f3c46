use thiserror::Error;

use crate::domain::auth::errors::EmailError;
use crate::domain::auth::errors::IdError;
use crate::domain::auth::models::AppId;
use crate::domain::auth::models::EmailAddress;
use crate::domain::auth::models::UserId;

/// Transport-independent validation of raw request fields.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ParseRequestError {
    #[error("{0} is required")]
    Missing(&'static str),

    #[error("Invalid email: {0}")]
    Email(#[from] EmailError),

    #[error(transparent)]
    Id(#[from] IdError),
}

/// Validated login request.
#[derive(Debug)]
pub struct LoginInput {
    pub email: String,
    pub password: String,
    pub app_id: AppId,
}

impl LoginInput {
    /// The email is only checked for presence: a malformed address simply
    /// matches no user and fails as invalid credentials.
    pub fn parse(email: String, password: String, app_id: i32) -> Result<Self, ParseRequestError> {
        Ok(Self {
            email: required("email", email)?,
            password: required("password", password)?,
            app_id: AppId::parse(app_id)?,
        })
    }
}

/// Validated registration request.
#[derive(Debug)]
pub struct RegisterInput {
    pub email: EmailAddress,
    pub password: String,
}

impl RegisterInput {
    pub fn parse(email: String, password: String) -> Result<Self, ParseRequestError> {
        let email = required("email", email)?;
        Ok(Self {
            email: EmailAddress::new(email)?,
            password: required("password", password)?,
        })
    }
}

pub fn parse_user_id(raw: i64) -> Result<UserId, ParseRequestError> {
    Ok(UserId::parse(raw)?)
}

fn required(field: &'static str, value: String) -> Result<String, ParseRequestError> {
    if value.is_empty() {
        Err(ParseRequestError::Missing(field))
    } else {
        Ok(value)
    }
}

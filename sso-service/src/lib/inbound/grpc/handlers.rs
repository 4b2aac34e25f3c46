use tonic::Status;

use crate::domain::auth::errors::AuthError;
use crate::inbound::validation::ParseRequestError;

pub mod is_admin;
pub mod login;
pub mod register;

impl From<AuthError> for Status {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::InvalidCredentials => Status::invalid_argument("invalid email or password"),
            AuthError::UserAlreadyExists => Status::already_exists("user already exists"),
            AuthError::InvalidAppId => Status::invalid_argument("invalid app id"),
            AuthError::UserNotFound => Status::not_found("user not found"),
            AuthError::Cancelled => Status::deadline_exceeded("deadline exceeded"),
            AuthError::Internal(_) => Status::internal("internal error"),
        }
    }
}

impl From<ParseRequestError> for Status {
    fn from(err: ParseRequestError) -> Self {
        Status::invalid_argument(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use tonic::Code;

    use super::*;

    #[test]
    fn test_status_mapping() {
        let cases = [
            (AuthError::InvalidCredentials, Code::InvalidArgument),
            (AuthError::UserAlreadyExists, Code::AlreadyExists),
            (AuthError::InvalidAppId, Code::InvalidArgument),
            (AuthError::UserNotFound, Code::NotFound),
            (AuthError::Cancelled, Code::DeadlineExceeded),
        ];

        for (err, code) in cases {
            assert_eq!(Status::from(err).code(), code);
        }
    }

    #[test]
    fn test_internal_status_hides_cause() {
        let err = AuthError::internal(anyhow::anyhow!("password authentication failed for user"));

        let status = Status::from(err);

        assert_eq!(status.code(), Code::Internal);
        assert_eq!(status.message(), "internal error");
    }
}

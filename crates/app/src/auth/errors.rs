//! Auth service and session errors.

use thiserror::Error;

use crate::{auth::token::TokenError, http::HttpError, storage::StorageError};

/// Errors from the remote auth endpoints.
#[derive(Debug, Error)]
pub enum AuthServiceError {
    #[error("invalid email or password")]
    InvalidCredentials,

    #[error("email already registered")]
    EmailTaken,

    #[error(transparent)]
    Http(HttpError),
}

impl From<HttpError> for AuthServiceError {
    fn from(error: HttpError) -> Self {
        match error {
            HttpError::Unauthorized => Self::InvalidCredentials,
            HttpError::Status(reqwest::StatusCode::CONFLICT) => Self::EmailTaken,
            other => Self::Http(other),
        }
    }
}

/// Errors from the session lifecycle and its gates.
#[derive(Debug, Error)]
pub enum SessionError {
    #[error(transparent)]
    Auth(#[from] AuthServiceError),

    #[error("login response carried a malformed token")]
    Token(#[source] TokenError),

    #[error("session storage error")]
    Storage(#[from] StorageError),

    #[error("no session is active; please login")]
    NotAuthenticated,

    #[error("administrator role required")]
    AdminRequired,
}

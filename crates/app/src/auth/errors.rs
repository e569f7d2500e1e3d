//! Auth service errors.

use sqlx::Error;
use thiserror::Error;

use crate::auth::{PasswordError, TokenError};

#[derive(Debug, Error)]
pub enum AuthServiceError {
    /// Unknown user, disabled account or wrong password.
    #[error("invalid username or password")]
    InvalidCredentials,

    #[error("invalid or expired token")]
    InvalidToken,

    #[error("storage error")]
    Sql(#[source] Error),

    #[error("password verification error")]
    Password(#[from] PasswordError),

    #[error("token processing error")]
    Token(#[source] TokenError),
}

impl From<Error> for AuthServiceError {
    fn from(error: Error) -> Self {
        Self::Sql(error)
    }
}

impl From<TokenError> for AuthServiceError {
    fn from(error: TokenError) -> Self {
        match error {
            TokenError::Invalid(_) => Self::InvalidToken,
            other => Self::Token(other),
        }
    }
}

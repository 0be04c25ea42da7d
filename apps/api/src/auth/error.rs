//! Authentication error types

use thiserror::Error;

use crate::errors::AppError;

#[derive(Debug, Error)]
pub enum AuthError {
    /// No bearer token on the request
    #[error("Access token required")]
    MissingToken,

    /// Token failed signature, format or expiry checks
    #[error("Invalid or expired token")]
    InvalidToken(#[from] jsonwebtoken::errors::Error),

    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("User already exists")]
    UserExists,

    #[error("Password hashing failed: {0}")]
    Hashing(#[from] bcrypt::BcryptError),

    #[error("Token encoding failed: {0}")]
    Encoding(jsonwebtoken::errors::Error),
}

impl From<AuthError> for AppError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::MissingToken | AuthError::InvalidCredentials => {
                AppError::Unauthorized(err.to_string())
            }
            AuthError::InvalidToken(ref e) => {
                tracing::debug!("Token rejected: {e}");
                AppError::Forbidden(err.to_string())
            }
            AuthError::UserExists => AppError::Conflict(err.to_string()),
            AuthError::Hashing(_) | AuthError::Encoding(_) => AppError::Internal(err.into()),
        }
    }
}

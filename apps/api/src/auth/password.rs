//! bcrypt hashing. Both calls are CPU-bound and run inside `spawn_blocking`.

use anyhow::Context;

use crate::auth::AuthError;
use crate::errors::AppError;

pub async fn hash_password(password: &str, cost: u32) -> Result<String, AppError> {
    let password = password.to_owned();
    let hash = tokio::task::spawn_blocking(move || bcrypt::hash(password, cost))
        .await
        .context("Password hashing task panicked")?
        .map_err(AuthError::from)?;
    Ok(hash)
}

/// Returns `Ok(false)` on mismatch; an unparseable stored hash is an internal error.
pub async fn verify_password(password: &str, hash: &str) -> Result<bool, AppError> {
    let password = password.to_owned();
    let hash = hash.to_owned();
    let matches = tokio::task::spawn_blocking(move || bcrypt::verify(password, &hash))
        .await
        .context("Password verification task panicked")?
        .map_err(AuthError::from)?;
    Ok(matches)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_hash_then_verify() {
        let hash = hash_password("hunter22", 4).await.unwrap();
        assert_ne!(hash, "hunter22");
        assert!(verify_password("hunter22", &hash).await.unwrap());
        assert!(!verify_password("hunter23", &hash).await.unwrap());
    }

    #[tokio::test]
    async fn test_invalid_cost_is_error() {
        assert!(hash_password("hunter22", 99).await.is_err());
    }

    #[tokio::test]
    async fn test_garbage_hash_is_error() {
        assert!(verify_password("hunter22", "not-a-bcrypt-hash").await.is_err());
    }
}

//! Repository trait for API token authentication.

use crate::domain::entities::ApiToken;
use crate::error::AppError;
use async_trait::async_trait;

/// Repository interface for API token management.
///
/// Only HMAC-SHA256 hashes of raw tokens are stored.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::KvTokenRepository`] - key-value document
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TokenRepository: Send + Sync {
    /// Validates a token hash against stored credentials.
    ///
    /// # Returns
    ///
    /// - `Ok(true)` if the token is valid and not revoked
    /// - `Ok(false)` if the token is unknown or revoked
    async fn validate_token(&self, token_hash: &str) -> Result<bool, AppError>;

    /// Updates the `last_used_at` timestamp for a token.
    async fn update_last_used(&self, token_hash: &str) -> Result<(), AppError>;

    /// Creates a new API token.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Conflict`] if a token with the same name or hash exists.
    async fn create_token(&self, name: &str, token_hash: &str) -> Result<ApiToken, AppError>;

    async fn list_tokens(&self) -> Result<Vec<ApiToken>, AppError>;

    async fn find_by_id(&self, id: &str) -> Result<Option<ApiToken>, AppError>;

    async fn find_by_name(&self, name: &str) -> Result<Option<ApiToken>, AppError>;

    /// Revokes a token, preventing further authentication.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the token does not exist.
    async fn revoke_token(&self, id: &str) -> Result<(), AppError>;
}

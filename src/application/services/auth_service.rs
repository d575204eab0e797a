//! Authentication service for API token validation and issuance.

use hmac::{Hmac, Mac};
use rand::Rng;
use serde_json::json;
use sha2::Sha256;
use std::sync::Arc;
use tracing::info;

use crate::domain::entities::ApiToken;
use crate::domain::repositories::TokenRepository;
use crate::error::AppError;

type HmacSha256 = Hmac<Sha256>;

const TOKEN_CHARSET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789";
const TOKEN_LEN: usize = 48;

/// Hashes a raw token with HMAC-SHA256 keyed by `secret`.
///
/// Returns a 64-character lowercase hex-encoded MAC.
pub fn hash_token(secret: &str, token: &str) -> Result<String, AppError> {
    let mut mac = HmacSha256::new_from_slice(secret.as_bytes())
        .map_err(|e| AppError::internal("Invalid signing key", json!({ "reason": e.to_string() })))?;
    mac.update(token.as_bytes());
    Ok(hex::encode(mac.finalize().into_bytes()))
}

/// Generates a random 48-character alphanumeric token.
pub fn generate_token() -> String {
    let mut rng = rand::rng();
    (0..TOKEN_LEN)
        .map(|_| TOKEN_CHARSET[rng.random_range(0..TOKEN_CHARSET.len())] as char)
        .collect()
}

/// Service for authenticating API requests via Bearer tokens.
///
/// Tokens are hashed with HMAC-SHA256 (keyed by `signing_secret`) before storage
/// and comparison. Read access to the store alone is not enough to forge or
/// verify a token.
pub struct AuthService<R: TokenRepository> {
    repository: Arc<R>,
    signing_secret: String,
}

impl<R: TokenRepository> AuthService<R> {
    /// Creates a new authentication service.
    ///
    /// `signing_secret` must match the value used when tokens were created.
    pub fn new(repository: Arc<R>, signing_secret: String) -> Self {
        Self {
            repository,
            signing_secret,
        }
    }

    /// Authenticates a raw token against stored credentials.
    ///
    /// On success the token's `lastUsedAt` is refreshed; failure to do so is ignored.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Unauthorized`] for unknown or revoked tokens.
    pub async fn authenticate(&self, token: &str) -> Result<(), AppError> {
        let token_hash = hash_token(&self.signing_secret, token)?;

        if !self.repository.validate_token(&token_hash).await? {
            return Err(AppError::unauthorized(
                "Unauthorized",
                json!({"reason": "Invalid or revoked token"}),
            ));
        }

        let _ = self.repository.update_last_used(&token_hash).await;

        Ok(())
    }

    /// Stores a new token under `name`.
    ///
    /// When `raw` is `None` a random token is generated. Returns the stored
    /// record and the raw token, which is not recoverable afterwards.
    pub async fn issue(
        &self,
        name: &str,
        raw: Option<String>,
    ) -> Result<(ApiToken, String), AppError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(AppError::bad_request(
                "Token name is required",
                json!({ "field": "name" }),
            ));
        }

        let raw = raw.unwrap_or_else(generate_token);
        let token_hash = hash_token(&self.signing_secret, &raw)?;
        let token = self.repository.create_token(name, &token_hash).await?;

        info!(name, id = %token.id, "API token created");
        Ok((token, raw))
    }

    pub async fn list(&self) -> Result<Vec<ApiToken>, AppError> {
        self.repository.list_tokens().await
    }

    /// Finds a token by id, falling back to an exact name match.
    pub async fn find(&self, id_or_name: &str) -> Result<Option<ApiToken>, AppError> {
        match self.repository.find_by_id(id_or_name).await? {
            Some(token) => Ok(Some(token)),
            None => self.repository.find_by_name(id_or_name).await,
        }
    }

    pub async fn revoke(&self, id: &str) -> Result<(), AppError> {
        self.repository.revoke_token(id).await?;
        info!(id, "API token revoked");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::repositories::MockTokenRepository;
    use chrono::Utc;

    fn test_secret() -> String {
        "test-signing-secret".to_string()
    }

    fn stored(name: &str, hash: &str) -> ApiToken {
        ApiToken {
            id: "t1".to_string(),
            name: name.to_string(),
            token_hash: hash.to_string(),
            created_at: Utc::now(),
            last_used_at: None,
            revoked_at: None,
        }
    }

    #[tokio::test]
    async fn test_authenticate_success() {
        let mut mock_repo = MockTokenRepository::new();

        let token = "valid-token";
        let expected_hash = hash_token(&test_secret(), token).unwrap();

        mock_repo
            .expect_validate_token()
            .withf(move |hash| hash == expected_hash)
            .times(1)
            .returning(|_| Ok(true));

        mock_repo
            .expect_update_last_used()
            .times(1)
            .returning(|_| Ok(()));

        let service = AuthService::new(Arc::new(mock_repo), test_secret());

        assert!(service.authenticate(token).await.is_ok());
    }

    #[tokio::test]
    async fn test_authenticate_invalid_token() {
        let mut mock_repo = MockTokenRepository::new();

        mock_repo
            .expect_validate_token()
            .times(1)
            .returning(|_| Ok(false));
        mock_repo.expect_update_last_used().never();

        let service = AuthService::new(Arc::new(mock_repo), test_secret());

        let result = service.authenticate("invalid-token").await;

        assert!(matches!(result.unwrap_err(), AppError::Unauthorized { .. }));
    }

    #[tokio::test]
    async fn test_last_used_failure_is_ignored() {
        let mut mock_repo = MockTokenRepository::new();
        mock_repo.expect_validate_token().returning(|_| Ok(true));
        mock_repo
            .expect_update_last_used()
            .returning(|_| Err(AppError::internal("Storage error", json!({}))));

        let service = AuthService::new(Arc::new(mock_repo), test_secret());
        assert!(service.authenticate("token").await.is_ok());
    }

    #[test]
    fn test_hash_token_properties() {
        let a = hash_token(&test_secret(), "test-token").unwrap();
        assert_eq!(a, hash_token(&test_secret(), "test-token").unwrap());
        assert_eq!(a.len(), 64);
        assert_ne!(a, hash_token(&test_secret(), "other-token").unwrap());
        assert_ne!(a, hash_token("secret-b", "test-token").unwrap());
    }

    #[test]
    fn test_generate_token() {
        let token = generate_token();
        assert_eq!(token.len(), TOKEN_LEN);
        assert!(token.chars().all(|c| c.is_ascii_alphanumeric()));
        assert_ne!(token, generate_token());
    }

    #[tokio::test]
    async fn test_issue_stores_hash_of_returned_token() {
        let mut mock_repo = MockTokenRepository::new();
        mock_repo
            .expect_create_token()
            .withf(|name, _| name == "Scanner")
            .times(1)
            .returning(|name, hash| Ok(stored(name, hash)));

        let service = AuthService::new(Arc::new(mock_repo), test_secret());
        let (token, raw) = service.issue("  Scanner ", None).await.unwrap();

        assert_eq!(token.token_hash, hash_token(&test_secret(), &raw).unwrap());
    }

    #[tokio::test]
    async fn test_issue_requires_name() {
        let mut mock_repo = MockTokenRepository::new();
        mock_repo.expect_create_token().never();

        let service = AuthService::new(Arc::new(mock_repo), test_secret());
        let err = service.issue("   ", None).await.unwrap_err();
        assert!(matches!(err, AppError::Validation { .. }));
    }

    #[tokio::test]
    async fn test_find_falls_back_to_name() {
        let mut mock_repo = MockTokenRepository::new();
        mock_repo.expect_find_by_id().returning(|_| Ok(None));
        mock_repo
            .expect_find_by_name()
            .withf(|name| name == "Scanner")
            .returning(|name| Ok(Some(stored(name, "h"))));

        let service = AuthService::new(Arc::new(mock_repo), test_secret());
        let found = service.find("Scanner").await.unwrap();
        assert_eq!(found.map(|t| t.name), Some("Scanner".to_string()));
    }
}

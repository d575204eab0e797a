//! Key-value implementation of the token repository.

use async_trait::async_trait;
use chrono::Utc;
use serde_json::json;
use std::sync::Arc;

use super::WarehouseDocuments;
use crate::domain::entities::ApiToken;
use crate::domain::repositories::TokenRepository;
use crate::error::AppError;
use crate::utils::id::generate_id;

/// Token repository over the `warehouse_api_tokens` document.
///
/// Stores hashed tokens only. Raw tokens are never persisted.
pub struct KvTokenRepository {
    docs: Arc<WarehouseDocuments>,
}

impl KvTokenRepository {
    pub fn new(docs: Arc<WarehouseDocuments>) -> Self {
        Self { docs }
    }
}

#[async_trait]
impl TokenRepository for KvTokenRepository {
    async fn validate_token(&self, token_hash: &str) -> Result<bool, AppError> {
        let tokens = self.docs.api_tokens.try_load().await?;
        Ok(tokens
            .iter()
            .any(|t| t.token_hash == token_hash && !t.is_revoked()))
    }

    async fn update_last_used(&self, token_hash: &str) -> Result<(), AppError> {
        self.docs
            .api_tokens
            .update(|tokens| {
                if let Some(token) = tokens
                    .iter_mut()
                    .find(|t| t.token_hash == token_hash && !t.is_revoked())
                {
                    token.last_used_at = Some(Utc::now());
                }
                Ok(())
            })
            .await
    }

    async fn create_token(&self, name: &str, token_hash: &str) -> Result<ApiToken, AppError> {
        self.docs
            .api_tokens
            .update(|tokens| {
                if tokens
                    .iter()
                    .any(|t| t.name == name || t.token_hash == token_hash)
                {
                    return Err(AppError::conflict(
                        "Token already exists",
                        json!({ "name": name }),
                    ));
                }
                let token = ApiToken {
                    id: generate_id(),
                    name: name.to_string(),
                    token_hash: token_hash.to_string(),
                    created_at: Utc::now(),
                    last_used_at: None,
                    revoked_at: None,
                };
                tokens.push(token.clone());
                Ok(token)
            })
            .await
    }

    async fn list_tokens(&self) -> Result<Vec<ApiToken>, AppError> {
        Ok(self.docs.api_tokens.try_load().await?)
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<ApiToken>, AppError> {
        let tokens = self.docs.api_tokens.try_load().await?;
        Ok(tokens.into_iter().find(|t| t.id == id))
    }

    async fn find_by_name(&self, name: &str) -> Result<Option<ApiToken>, AppError> {
        let tokens = self.docs.api_tokens.try_load().await?;
        Ok(tokens.into_iter().find(|t| t.name == name))
    }

    async fn revoke_token(&self, id: &str) -> Result<(), AppError> {
        self.docs
            .api_tokens
            .update(|tokens| {
                let token = tokens.iter_mut().find(|t| t.id == id).ok_or_else(|| {
                    AppError::not_found("Token not found", json!({ "id": id }))
                })?;
                if token.revoked_at.is_none() {
                    token.revoked_at = Some(Utc::now());
                }
                Ok(())
            })
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::store::MemoryStore;

    fn repo() -> KvTokenRepository {
        let docs = WarehouseDocuments::new(Arc::new(MemoryStore::new()));
        KvTokenRepository::new(Arc::new(docs))
    }

    #[tokio::test]
    async fn test_create_and_validate() {
        let repo = repo();
        let token = repo.create_token("ci", "hash-1").await.unwrap();

        assert!(repo.validate_token("hash-1").await.unwrap());
        assert!(!repo.validate_token("hash-2").await.unwrap());
        assert_eq!(
            repo.find_by_name("ci").await.unwrap().map(|t| t.id),
            Some(token.id)
        );
    }

    #[tokio::test]
    async fn test_duplicate_name_is_conflict() {
        let repo = repo();
        repo.create_token("ci", "hash-1").await.unwrap();
        let err = repo.create_token("ci", "hash-2").await.unwrap_err();
        assert!(matches!(err, AppError::Conflict { .. }));
    }

    #[tokio::test]
    async fn test_revoked_token_is_rejected() {
        let repo = repo();
        let token = repo.create_token("ci", "hash-1").await.unwrap();

        repo.revoke_token(&token.id).await.unwrap();

        assert!(!repo.validate_token("hash-1").await.unwrap());
        let err = repo.revoke_token("missing").await.unwrap_err();
        assert!(matches!(err, AppError::NotFound { .. }));
    }

    #[tokio::test]
    async fn test_update_last_used() {
        let repo = repo();
        let token = repo.create_token("ci", "hash-1").await.unwrap();
        assert!(token.last_used_at.is_none());

        repo.update_last_used("hash-1").await.unwrap();

        let stored = repo.find_by_id(&token.id).await.unwrap().unwrap();
        assert!(stored.last_used_at.is_some());
    }
}

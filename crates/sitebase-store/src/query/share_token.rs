//! Share token repository for managing external bearer credentials.

use std::future::Future;

use jiff::Timestamp;
use uuid::Uuid;

use crate::model::{NewShareToken, ShareToken};
use crate::types::{ConstraintViolation, ShareTokenConstraints, TokenKind};
use crate::{MemStore, StoreError, StoreResult, TRACING_TARGET_QUERY};

/// Minimum accepted length for a caller-supplied bearer string.
const MIN_TOKEN_LENGTH: usize = 16;

/// Repository for share token operations.
///
/// `find_share_token` is the privilege-elevated lookup behind the policy
/// layer's token predicate; it performs no mutation. The last-used touch is
/// a separate, explicit operation invoked by the redemption path only.
pub trait ShareTokenRepository {
    /// Issues a new share token.
    ///
    /// Generates an opaque bearer string when the payload carries none and
    /// applies the default TTL when no expiry is set.
    fn issue_share_token(
        &self,
        token: NewShareToken,
    ) -> impl Future<Output = StoreResult<ShareToken>> + Send;

    /// Finds a share token by its bearer string.
    fn find_share_token(
        &self,
        token: &str,
    ) -> impl Future<Output = StoreResult<Option<ShareToken>>> + Send;

    /// Finds a share token by record id.
    fn find_share_token_by_id(
        &self,
        token_id: Uuid,
    ) -> impl Future<Output = StoreResult<Option<ShareToken>>> + Send;

    /// Revokes a share token.
    ///
    /// Revocation is immediately effective: the validity check re-reads this
    /// row on every use.
    fn revoke_share_token(&self, token_id: Uuid)
    -> impl Future<Output = StoreResult<()>> + Send;

    /// Updates the last-used timestamp for a token.
    fn touch_share_token(&self, token_id: Uuid) -> impl Future<Output = StoreResult<()>> + Send;

    /// Lists tokens issued for a project, optionally filtered by kind.
    fn list_project_tokens(
        &self,
        project_id: Uuid,
        kind: Option<TokenKind>,
    ) -> impl Future<Output = StoreResult<Vec<ShareToken>>> + Send;
}

impl ShareTokenRepository for MemStore {
    async fn issue_share_token(&self, token: NewShareToken) -> StoreResult<ShareToken> {
        let bearer = match token.token {
            Some(bearer) => {
                if bearer.len() < MIN_TOKEN_LENGTH {
                    return Err(StoreError::Constraint(ConstraintViolation::ShareToken(
                        ShareTokenConstraints::TokenLength,
                    )));
                }
                bearer
            }
            None => ShareToken::generate_token(),
        };

        let issued_at = Timestamp::now();
        let expires_at = token
            .expires_at
            .unwrap_or_else(|| ShareToken::default_expiry(issued_at));
        if expires_at <= issued_at {
            return Err(StoreError::Constraint(ConstraintViolation::ShareToken(
                ShareTokenConstraints::ExpiresAfterIssued,
            )));
        }

        let mut tables = self.write().await;
        if tables.token_index.contains_key(&bearer) {
            return Err(StoreError::Constraint(ConstraintViolation::ShareToken(
                ShareTokenConstraints::TokenUnique,
            )));
        }

        let row = ShareToken {
            id: Uuid::now_v7(),
            kind: token.kind,
            project_id: token.project_id,
            token: bearer,
            allow_comments: token.allow_comments.unwrap_or(false)
                && token.kind.supports_comments(),
            issued_at,
            expires_at,
            revoked_at: None,
            last_used_at: None,
            created_by: token.created_by,
        };
        tables.token_index.insert(row.token.clone(), row.id);
        tables.share_tokens.insert(row.id, row.clone());

        tracing::debug!(
            target: TRACING_TARGET_QUERY,
            token_id = %row.id,
            kind = %row.kind,
            project_id = %row.project_id,
            token = %row.token_short(),
            expires_at = %row.expires_at,
            "Issued share token"
        );

        Ok(row)
    }

    async fn find_share_token(&self, token: &str) -> StoreResult<Option<ShareToken>> {
        let tables = self.read().await;
        let id = tables.token_index.get(token);
        Ok(id.and_then(|id| tables.share_tokens.get(id)).cloned())
    }

    async fn find_share_token_by_id(&self, token_id: Uuid) -> StoreResult<Option<ShareToken>> {
        let tables = self.read().await;
        Ok(tables.share_tokens.get(&token_id).cloned())
    }

    async fn revoke_share_token(&self, token_id: Uuid) -> StoreResult<()> {
        let mut tables = self.write().await;
        let row = tables
            .share_tokens
            .get_mut(&token_id)
            .ok_or(StoreError::NotFound("share_tokens"))?;
        if row.revoked_at.is_none() {
            row.revoked_at = Some(Timestamp::now());
        }
        Ok(())
    }

    async fn touch_share_token(&self, token_id: Uuid) -> StoreResult<()> {
        let mut tables = self.write().await;
        let row = tables
            .share_tokens
            .get_mut(&token_id)
            .ok_or(StoreError::NotFound("share_tokens"))?;
        row.last_used_at = Some(Timestamp::now());
        Ok(())
    }

    async fn list_project_tokens(
        &self,
        project_id: Uuid,
        kind: Option<TokenKind>,
    ) -> StoreResult<Vec<ShareToken>> {
        let tables = self.read().await;
        let mut tokens: Vec<_> = tables
            .share_tokens
            .values()
            .filter(|t| t.project_id == project_id)
            .filter(|t| kind.is_none_or(|k| t.kind == k))
            .cloned()
            .collect();
        tokens.sort_by_key(|t| t.issued_at);
        Ok(tokens)
    }
}

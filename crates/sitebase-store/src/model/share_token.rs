//! Share token model for external bearer credentials.

use base64::Engine as _;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use jiff::{Span, Timestamp};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::types::TokenKind;

/// Number of random bytes backing a generated token string.
const TOKEN_BYTES: usize = 32;

/// Default token lifetime applied when the issuer does not set one.
pub const DEFAULT_TOKEN_TTL_DAYS: i64 = 30;

/// Share token row: an opaque bearer credential granting scoped, time-bound,
/// revocable access to one project without a user account.
///
/// Validity (existence, non-revoked, non-expired) is re-checked on every
/// use; the last-used timestamp is touched only by the explicit redemption
/// path, never by a policy predicate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShareToken {
    /// Unique token record identifier.
    pub id: Uuid,
    /// Kind of portal or share this token serves.
    pub kind: TokenKind,
    /// Project the token grants access to.
    pub project_id: Uuid,
    /// The opaque bearer string presented by callers.
    pub token: String,
    /// Whether the bearer may author comments.
    pub allow_comments: bool,
    /// Timestamp of token issuance.
    pub issued_at: Timestamp,
    /// Timestamp when the token expires and becomes invalid.
    pub expires_at: Timestamp,
    /// Timestamp when the token was revoked, if it was.
    pub revoked_at: Option<Timestamp>,
    /// Timestamp of the most recent redemption.
    pub last_used_at: Option<Timestamp>,
    /// Account that issued the token.
    pub created_by: Uuid,
}

/// Data for issuing a new share token.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewShareToken {
    /// Token kind.
    pub kind: TokenKind,
    /// Project ID.
    pub project_id: Uuid,
    /// Bearer string; generated when absent.
    pub token: Option<String>,
    /// Comment access; defaults to off.
    pub allow_comments: Option<bool>,
    /// Expiry; defaults to [`DEFAULT_TOKEN_TTL_DAYS`] from issuance.
    pub expires_at: Option<Timestamp>,
    /// Issuing account.
    pub created_by: Uuid,
}

impl ShareToken {
    /// Generates a fresh opaque bearer string.
    pub fn generate_token() -> String {
        let bytes: [u8; TOKEN_BYTES] = rand::random();
        URL_SAFE_NO_PAD.encode(bytes)
    }

    /// Returns the default expiry for a token issued now.
    pub fn default_expiry(issued_at: Timestamp) -> Timestamp {
        issued_at + Span::new().days(DEFAULT_TOKEN_TTL_DAYS)
    }

    /// Returns whether the token has expired.
    #[inline]
    pub fn is_expired(&self) -> bool {
        self.expires_at <= Timestamp::now()
    }

    /// Returns whether the token was revoked.
    #[inline]
    pub fn is_revoked(&self) -> bool {
        self.revoked_at.is_some()
    }

    /// Returns whether the token is currently valid.
    ///
    /// This is the bearer-credential invariant: existence is implied by
    /// having the row, and both revocation and expiry are checked at the
    /// moment of the call. A previously-valid token yields `false` here the
    /// instant it expires or is revoked.
    pub fn is_valid(&self) -> bool {
        !self.is_revoked() && !self.is_expired()
    }

    /// Returns the bearer string shortened for display and logs.
    pub fn token_short(&self) -> String {
        if self.token.len() > 8 {
            format!("{}...", &self.token[..8])
        } else {
            self.token.clone()
        }
    }
}

//! Read-only inspection of bearer token claims.
//!
//! The remote API issues HS256 JWTs carrying `sub`, `role` and `exp`. The
//! signing secret belongs to the remote service, so the client cannot verify
//! a token; it can only read the expiry to skip a round trip for a token that
//! is already dead. Tokens that are not JWTs are treated as opaque and always
//! validated remotely.

use chrono::{DateTime, Utc};
use jsonwebtoken::{Algorithm, DecodingKey, Validation, decode};
use serde::{Deserialize, Serialize};

use classwatch_models::AuthToken;

/// Claims the remote API embeds in its access tokens.
///
/// Every field is optional; a token missing `exp` simply never looks expired.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenClaims {
    /// Username (subject claim)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sub: Option<String>,
    /// Role name at issue time
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    /// Expiration timestamp (seconds since the epoch)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exp: Option<i64>,
}

/// Decodes the token's claims without verifying its signature.
///
/// Returns `None` when the token is not a well-formed JWT.
pub fn inspect(token: &AuthToken) -> Option<TokenClaims> {
    let mut validation = Validation::new(Algorithm::HS256);
    validation.insecure_disable_signature_validation();
    validation.validate_exp = false;
    validation.validate_aud = false;
    validation.required_spec_claims.clear();

    decode::<TokenClaims>(token.expose(), &DecodingKey::from_secret(&[]), &validation)
        .ok()
        .map(|data| data.claims)
}

/// True if the token is a JWT whose `exp` is at or before `now`.
pub fn is_expired_at(token: &AuthToken, now: DateTime<Utc>) -> bool {
    inspect(token)
        .and_then(|claims| claims.exp)
        .is_some_and(|exp| exp <= now.timestamp())
}

pub fn is_expired(token: &AuthToken) -> bool {
    is_expired_at(token, Utc::now())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;
    use jsonwebtoken::{EncodingKey, Header, encode};

    fn issue(exp: Option<i64>) -> AuthToken {
        let claims = TokenClaims {
            sub: Some("le.c".to_string()),
            role: Some("teacher".to_string()),
            exp,
        };
        let token = encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(b"secret-held-by-the-remote-api"),
        )
        .unwrap();
        AuthToken::new(token)
    }

    #[test]
    fn test_inspect_reads_claims_without_secret() {
        let exp = (Utc::now() + Duration::minutes(30)).timestamp();
        let claims = inspect(&issue(Some(exp))).unwrap();
        assert_eq!(claims.sub.as_deref(), Some("le.c"));
        assert_eq!(claims.role.as_deref(), Some("teacher"));
        assert_eq!(claims.exp, Some(exp));
    }

    #[test]
    fn test_future_expiry_is_live() {
        let token = issue(Some((Utc::now() + Duration::minutes(30)).timestamp()));
        assert!(!is_expired(&token));
    }

    #[test]
    fn test_past_expiry_is_expired() {
        let token = issue(Some((Utc::now() - Duration::minutes(1)).timestamp()));
        assert!(is_expired(&token));
    }

    #[test]
    fn test_expiry_boundary() {
        let now = Utc::now();
        let token = issue(Some(now.timestamp()));
        assert!(is_expired_at(&token, now));
        assert!(!is_expired_at(&token, now - Duration::seconds(1)));
    }

    #[test]
    fn test_missing_expiry_never_expires() {
        assert!(!is_expired(&issue(None)));
    }

    #[test]
    fn test_opaque_token_is_not_inspected() {
        let token = AuthToken::new("3f1c2a9e-opaque-session-id");
        assert!(inspect(&token).is_none());
        assert!(!is_expired(&token));
    }
}

//! Bearer token payload decoding.
//!
//! Decodes the claims segment of a JWT for display and client-side gating:
//! no signature verification happens here, deliberately. The client trusts
//! transport security and the backend re-validates the token on every call,
//! so this decode must never be used as an authorization decision point.

use base64::{Engine as _, engine::general_purpose::URL_SAFE_NO_PAD};
use serde::Deserialize;
use thiserror::Error;

use crate::auth::models::Role;

#[derive(Debug, Error)]
pub enum TokenError {
    #[error("token is not a three-part JWT")]
    Malformed,

    #[error("token payload is not valid base64")]
    Base64(#[from] base64::DecodeError),

    #[error("token payload is not valid JSON")]
    Json(#[from] serde_json::Error),
}

/// Claims the backend places in its tokens.
#[derive(Debug, Clone, Deserialize)]
pub struct TokenClaims {
    /// Subject; the backend uses the email address.
    #[serde(default)]
    pub sub: Option<String>,

    /// Granted roles; the first one wins.
    #[serde(default)]
    pub roles: Vec<String>,

    /// Expiry, seconds since the epoch.
    #[serde(default)]
    pub exp: Option<i64>,

    /// Issued-at, seconds since the epoch.
    #[serde(default)]
    pub iat: Option<i64>,
}

impl TokenClaims {
    /// Email address from the subject claim.
    pub fn email(&self) -> Option<&str> {
        self.sub.as_deref()
    }

    /// Role from the first granted authority, defaulting to `User`.
    pub fn role(&self) -> Role {
        self.roles
            .first()
            .map(|role| Role::from_wire(role))
            .unwrap_or(Role::User)
    }

    /// Whether the token expired before `now` (seconds since the epoch).
    /// Tokens without an expiry claim never expire client-side.
    pub fn is_expired(&self, now: i64) -> bool {
        self.exp.is_some_and(|exp| exp < now)
    }
}

/// Decode the claims segment of a bearer token.
///
/// # Errors
///
/// - [`TokenError::Malformed`]: the token is not `header.payload.signature`.
/// - [`TokenError::Base64`]: the payload segment is not base64url.
/// - [`TokenError::Json`]: the decoded payload is not a JSON claims object.
pub fn decode_claims(token: &str) -> Result<TokenClaims, TokenError> {
    let mut parts = token.split('.');

    let (Some(_header), Some(payload), Some(_signature), None) =
        (parts.next(), parts.next(), parts.next(), parts.next())
    else {
        return Err(TokenError::Malformed);
    };

    let bytes = URL_SAFE_NO_PAD.decode(payload.trim_end_matches('='))?;
    let claims = serde_json::from_slice(&bytes)?;

    Ok(claims)
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use super::*;
    use crate::test::unsigned_token;

    #[test]
    fn decodes_subject_and_role() -> TestResult {
        let token = unsigned_token(r#"{"sub":"admin@tricto.in","roles":["ADMIN"],"exp":4102444800}"#);

        let claims = decode_claims(&token)?;

        assert_eq!(claims.email(), Some("admin@tricto.in"));
        assert_eq!(claims.role(), Role::Admin);

        Ok(())
    }

    #[test]
    fn missing_roles_default_to_user() -> TestResult {
        let token = unsigned_token(r#"{"sub":"user@tricto.in"}"#);

        let claims = decode_claims(&token)?;

        assert_eq!(claims.role(), Role::User);
        assert!(!claims.is_expired(1_700_000_000));

        Ok(())
    }

    #[test]
    fn expiry_is_compared_against_now() -> TestResult {
        let token = unsigned_token(r#"{"exp":1000}"#);

        let claims = decode_claims(&token)?;

        assert!(claims.is_expired(1001));
        assert!(!claims.is_expired(999));

        Ok(())
    }

    #[test]
    fn two_part_tokens_are_malformed() {
        assert!(matches!(
            decode_claims("header.payload"),
            Err(TokenError::Malformed)
        ));
    }

    #[test]
    fn garbage_payload_is_rejected() {
        assert!(decode_claims("a.!!!.c").is_err());
    }
}

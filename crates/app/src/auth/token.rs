//! Signed session tokens.

use std::fmt;

use jiff::{SignedDuration, Timestamp};
use jsonwebtoken::{
    Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode,
    errors::Error as JwtError,
};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use zeroize::Zeroize;

use crate::{
    auth::models::{IssuedToken, Principal},
    domain::users::records::Role,
};

/// Default token lifetime: 24 hours.
pub const DEFAULT_TOKEN_TTL: SignedDuration = SignedDuration::from_hours(24);

const ALGORITHM: Algorithm = Algorithm::HS256;

#[derive(Debug, Error)]
pub enum TokenError {
    #[error("token signing secret is empty")]
    EmptySecret,

    #[error("token lifetime must be positive")]
    InvalidLifetime,

    #[error("token expiry is out of range")]
    OutOfRange(#[from] jiff::Error),

    #[error("failed to sign token")]
    Encoding(#[source] JwtError),

    #[error("token is malformed, expired or incorrectly signed")]
    Invalid(#[source] JwtError),
}

/// Claims carried in every issued token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
struct Claims {
    sub: String,
    role: Role,
    iat: i64,
    exp: i64,
}

/// Symmetric signing secret, wiped from memory on drop.
#[derive(Clone)]
pub struct TokenSecret {
    bytes: Vec<u8>,
}

impl TokenSecret {
    /// # Errors
    ///
    /// Returns [`TokenError::EmptySecret`] when `secret` is empty.
    pub fn new(secret: impl Into<Vec<u8>>) -> Result<Self, TokenError> {
        let bytes = secret.into();

        if bytes.is_empty() {
            return Err(TokenError::EmptySecret);
        }

        Ok(Self { bytes })
    }

    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }
}

impl fmt::Debug for TokenSecret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("TokenSecret(**redacted**)")
    }
}

impl Drop for TokenSecret {
    fn drop(&mut self) {
        self.bytes.zeroize();
    }
}

/// Issues and verifies HS256 session tokens.
#[derive(Clone)]
pub struct TokenIssuer {
    encoding: EncodingKey,
    decoding: DecodingKey,
    ttl: SignedDuration,
}

impl fmt::Debug for TokenIssuer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TokenIssuer")
            .field("ttl", &self.ttl)
            .finish_non_exhaustive()
    }
}

impl TokenIssuer {
    /// # Errors
    ///
    /// Returns [`TokenError::InvalidLifetime`] when `ttl` is zero or negative.
    pub fn new(secret: &TokenSecret, ttl: SignedDuration) -> Result<Self, TokenError> {
        if !ttl.is_positive() {
            return Err(TokenError::InvalidLifetime);
        }

        Ok(Self {
            encoding: EncodingKey::from_secret(secret.as_bytes()),
            decoding: DecodingKey::from_secret(secret.as_bytes()),
            ttl,
        })
    }

    #[must_use]
    pub const fn ttl(&self) -> SignedDuration {
        self.ttl
    }

    /// Issue a token for `principal`, valid from now.
    ///
    /// # Errors
    ///
    /// Returns an error if the expiry overflows or signing fails.
    pub fn issue(&self, principal: &Principal) -> Result<IssuedToken, TokenError> {
        self.issue_at(principal, Timestamp::now())
    }

    /// Issue a token as though the current time were `issued_at`.
    ///
    /// # Errors
    ///
    /// Returns an error if the expiry overflows or signing fails.
    pub fn issue_at(
        &self,
        principal: &Principal,
        issued_at: Timestamp,
    ) -> Result<IssuedToken, TokenError> {
        let expires_at = issued_at.checked_add(self.ttl)?;

        let claims = Claims {
            sub: principal.username.clone(),
            role: principal.role,
            iat: issued_at.as_second(),
            exp: expires_at.as_second(),
        };

        let token = encode(&Header::new(ALGORITHM), &claims, &self.encoding)
            .map_err(TokenError::Encoding)?;

        Ok(IssuedToken { token, expires_at })
    }

    /// Verify signature and expiry, returning the embedded principal.
    ///
    /// # Errors
    ///
    /// Returns [`TokenError::Invalid`] for any malformed, tampered or expired token.
    pub fn verify(&self, token: &str) -> Result<Principal, TokenError> {
        let mut validation = Validation::new(ALGORITHM);
        validation.leeway = 0;
        validation.set_required_spec_claims(&["exp", "sub"]);

        let data =
            decode::<Claims>(token, &self.decoding, &validation).map_err(TokenError::Invalid)?;

        Ok(Principal {
            username: data.claims.sub,
            role: data.claims.role,
        })
    }
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use super::*;

    fn issuer(secret: &str) -> TestResult<TokenIssuer> {
        Ok(TokenIssuer::new(
            &TokenSecret::new(secret)?,
            SignedDuration::from_hours(1),
        )?)
    }

    fn seller() -> Principal {
        Principal {
            username: "sam".to_string(),
            role: Role::Seller,
        }
    }

    #[test]
    fn issued_token_verifies_to_same_principal() -> TestResult {
        let issuer = issuer("test-secret")?;

        let issued = issuer.issue(&seller())?;
        let principal = issuer.verify(&issued.token)?;

        assert_eq!(principal, seller());

        Ok(())
    }

    #[test]
    fn expiry_is_issue_time_plus_ttl() -> TestResult {
        let issuer = issuer("test-secret")?;
        let issued_at = Timestamp::from_second(1_700_000_000)?;

        let issued = issuer.issue_at(&seller(), issued_at)?;

        assert_eq!(issued.expires_at.as_second(), 1_700_003_600);

        Ok(())
    }

    #[test]
    fn expired_token_is_rejected() -> TestResult {
        let issuer = issuer("test-secret")?;
        let two_hours_ago = Timestamp::now().checked_sub(SignedDuration::from_hours(2))?;

        let issued = issuer.issue_at(&seller(), two_hours_ago)?;
        let result = issuer.verify(&issued.token);

        assert!(
            matches!(result, Err(TokenError::Invalid(_))),
            "expected Invalid, got {result:?}"
        );

        Ok(())
    }

    #[test]
    fn token_signed_with_other_secret_is_rejected() -> TestResult {
        let issued = issuer("secret-a")?.issue(&seller())?;

        let result = issuer("secret-b")?.verify(&issued.token);

        assert!(
            matches!(result, Err(TokenError::Invalid(_))),
            "expected Invalid, got {result:?}"
        );

        Ok(())
    }

    #[test]
    fn garbage_is_rejected() -> TestResult {
        let issuer = issuer("test-secret")?;

        for token in ["", "abc", "a.b.c", "Bearer xyz"] {
            assert!(issuer.verify(token).is_err(), "{token:?} should not verify");
        }

        Ok(())
    }

    #[test]
    fn empty_secret_is_rejected() {
        assert!(matches!(TokenSecret::new(""), Err(TokenError::EmptySecret)));
    }

    #[test]
    fn non_positive_lifetime_is_rejected() -> TestResult {
        let secret = TokenSecret::new("test-secret")?;

        let result = TokenIssuer::new(&secret, SignedDuration::ZERO);

        assert!(matches!(result, Err(TokenError::InvalidLifetime)));

        Ok(())
    }

    #[test]
    fn secret_debug_is_redacted() -> TestResult {
        let secret = TokenSecret::new("super-secret")?;

        assert!(!format!("{secret:?}").contains("super-secret"));

        Ok(())
    }
}

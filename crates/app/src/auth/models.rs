//! Auth data models.

use jiff::{SignedDuration, Timestamp};

use crate::{
    auth::{
        password::DEFAULT_BCRYPT_COST,
        token::{DEFAULT_TOKEN_TTL, TokenSecret},
    },
    domain::users::records::Role,
};

/// Identity proven by a verified token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Principal {
    pub username: String,
    pub role: Role,
}

impl Principal {
    /// Whether the principal holds any of `roles`.
    #[must_use]
    pub fn has_any_role(&self, roles: &[Role]) -> bool {
        roles.contains(&self.role)
    }
}

/// Token issuance result.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IssuedToken {
    pub token: String,
    pub expires_at: Timestamp,
}

/// Credential and token settings shared by the auth and users services.
#[derive(Debug, Clone)]
pub struct AuthSettings {
    pub secret: TokenSecret,
    pub token_ttl: SignedDuration,
    pub bcrypt_cost: u32,
}

impl AuthSettings {
    #[must_use]
    pub fn new(secret: TokenSecret) -> Self {
        Self {
            secret,
            token_ttl: DEFAULT_TOKEN_TTL,
            bcrypt_cost: DEFAULT_BCRYPT_COST,
        }
    }

    #[must_use]
    pub fn with_token_ttl(mut self, token_ttl: SignedDuration) -> Self {
        self.token_ttl = token_ttl;
        self
    }

    #[must_use]
    pub fn with_bcrypt_cost(mut self, bcrypt_cost: u32) -> Self {
        self.bcrypt_cost = bcrypt_cost;
        self
    }
}

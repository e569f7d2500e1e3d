//! Auth Config

use clap::Args;
use jiff::SignedDuration;
use storefront_app::auth::{AuthSettings, DEFAULT_BCRYPT_COST, TokenError, TokenSecret};

/// Token signing and password hashing settings.
#[derive(Args)]
pub struct AuthConfig {
    /// HMAC secret used to sign session tokens
    #[arg(long, env = "JWT_SECRET", hide_env_values = true)]
    pub jwt_secret: String,

    /// Session token lifetime in seconds
    #[arg(long, env = "JWT_TTL_SECONDS", default_value_t = 86_400)]
    pub jwt_ttl_seconds: u32,

    /// bcrypt work factor (4-31)
    #[arg(
        long,
        env = "BCRYPT_COST",
        default_value_t = DEFAULT_BCRYPT_COST,
        value_parser = clap::value_parser!(u32).range(4..=31)
    )]
    pub bcrypt_cost: u32,
}

impl std::fmt::Debug for AuthConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthConfig")
            .field("jwt_secret", &"**redacted**")
            .field("jwt_ttl_seconds", &self.jwt_ttl_seconds)
            .field("bcrypt_cost", &self.bcrypt_cost)
            .finish()
    }
}

impl AuthConfig {
    /// Convert into the settings consumed by the app services.
    ///
    /// # Errors
    ///
    /// Returns an error if the signing secret is empty.
    pub fn to_settings(&self) -> Result<AuthSettings, TokenError> {
        Ok(AuthSettings::new(TokenSecret::new(self.jwt_secret.as_bytes())?)
            .with_token_ttl(SignedDuration::from_secs(i64::from(self.jwt_ttl_seconds)))
            .with_bcrypt_cost(self.bcrypt_cost))
    }
}

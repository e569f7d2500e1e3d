//! Auth service.

use std::sync::Arc;

use async_trait::async_trait;
use mockall::automock;
use tokio::sync::OnceCell;
use tracing::debug;

use crate::{
    auth::{
        AuthServiceError, AuthSettings, IssuedToken, PasswordHasher, Principal, TokenError,
        TokenIssuer,
    },
    database::Db,
    domain::users::repository::PgUsersRepository,
};

const DECOY_PASSWORD: &str = "storefront-decoy-password";

#[derive(Debug, Clone)]
pub struct PgAuthService {
    db: Db,
    repository: PgUsersRepository,
    passwords: PasswordHasher,
    tokens: TokenIssuer,
    decoy_hash: Arc<OnceCell<String>>,
}

impl PgAuthService {
    /// # Errors
    ///
    /// Returns an error if the configured token lifetime is not positive.
    pub fn new(db: Db, settings: &AuthSettings) -> Result<Self, TokenError> {
        Ok(Self {
            db,
            repository: PgUsersRepository::new(),
            passwords: PasswordHasher::new(settings.bcrypt_cost),
            tokens: TokenIssuer::new(&settings.secret, settings.token_ttl)?,
            decoy_hash: Arc::new(OnceCell::new()),
        })
    }

    /// Runs a bcrypt verify at the configured cost against a throwaway hash,
    /// so an unknown username costs as much as a wrong password.
    async fn verify_decoy(&self, password: &str) -> Result<(), AuthServiceError> {
        let decoy_hash = self
            .decoy_hash
            .get_or_try_init(|| self.passwords.hash(DECOY_PASSWORD))
            .await?;

        self.passwords.verify(password, decoy_hash).await?;

        Ok(())
    }
}

#[async_trait]
impl AuthService for PgAuthService {
    async fn authenticate(
        &self,
        username: &str,
        password: &str,
    ) -> Result<IssuedToken, AuthServiceError> {
        let mut tx = self.db.begin().await?;

        let user = self
            .repository
            .find_user_by_username(&mut tx, username)
            .await?;

        tx.commit().await?;

        let Some(user) = user else {
            self.verify_decoy(password).await?;

            debug!(username, "login for unknown user");
            return Err(AuthServiceError::InvalidCredentials);
        };

        if !self.passwords.verify(password, &user.password_hash).await? {
            debug!(username, "login with wrong password");
            return Err(AuthServiceError::InvalidCredentials);
        }

        if !user.enabled {
            debug!(username, "login for disabled user");
            return Err(AuthServiceError::InvalidCredentials);
        }

        let issued = self.tokens.issue(&Principal {
            username: user.username,
            role: user.role,
        })?;

        Ok(issued)
    }

    fn verify_token(&self, token: &str) -> Result<Principal, AuthServiceError> {
        Ok(self.tokens.verify(token)?)
    }
}

#[automock]
#[async_trait]
pub trait AuthService: Send + Sync {
    /// Check credentials and issue a signed token.
    async fn authenticate(
        &self,
        username: &str,
        password: &str,
    ) -> Result<IssuedToken, AuthServiceError>;

    /// Resolve a presented token into the principal it was issued for.
    fn verify_token(&self, token: &str) -> Result<Principal, AuthServiceError>;
}

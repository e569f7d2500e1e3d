//! App Context

use std::sync::Arc;

use thiserror::Error;

use crate::{
    auth::{AuthService, AuthSettings, PasswordHasher, PgAuthService, TokenError},
    database::{self, Db},
    domain::{
        products::{PgProductsService, ProductsService},
        transactions::{PgTransactionsService, TransactionsService},
        users::{PgUsersService, UsersService},
    },
};

#[derive(Debug, Error)]
pub enum AppInitError {
    #[error("failed to connect to database")]
    Database(#[source] sqlx::Error),

    #[error("invalid auth settings")]
    Auth(#[source] TokenError),
}

#[derive(Clone)]
pub struct AppContext {
    pub users: Arc<dyn UsersService>,
    pub products: Arc<dyn ProductsService>,
    pub transactions: Arc<dyn TransactionsService>,
    pub auth: Arc<dyn AuthService>,
}

impl AppContext {
    /// Build application context from a database URL.
    ///
    /// # Errors
    ///
    /// Returns an error when establishing a database connection fails or the
    /// auth settings are unusable.
    pub async fn from_database_url(
        url: &str,
        max_connections: u32,
        auth: &AuthSettings,
    ) -> Result<Self, AppInitError> {
        let pool = database::connect(url, max_connections)
            .await
            .map_err(AppInitError::Database)?;

        Self::from_db(Db::new(pool), auth)
    }

    /// Build application context over an existing pool.
    ///
    /// # Errors
    ///
    /// Returns an error when the auth settings are unusable.
    pub fn from_db(db: Db, auth: &AuthSettings) -> Result<Self, AppInitError> {
        let auth_service = PgAuthService::new(db.clone(), auth).map_err(AppInitError::Auth)?;

        Ok(Self {
            users: Arc::new(PgUsersService::new(
                db.clone(),
                PasswordHasher::new(auth.bcrypt_cost),
            )),
            products: Arc::new(PgProductsService::new(db.clone())),
            transactions: Arc::new(PgTransactionsService::new(db)),
            auth: Arc::new(auth_service),
        })
    }
}

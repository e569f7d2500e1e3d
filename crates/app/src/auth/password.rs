//! Password hashing.

use thiserror::Error;
use tokio::task::{self, JoinError};

/// Default bcrypt work factor.
pub const DEFAULT_BCRYPT_COST: u32 = 10;

#[derive(Debug, Error)]
pub enum PasswordError {
    #[error("bcrypt failure")]
    Bcrypt(#[from] bcrypt::BcryptError),

    #[error("password hashing task failed")]
    Join(#[from] JoinError),
}

/// Salted, adaptive password hasher.
///
/// bcrypt is CPU bound, so both operations run on the blocking pool.
#[derive(Debug, Clone, Copy)]
pub struct PasswordHasher {
    cost: u32,
}

impl PasswordHasher {
    #[must_use]
    pub const fn new(cost: u32) -> Self {
        Self { cost }
    }

    #[must_use]
    pub const fn cost(&self) -> u32 {
        self.cost
    }

    /// Hash a plain-text password with a fresh salt.
    ///
    /// # Errors
    ///
    /// Returns an error if the cost is out of range or the blocking task panics.
    pub async fn hash(&self, password: &str) -> Result<String, PasswordError> {
        let cost = self.cost;
        let password = password.to_owned();

        let hash = task::spawn_blocking(move || bcrypt::hash(password, cost)).await??;

        Ok(hash)
    }

    /// Check a plain-text password against a stored hash.
    ///
    /// A malformed stored hash is reported as an error rather than a mismatch.
    ///
    /// # Errors
    ///
    /// Returns an error if the hash cannot be parsed or the blocking task panics.
    pub async fn verify(&self, password: &str, hash: &str) -> Result<bool, PasswordError> {
        let password = password.to_owned();
        let hash = hash.to_owned();

        let matches = task::spawn_blocking(move || bcrypt::verify(password, &hash)).await??;

        Ok(matches)
    }
}

impl Default for PasswordHasher {
    fn default() -> Self {
        Self::new(DEFAULT_BCRYPT_COST)
    }
}

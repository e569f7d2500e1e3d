//! Users service.

use async_trait::async_trait;
use jiff::Timestamp;
use mockall::automock;
use tracing::debug;

use crate::{
    auth::PasswordHasher,
    database::Db,
    domain::users::{
        data::{NewUser, UserUpdate},
        errors::UsersServiceError,
        records::{Role, UserId, UserRecord},
        repository::{PgUsersRepository, UserRow},
    },
};

#[derive(Debug, Clone)]
pub struct PgUsersService {
    db: Db,
    repository: PgUsersRepository,
    passwords: PasswordHasher,
}

impl PgUsersService {
    #[must_use]
    pub fn new(db: Db, passwords: PasswordHasher) -> Self {
        Self {
            db,
            repository: PgUsersRepository::new(),
            passwords,
        }
    }
}

#[async_trait]
impl UsersService for PgUsersService {
    async fn register_user(&self, user: NewUser) -> Result<UserRecord, UsersServiceError> {
        let mut tx = self.db.begin().await?;

        if self
            .repository
            .username_exists(&mut tx, &user.username, None)
            .await?
        {
            debug!(username = %user.username, "username already registered");
            return Err(UsersServiceError::AlreadyExists);
        }

        if self
            .repository
            .email_exists(&mut tx, &user.email, None)
            .await?
        {
            debug!(username = %user.username, "email already registered");
            return Err(UsersServiceError::AlreadyExists);
        }

        let role = match user.role.as_deref() {
            Some(role) => role.parse::<Role>()?,
            None => Role::User,
        };

        let password_hash = self.passwords.hash(&user.password).await?;

        let created = self
            .repository
            .create_user(
                &mut tx,
                UserRow {
                    username: &user.username,
                    email: &user.email,
                    password_hash: &password_hash,
                    role,
                },
                Timestamp::now(),
            )
            .await?;

        tx.commit().await?;

        Ok(created)
    }

    async fn get_user(&self, user: UserId) -> Result<UserRecord, UsersServiceError> {
        let mut tx = self.db.begin().await?;

        let user = self.repository.get_user(&mut tx, user).await?;

        tx.commit().await?;

        Ok(user)
    }

    async fn find_user_by_username(
        &self,
        username: &str,
    ) -> Result<Option<UserRecord>, UsersServiceError> {
        let mut tx = self.db.begin().await?;

        let user = self
            .repository
            .find_user_by_username(&mut tx, username)
            .await?;

        tx.commit().await?;

        Ok(user)
    }

    async fn list_users(&self) -> Result<Vec<UserRecord>, UsersServiceError> {
        let mut tx = self.db.begin().await?;

        let users = self.repository.list_users(&mut tx).await?;

        tx.commit().await?;

        Ok(users)
    }

    async fn update_user(
        &self,
        user: UserId,
        update: UserUpdate,
    ) -> Result<UserRecord, UsersServiceError> {
        let mut tx = self.db.begin().await?;

        let existing = self.repository.get_user(&mut tx, user).await?;

        if let Some(username) = update.username.as_deref()
            && username != existing.username
            && self
                .repository
                .username_exists(&mut tx, username, Some(user))
                .await?
        {
            return Err(UsersServiceError::AlreadyExists);
        }

        if let Some(email) = update.email.as_deref()
            && email != existing.email
            && self
                .repository
                .email_exists(&mut tx, email, Some(user))
                .await?
        {
            return Err(UsersServiceError::AlreadyExists);
        }

        let role = match update.role.as_deref() {
            Some(role) => role.parse::<Role>()?,
            None => existing.role,
        };

        let password_hash = match update.password.as_deref() {
            Some(password) => self.passwords.hash(password).await?,
            None => existing.password_hash,
        };

        let updated = self
            .repository
            .update_user(
                &mut tx,
                user,
                UserRow {
                    username: update.username.as_deref().unwrap_or(&existing.username),
                    email: update.email.as_deref().unwrap_or(&existing.email),
                    password_hash: &password_hash,
                    role,
                },
                Timestamp::now(),
            )
            .await?;

        tx.commit().await?;

        Ok(updated)
    }

    async fn delete_user(&self, user: UserId) -> Result<(), UsersServiceError> {
        let mut tx = self.db.begin().await?;

        let rows_affected = self.repository.delete_user(&mut tx, user).await?;

        if rows_affected == 0 {
            return Err(UsersServiceError::NotFound);
        }

        tx.commit().await?;

        Ok(())
    }
}

#[automock]
#[async_trait]
pub trait UsersService: Send + Sync {
    /// Registers a new, enabled user with a hashed password.
    async fn register_user(&self, user: NewUser) -> Result<UserRecord, UsersServiceError>;

    /// Retrieve a single user.
    async fn get_user(&self, user: UserId) -> Result<UserRecord, UsersServiceError>;

    /// Look a user up by username.
    async fn find_user_by_username(
        &self,
        username: &str,
    ) -> Result<Option<UserRecord>, UsersServiceError>;

    /// Retrieves all users.
    async fn list_users(&self) -> Result<Vec<UserRecord>, UsersServiceError>;

    /// Applies a partial update to a user.
    async fn update_user(
        &self,
        user: UserId,
        update: UserUpdate,
    ) -> Result<UserRecord, UsersServiceError>;

    /// Deletes a user.
    async fn delete_user(&self, user: UserId) -> Result<(), UsersServiceError>;
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use crate::test::{TestContext, helpers::new_user};

    use super::*;

    #[tokio::test]
    async fn register_user_persists_enabled_user_with_hashed_password() -> TestResult {
        let ctx = TestContext::new().await;

        let user = ctx
            .users
            .register_user(NewUser {
                role: Some("SELLER".to_string()),
                ..new_user("sam", "sam@example.com", "hunter22")
            })
            .await?;

        assert_eq!(user.username, "sam");
        assert_eq!(user.email, "sam@example.com");
        assert_eq!(user.role, Role::Seller);
        assert!(user.enabled);
        assert_ne!(user.password_hash, "hunter22");
        assert!(user.password_hash.starts_with("$2"), "expected a bcrypt hash");

        Ok(())
    }

    #[tokio::test]
    async fn register_user_without_role_defaults_to_user() -> TestResult {
        let ctx = TestContext::new().await;

        let user = ctx
            .users
            .register_user(new_user("uma", "uma@example.com", "pw"))
            .await?;

        assert_eq!(user.role, Role::User);

        Ok(())
    }

    #[tokio::test]
    async fn register_user_accepts_prefixed_role() -> TestResult {
        let ctx = TestContext::new().await;

        let user = ctx
            .users
            .register_user(NewUser {
                role: Some("ROLE_ADMIN".to_string()),
                ..new_user("ada", "ada@example.com", "pw")
            })
            .await?;

        assert_eq!(user.role, Role::Admin);

        Ok(())
    }

    #[tokio::test]
    async fn register_user_duplicate_username_returns_already_exists() -> TestResult {
        let ctx = TestContext::new().await;

        ctx.users
            .register_user(new_user("sam", "sam@example.com", "pw"))
            .await?;

        let result = ctx
            .users
            .register_user(new_user("sam", "other@example.com", "pw"))
            .await;

        assert!(
            matches!(result, Err(UsersServiceError::AlreadyExists)),
            "expected AlreadyExists, got {result:?}"
        );
        assert_eq!(ctx.users.list_users().await?.len(), 1);

        Ok(())
    }

    #[tokio::test]
    async fn register_user_duplicate_email_returns_already_exists() -> TestResult {
        let ctx = TestContext::new().await;

        ctx.users
            .register_user(new_user("sam", "sam@example.com", "pw"))
            .await?;

        let result = ctx
            .users
            .register_user(new_user("samuel", "sam@example.com", "pw"))
            .await;

        assert!(
            matches!(result, Err(UsersServiceError::AlreadyExists)),
            "expected AlreadyExists, got {result:?}"
        );
        assert_eq!(ctx.users.list_users().await?.len(), 1);

        Ok(())
    }

    #[tokio::test]
    async fn register_user_unknown_role_returns_invalid_role() -> TestResult {
        let ctx = TestContext::new().await;

        let result = ctx
            .users
            .register_user(NewUser {
                role: Some("INVALID_ROLE".to_string()),
                ..new_user("sam", "sam@example.com", "pw")
            })
            .await;

        assert!(
            matches!(result, Err(UsersServiceError::InvalidRole(_))),
            "expected InvalidRole, got {result:?}"
        );
        assert!(ctx.users.list_users().await?.is_empty());

        Ok(())
    }

    #[tokio::test]
    async fn get_user_returns_registered_user() -> TestResult {
        let ctx = TestContext::new().await;

        let created = ctx
            .users
            .register_user(new_user("sam", "sam@example.com", "pw"))
            .await?;

        let user = ctx.users.get_user(created.id).await?;

        assert_eq!(user, created);

        Ok(())
    }

    #[tokio::test]
    async fn get_user_unknown_id_returns_not_found() {
        let ctx = TestContext::new().await;

        let result = ctx.users.get_user(UserId::from_i64(999)).await;

        assert!(
            matches!(result, Err(UsersServiceError::NotFound)),
            "expected NotFound, got {result:?}"
        );
    }

    #[tokio::test]
    async fn find_user_by_username_returns_none_when_absent() -> TestResult {
        let ctx = TestContext::new().await;

        ctx.users
            .register_user(new_user("sam", "sam@example.com", "pw"))
            .await?;

        assert!(ctx.users.find_user_by_username("sam").await?.is_some());
        assert!(ctx.users.find_user_by_username("nobody").await?.is_none());

        Ok(())
    }

    #[tokio::test]
    async fn list_users_returns_users_in_id_order() -> TestResult {
        let ctx = TestContext::new().await;

        let a = ctx
            .users
            .register_user(new_user("a", "a@example.com", "pw"))
            .await?;
        let b = ctx
            .users
            .register_user(new_user("b", "b@example.com", "pw"))
            .await?;

        let ids: Vec<UserId> = ctx.users.list_users().await?.iter().map(|u| u.id).collect();

        assert_eq!(ids, vec![a.id, b.id]);

        Ok(())
    }

    #[tokio::test]
    async fn update_user_keeps_fields_left_unset() -> TestResult {
        let ctx = TestContext::new().await;

        let created = ctx
            .users
            .register_user(new_user("sam", "sam@example.com", "pw"))
            .await?;

        let updated = ctx
            .users
            .update_user(
                created.id,
                UserUpdate {
                    email: Some("samuel@example.com".to_string()),
                    ..UserUpdate::default()
                },
            )
            .await?;

        assert_eq!(updated.username, "sam");
        assert_eq!(updated.email, "samuel@example.com");
        assert_eq!(updated.password_hash, created.password_hash);
        assert_eq!(updated.role, Role::User);

        Ok(())
    }

    #[tokio::test]
    async fn update_user_rehashes_new_password() -> TestResult {
        let ctx = TestContext::new().await;

        let created = ctx
            .users
            .register_user(new_user("sam", "sam@example.com", "old-password"))
            .await?;

        let updated = ctx
            .users
            .update_user(
                created.id,
                UserUpdate {
                    password: Some("new-password".to_string()),
                    role: Some("SELLER".to_string()),
                    ..UserUpdate::default()
                },
            )
            .await?;

        assert_ne!(updated.password_hash, created.password_hash);
        assert_ne!(updated.password_hash, "new-password");
        assert_eq!(updated.role, Role::Seller);

        Ok(())
    }

    #[tokio::test]
    async fn update_user_to_own_email_is_allowed() -> TestResult {
        let ctx = TestContext::new().await;

        let created = ctx
            .users
            .register_user(new_user("sam", "sam@example.com", "pw"))
            .await?;

        let updated = ctx
            .users
            .update_user(
                created.id,
                UserUpdate {
                    email: Some("sam@example.com".to_string()),
                    username: Some("sam".to_string()),
                    ..UserUpdate::default()
                },
            )
            .await?;

        assert_eq!(updated.email, "sam@example.com");

        Ok(())
    }

    #[tokio::test]
    async fn update_user_email_taken_by_other_returns_already_exists() -> TestResult {
        let ctx = TestContext::new().await;

        ctx.users
            .register_user(new_user("a", "a@example.com", "pw"))
            .await?;
        let b = ctx
            .users
            .register_user(new_user("b", "b@example.com", "pw"))
            .await?;

        let result = ctx
            .users
            .update_user(
                b.id,
                UserUpdate {
                    email: Some("a@example.com".to_string()),
                    ..UserUpdate::default()
                },
            )
            .await;

        assert!(
            matches!(result, Err(UsersServiceError::AlreadyExists)),
            "expected AlreadyExists, got {result:?}"
        );
        assert_eq!(ctx.users.get_user(b.id).await?.email, "b@example.com");

        Ok(())
    }

    #[tokio::test]
    async fn update_user_unknown_role_returns_invalid_role() -> TestResult {
        let ctx = TestContext::new().await;

        let created = ctx
            .users
            .register_user(new_user("sam", "sam@example.com", "pw"))
            .await?;

        let result = ctx
            .users
            .update_user(
                created.id,
                UserUpdate {
                    role: Some("SUPERUSER".to_string()),
                    ..UserUpdate::default()
                },
            )
            .await;

        assert!(
            matches!(result, Err(UsersServiceError::InvalidRole(_))),
            "expected InvalidRole, got {result:?}"
        );

        Ok(())
    }

    #[tokio::test]
    async fn update_user_unknown_id_returns_not_found() {
        let ctx = TestContext::new().await;

        let result = ctx
            .users
            .update_user(UserId::from_i64(999), UserUpdate::default())
            .await;

        assert!(
            matches!(result, Err(UsersServiceError::NotFound)),
            "expected NotFound, got {result:?}"
        );
    }

    #[tokio::test]
    async fn delete_user_makes_it_not_found() -> TestResult {
        let ctx = TestContext::new().await;

        let created = ctx
            .users
            .register_user(new_user("sam", "sam@example.com", "pw"))
            .await?;

        ctx.users.delete_user(created.id).await?;

        let result = ctx.users.get_user(created.id).await;

        assert!(
            matches!(result, Err(UsersServiceError::NotFound)),
            "expected NotFound after deletion, got {result:?}"
        );

        Ok(())
    }

    #[tokio::test]
    async fn delete_user_unknown_id_returns_not_found() -> TestResult {
        let ctx = TestContext::new().await;

        ctx.users
            .register_user(new_user("sam", "sam@example.com", "pw"))
            .await?;

        let result = ctx.users.delete_user(UserId::from_i64(999)).await;

        assert!(
            matches!(result, Err(UsersServiceError::NotFound)),
            "expected NotFound, got {result:?}"
        );
        assert_eq!(ctx.users.list_users().await?.len(), 1);

        Ok(())
    }

    #[tokio::test]
    async fn delete_user_with_products_returns_invalid_reference() -> TestResult {
        let ctx = TestContext::new().await;

        let seller = ctx.create_seller("sam").await;
        ctx.create_product(&seller, "Lamp", "19.99").await;

        let result = ctx.users.delete_user(seller.id).await;

        assert!(
            matches!(result, Err(UsersServiceError::InvalidReference)),
            "expected InvalidReference, got {result:?}"
        );

        Ok(())
    }
}

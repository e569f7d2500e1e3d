//! Request principal and role guards.

use salvo::prelude::{Depot, StatusError};
use storefront_app::{auth::Principal, domain::users::records::Role};

pub(crate) trait PrincipalExt {
    fn insert_principal(&mut self, principal: Principal) -> &mut Self;

    fn principal(&self) -> Option<&Principal>;

    /// The authenticated principal, or 401.
    fn principal_or_401(&self) -> Result<&Principal, StatusError>;

    /// The authenticated principal if it holds one of `roles`; 401 when
    /// unauthenticated, 403 otherwise.
    fn require_any_role(&self, roles: &[Role]) -> Result<&Principal, StatusError>;
}

impl PrincipalExt for Depot {
    fn insert_principal(&mut self, principal: Principal) -> &mut Self {
        self.inject(principal)
    }

    fn principal(&self) -> Option<&Principal> {
        self.obtain::<Principal>().ok()
    }

    fn principal_or_401(&self) -> Result<&Principal, StatusError> {
        self.principal()
            .ok_or_else(|| StatusError::unauthorized().brief("Authentication required"))
    }

    fn require_any_role(&self, roles: &[Role]) -> Result<&Principal, StatusError> {
        let principal = self.principal_or_401()?;

        if !principal.has_any_role(roles) {
            return Err(StatusError::forbidden().brief("Insufficient role"));
        }

        Ok(principal)
    }
}

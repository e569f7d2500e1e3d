//! Get User Handler

use std::sync::Arc;

use salvo::{
    oapi::{ToSchema, extract::PathParam},
    prelude::*,
};
use serde::{Deserialize, Serialize};

use storefront_app::domain::users::records::{Role, UserRecord};

use crate::{extensions::*, state::State, users::errors::into_status_error};

/// Public view of a user; the password hash never leaves the service.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct UserResponse {
    pub id: i64,
    pub username: String,
    pub email: String,

    /// USER, SELLER or ADMIN
    #[salvo(schema(value_type = String))]
    pub role: Role,

    pub enabled: bool,
    pub created_at: String,
    pub updated_at: String,
}

impl From<UserRecord> for UserResponse {
    fn from(user: UserRecord) -> Self {
        UserResponse {
            id: user.id.into_i64(),
            username: user.username,
            email: user.email,
            role: user.role,
            enabled: user.enabled,
            created_at: user.created_at.to_string(),
            updated_at: user.updated_at.to_string(),
        }
    }
}

/// Get User Handler
#[endpoint(
    tags("users"),
    summary = "Get User",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "User found"),
        (status_code = StatusCode::UNAUTHORIZED, description = "Authentication required"),
        (status_code = StatusCode::NOT_FOUND, description = "User not found"),
    ),
)]
pub(crate) async fn handler(
    id: PathParam<i64>,
    depot: &mut Depot,
) -> Result<Json<UserResponse>, StatusError> {
    depot.principal_or_401()?;

    let state = depot.obtain_or_500::<Arc<State>>()?;

    let user = state
        .app
        .users
        .get_user(id.into_inner().into())
        .await
        .map_err(into_status_error)?;

    Ok(Json(user.into()))
}

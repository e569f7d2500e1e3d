//! Update User Handler

use std::{fmt, sync::Arc};

use salvo::{
    oapi::{
        ToSchema,
        extract::{JsonBody, PathParam},
    },
    prelude::*,
};
use serde::{Deserialize, Serialize};

use storefront_app::domain::users::data::UserUpdate;

use crate::{
    extensions::*,
    state::State,
    users::{errors::into_status_error, get::UserResponse},
};

/// Update User Request
///
/// Omitted fields keep their stored value.
#[derive(Default, Serialize, Deserialize, ToSchema)]
#[serde(default)]
pub(crate) struct UpdateUserRequest {
    pub username: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
    pub role: Option<String>,
}

impl fmt::Debug for UpdateUserRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UpdateUserRequest")
            .field("username", &self.username)
            .field("email", &self.email)
            .field("password", &self.password.as_ref().map(|_| "**redacted**"))
            .field("role", &self.role)
            .finish()
    }
}

impl From<UpdateUserRequest> for UserUpdate {
    fn from(request: UpdateUserRequest) -> Self {
        UserUpdate {
            username: request.username,
            email: request.email,
            password: request.password,
            role: request.role,
        }
    }
}

/// Update User Handler
///
/// Any authenticated caller may update any user, including the password and
/// role. There is no ownership or admin check.
#[endpoint(
    tags("users"),
    summary = "Update User",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "User updated"),
        (status_code = StatusCode::UNAUTHORIZED, description = "Authentication required"),
        (status_code = StatusCode::NOT_FOUND, description = "User not found"),
        (status_code = StatusCode::CONFLICT, description = "Username or email already in use"),
        (status_code = StatusCode::BAD_REQUEST, description = "Unknown role or invalid payload"),
    ),
)]
#[tracing::instrument(
    name = "users.update",
    skip(id, json, depot),
    fields(user_id = tracing::field::Empty, username = tracing::field::Empty),
    err
)]
pub(crate) async fn handler(
    id: PathParam<i64>,
    json: JsonBody<UpdateUserRequest>,
    depot: &mut Depot,
) -> Result<Json<UserResponse>, StatusError> {
    let caller = depot.principal_or_401()?.username.clone();
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let id = id.into_inner();

    let span = tracing::Span::current();

    span.record("user_id", id);
    span.record("username", caller.as_str());

    let user = state
        .app
        .users
        .update_user(id.into(), json.into_inner().into())
        .await
        .map_err(into_status_error)?;

    Ok(Json(user.into()))
}

//! Find User By Username Handler

use std::sync::Arc;

use salvo::{oapi::extract::PathParam, prelude::*};

use crate::{
    extensions::*,
    state::State,
    users::{errors::into_status_error, get::UserResponse},
};

/// Find User By Username Handler
#[endpoint(
    tags("users"),
    summary = "Find User By Username",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "User found"),
        (status_code = StatusCode::UNAUTHORIZED, description = "Authentication required"),
        (status_code = StatusCode::NOT_FOUND, description = "User not found"),
    ),
)]
pub(crate) async fn handler(
    username: PathParam<String>,
    depot: &mut Depot,
) -> Result<Json<UserResponse>, StatusError> {
    depot.principal_or_401()?;

    let state = depot.obtain_or_500::<Arc<State>>()?;

    let user = state
        .app
        .users
        .find_user_by_username(&username.into_inner())
        .await
        .map_err(into_status_error)?
        .ok_or_else(|| StatusError::not_found().brief("User not found"))?;

    Ok(Json(user.into()))
}

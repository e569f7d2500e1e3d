//! Delete Transaction Handler

use std::sync::Arc;

use salvo::{oapi::extract::PathParam, prelude::*};

use crate::{extensions::*, state::State, transactions::errors::into_status_error};

/// Delete Transaction Handler
#[endpoint(
    tags("transactions"),
    summary = "Delete Transaction",
    responses(
        (status_code = StatusCode::NO_CONTENT, description = "Transaction deleted"),
        (status_code = StatusCode::NOT_FOUND, description = "Transaction not found"),
    ),
)]
pub(crate) async fn handler(
    id: PathParam<i64>,
    depot: &mut Depot,
) -> Result<StatusCode, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    state
        .app
        .transactions
        .delete_transaction(id.into_inner().into())
        .await
        .map_err(into_status_error)?;

    Ok(StatusCode::NO_CONTENT)
}

//! Update Transaction Handler

use std::sync::Arc;

use salvo::{
    oapi::extract::{JsonBody, PathParam},
    prelude::*,
};

use crate::{
    extensions::*,
    state::State,
    transactions::{create::TransactionRequest, errors::into_status_error, get::TransactionResponse},
};

/// Update Transaction Handler
///
/// Re-prices the transaction from the product's current price and moves its
/// timestamp to now.
#[endpoint(
    tags("transactions"),
    summary = "Update Transaction",
    responses(
        (status_code = StatusCode::OK, description = "Transaction updated"),
        (status_code = StatusCode::NOT_FOUND, description = "Transaction or product not found"),
        (status_code = StatusCode::BAD_REQUEST, description = "Unknown user or non-positive quantity"),
    ),
)]
#[tracing::instrument(
    name = "transactions.update",
    skip(id, json, depot),
    fields(transaction_id = tracing::field::Empty, quantity = tracing::field::Empty),
    err
)]
pub(crate) async fn handler(
    id: PathParam<i64>,
    json: JsonBody<TransactionRequest>,
    depot: &mut Depot,
) -> Result<Json<TransactionResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let request = json.into_inner();
    let id = id.into_inner();

    let span = tracing::Span::current();

    span.record("transaction_id", id);
    span.record("quantity", request.quantity);

    let transaction = state
        .app
        .transactions
        .update_transaction(id.into(), request.into())
        .await
        .map_err(into_status_error)?;

    Ok(Json(transaction.into()))
}

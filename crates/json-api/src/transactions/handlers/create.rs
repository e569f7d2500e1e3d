//! Create Transaction Handler

use std::sync::Arc;

use salvo::{
    http::header::LOCATION,
    oapi::{ToSchema, extract::JsonBody},
    prelude::*,
};
use serde::{Deserialize, Serialize};

use storefront_app::domain::transactions::data::{NewTransaction, TransactionUpdate};

use crate::{
    extensions::*,
    state::State,
    transactions::{errors::into_status_error, get::TransactionResponse},
};

/// Transaction Request
///
/// The total is always derived from the product's current price.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct TransactionRequest {
    pub user_id: i64,
    pub product_id: i64,
    pub quantity: i32,
}

impl From<TransactionRequest> for NewTransaction {
    fn from(request: TransactionRequest) -> Self {
        NewTransaction {
            user_id: request.user_id.into(),
            product_id: request.product_id.into(),
            quantity: request.quantity,
        }
    }
}

impl From<TransactionRequest> for TransactionUpdate {
    fn from(request: TransactionRequest) -> Self {
        TransactionUpdate {
            user_id: request.user_id.into(),
            product_id: request.product_id.into(),
            quantity: request.quantity,
        }
    }
}

/// Create Transaction Handler
#[endpoint(
    tags("transactions"),
    summary = "Create Transaction",
    responses(
        (status_code = StatusCode::CREATED, description = "Transaction recorded"),
        (status_code = StatusCode::NOT_FOUND, description = "Product not found"),
        (status_code = StatusCode::BAD_REQUEST, description = "Unknown user or non-positive quantity"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    json: JsonBody<TransactionRequest>,
    depot: &mut Depot,
    res: &mut Response,
) -> Result<Json<TransactionResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let transaction = state
        .app
        .transactions
        .create_transaction(json.into_inner().into())
        .await
        .map_err(into_status_error)?;

    res.add_header(LOCATION, format!("/api/transactions/{}", transaction.id), true)
        .or_500("failed to set location header")?
        .status_code(StatusCode::CREATED);

    Ok(Json(transaction.into()))
}

//! Get Transaction Handler

use std::sync::Arc;

use rust_decimal::Decimal;
use salvo::{
    oapi::{ToSchema, extract::PathParam},
    prelude::*,
};
use serde::{Deserialize, Serialize};

use storefront_app::domain::transactions::records::TransactionRecord;

use crate::{extensions::*, state::State, transactions::errors::into_status_error};

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct TransactionResponse {
    pub id: i64,
    pub user_id: i64,
    pub product_id: i64,
    pub quantity: i32,

    /// Unit price times quantity, fixed when the transaction was last written
    #[salvo(schema(value_type = String))]
    pub total_price: Decimal,

    pub created_at: String,
}

impl From<TransactionRecord> for TransactionResponse {
    fn from(transaction: TransactionRecord) -> Self {
        TransactionResponse {
            id: transaction.id.into_i64(),
            user_id: transaction.user_id.into_i64(),
            product_id: transaction.product_id.into_i64(),
            quantity: transaction.quantity,
            total_price: transaction.total_price,
            created_at: transaction.created_at.to_string(),
        }
    }
}

/// Get Transaction Handler
#[endpoint(
    tags("transactions"),
    summary = "Get Transaction",
    responses(
        (status_code = StatusCode::OK, description = "Transaction found"),
        (status_code = StatusCode::NOT_FOUND, description = "Transaction not found"),
    ),
)]
pub(crate) async fn handler(
    id: PathParam<i64>,
    depot: &mut Depot,
) -> Result<Json<TransactionResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let transaction = state
        .app
        .transactions
        .get_transaction(id.into_inner().into())
        .await
        .map_err(into_status_error)?;

    Ok(Json(transaction.into()))
}

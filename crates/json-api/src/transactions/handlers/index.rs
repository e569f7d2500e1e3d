//! Transaction Index Handler

use std::sync::Arc;

use salvo::prelude::*;

use crate::{
    extensions::*,
    state::State,
    transactions::{errors::into_status_error, get::TransactionResponse},
};

/// Transaction Index Handler
///
/// Returns every recorded transaction, unpaginated.
#[endpoint(tags("transactions"), summary = "List Transactions")]
pub(crate) async fn handler(
    depot: &mut Depot,
) -> Result<Json<Vec<TransactionResponse>>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let transactions = state
        .app
        .transactions
        .list_transactions()
        .await
        .map_err(into_status_error)?;

    Ok(Json(transactions.into_iter().map(Into::into).collect()))
}

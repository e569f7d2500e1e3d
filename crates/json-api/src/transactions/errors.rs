//! Transaction Errors

use salvo::http::StatusError;
use tracing::error;

use storefront_app::domain::transactions::TransactionsServiceError;

pub(crate) fn into_status_error(error: TransactionsServiceError) -> StatusError {
    match error {
        TransactionsServiceError::AlreadyExists => {
            StatusError::conflict().brief("Transaction already exists")
        }
        TransactionsServiceError::NotFound => {
            StatusError::not_found().brief("Transaction not found")
        }
        TransactionsServiceError::ProductNotFound => {
            StatusError::not_found().brief("Product not found")
        }
        TransactionsServiceError::InvalidQuantity => {
            StatusError::bad_request().brief("Quantity must be positive")
        }
        TransactionsServiceError::InvalidReference => {
            StatusError::bad_request().brief("Unknown user")
        }
        TransactionsServiceError::MissingRequiredData | TransactionsServiceError::InvalidData => {
            StatusError::bad_request().brief("Invalid transaction payload")
        }
        TransactionsServiceError::Sql(source) => {
            error!("transaction storage failure: {source}");

            StatusError::internal_server_error()
        }
    }
}

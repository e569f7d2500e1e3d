//! Transaction Records

use jiff::Timestamp;
use rust_decimal::Decimal;

use crate::{
    domain::{products::records::ProductId, users::records::UserId},
    ids::TypedId,
};

/// Transaction Id
pub type TransactionId = TypedId<TransactionRecord>;

/// Transaction Record
///
/// `total_price` is fixed when the row is written and is only recomputed by an
/// explicit update.
#[derive(Debug, Clone, PartialEq)]
pub struct TransactionRecord {
    pub id: TransactionId,
    pub user_id: UserId,
    pub product_id: ProductId,
    pub quantity: i32,
    pub total_price: Decimal,
    pub created_at: Timestamp,
}

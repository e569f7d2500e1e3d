//! Transactions Data

use crate::domain::{products::records::ProductId, users::records::UserId};

/// New Transaction Data
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewTransaction {
    pub user_id: UserId,
    pub product_id: ProductId,
    pub quantity: i32,
}

/// Transaction Update Data
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransactionUpdate {
    pub user_id: UserId,
    pub product_id: ProductId,
    pub quantity: i32,
}

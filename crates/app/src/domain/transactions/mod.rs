//! Transactions

pub mod data;
pub mod errors;
pub mod pricing;
pub mod records;
mod repository;
pub mod service;

pub use errors::TransactionsServiceError;
pub use service::*;

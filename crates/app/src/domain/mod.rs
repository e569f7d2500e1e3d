//! Storefront Domain Concerns

pub mod products;
pub mod transactions;
pub mod users;

//! Product Handlers

pub(crate) mod by_category;
pub(crate) mod by_price_range;
pub(crate) mod create;
pub(crate) mod delete;
pub(crate) mod get;
pub(crate) mod index;
pub(crate) mod update;

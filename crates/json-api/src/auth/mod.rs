//! Authentication

pub(crate) mod errors;
pub(crate) mod middleware;

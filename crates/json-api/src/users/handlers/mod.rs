//! User Handlers

pub(crate) mod by_username;
pub(crate) mod delete;
pub(crate) mod get;
pub(crate) mod index;
pub(crate) mod login;
pub(crate) mod register;
pub(crate) mod update;

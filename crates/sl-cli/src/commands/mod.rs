//! CLI command implementations

pub(crate) mod common;
pub(crate) mod compute_pool;
pub(crate) mod connection;
pub(crate) mod ident;
pub(crate) mod object;
pub(crate) mod service;

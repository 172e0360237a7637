//! Request-scoped and application-wide models of the web layer.

pub mod auth;
pub mod config;
pub mod data_source;

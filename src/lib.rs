//! Countrylens library
//!
//! Exposes the aggregation pipeline (upstream clients, joiner, cache) and the
//! HTTP layer for use by the server binary and integration tests.

pub mod cache;
pub mod cli;
pub mod data;
pub mod query;
pub mod server;
pub mod timezone;

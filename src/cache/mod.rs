//! Aggregate cache for the merged country list
//!
//! Holds the most recent full merged snapshot in memory and serves it within
//! a validity window, refreshing from both upstreams otherwise.

pub mod store;

pub use store::AggregateCache;

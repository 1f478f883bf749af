//! Query entry points.
//!
//! # Responsibility
//! - Expose read-only filter/search/aggregation APIs over any repository.
//! - Keep result shaping inside core.

pub mod query;

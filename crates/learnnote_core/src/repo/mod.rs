//! Repository layer abstractions and storage implementations.
//!
//! # Responsibility
//! - Define the entry data access contract.
//! - Keep collection details away from service/query orchestration.
//!
//! # Invariants
//! - Repository APIs return semantic errors (`NotFound`) for id misses.
//! - Validation happens above this layer; the store accepts any draft.

pub mod entry_repo;

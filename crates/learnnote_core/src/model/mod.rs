//! Domain model for learning entries.
//!
//! # Responsibility
//! - Define the entry record and the draft shape callers submit.
//! - Own field-level validation rules.

pub mod entry;

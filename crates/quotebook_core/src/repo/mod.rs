//! Repository layer abstractions and persistence implementations.
//!
//! # Responsibility
//! - Define the quote storage contract.
//! - Isolate SQLite query details from service orchestration.
//!
//! # Invariants
//! - Repository APIs return semantic errors (`NotFound`) in addition to DB
//!   transport errors.

pub mod quote_repo;

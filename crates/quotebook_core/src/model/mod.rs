//! Quote domain model.
//!
//! # Responsibility
//! - Define the persisted quote record and its write/read projections.
//! - Model untyped request payloads as explicit tagged values.
//!
//! # Invariants
//! - Every quote is identified by a store-assigned `OrderNumber`.
//! - Deletion is a hard delete; there are no tombstones.

pub mod payload;
pub mod quote;

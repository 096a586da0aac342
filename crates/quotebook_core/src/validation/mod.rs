//! Write-payload validation.
//!
//! # Responsibility
//! - Decide whether a quote payload may be persisted.
//! - Report every failing field at once, one message per field.
//!
//! # See also
//! - `crate::model::payload` for value coercion rules.

pub mod quote_rules;

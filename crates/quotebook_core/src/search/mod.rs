//! Customer-name search helpers.
//!
//! # Responsibility
//! - Turn free search text into a typed name filter.
//! - Build `LIKE` patterns that match tokens as literal substrings.

pub mod name_filter;

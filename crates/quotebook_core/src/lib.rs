//! Core domain logic for Quotebook.
//! This crate is the single source of truth for quote invariants.

pub mod db;
pub mod logging;
pub mod model;
pub mod repo;
pub mod search;
pub mod service;
pub mod validation;

pub use logging::{default_log_level, init_logging, logging_status, LoggingError};
pub use model::payload::{FieldValue, QuotePayload};
pub use model::quote::{
    NewQuote, OrderNumber, PatchValue, Quote, QuoteField, QuotePatch, QuoteSummary,
};
pub use repo::quote_repo::{
    QuoteRepository, RepoError, RepoResult, SqliteQuoteRepository, AUTOCOMPLETE_LIMIT,
};
pub use search::name_filter::NameFilter;
pub use service::quote_service::{QuoteService, QuoteServiceError, ServiceResult};
pub use validation::quote_rules::{
    round_to_cents, validate_quote, FieldError, FieldErrors, ValidationMode,
};

/// Minimal health-check API for early integration.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::{core_version, ping};

    #[test]
    fn ping_returns_pong() {
        assert_eq!(ping(), "pong");
    }

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}

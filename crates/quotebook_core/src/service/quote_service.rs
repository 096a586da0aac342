//! Quote use-case service.
//!
//! # Responsibility
//! - Validate write payloads before delegating to the repository.
//! - Lift repository misses into a distinct `NotFound` outcome.
//! - Emit metadata-only diagnostic events for writes.
//!
//! # Invariants
//! - Nothing reaches the repository write path without passing validation.
//! - Service layer remains storage-agnostic.

use crate::model::payload::QuotePayload;
use crate::model::quote::{NewQuote, OrderNumber, Quote, QuoteSummary};
use crate::repo::quote_repo::{QuoteRepository, RepoError};
use crate::search::name_filter::NameFilter;
use crate::validation::quote_rules::{validate_quote, FieldError, FieldErrors, ValidationMode};
use log::{error, info, warn};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Service error for quote use-cases.
#[derive(Debug)]
pub enum QuoteServiceError {
    /// Payload rejected; every failing field is listed.
    Validation(FieldErrors),
    /// Target quote does not exist.
    NotFound(OrderNumber),
    /// Storage failure.
    Repo(RepoError),
}

impl Display for QuoteServiceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(errors) => write!(f, "{errors}"),
            Self::NotFound(order_number) => write!(f, "quote not found: {order_number}"),
            Self::Repo(err) => write!(f, "{err}"),
        }
    }
}

impl Error for QuoteServiceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(errors) => Some(errors),
            Self::NotFound(_) => None,
            Self::Repo(err) => Some(err),
        }
    }
}

impl From<RepoError> for QuoteServiceError {
    fn from(value: RepoError) -> Self {
        match value {
            RepoError::NotFound(order_number) => Self::NotFound(order_number),
            other => Self::Repo(other),
        }
    }
}

impl From<FieldErrors> for QuoteServiceError {
    fn from(value: FieldErrors) -> Self {
        Self::Validation(value)
    }
}

pub type ServiceResult<T> = Result<T, QuoteServiceError>;

/// Quote service facade over repository implementations.
pub struct QuoteService<R: QuoteRepository> {
    repo: R,
}

impl<R: QuoteRepository> QuoteService<R> {
    /// Creates a service using the provided repository implementation.
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Validates and persists a new quote.
    pub fn create_quote(&self, payload: &QuotePayload) -> ServiceResult<OrderNumber> {
        check_payload(payload, ValidationMode::Create)?;
        let quote = NewQuote::try_from(payload.to_patch()).map_err(|field| {
            let mut errors = FieldErrors::new();
            errors.insert(field, FieldError::Required);
            QuoteServiceError::Validation(errors)
        })?;

        let order_number = self
            .repo
            .create_quote(&quote)
            .map_err(|err| log_write_failure("quote_create", None, err))?;
        info!("event=quote_create module=service status=ok order_number={order_number}");
        Ok(order_number)
    }

    /// Gets one quote by order number.
    pub fn get_quote(&self, order_number: OrderNumber) -> ServiceResult<Quote> {
        Ok(self.repo.get_quote(order_number)?)
    }

    /// Lists quote summaries, optionally filtered by customer name.
    pub fn list_quotes(&self, search: Option<&str>) -> ServiceResult<Vec<QuoteSummary>> {
        Ok(self.repo.list_quotes(&NameFilter::parse(search))?)
    }

    /// Suggests customer names for type-ahead search.
    pub fn autocomplete(&self, term: &str) -> ServiceResult<Vec<String>> {
        Ok(self.repo.autocomplete_names(term)?)
    }

    /// Validates a payload and applies its supplied fields.
    ///
    /// Returns the affected row count; an unknown order number yields `0`.
    pub fn update_quote(
        &self,
        order_number: OrderNumber,
        payload: &QuotePayload,
    ) -> ServiceResult<usize> {
        check_payload(payload, ValidationMode::Update)?;
        let patch = payload.to_patch();
        let updated = self
            .repo
            .update_quote(order_number, &patch)
            .map_err(|err| log_write_failure("quote_update", Some(order_number), err))?;
        info!(
            "event=quote_update module=service status=ok order_number={order_number} updated={updated}"
        );
        Ok(updated)
    }

    /// Hard-deletes a quote and returns the affected row count.
    pub fn delete_quote(&self, order_number: OrderNumber) -> ServiceResult<usize> {
        let deleted = self
            .repo
            .delete_quote(order_number)
            .map_err(|err| log_write_failure("quote_delete", Some(order_number), err))?;
        info!(
            "event=quote_delete module=service status=ok order_number={order_number} deleted={deleted}"
        );
        Ok(deleted)
    }
}

fn check_payload(payload: &QuotePayload, mode: ValidationMode) -> ServiceResult<()> {
    let errors = validate_quote(payload, mode);
    if errors.is_empty() {
        return Ok(());
    }

    let fields = errors
        .fields()
        .map(|field| field.as_str())
        .collect::<Vec<_>>()
        .join(",");
    warn!(
        "event=quote_validate module=service status=rejected mode={} error_count={} fields={}",
        mode.as_str(),
        errors.len(),
        fields
    );
    Err(errors.into())
}

fn log_write_failure(
    event: &str,
    order_number: Option<OrderNumber>,
    err: RepoError,
) -> QuoteServiceError {
    let target = order_number.map_or_else(|| "new".to_string(), |value| value.to_string());
    error!("event={event} module=service status=error order_number={target} error={err}");
    err.into()
}

//! Field rules for quote payloads.
//!
//! # Responsibility
//! - Required-field, numeric and line-total consistency checks.
//! - Produce a field-keyed error map with user-facing messages.
//!
//! # Invariants
//! - Validation is pure and never fails fast.
//! - When several checks hit one field, the last one to run wins.
//! - The required set is the same for create and update.

use crate::model::payload::{FieldValue, QuotePayload};
use crate::model::quote::QuoteField;
use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};
use std::collections::BTreeMap;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Which write operation the payload is headed for.
///
/// Both modes currently check the full required set, so an update must carry
/// every field just like a create.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationMode {
    Create,
    Update,
}

impl ValidationMode {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Create => "create",
            Self::Update => "update",
        }
    }
}

/// Single field failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldError {
    Required,
    NotANumber,
    Negative,
    NotPositive,
    InconsistentTotal,
}

impl FieldError {
    /// User-facing message.
    pub fn message(self) -> &'static str {
        match self {
            Self::Required => "campo obbligatorio",
            Self::NotANumber => "deve essere un numero",
            Self::Negative => "non può essere negativo",
            Self::NotPositive => "deve essere maggiore di 0",
            Self::InconsistentTotal => "non coerente con quantità × prezzo unitario",
        }
    }
}

impl Display for FieldError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.message())
    }
}

/// Field-keyed validation result. Empty means valid.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldErrors {
    errors: BTreeMap<QuoteField, FieldError>,
}

impl FieldErrors {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records `error` for `field`, replacing any earlier error on it.
    pub fn insert(&mut self, field: QuoteField, error: FieldError) {
        self.errors.insert(field, error);
    }

    pub fn get(&self, field: QuoteField) -> Option<FieldError> {
        self.errors.get(&field).copied()
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    /// Failing fields in column order.
    pub fn fields(&self) -> impl Iterator<Item = QuoteField> + '_ {
        self.errors.keys().copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (QuoteField, FieldError)> + '_ {
        self.errors.iter().map(|(field, error)| (*field, *error))
    }
}

impl Display for FieldErrors {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "invalid quote payload:")?;
        for (index, (field, error)) in self.iter().enumerate() {
            let separator = if index == 0 { " " } else { "; " };
            write!(f, "{separator}{field}: {error}")?;
        }
        Ok(())
    }
}

impl Error for FieldErrors {}

/// Serializes as `{ "<field>": "<message>", ... }`.
impl Serialize for FieldErrors {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.errors.len()))?;
        for (field, error) in self.iter() {
            map.serialize_entry(field.as_str(), error.message())?;
        }
        map.end()
    }
}

/// Validates a quote payload for the given write mode.
///
/// `_mode` does not narrow the required set; see [`ValidationMode`].
pub fn validate_quote(payload: &QuotePayload, _mode: ValidationMode) -> FieldErrors {
    let mut errors = FieldErrors::new();

    for field in QuoteField::ALL {
        if payload.get(field).is_blank() {
            errors.insert(field, FieldError::Required);
        }
    }

    for field in QuoteField::NUMERIC {
        if let Some(error) = check_numeric(field, payload.get(field)) {
            errors.insert(field, error);
        }
    }

    if let Some(error) = check_line_total(payload) {
        errors.insert(QuoteField::TotalPrice, error);
    }

    errors
}

/// Rounds to two decimal places, halves away from zero.
///
/// Values too large to scale by 100 are returned unchanged.
pub fn round_to_cents(value: f64) -> f64 {
    let scaled = value * 100.0;
    if !scaled.is_finite() {
        return value;
    }
    scaled.round() / 100.0
}

fn check_numeric(field: QuoteField, value: &FieldValue) -> Option<FieldError> {
    if value.is_blank() {
        return Some(FieldError::Required);
    }
    let Some(number) = value.as_number() else {
        return Some(FieldError::NotANumber);
    };

    let mut error = None;
    if number < 0.0 {
        error = Some(FieldError::Negative);
    }
    if field == QuoteField::Quantity && number <= 0.0 {
        error = Some(FieldError::NotPositive);
    }
    error
}

fn check_line_total(payload: &QuotePayload) -> Option<FieldError> {
    let quantity = payload.get(QuoteField::Quantity);
    let unit_price = payload.get(QuoteField::UnitPrice);
    let total_price = payload.get(QuoteField::TotalPrice);
    if !(quantity.is_present() && unit_price.is_present() && total_price.is_present()) {
        return None;
    }

    // Unparseable inputs already carry a numeric error.
    let quantity = quantity.as_number()?;
    let unit_price = unit_price.as_number()?;
    let total_price = total_price.as_number()?;

    let expected = round_to_cents(quantity * unit_price);
    (round_to_cents(total_price) != expected).then_some(FieldError::InconsistentTotal)
}

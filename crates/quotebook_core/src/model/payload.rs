//! Untyped write payloads.
//!
//! # Responsibility
//! - Decode a JSON request body into per-field tagged values.
//! - Centralize string/number coercion used by validation and persistence.
//!
//! # Invariants
//! - Keys outside the 21 writable fields are dropped at decode time.
//! - A field absent from the body reads as `FieldValue::Missing`.

use crate::model::quote::{QuoteField, QuotePatch};
use serde_json::Value;
use std::collections::BTreeMap;

static MISSING_VALUE: FieldValue = FieldValue::Missing;

/// Raw value of one payload field.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    /// Key not present in the body.
    Missing,
    /// Key present with JSON `null`.
    Null,
    Number(f64),
    Text(String),
    /// Arrays and objects.
    Other(Value),
}

impl FieldValue {
    pub fn from_json(value: &Value) -> Self {
        match value {
            Value::Null => Self::Null,
            Value::Bool(flag) => Self::Number(if *flag { 1.0 } else { 0.0 }),
            Value::String(text) => Self::Text(text.clone()),
            Value::Number(number) => match number.as_f64() {
                Some(parsed) => Self::Number(parsed),
                None => Self::Other(value.clone()),
            },
            other => Self::Other(other.clone()),
        }
    }

    /// Missing, null, or whitespace-only text.
    pub fn is_blank(&self) -> bool {
        match self {
            Self::Missing | Self::Null => true,
            Self::Text(text) => text.trim().is_empty(),
            Self::Number(_) | Self::Other(_) => false,
        }
    }

    /// Anything but `Missing` and `Null`. Blank text counts as present.
    pub fn is_present(&self) -> bool {
        !matches!(self, Self::Missing | Self::Null)
    }

    /// Real-number reading of the value.
    ///
    /// Text is trimmed before parsing. Non-finite results are rejected.
    pub fn as_number(&self) -> Option<f64> {
        let parsed = match self {
            Self::Number(value) => *value,
            Self::Text(text) => text.trim().parse::<f64>().ok()?,
            Self::Missing | Self::Null | Self::Other(_) => return None,
        };
        parsed.is_finite().then_some(parsed)
    }

    /// Text reading of the value as it would be stored in a text column.
    pub fn as_text(&self) -> Option<String> {
        match self {
            Self::Text(text) => Some(text.clone()),
            Self::Number(value) => Some(value.to_string()),
            Self::Other(value) => Some(value.to_string()),
            Self::Missing | Self::Null => None,
        }
    }
}

/// Field-keyed write payload.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct QuotePayload {
    values: BTreeMap<QuoteField, FieldValue>,
}

impl QuotePayload {
    pub fn new() -> Self {
        Self::default()
    }

    /// Decodes a request body. Anything but a JSON object decodes as empty.
    pub fn from_json(body: &Value) -> Self {
        let mut payload = Self::new();
        if let Value::Object(map) = body {
            for (key, value) in map {
                if let Some(field) = QuoteField::from_name(key) {
                    payload.set(field, FieldValue::from_json(value));
                }
            }
        }
        payload
    }

    pub fn set(&mut self, field: QuoteField, value: FieldValue) {
        if value == FieldValue::Missing {
            self.values.remove(&field);
        } else {
            self.values.insert(field, value);
        }
    }

    /// Builder-style [`QuotePayload::set`].
    pub fn with(mut self, field: QuoteField, value: FieldValue) -> Self {
        self.set(field, value);
        self
    }

    pub fn get(&self, field: QuoteField) -> &FieldValue {
        self.values.get(&field).unwrap_or(&MISSING_VALUE)
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Converts supplied values into a partial update.
    ///
    /// Values that cannot be read for their column kind (null, or
    /// non-numeric input for a numeric column) are left out.
    pub fn to_patch(&self) -> QuotePatch {
        let mut patch = QuotePatch::default();
        for (field, value) in &self.values {
            if field.is_numeric() {
                if let Some(number) = value.as_number() {
                    patch.set_number(*field, number);
                }
            } else if let Some(text) = value.as_text() {
                patch.set_text(*field, text);
            }
        }
        patch
    }
}

//! Quote record shapes.
//!
//! # Responsibility
//! - Name the 21 writable quote fields and their numeric subset.
//! - Provide typed create (`NewQuote`), read (`Quote`, `QuoteSummary`) and
//!   partial-update (`QuotePatch`) projections.
//!
//! # Invariants
//! - `order_number` is assigned by the store and never part of a write shape.
//! - `QuoteField` declaration order matches the table column order.

use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

/// Store-assigned, monotonically increasing quote identifier.
pub type OrderNumber = i64;

/// Writable quote columns.
///
/// Ordering follows declaration order, so maps keyed by `QuoteField` iterate
/// in table column order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QuoteField {
    CustomerFirstName,
    CustomerLastName,
    CustomerBirthdate,
    TaxCode,
    ItemType,
    ItemCode,
    Description,
    Unit,
    Quantity,
    UnitPrice,
    TotalPrice,
    MrUnitPrice,
    MrTotalPrice,
    MrMarkup,
    LaborUnitPrice,
    LaborTotalPrice,
    LaborMarkup,
    PmUnitPrice,
    PmTotalPrice,
    CmUnitPrice,
    CmTotalPrice,
}

impl QuoteField {
    /// Every writable field. All of them are required on write.
    pub const ALL: [QuoteField; 21] = [
        Self::CustomerFirstName,
        Self::CustomerLastName,
        Self::CustomerBirthdate,
        Self::TaxCode,
        Self::ItemType,
        Self::ItemCode,
        Self::Description,
        Self::Unit,
        Self::Quantity,
        Self::UnitPrice,
        Self::TotalPrice,
        Self::MrUnitPrice,
        Self::MrTotalPrice,
        Self::MrMarkup,
        Self::LaborUnitPrice,
        Self::LaborTotalPrice,
        Self::LaborMarkup,
        Self::PmUnitPrice,
        Self::PmTotalPrice,
        Self::CmUnitPrice,
        Self::CmTotalPrice,
    ];

    /// Fields stored as non-negative decimals.
    pub const NUMERIC: [QuoteField; 13] = [
        Self::Quantity,
        Self::UnitPrice,
        Self::TotalPrice,
        Self::MrUnitPrice,
        Self::MrTotalPrice,
        Self::MrMarkup,
        Self::LaborUnitPrice,
        Self::LaborTotalPrice,
        Self::LaborMarkup,
        Self::PmUnitPrice,
        Self::PmTotalPrice,
        Self::CmUnitPrice,
        Self::CmTotalPrice,
    ];

    /// Column / wire name of this field.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::CustomerFirstName => "customer_first_name",
            Self::CustomerLastName => "customer_last_name",
            Self::CustomerBirthdate => "customer_birthdate",
            Self::TaxCode => "tax_code",
            Self::ItemType => "item_type",
            Self::ItemCode => "item_code",
            Self::Description => "description",
            Self::Unit => "unit",
            Self::Quantity => "quantity",
            Self::UnitPrice => "unit_price",
            Self::TotalPrice => "total_price",
            Self::MrUnitPrice => "mr_unit_price",
            Self::MrTotalPrice => "mr_total_price",
            Self::MrMarkup => "mr_markup",
            Self::LaborUnitPrice => "labor_unit_price",
            Self::LaborTotalPrice => "labor_total_price",
            Self::LaborMarkup => "labor_markup",
            Self::PmUnitPrice => "pm_unit_price",
            Self::PmTotalPrice => "pm_total_price",
            Self::CmUnitPrice => "cm_unit_price",
            Self::CmTotalPrice => "cm_total_price",
        }
    }

    /// Resolves a column / wire name. Unknown names yield `None`.
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|field| field.as_str() == name)
    }

    pub fn is_numeric(self) -> bool {
        Self::NUMERIC.contains(&self)
    }
}

impl Display for QuoteField {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Fully-populated write shape consumed by quote creation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewQuote {
    pub customer_first_name: String,
    pub customer_last_name: String,
    /// Nullable in storage even though writes always supply it.
    pub customer_birthdate: Option<String>,
    pub tax_code: String,
    pub item_type: String,
    pub item_code: String,
    pub description: String,
    pub unit: String,
    pub quantity: f64,
    pub unit_price: f64,
    pub total_price: f64,
    pub mr_unit_price: f64,
    pub mr_total_price: f64,
    pub mr_markup: f64,
    pub labor_unit_price: f64,
    pub labor_total_price: f64,
    pub labor_markup: f64,
    pub pm_unit_price: f64,
    pub pm_total_price: f64,
    pub cm_unit_price: f64,
    pub cm_total_price: f64,
}

/// Persisted quote as returned by single-record reads.
///
/// Serializes as one flat object: `order_number` followed by every
/// `NewQuote` field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Quote {
    pub order_number: OrderNumber,
    #[serde(flatten)]
    pub fields: NewQuote,
}

/// Lightweight list projection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuoteSummary {
    pub order_number: OrderNumber,
    pub item_code: String,
    pub customer_first_name: String,
    pub customer_last_name: String,
}

/// One supplied value in a partial update.
#[derive(Debug, Clone, PartialEq)]
pub enum PatchValue {
    Text(String),
    Number(f64),
}

/// Partial update: only `Some` entries are written.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct QuotePatch {
    pub customer_first_name: Option<String>,
    pub customer_last_name: Option<String>,
    pub customer_birthdate: Option<String>,
    pub tax_code: Option<String>,
    pub item_type: Option<String>,
    pub item_code: Option<String>,
    pub description: Option<String>,
    pub unit: Option<String>,
    pub quantity: Option<f64>,
    pub unit_price: Option<f64>,
    pub total_price: Option<f64>,
    pub mr_unit_price: Option<f64>,
    pub mr_total_price: Option<f64>,
    pub mr_markup: Option<f64>,
    pub labor_unit_price: Option<f64>,
    pub labor_total_price: Option<f64>,
    pub labor_markup: Option<f64>,
    pub pm_unit_price: Option<f64>,
    pub pm_total_price: Option<f64>,
    pub cm_unit_price: Option<f64>,
    pub cm_total_price: Option<f64>,
}

impl QuotePatch {
    /// Returns supplied values in column order.
    pub fn supplied(&self) -> Vec<(QuoteField, PatchValue)> {
        QuoteField::ALL
            .into_iter()
            .filter_map(|field| self.value_of(field).map(|value| (field, value)))
            .collect()
    }

    pub fn is_empty(&self) -> bool {
        QuoteField::ALL
            .into_iter()
            .all(|field| self.value_of(field).is_none())
    }

    /// Stores a text value. Ignored for numeric fields.
    pub fn set_text(&mut self, field: QuoteField, value: String) {
        if let Some(slot) = self.text_slot(field) {
            *slot = Some(value);
        }
    }

    /// Stores a numeric value. Ignored for text fields.
    pub fn set_number(&mut self, field: QuoteField, value: f64) {
        if let Some(slot) = self.number_slot(field) {
            *slot = Some(value);
        }
    }

    fn value_of(&self, field: QuoteField) -> Option<PatchValue> {
        let text = match field {
            QuoteField::CustomerFirstName => &self.customer_first_name,
            QuoteField::CustomerLastName => &self.customer_last_name,
            QuoteField::CustomerBirthdate => &self.customer_birthdate,
            QuoteField::TaxCode => &self.tax_code,
            QuoteField::ItemType => &self.item_type,
            QuoteField::ItemCode => &self.item_code,
            QuoteField::Description => &self.description,
            QuoteField::Unit => &self.unit,
            numeric => return self.number_of(numeric).map(PatchValue::Number),
        };
        text.clone().map(PatchValue::Text)
    }

    fn number_of(&self, field: QuoteField) -> Option<f64> {
        match field {
            QuoteField::Quantity => self.quantity,
            QuoteField::UnitPrice => self.unit_price,
            QuoteField::TotalPrice => self.total_price,
            QuoteField::MrUnitPrice => self.mr_unit_price,
            QuoteField::MrTotalPrice => self.mr_total_price,
            QuoteField::MrMarkup => self.mr_markup,
            QuoteField::LaborUnitPrice => self.labor_unit_price,
            QuoteField::LaborTotalPrice => self.labor_total_price,
            QuoteField::LaborMarkup => self.labor_markup,
            QuoteField::PmUnitPrice => self.pm_unit_price,
            QuoteField::PmTotalPrice => self.pm_total_price,
            QuoteField::CmUnitPrice => self.cm_unit_price,
            QuoteField::CmTotalPrice => self.cm_total_price,
            _ => None,
        }
    }

    fn text_slot(&mut self, field: QuoteField) -> Option<&mut Option<String>> {
        match field {
            QuoteField::CustomerFirstName => Some(&mut self.customer_first_name),
            QuoteField::CustomerLastName => Some(&mut self.customer_last_name),
            QuoteField::CustomerBirthdate => Some(&mut self.customer_birthdate),
            QuoteField::TaxCode => Some(&mut self.tax_code),
            QuoteField::ItemType => Some(&mut self.item_type),
            QuoteField::ItemCode => Some(&mut self.item_code),
            QuoteField::Description => Some(&mut self.description),
            QuoteField::Unit => Some(&mut self.unit),
            _ => None,
        }
    }

    fn number_slot(&mut self, field: QuoteField) -> Option<&mut Option<f64>> {
        match field {
            QuoteField::Quantity => Some(&mut self.quantity),
            QuoteField::UnitPrice => Some(&mut self.unit_price),
            QuoteField::TotalPrice => Some(&mut self.total_price),
            QuoteField::MrUnitPrice => Some(&mut self.mr_unit_price),
            QuoteField::MrTotalPrice => Some(&mut self.mr_total_price),
            QuoteField::MrMarkup => Some(&mut self.mr_markup),
            QuoteField::LaborUnitPrice => Some(&mut self.labor_unit_price),
            QuoteField::LaborTotalPrice => Some(&mut self.labor_total_price),
            QuoteField::LaborMarkup => Some(&mut self.labor_markup),
            QuoteField::PmUnitPrice => Some(&mut self.pm_unit_price),
            QuoteField::PmTotalPrice => Some(&mut self.pm_total_price),
            QuoteField::CmUnitPrice => Some(&mut self.cm_unit_price),
            QuoteField::CmTotalPrice => Some(&mut self.cm_total_price),
            _ => None,
        }
    }
}

impl TryFrom<QuotePatch> for NewQuote {
    /// First field that has no value.
    type Error = QuoteField;

    fn try_from(patch: QuotePatch) -> Result<Self, Self::Error> {
        use QuoteField as F;

        Ok(Self {
            customer_first_name: patch.customer_first_name.ok_or(F::CustomerFirstName)?,
            customer_last_name: patch.customer_last_name.ok_or(F::CustomerLastName)?,
            customer_birthdate: Some(patch.customer_birthdate.ok_or(F::CustomerBirthdate)?),
            tax_code: patch.tax_code.ok_or(F::TaxCode)?,
            item_type: patch.item_type.ok_or(F::ItemType)?,
            item_code: patch.item_code.ok_or(F::ItemCode)?,
            description: patch.description.ok_or(F::Description)?,
            unit: patch.unit.ok_or(F::Unit)?,
            quantity: patch.quantity.ok_or(F::Quantity)?,
            unit_price: patch.unit_price.ok_or(F::UnitPrice)?,
            total_price: patch.total_price.ok_or(F::TotalPrice)?,
            mr_unit_price: patch.mr_unit_price.ok_or(F::MrUnitPrice)?,
            mr_total_price: patch.mr_total_price.ok_or(F::MrTotalPrice)?,
            mr_markup: patch.mr_markup.ok_or(F::MrMarkup)?,
            labor_unit_price: patch.labor_unit_price.ok_or(F::LaborUnitPrice)?,
            labor_total_price: patch.labor_total_price.ok_or(F::LaborTotalPrice)?,
            labor_markup: patch.labor_markup.ok_or(F::LaborMarkup)?,
            pm_unit_price: patch.pm_unit_price.ok_or(F::PmUnitPrice)?,
            pm_total_price: patch.pm_total_price.ok_or(F::PmTotalPrice)?,
            cm_unit_price: patch.cm_unit_price.ok_or(F::CmUnitPrice)?,
            cm_total_price: patch.cm_total_price.ok_or(F::CmTotalPrice)?,
        })
    }
}

//! Lead domain model.
//!
//! # Responsibility
//! - Define the canonical lead record shared by table, filter and notes views.
//! - Provide typed column access so filters never index fields by raw string.
//!
//! # Invariants
//! - `lead_id` is stable and never reused for another lead.
//! - Descriptive fields are opaque strings; core never interprets them.
//! - Column keys (`LeadField::as_str`) match the lead source row shape.

use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Stable identifier of a lead within one session store, e.g. `lead_3`.
pub type LeadId = String;

/// Filterable/searchable descriptive column of a lead.
///
/// `lead_id` is deliberately not a column: it is identity, not data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum LeadField {
    Name,
    Number,
    Email,
    Street,
    PostalCode,
    City,
    Url,
    Industry,
    SizeCategory,
    RevenueCategory,
    CreditRating,
}

const ALL_FIELDS: [LeadField; 11] = [
    LeadField::Name,
    LeadField::Number,
    LeadField::Email,
    LeadField::Street,
    LeadField::PostalCode,
    LeadField::City,
    LeadField::Url,
    LeadField::Industry,
    LeadField::SizeCategory,
    LeadField::RevenueCategory,
    LeadField::CreditRating,
];

impl LeadField {
    /// All columns in table display order.
    pub fn all() -> &'static [LeadField] {
        &ALL_FIELDS
    }

    /// Stable column key used by lead sources and display tables.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::Number => "number",
            Self::Email => "email",
            Self::Street => "strasse",
            Self::PostalCode => "plz",
            Self::City => "ort",
            Self::Url => "url",
            Self::Industry => "branche",
            Self::SizeCategory => "size_kategorie",
            Self::RevenueCategory => "umsatz_kategorie",
            Self::CreditRating => "bonität",
        }
    }
}

impl Display for LeadField {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Parses one column key into a typed field.
///
/// Keys are matched exactly after trimming; `lead_id` is rejected.
pub fn parse_lead_field(value: &str) -> Result<LeadField, UnknownLeadField> {
    let normalized = value.trim();
    ALL_FIELDS
        .iter()
        .copied()
        .find(|field| field.as_str() == normalized)
        .ok_or_else(|| UnknownLeadField(normalized.to_string()))
}

/// Column key that does not name any lead field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownLeadField(pub String);

impl Display for UnknownLeadField {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "unknown lead column: `{}`", self.0)
    }
}

impl Error for UnknownLeadField {}

/// Validation failures for a single lead record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LeadValidationError {
    EmptyLeadId,
    UntrimmedLeadId(String),
}

impl Display for LeadValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyLeadId => write!(f, "lead_id must not be empty"),
            Self::UntrimmedLeadId(value) => {
                write!(f, "lead_id must not carry surrounding whitespace: `{value}`")
            }
        }
    }
}

impl Error for LeadValidationError {}

/// Canonical lead record.
///
/// Serialized with the source table's column names so rows from a lead
/// source deserialize without a mapping layer. Missing columns read as empty;
/// a missing `lead_id` is left empty for the source to fill in.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Lead {
    pub lead_id: LeadId,
    pub name: String,
    /// Commercial register number.
    pub number: String,
    pub email: String,
    #[serde(rename = "strasse")]
    pub street: String,
    #[serde(rename = "plz")]
    pub postal_code: String,
    #[serde(rename = "ort")]
    pub city: String,
    pub url: String,
    #[serde(rename = "branche")]
    pub industry: String,
    #[serde(rename = "size_kategorie")]
    pub size_category: String,
    #[serde(rename = "umsatz_kategorie")]
    pub revenue_category: String,
    #[serde(rename = "bonität")]
    pub credit_rating: String,
}

impl Lead {
    /// Creates a lead with the given identity and name; other columns are empty.
    pub fn new(lead_id: impl Into<LeadId>, name: impl Into<String>) -> Self {
        Self {
            lead_id: lead_id.into(),
            name: name.into(),
            ..Self::default()
        }
    }

    /// Builder-style column assignment.
    pub fn with(mut self, field: LeadField, value: impl Into<String>) -> Self {
        *self.value_mut(field) = value.into();
        self
    }

    /// Returns the value stored in one column.
    pub fn value(&self, field: LeadField) -> &str {
        match field {
            LeadField::Name => &self.name,
            LeadField::Number => &self.number,
            LeadField::Email => &self.email,
            LeadField::Street => &self.street,
            LeadField::PostalCode => &self.postal_code,
            LeadField::City => &self.city,
            LeadField::Url => &self.url,
            LeadField::Industry => &self.industry,
            LeadField::SizeCategory => &self.size_category,
            LeadField::RevenueCategory => &self.revenue_category,
            LeadField::CreditRating => &self.credit_rating,
        }
    }

    fn value_mut(&mut self, field: LeadField) -> &mut String {
        match field {
            LeadField::Name => &mut self.name,
            LeadField::Number => &mut self.number,
            LeadField::Email => &mut self.email,
            LeadField::Street => &mut self.street,
            LeadField::PostalCode => &mut self.postal_code,
            LeadField::City => &mut self.city,
            LeadField::Url => &mut self.url,
            LeadField::Industry => &mut self.industry,
            LeadField::SizeCategory => &mut self.size_category,
            LeadField::RevenueCategory => &mut self.revenue_category,
            LeadField::CreditRating => &mut self.credit_rating,
        }
    }

    /// Validates identity invariants.
    pub fn validate(&self) -> Result<(), LeadValidationError> {
        if self.lead_id.is_empty() {
            return Err(LeadValidationError::EmptyLeadId);
        }
        if self.lead_id.trim() != self.lead_id {
            return Err(LeadValidationError::UntrimmedLeadId(self.lead_id.clone()));
        }
        Ok(())
    }
}

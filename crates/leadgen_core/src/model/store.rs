//! Session lead store.
//!
//! # Responsibility
//! - Hold the canonical ordered lead set loaded at session start.
//! - Answer column statistics used to offer category filters.
//!
//! # Invariants
//! - Read-only after construction; filters derive views, never mutate.
//! - `lead_id` values are unique and valid.

use crate::model::lead::{Lead, LeadField, LeadValidationError};
use std::collections::BTreeSet;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Store construction errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LeadStoreError {
    Validation(LeadValidationError),
    DuplicateLeadId(String),
}

impl Display for LeadStoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::DuplicateLeadId(id) => write!(f, "duplicate lead_id in lead source: {id}"),
        }
    }
}

impl Error for LeadStoreError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::DuplicateLeadId(_) => None,
        }
    }
}

impl From<LeadValidationError> for LeadStoreError {
    fn from(value: LeadValidationError) -> Self {
        Self::Validation(value)
    }
}

/// Ordered, immutable lead collection for one session.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LeadStore {
    leads: Vec<Lead>,
}

impl LeadStore {
    /// Builds a store, validating every record and id uniqueness.
    pub fn new(leads: Vec<Lead>) -> Result<Self, LeadStoreError> {
        let mut seen = BTreeSet::new();
        for lead in &leads {
            lead.validate()?;
            if !seen.insert(lead.lead_id.as_str()) {
                return Err(LeadStoreError::DuplicateLeadId(lead.lead_id.clone()));
            }
        }
        Ok(Self { leads })
    }

    pub fn leads(&self) -> &[Lead] {
        &self.leads
    }

    pub fn len(&self) -> usize {
        self.leads.len()
    }

    pub fn is_empty(&self) -> bool {
        self.leads.is_empty()
    }

    pub fn get(&self, lead_id: &str) -> Option<&Lead> {
        self.leads.iter().find(|lead| lead.lead_id == lead_id)
    }

    pub fn contains(&self, lead_id: &str) -> bool {
        self.get(lead_id).is_some()
    }

    /// Distinct values of one column in first-seen order.
    pub fn distinct_values(&self, field: LeadField) -> Vec<&str> {
        let mut seen = BTreeSet::new();
        self.leads
            .iter()
            .map(|lead| lead.value(field))
            .filter(|value| seen.insert(*value))
            .collect()
    }

    /// Columns with more than one distinct value; only these are offered as
    /// category filters.
    pub fn filterable_fields(&self) -> Vec<LeadField> {
        LeadField::all()
            .iter()
            .copied()
            .filter(|field| self.distinct_values(*field).len() > 1)
            .collect()
    }
}

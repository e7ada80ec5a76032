//! Moved/assigned lead snapshots.
//!
//! # Responsibility
//! - Define the destination collection leads enter once selected.
//! - Keep one entry per `lead_id`.
//!
//! # Invariants
//! - Entries are copies of the lead at migration time.
//! - At most one entry per `lead_id`: `from_entries` rejects repeats and
//!   `append_keep_last` replaces them.

use crate::model::lead::{Lead, LeadId};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// `from_entries` input listed the same lead twice.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DuplicateMovedLead(pub LeadId);

impl Display for DuplicateMovedLead {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "moved collection lists lead `{}` more than once", self.0)
    }
}

impl Error for DuplicateMovedLead {}

/// Snapshot of one lead after it was moved or assigned.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MovedLead {
    #[serde(flatten)]
    pub lead: Lead,
    /// Calendar date of the move, rendered `YYYY-MM-DD`.
    pub selection_date: NaiveDate,
    /// Representative user id; `None` for plain moves.
    pub assigned_to: Option<String>,
}

impl MovedLead {
    pub fn lead_id(&self) -> &str {
        &self.lead.lead_id
    }

    /// ISO-8601 date string used by display tables.
    pub fn selection_date_iso(&self) -> String {
        self.selection_date.format("%Y-%m-%d").to_string()
    }
}

/// Ordered collection of moved leads, unique by `lead_id`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MovedCollection {
    entries: Vec<MovedLead>,
}

impl MovedCollection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a collection from entries that must already be unique.
    ///
    /// # Errors
    /// - `DuplicateMovedLead` with the first repeated `lead_id`.
    pub fn from_entries(entries: Vec<MovedLead>) -> Result<Self, DuplicateMovedLead> {
        let mut seen = BTreeSet::new();
        for entry in &entries {
            if !seen.insert(entry.lead_id()) {
                return Err(DuplicateMovedLead(entry.lead.lead_id.clone()));
            }
        }
        Ok(Self { entries })
    }

    /// Returns a new collection with `additions` appended.
    ///
    /// A repeated `lead_id` keeps only its last occurrence, in that position,
    /// so re-moving a lead replaces its earlier entry.
    pub fn append_keep_last(&self, additions: Vec<MovedLead>) -> Self {
        let mut seen = BTreeSet::new();
        let mut entries: Vec<MovedLead> = additions
            .into_iter()
            .rev()
            .chain(self.entries.iter().rev().cloned())
            .filter(|entry| seen.insert(entry.lead.lead_id.clone()))
            .collect();
        entries.reverse();
        Self { entries }
    }

    pub fn entries(&self) -> &[MovedLead] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn contains(&self, lead_id: &str) -> bool {
        self.entries.iter().any(|entry| entry.lead_id() == lead_id)
    }

    pub fn get(&self, lead_id: &str) -> Option<&MovedLead> {
        self.entries.iter().find(|entry| entry.lead_id() == lead_id)
    }

    /// Ids of all moved leads.
    pub fn lead_ids(&self) -> BTreeSet<&str> {
        self.entries.iter().map(MovedLead::lead_id).collect()
    }

    /// Drops every entry and returns how many were removed.
    pub fn clear(&mut self) -> usize {
        let removed = self.entries.len();
        self.entries.clear();
        removed
    }
}

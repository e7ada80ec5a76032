//! Notes ledger and paging editor.
//!
//! # Responsibility
//! - Store one free-text note per lead for the session lifetime.
//! - Page previous/next through the lead order captured when editing began.
//!
//! # Invariants
//! - Missing notes read as the empty string.
//! - Saving overwrites; no history is kept.
//! - Notes are keyed by `lead_id` and survive migration of the lead.

use crate::model::lead::LeadId;
use std::collections::BTreeMap;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Notes paging errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NotesError {
    /// Lead is no longer part of the visible list (e.g. a filter changed).
    LeadNotVisible(LeadId),
    /// Lead id does not exist in the session store.
    UnknownLead(LeadId),
    /// Paging past the first or last visible lead.
    NoNeighbor,
    /// Operation requires an open notes editor.
    EditorClosed,
}

impl Display for NotesError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::LeadNotVisible(lead_id) => write!(
                f,
                "lead `{lead_id}` is no longer in the visible list; notes editor closed"
            ),
            Self::UnknownLead(lead_id) => write!(f, "lead not found: {lead_id}"),
            Self::NoNeighbor => write!(f, "no further lead in this direction"),
            Self::EditorClosed => write!(f, "notes editor is not open"),
        }
    }
}

impl Error for NotesError {}

/// Previous/next ids around the current lead; `None` disables the button.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Neighbors {
    pub previous: Option<LeadId>,
    pub next: Option<LeadId>,
}

/// Locates `current_id` in `ordered_ids` and returns its neighbours.
pub fn neighbors(current_id: &str, ordered_ids: &[LeadId]) -> Result<Neighbors, NotesError> {
    let position = ordered_ids
        .iter()
        .position(|id| id == current_id)
        .ok_or_else(|| NotesError::LeadNotVisible(current_id.to_string()))?;
    Ok(Neighbors {
        previous: position
            .checked_sub(1)
            .and_then(|index| ordered_ids.get(index))
            .cloned(),
        next: ordered_ids.get(position + 1).cloned(),
    })
}

/// Session notes, one entry per lead.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NotesLedger {
    notes: BTreeMap<LeadId, String>,
}

impl NotesLedger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get_note(&self, lead_id: &str) -> &str {
        self.notes.get(lead_id).map(String::as_str).unwrap_or("")
    }

    pub fn set_note(&mut self, lead_id: &str, text: impl Into<String>) {
        self.notes.insert(lead_id.to_string(), text.into());
    }

    pub fn has_note(&self, lead_id: &str) -> bool {
        self.notes.contains_key(lead_id)
    }

    pub fn len(&self) -> usize {
        self.notes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.notes.is_empty()
    }
}

/// Cursor over the lead order captured when notes editing began.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotesEditor {
    order: Vec<LeadId>,
    current: LeadId,
}

impl NotesEditor {
    /// Opens the editor on `current_id` within `visible_ids`.
    pub fn open(visible_ids: Vec<LeadId>, current_id: &str) -> Result<Self, NotesError> {
        neighbors(current_id, &visible_ids)?;
        Ok(Self {
            order: visible_ids,
            current: current_id.to_string(),
        })
    }

    pub fn current(&self) -> &str {
        &self.current
    }

    pub fn order(&self) -> &[LeadId] {
        &self.order
    }

    pub fn neighbors(&self) -> Result<Neighbors, NotesError> {
        neighbors(&self.current, &self.order)
    }

    pub fn go_previous(&mut self) -> Result<&str, NotesError> {
        let target = self.neighbors()?.previous.ok_or(NotesError::NoNeighbor)?;
        self.current = target;
        Ok(&self.current)
    }

    pub fn go_next(&mut self) -> Result<&str, NotesError> {
        let target = self.neighbors()?.next.ok_or(NotesError::NoNeighbor)?;
        self.current = target;
        Ok(&self.current)
    }
}

#[cfg(test)]
mod tests {
    use super::{neighbors, Neighbors, NotesEditor, NotesError, NotesLedger};

    fn order() -> Vec<String> {
        vec!["L1".to_string(), "L2".to_string(), "L3".to_string()]
    }

    #[test]
    fn neighbors_at_middle_and_edges() {
        let order = order();
        assert_eq!(
            neighbors("L2", &order).unwrap(),
            Neighbors {
                previous: Some("L1".to_string()),
                next: Some("L3".to_string()),
            }
        );
        assert_eq!(
            neighbors("L1", &order).unwrap(),
            Neighbors {
                previous: None,
                next: Some("L2".to_string()),
            }
        );
        assert_eq!(
            neighbors("L3", &order).unwrap(),
            Neighbors {
                previous: Some("L2".to_string()),
                next: None,
            }
        );
    }

    #[test]
    fn neighbors_of_missing_lead_is_not_visible() {
        assert_eq!(
            neighbors("L9", &order()).unwrap_err(),
            NotesError::LeadNotVisible("L9".to_string())
        );
    }

    #[test]
    fn ledger_defaults_to_empty_and_overwrites() {
        let mut ledger = NotesLedger::new();
        assert_eq!(ledger.get_note("L1"), "");
        ledger.set_note("L1", "call back monday");
        ledger.set_note("L1", "called");
        assert_eq!(ledger.get_note("L1"), "called");
        assert_eq!(ledger.len(), 1);
    }

    #[test]
    fn editor_pages_and_stops_at_edges() {
        let mut editor = NotesEditor::open(order(), "L1").unwrap();
        assert_eq!(editor.go_previous().unwrap_err(), NotesError::NoNeighbor);
        assert_eq!(editor.go_next().unwrap(), "L2");
        assert_eq!(editor.go_next().unwrap(), "L3");
        assert_eq!(editor.go_next().unwrap_err(), NotesError::NoNeighbor);
        assert_eq!(editor.current(), "L3");
    }
}

//! Selection tracker.
//!
//! # Invariants
//! - Checked ids survive filter changes; bulk toggles only touch the ids
//!   passed in.
//! - The "select all" indicator is derived from the current visible ids and
//!   never stored.

use crate::model::lead::LeadId;
use std::collections::BTreeSet;

/// Set of lead ids the user has checked.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SelectionTracker {
    checked: BTreeSet<LeadId>,
}

impl SelectionTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds or removes exactly one id.
    pub fn toggle(&mut self, lead_id: &str, checked: bool) {
        if checked {
            self.checked.insert(lead_id.to_string());
        } else {
            self.checked.remove(lead_id);
        }
    }

    /// Unions (`checked`) or subtracts (`!checked`) the visible ids.
    pub fn select_all_visible(&mut self, visible_ids: &[LeadId], checked: bool) {
        for lead_id in visible_ids {
            self.toggle(lead_id, checked);
        }
    }

    /// True only when every visible id is checked; false for an empty view.
    pub fn all_visible_selected(&self, visible_ids: &[LeadId]) -> bool {
        !visible_ids.is_empty() && visible_ids.iter().all(|id| self.checked.contains(id))
    }

    pub fn clear(&mut self) {
        self.checked.clear();
    }

    pub fn current(&self) -> &BTreeSet<LeadId> {
        &self.checked
    }

    pub fn contains(&self, lead_id: &str) -> bool {
        self.checked.contains(lead_id)
    }

    pub fn len(&self) -> usize {
        self.checked.len()
    }

    pub fn is_empty(&self) -> bool {
        self.checked.is_empty()
    }
}

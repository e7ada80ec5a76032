//! Migration engine.
//!
//! # Responsibility
//! - Snapshot selected store leads into the moved/assigned collection.
//! - Stamp the selection date and optional assignee.
//!
//! # Invariants
//! - Re-moving a lead replaces its earlier entry (keep last by `lead_id`).
//! - The result is staged as a new collection; the caller commits it only on
//!   success, so a failed move leaves collection and selection untouched.
//! - Snapshots follow store order, not selection order.

use crate::model::moved::{MovedCollection, MovedLead};
use crate::model::store::LeadStore;
use crate::service::selection::SelectionTracker;
use chrono::NaiveDate;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Migration failures.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MigrationError {
    /// Nothing is checked; reported as a warning, not a fault.
    EmptySelection,
    /// Assignee id is blank.
    EmptyAssignee,
}

impl Display for MigrationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptySelection => write!(f, "No leads selected to move."),
            Self::EmptyAssignee => write!(f, "assignee must not be empty"),
        }
    }
}

impl Error for MigrationError {}

/// Staged result of a successful move.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MoveOutcome {
    /// Number of store leads snapshotted by this move.
    pub moved_count: usize,
    /// Collection to commit in place of the previous one.
    pub collection: MovedCollection,
}

/// Moves every selected store lead into a new staged collection.
///
/// Selected ids that do not exist in the store are ignored.
///
/// # Errors
/// - `MigrationError::EmptySelection` when nothing is checked.
/// - `MigrationError::EmptyAssignee` for a blank assignee.
pub fn move_leads(
    store: &LeadStore,
    selection: &SelectionTracker,
    existing: &MovedCollection,
    selection_date: NaiveDate,
    assignee: Option<&str>,
) -> Result<MoveOutcome, MigrationError> {
    if selection.is_empty() {
        return Err(MigrationError::EmptySelection);
    }
    let assignee = match assignee.map(str::trim) {
        Some("") => return Err(MigrationError::EmptyAssignee),
        other => other.map(str::to_string),
    };

    let snapshots: Vec<MovedLead> = store
        .leads()
        .iter()
        .filter(|lead| selection.contains(&lead.lead_id))
        .map(|lead| MovedLead {
            lead: lead.clone(),
            selection_date,
            assigned_to: assignee.clone(),
        })
        .collect();
    let moved_count = snapshots.len();

    Ok(MoveOutcome {
        moved_count,
        collection: existing.append_keep_last(snapshots),
    })
}

#[cfg(test)]
mod tests {
    use super::{move_leads, MigrationError};
    use crate::model::lead::Lead;
    use crate::model::moved::{MovedCollection, MovedLead};
    use crate::model::store::LeadStore;
    use crate::service::selection::SelectionTracker;
    use chrono::NaiveDate;

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, d).unwrap()
    }

    fn store() -> LeadStore {
        LeadStore::new(vec![
            Lead::new("lead_1", "A"),
            Lead::new("lead_2", "B"),
            Lead::new("lead_3", "C"),
        ])
        .unwrap()
    }

    fn selected(ids: &[&str]) -> SelectionTracker {
        let mut selection = SelectionTracker::new();
        for id in ids {
            selection.toggle(id, true);
        }
        selection
    }

    #[test]
    fn empty_selection_is_rejected() {
        let err = move_leads(
            &store(),
            &SelectionTracker::new(),
            &MovedCollection::new(),
            day(1),
            None,
        )
        .unwrap_err();
        assert_eq!(err, MigrationError::EmptySelection);
    }

    #[test]
    fn blank_assignee_is_rejected() {
        let err = move_leads(
            &store(),
            &selected(&["lead_1"]),
            &MovedCollection::new(),
            day(1),
            Some(" "),
        )
        .unwrap_err();
        assert_eq!(err, MigrationError::EmptyAssignee);
    }

    #[test]
    fn snapshots_follow_store_order_and_ignore_unknown_ids() {
        let outcome = move_leads(
            &store(),
            &selected(&["lead_3", "lead_1", "ghost"]),
            &MovedCollection::new(),
            day(1),
            None,
        )
        .unwrap();
        assert_eq!(outcome.moved_count, 2);
        let ids: Vec<&str> = outcome
            .collection
            .entries()
            .iter()
            .map(MovedLead::lead_id)
            .collect();
        assert_eq!(ids, vec!["lead_1", "lead_3"]);
        assert!(outcome.collection.entries().iter().all(|e| e.selection_date == day(1)));
    }

    #[test]
    fn re_move_overwrites_assignee_and_date() {
        let store = store();
        let first = move_leads(
            &store,
            &selected(&["lead_1", "lead_2"]),
            &MovedCollection::new(),
            day(1),
            Some("anna"),
        )
        .unwrap();
        let second = move_leads(
            &store,
            &selected(&["lead_1"]),
            &first.collection,
            day(2),
            Some("ben"),
        )
        .unwrap();

        assert_eq!(second.collection.len(), 2);
        let entry = second.collection.get("lead_1").unwrap();
        assert_eq!(entry.assigned_to.as_deref(), Some("ben"));
        assert_eq!(entry.selection_date, day(2));
        let ids: Vec<&str> = second
            .collection
            .entries()
            .iter()
            .map(MovedLead::lead_id)
            .collect();
        assert_eq!(ids, vec!["lead_2", "lead_1"]);
    }
}

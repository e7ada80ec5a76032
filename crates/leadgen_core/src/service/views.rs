//! Role-scoped projections of the moved/assigned collection.
//!
//! # Responsibility
//! - Build the manager, representative and selected-leads tables.
//! - Resolve assignee display names through the user directory.
//!
//! # Invariants
//! - Views are read-only; they never mutate the collection.
//! - Unknown assignees display as their raw user id.

use crate::model::lead::LeadField;
use crate::model::moved::{MovedCollection, MovedLead};
use crate::repo::user_directory::UserDirectory;

/// Columns of the assigned-leads table, before the manager-only name column.
pub const ASSIGNED_COLUMNS: [&str; 5] = ["name", "number", "email", "ort", "selection_date"];
/// Manager-only column carrying the assignee display name.
pub const ASSIGNEE_NAME_COLUMN: &str = "assigned_to_name";

/// One moved entry as shown in an assigned-leads view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssignedRow<'a> {
    pub entry: &'a MovedLead,
    /// Populated for manager views only.
    pub assigned_to_name: Option<String>,
}

/// Plain string table handed to the presentation layer.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Table {
    pub columns: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl Table {
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Cell lookup by column name.
    pub fn cell(&self, row: usize, column: &str) -> Option<&str> {
        let index = self.columns.iter().position(|name| name == column)?;
        self.rows.get(row)?.get(index).map(String::as_str)
    }
}

/// Every entry, annotated with the assignee display name.
pub fn manager_view<'a>(
    moved: &'a MovedCollection,
    directory: &dyn UserDirectory,
) -> Vec<AssignedRow<'a>> {
    moved
        .entries()
        .iter()
        .map(|entry| AssignedRow {
            entry,
            assigned_to_name: entry.assigned_to.as_deref().map(|user_id| {
                directory
                    .display_name(user_id)
                    .unwrap_or_else(|| user_id.to_string())
            }),
        })
        .collect()
}

/// Entries assigned to `user_id`.
pub fn representative_view<'a>(moved: &'a MovedCollection, user_id: &str) -> Vec<AssignedRow<'a>> {
    moved
        .entries()
        .iter()
        .filter(|entry| entry.assigned_to.as_deref() == Some(user_id))
        .map(|entry| AssignedRow {
            entry,
            assigned_to_name: None,
        })
        .collect()
}

/// Projects assigned rows onto the display columns.
pub fn assigned_table(rows: &[AssignedRow<'_>], include_assignee_name: bool) -> Table {
    let mut columns: Vec<String> = ASSIGNED_COLUMNS.iter().map(|c| c.to_string()).collect();
    if include_assignee_name {
        columns.push(ASSIGNEE_NAME_COLUMN.to_string());
    }
    let rows = rows
        .iter()
        .map(|row| {
            let lead = &row.entry.lead;
            let mut cells = vec![
                lead.value(LeadField::Name).to_string(),
                lead.value(LeadField::Number).to_string(),
                lead.value(LeadField::Email).to_string(),
                lead.value(LeadField::City).to_string(),
                row.entry.selection_date_iso(),
            ];
            if include_assignee_name {
                cells.push(row.assigned_to_name.clone().unwrap_or_default());
            }
            cells
        })
        .collect();
    Table { columns, rows }
}

/// Full moved-leads table: all lead columns plus id, date and assignee.
pub fn selected_table(moved: &MovedCollection) -> Table {
    let mut columns: Vec<String> = LeadField::all()
        .iter()
        .map(|field| field.as_str().to_string())
        .collect();
    columns.extend(["lead_id", "selection_date", "assigned_to"].map(String::from));

    let rows = moved
        .entries()
        .iter()
        .map(|entry| {
            let mut cells: Vec<String> = LeadField::all()
                .iter()
                .map(|field| entry.lead.value(*field).to_string())
                .collect();
            cells.push(entry.lead.lead_id.clone());
            cells.push(entry.selection_date_iso());
            cells.push(entry.assigned_to.clone().unwrap_or_default());
            cells
        })
        .collect();
    Table { columns, rows }
}

#[cfg(test)]
mod tests {
    use super::{assigned_table, manager_view, representative_view, selected_table};
    use crate::model::lead::{Lead, LeadField};
    use crate::model::moved::{MovedCollection, MovedLead};
    use crate::repo::user_directory::StaticUserDirectory;
    use chrono::NaiveDate;

    fn moved() -> MovedCollection {
        let entry = |id: &str, assignee: Option<&str>| MovedLead {
            lead: Lead::new(id, format!("Firma {id}")).with(LeadField::City, "Bern"),
            selection_date: NaiveDate::from_ymd_opt(2024, 3, 5).unwrap(),
            assigned_to: assignee.map(str::to_string),
        };
        MovedCollection::from_entries(vec![
            entry("lead_1", Some("anna")),
            entry("lead_2", Some("ghost")),
            entry("lead_3", None),
        ])
        .unwrap()
    }

    #[test]
    fn manager_view_resolves_names_with_raw_id_fallback() {
        let moved = moved();
        let directory = StaticUserDirectory::new().with_user("anna", "Anna Rep", true);
        let rows = manager_view(&moved, &directory);
        assert_eq!(rows.len(), 3);
        assert_eq!(rows[0].assigned_to_name.as_deref(), Some("Anna Rep"));
        assert_eq!(rows[1].assigned_to_name.as_deref(), Some("ghost"));
        assert_eq!(rows[2].assigned_to_name, None);
    }

    #[test]
    fn representative_view_filters_by_assignee() {
        let moved = moved();
        let rows = representative_view(&moved, "anna");
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].entry.lead_id(), "lead_1");
        assert!(representative_view(&moved, "nobody").is_empty());
    }

    #[test]
    fn assigned_table_projects_display_columns() {
        let moved = moved();
        let directory = StaticUserDirectory::new().with_user("anna", "Anna Rep", true);
        let table = assigned_table(&manager_view(&moved, &directory), true);
        assert_eq!(table.columns.len(), 6);
        assert_eq!(table.cell(0, "ort"), Some("Bern"));
        assert_eq!(table.cell(0, "selection_date"), Some("2024-03-05"));
        assert_eq!(table.cell(0, "assigned_to_name"), Some("Anna Rep"));

        let table = assigned_table(&representative_view(&moved, "anna"), false);
        assert_eq!(table.cell(0, "assigned_to_name"), None);
    }

    #[test]
    fn selected_table_renders_dates_as_strings() {
        let table = selected_table(&moved());
        assert_eq!(table.rows.len(), 3);
        assert_eq!(table.cell(2, "lead_id"), Some("lead_3"));
        assert_eq!(table.cell(2, "selection_date"), Some("2024-03-05"));
        assert_eq!(table.cell(2, "assigned_to"), Some(""));
        assert_eq!(table.cell(0, "bonität"), Some(""));
    }
}

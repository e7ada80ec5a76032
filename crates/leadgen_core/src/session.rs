//! Session context.
//!
//! # Responsibility
//! - Own all per-session state: identity, lead store, selection, moved
//!   collection, notes ledger and the open notes editor.
//! - Gate mutations on authentication and manager-only actions on role.
//! - Emit metadata-only log events for every state change.
//!
//! # Invariants
//! - No lead data is loaded unless the auth collaborator answered and the
//!   user is authenticated.
//! - A move either commits the staged collection and clears the selection,
//!   or changes nothing.
//! - Log events carry ids and counts only, never note text or lead fields.

use crate::auth::{AuthError, AuthProvider};
use crate::model::identity::{AuthStatus, SessionIdentity};
use crate::model::lead::{LeadField, LeadId};
use crate::model::moved::MovedCollection;
use crate::model::store::LeadStore;
use crate::repo::lead_source::{load_store, LeadSource, SourceError};
use crate::repo::user_directory::{Representative, UserDirectory};
use crate::service::filter::{self, FilterError, FilterQuery, FilteredView};
use crate::service::migration::{self, MigrationError};
use crate::service::notes::{Neighbors, NotesEditor, NotesError, NotesLedger};
use crate::service::selection::SelectionTracker;
use crate::service::views::{self, AssignedRow, Table};
use chrono::NaiveDate;
use log::{debug, error, info, warn};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Session-level error surfaced to the presentation layer.
#[derive(Debug)]
pub enum SessionError {
    /// Auth/config collaborator could not answer; fatal for the session.
    CollaboratorUnavailable(AuthError),
    /// Lead source failed while opening the session.
    Source(SourceError),
    /// The user is not logged in.
    NotAuthenticated(AuthStatus),
    /// Manager-only action attempted by another role.
    Forbidden(&'static str),
    /// Manager assignment with no representatives to choose from.
    NoAssignees,
    /// Assignee is not a known representative.
    UnknownAssignee(String),
    Filter(FilterError),
    Migration(MigrationError),
    Notes(NotesError),
}

impl SessionError {
    /// Warnings leave state unchanged and are shown inline; everything else
    /// is an error banner.
    pub fn is_warning(&self) -> bool {
        matches!(
            self,
            Self::NoAssignees
                | Self::Migration(MigrationError::EmptySelection)
                | Self::Notes(NotesError::LeadNotVisible(_))
                | Self::Notes(NotesError::NoNeighbor)
        )
    }
}

impl Display for SessionError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::CollaboratorUnavailable(err) => write!(f, "{err}"),
            Self::Source(err) => write!(f, "{err}"),
            Self::NotAuthenticated(status) => write!(
                f,
                "{}",
                status.message().unwrap_or("session is not authenticated")
            ),
            Self::Forbidden(action) => write!(f, "only managers may {action}"),
            Self::NoAssignees => write!(f, "no representatives available for assignment"),
            Self::UnknownAssignee(user_id) => {
                write!(f, "assignee `{user_id}` is not a representative")
            }
            Self::Filter(err) => write!(f, "{err}"),
            Self::Migration(err) => write!(f, "{err}"),
            Self::Notes(err) => write!(f, "{err}"),
        }
    }
}

impl Error for SessionError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::CollaboratorUnavailable(err) => Some(err),
            Self::Source(err) => Some(err),
            Self::Filter(err) => Some(err),
            Self::Migration(err) => Some(err),
            Self::Notes(err) => Some(err),
            Self::NotAuthenticated(_)
            | Self::Forbidden(_)
            | Self::NoAssignees
            | Self::UnknownAssignee(_) => None,
        }
    }
}

impl From<SourceError> for SessionError {
    fn from(value: SourceError) -> Self {
        Self::Source(value)
    }
}

impl From<FilterError> for SessionError {
    fn from(value: FilterError) -> Self {
        Self::Filter(value)
    }
}

impl From<MigrationError> for SessionError {
    fn from(value: MigrationError) -> Self {
        Self::Migration(value)
    }
}

impl From<NotesError> for SessionError {
    fn from(value: NotesError) -> Self {
        Self::Notes(value)
    }
}

pub type SessionResult<T> = Result<T, SessionError>;

/// Role-keyed assigned-leads projection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AssignedView<'a> {
    /// Every entry with assignee names.
    Manager(Vec<AssignedRow<'a>>),
    /// Entries assigned to the current user.
    Representative(Vec<AssignedRow<'a>>),
}

impl<'a> AssignedView<'a> {
    pub fn rows(&self) -> &[AssignedRow<'a>] {
        match self {
            Self::Manager(rows) | Self::Representative(rows) => rows,
        }
    }

    pub fn heading(&self) -> &'static str {
        match self {
            Self::Manager(_) => "Manager View: All Assigned Leads",
            Self::Representative(_) => "Leads Assigned To You",
        }
    }

    /// Display table; managers additionally see the assignee name.
    pub fn table(&self) -> Table {
        views::assigned_table(self.rows(), matches!(self, Self::Manager(_)))
    }
}

/// Explicit per-session state passed to every operation.
pub struct LeadSession<D: UserDirectory> {
    identity: SessionIdentity,
    directory: D,
    store: LeadStore,
    selection: SelectionTracker,
    moved: MovedCollection,
    notes: NotesLedger,
    notes_editor: Option<NotesEditor>,
}

impl<D: UserDirectory> LeadSession<D> {
    /// Resolves the identity, then loads the lead store.
    ///
    /// # Errors
    /// - `SessionError::CollaboratorUnavailable` when the auth collaborator
    ///   fails; no lead data is fetched.
    /// - `SessionError::NotAuthenticated` for rejected/absent logins.
    /// - `SessionError::Source` when the lead source fails.
    pub fn open(
        auth: &dyn AuthProvider,
        source: &dyn LeadSource,
        directory: D,
    ) -> SessionResult<Self> {
        let identity = auth.identity().map_err(|err| {
            error!(
                "event=session_open module=session status=error error_code=auth_unavailable error={}",
                err
            );
            SessionError::CollaboratorUnavailable(err)
        })?;
        if !identity.is_authenticated() {
            warn!("event=session_open module=session status=warn error_code=not_authenticated");
            return Err(SessionError::NotAuthenticated(identity.status));
        }

        let store = load_store(source)?;
        info!(
            "event=session_open module=session status=ok user={} role={} leads={}",
            identity.user_id,
            identity.role.as_str(),
            store.len()
        );
        Ok(Self {
            identity,
            directory,
            store,
            selection: SelectionTracker::new(),
            moved: MovedCollection::new(),
            notes: NotesLedger::new(),
            notes_editor: None,
        })
    }

    pub fn identity(&self) -> &SessionIdentity {
        &self.identity
    }

    pub fn store(&self) -> &LeadStore {
        &self.store
    }

    pub fn selection(&self) -> &SelectionTracker {
        &self.selection
    }

    pub fn moved(&self) -> &MovedCollection {
        &self.moved
    }

    pub fn notes(&self) -> &NotesLedger {
        &self.notes
    }

    /// Ends the session login; subsequent mutations are refused.
    pub fn logout(&mut self) {
        info!(
            "event=session_logout module=session status=ok user={}",
            self.identity.user_id
        );
        self.identity = SessionIdentity::anonymous(AuthStatus::NotAttempted);
        self.notes_editor = None;
    }

    /// Columns offered as category filters.
    pub fn filterable_fields(&self) -> Vec<LeadField> {
        self.store.filterable_fields()
    }

    pub fn category_options(&self, field: LeadField) -> SessionResult<Vec<String>> {
        Ok(filter::category_options(&self.store, field)?)
    }

    /// Visible leads for `query`, excluding moved leads.
    pub fn visible_leads(&self, query: &FilterQuery) -> SessionResult<FilteredView<'_>> {
        let view = filter::apply(&self.store, &self.moved, query)?;
        debug!(
            "event=leads_filter module=filter status=ok categories={} search={} visible={}",
            query.categories.len(),
            query.search.is_some(),
            view.len()
        );
        Ok(view)
    }

    pub fn toggle_lead(&mut self, lead_id: &str, checked: bool) {
        self.selection.toggle(lead_id, checked);
    }

    pub fn select_all_visible(&mut self, visible_ids: &[LeadId], checked: bool) {
        self.selection.select_all_visible(visible_ids, checked);
    }

    pub fn all_visible_selected(&self, visible_ids: &[LeadId]) -> bool {
        self.selection.all_visible_selected(visible_ids)
    }

    /// Assignment candidates for the manager's picker.
    ///
    /// # Errors
    /// - `SessionError::Forbidden` for non-managers.
    /// - `SessionError::NoAssignees` when the directory has no representatives.
    pub fn assignee_candidates(&self) -> SessionResult<Vec<Representative>> {
        self.ensure_manager("assign leads")?;
        let candidates = self.directory.representatives();
        if candidates.is_empty() {
            warn!("event=assignee_list module=session status=warn error_code=no_assignees");
            return Err(SessionError::NoAssignees);
        }
        Ok(candidates)
    }

    /// Moves the checked leads, assigning them when `assignee` is set.
    ///
    /// Returns the number of leads moved. On any error the moved collection
    /// and selection are unchanged.
    pub fn move_selected(
        &mut self,
        selection_date: NaiveDate,
        assignee: Option<&str>,
    ) -> SessionResult<usize> {
        self.ensure_authenticated()?;
        if let Some(assignee) = assignee {
            let candidates = self.assignee_candidates()?;
            if !candidates.iter().any(|rep| rep.user_id == assignee.trim()) {
                return Err(SessionError::UnknownAssignee(assignee.to_string()));
            }
        }

        let outcome = match migration::move_leads(
            &self.store,
            &self.selection,
            &self.moved,
            selection_date,
            assignee,
        ) {
            Ok(outcome) => outcome,
            Err(err) => {
                warn!(
                    "event=leads_move module=migration status=warn selected={} error={}",
                    self.selection.len(),
                    err
                );
                return Err(err.into());
            }
        };

        self.moved = outcome.collection;
        self.selection.clear();
        info!(
            "event=leads_move module=migration status=ok moved={} total={} assigned={} date={}",
            outcome.moved_count,
            self.moved.len(),
            assignee.is_some(),
            selection_date
        );
        Ok(outcome.moved_count)
    }

    /// `move_selected` stamped with the local calendar date.
    pub fn move_selected_today(&mut self, assignee: Option<&str>) -> SessionResult<usize> {
        self.move_selected(chrono::Local::now().date_naive(), assignee)
    }

    /// Manager-only reset of the moved/assigned collection.
    pub fn clear_moved(&mut self) -> SessionResult<usize> {
        self.ensure_authenticated()?;
        self.ensure_manager("clear assigned leads")?;
        let removed = self.moved.clear();
        info!("event=moved_clear module=session status=ok removed={removed}");
        Ok(removed)
    }

    /// Assigned-leads projection for the current role.
    pub fn assigned_view(&self) -> AssignedView<'_> {
        if self.identity.role.is_manager() {
            AssignedView::Manager(views::manager_view(&self.moved, &self.directory))
        } else {
            AssignedView::Representative(views::representative_view(
                &self.moved,
                &self.identity.user_id,
            ))
        }
    }

    /// Full moved-leads table.
    pub fn selected_view(&self) -> Table {
        views::selected_table(&self.moved)
    }

    pub fn note(&self, lead_id: &str) -> &str {
        self.notes.get_note(lead_id)
    }

    /// Overwrites the note of one store lead.
    pub fn save_note(&mut self, lead_id: &str, text: impl Into<String>) -> SessionResult<()> {
        self.ensure_authenticated()?;
        if !self.store.contains(lead_id) {
            return Err(NotesError::UnknownLead(lead_id.to_string()).into());
        }
        let text = text.into();
        info!(
            "event=note_save module=notes status=ok lead_id={} chars={}",
            lead_id,
            text.chars().count()
        );
        self.notes.set_note(lead_id, text);
        Ok(())
    }

    /// Opens the notes editor on `lead_id` within the visible order.
    pub fn open_notes(
        &mut self,
        visible_ids: &[LeadId],
        lead_id: &str,
    ) -> SessionResult<Neighbors> {
        let editor = NotesEditor::open(visible_ids.to_vec(), lead_id)?;
        let neighbors = editor.neighbors()?;
        self.notes_editor = Some(editor);
        Ok(neighbors)
    }

    pub fn notes_editor(&self) -> Option<&NotesEditor> {
        self.notes_editor.as_ref()
    }

    pub fn close_notes(&mut self) {
        self.notes_editor = None;
    }

    /// Moves the editor to the previous lead and returns its id.
    pub fn notes_previous(&mut self) -> SessionResult<LeadId> {
        let editor = self.notes_editor.as_mut().ok_or(NotesError::EditorClosed)?;
        Ok(editor.go_previous()?.to_string())
    }

    /// Moves the editor to the next lead and returns its id.
    pub fn notes_next(&mut self) -> SessionResult<LeadId> {
        let editor = self.notes_editor.as_mut().ok_or(NotesError::EditorClosed)?;
        Ok(editor.go_next()?.to_string())
    }

    /// Re-checks the open editor against the current visible ids.
    ///
    /// Closes the editor and reports `NotesError::LeadNotVisible` when its
    /// lead disappeared from view.
    pub fn sync_notes_editor(&mut self, visible_ids: &[LeadId]) -> SessionResult<()> {
        let Some(editor) = &self.notes_editor else {
            return Ok(());
        };
        if visible_ids.iter().any(|id| id == editor.current()) {
            return Ok(());
        }
        let lead_id = editor.current().to_string();
        self.notes_editor = None;
        warn!(
            "event=notes_sync module=notes status=warn error_code=lead_not_visible lead_id={}",
            lead_id
        );
        Err(NotesError::LeadNotVisible(lead_id).into())
    }

    fn ensure_authenticated(&self) -> SessionResult<()> {
        if self.identity.is_authenticated() {
            Ok(())
        } else {
            Err(SessionError::NotAuthenticated(self.identity.status))
        }
    }

    fn ensure_manager(&self, action: &'static str) -> SessionResult<()> {
        if self.identity.role.is_manager() {
            Ok(())
        } else {
            warn!(
                "event=role_gate module=session status=warn user={} role={} action={}",
                self.identity.user_id,
                self.identity.role.as_str(),
                action
            );
            Err(SessionError::Forbidden(action))
        }
    }
}

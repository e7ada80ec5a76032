//! Core domain logic for the lead selection workbench.
//! This crate is the single source of truth for filter, selection, migration,
//! notes and role-visibility rules; presentation layers stay thin adapters.

pub mod auth;
pub mod config;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;
pub mod session;

pub use auth::{AuthError, AuthProvider, ConfigAuthProvider, StaticAuthProvider};
pub use config::{AppConfig, ConfigError, LoggingConfig, UserEntry};
pub use logging::{
    default_log_level, init_logging, init_logging_from_config, logging_status, LoggingError,
};
pub use model::identity::{parse_role, AuthStatus, Role, SessionIdentity};
pub use model::lead::{parse_lead_field, Lead, LeadField, LeadId};
pub use model::moved::{DuplicateMovedLead, MovedCollection, MovedLead};
pub use model::store::{LeadStore, LeadStoreError};
pub use repo::lead_source::{
    load_store, JsonFileLeadSource, LeadSource, SampleLeadSource, SourceError,
};
pub use repo::user_directory::{Representative, StaticUserDirectory, UserDirectory};
pub use service::filter::{FilterError, FilterQuery, FilteredView, NO_LEADS_MESSAGE};
pub use service::migration::{MigrationError, MoveOutcome};
pub use service::notes::{neighbors, Neighbors, NotesEditor, NotesError, NotesLedger};
pub use service::selection::SelectionTracker;
pub use service::views::Table;
pub use session::{AssignedView, LeadSession, SessionError, SessionResult};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::core_version;

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}

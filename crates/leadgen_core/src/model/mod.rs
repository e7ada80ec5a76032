//! Session domain model for lead browsing and migration.
//!
//! # Responsibility
//! - Define canonical lead records and the collections built from them.
//! - Define the authenticated identity every session operation runs under.
//!
//! # Invariants
//! - Every lead is identified by a stable `LeadId`, unique per store.
//! - Moved entries are snapshots; they never alias store records.

pub mod identity;
pub mod lead;
pub mod moved;
pub mod store;

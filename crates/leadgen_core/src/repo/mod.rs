//! Collaborator contracts and in-process implementations.
//!
//! # Responsibility
//! - Define read-only data access contracts the session depends on.
//! - Keep source formats (hardcoded table, JSON file) out of session logic.
//!
//! # Invariants
//! - Lead sources are pure reads; they are consulted once per session.
//! - Directory lookups never fail; absence is reported as `None`/empty.

pub mod lead_source;
pub mod user_directory;

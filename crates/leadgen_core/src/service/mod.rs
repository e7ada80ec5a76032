//! Core use-case engines.
//!
//! # Responsibility
//! - Implement filter, selection, migration, notes and view rules as plain
//!   functions/types over the session model.
//! - Stay free of auth and logging concerns; `session` layers those on top.

pub mod filter;
pub mod migration;
pub mod notes;
pub mod selection;
pub mod views;

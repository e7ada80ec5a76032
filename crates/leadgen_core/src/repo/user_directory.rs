//! User directory contract.
//!
//! Resolves user ids to display names and lists the representatives a
//! manager may assign leads to.

use std::collections::BTreeMap;

/// Assignable representative as shown in the manager's picker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Representative {
    pub user_id: String,
    pub display_name: String,
}

/// Read-only user lookup.
pub trait UserDirectory {
    /// Display name for `user_id`, or `None` when unknown.
    fn display_name(&self, user_id: &str) -> Option<String>;
    /// Assignment candidates sorted by user id.
    fn representatives(&self) -> Vec<Representative>;
}

/// Fixed in-memory directory.
#[derive(Debug, Clone, Default)]
pub struct StaticUserDirectory {
    names: BTreeMap<String, String>,
    representatives: Vec<String>,
}

impl StaticUserDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a user; `assignable` marks them as a representative.
    pub fn with_user(
        mut self,
        user_id: impl Into<String>,
        display_name: impl Into<String>,
        assignable: bool,
    ) -> Self {
        let user_id = user_id.into();
        if assignable && !self.representatives.contains(&user_id) {
            self.representatives.push(user_id.clone());
            self.representatives.sort();
        }
        self.names.insert(user_id, display_name.into());
        self
    }
}

impl UserDirectory for StaticUserDirectory {
    fn display_name(&self, user_id: &str) -> Option<String> {
        self.names.get(user_id).cloned()
    }

    fn representatives(&self) -> Vec<Representative> {
        self.representatives
            .iter()
            .map(|user_id| Representative {
                user_id: user_id.clone(),
                display_name: self
                    .names
                    .get(user_id)
                    .cloned()
                    .unwrap_or_else(|| user_id.clone()),
            })
            .collect()
    }
}

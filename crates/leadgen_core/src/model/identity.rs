//! Authenticated session identity.
//!
//! # Responsibility
//! - Carry the user id, display name and role resolved by the auth collaborator.
//! - Map the three login states to the messages shown instead of lead data.
//!
//! # Invariants
//! - Only `AuthStatus::Authenticated` identities may mutate session state.
//! - Unknown or missing roles resolve to `Role::Default`, never `Manager`.

/// User role gating manager-only actions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Role {
    /// Assigns leads and may clear the moved collection.
    Manager,
    /// Sees only leads assigned to them.
    Representative,
    /// Fallback for users without a configured role.
    Default,
}

impl Role {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Manager => "Manager",
            Self::Representative => "Representative",
            Self::Default => "default_role",
        }
    }

    pub fn is_manager(self) -> bool {
        self == Self::Manager
    }
}

/// Resolves a configured role string. Matching is case-insensitive.
pub fn parse_role(value: Option<&str>) -> Role {
    match value.map(|raw| raw.trim().to_ascii_lowercase()).as_deref() {
        Some("manager") => Role::Manager,
        Some("representative") => Role::Representative,
        _ => Role::Default,
    }
}

/// Login state reported by the auth collaborator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthStatus {
    Authenticated,
    /// Credentials were submitted and rejected.
    Rejected,
    /// No login was attempted yet.
    NotAttempted,
}

impl AuthStatus {
    /// User-facing message shown in place of lead data; `None` when
    /// authenticated.
    pub fn message(self) -> Option<&'static str> {
        match self {
            Self::Authenticated => None,
            Self::Rejected => Some("Username/password is incorrect"),
            Self::NotAttempted => Some("Please enter your username and password"),
        }
    }
}

/// Identity resolved before any session operation runs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionIdentity {
    pub status: AuthStatus,
    pub user_id: String,
    pub display_name: String,
    pub role: Role,
}

impl SessionIdentity {
    /// Authenticated identity.
    pub fn authenticated(
        user_id: impl Into<String>,
        display_name: impl Into<String>,
        role: Role,
    ) -> Self {
        Self {
            status: AuthStatus::Authenticated,
            user_id: user_id.into(),
            display_name: display_name.into(),
            role,
        }
    }

    /// Anonymous identity in a non-authenticated state.
    pub fn anonymous(status: AuthStatus) -> Self {
        Self {
            status,
            user_id: String::new(),
            display_name: String::new(),
            role: Role::Default,
        }
    }

    pub fn is_authenticated(&self) -> bool {
        self.status == AuthStatus::Authenticated
    }

    /// Sidebar greeting for the signed-in user.
    pub fn welcome_message(&self) -> String {
        format!("Welcome *{}*", self.display_name)
    }
}

#[cfg(test)]
mod tests {
    use super::{parse_role, AuthStatus, Role, SessionIdentity};

    #[test]
    fn parse_role_falls_back_to_default() {
        assert_eq!(parse_role(Some("Manager")), Role::Manager);
        assert_eq!(parse_role(Some(" representative ")), Role::Representative);
        assert_eq!(parse_role(Some("admin")), Role::Default);
        assert_eq!(parse_role(None), Role::Default);
    }

    #[test]
    fn anonymous_identity_is_not_authenticated() {
        let identity = SessionIdentity::anonymous(AuthStatus::Rejected);
        assert!(!identity.is_authenticated());
        assert_eq!(
            identity.status.message(),
            Some("Username/password is incorrect")
        );
    }

    #[test]
    fn welcome_message_uses_display_name() {
        let identity = SessionIdentity::authenticated("jdoe", "Jane Doe", Role::Manager);
        assert_eq!(identity.welcome_message(), "Welcome *Jane Doe*");
        assert!(identity.role.is_manager());
    }
}

//! Auth/session collaborator contract.
//!
//! # Responsibility
//! - Resolve the identity a session runs under before any lead data loads.
//! - Keep the login handshake itself outside core.
//!
//! # Invariants
//! - `AuthError` means the collaborator itself is unavailable; a rejected
//!   login is a successful answer with `AuthStatus::Rejected`.

use crate::config::AppConfig;
use crate::model::identity::{AuthStatus, SessionIdentity};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Auth collaborator failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthError {
    Unavailable(String),
}

impl Display for AuthError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Unavailable(details) => write!(f, "auth collaborator unavailable: {details}"),
        }
    }
}

impl Error for AuthError {}

/// Supplies the identity of the current session.
pub trait AuthProvider {
    fn identity(&self) -> Result<SessionIdentity, AuthError>;
}

/// Provider returning a fixed identity.
#[derive(Debug, Clone)]
pub struct StaticAuthProvider {
    identity: SessionIdentity,
}

impl StaticAuthProvider {
    pub fn new(identity: SessionIdentity) -> Self {
        Self { identity }
    }
}

impl AuthProvider for StaticAuthProvider {
    fn identity(&self) -> Result<SessionIdentity, AuthError> {
        Ok(self.identity.clone())
    }
}

/// Resolves a logged-in username against the configured credentials.
///
/// `None` means no login was attempted; an unknown username is a rejected
/// login.
pub struct ConfigAuthProvider<'a> {
    config: &'a AppConfig,
    username: Option<String>,
}

impl<'a> ConfigAuthProvider<'a> {
    pub fn new(config: &'a AppConfig, username: Option<String>) -> Self {
        Self { config, username }
    }
}

impl AuthProvider for ConfigAuthProvider<'_> {
    fn identity(&self) -> Result<SessionIdentity, AuthError> {
        let Some(username) = self.username.as_deref().map(str::trim) else {
            return Ok(SessionIdentity::anonymous(AuthStatus::NotAttempted));
        };
        match self.config.user(username) {
            Some(entry) => Ok(SessionIdentity::authenticated(
                username,
                entry.name.clone(),
                entry.role(),
            )),
            None => Ok(SessionIdentity::anonymous(AuthStatus::Rejected)),
        }
    }
}

//! Application configuration file.
//!
//! # Responsibility
//! - Load the YAML credentials/cookie/logging configuration.
//! - Serve as the user directory for assignee lookups.
//!
//! # Invariants
//! - A config that fails to load is fatal for the session; callers must not
//!   render lead data without one.
//! - User ids and display names are non-empty after validation.
//! - Password hashes and unknown keys are ignored, never retained.

use crate::model::identity::{parse_role, Role};
use crate::repo::user_directory::{Representative, UserDirectory};
use log::{error, info};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::{Path, PathBuf};

/// Configuration load/validation failures.
#[derive(Debug)]
pub enum ConfigError {
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    Parse(serde_yaml::Error),
    Invalid(String),
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io { path, source } => write!(
                f,
                "configuration file `{}` could not be read: {source}",
                path.display()
            ),
            Self::Parse(err) => write!(f, "configuration file is not valid YAML: {err}"),
            Self::Invalid(details) => write!(f, "invalid configuration: {details}"),
        }
    }
}

impl Error for ConfigError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            Self::Parse(err) => Some(err),
            Self::Invalid(_) => None,
        }
    }
}

impl From<serde_yaml::Error> for ConfigError {
    fn from(value: serde_yaml::Error) -> Self {
        Self::Parse(value)
    }
}

/// One configured user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserEntry {
    pub name: String,
    #[serde(default)]
    pub email: Option<String>,
    /// `Manager`, `Representative`, or absent.
    #[serde(default)]
    pub role: Option<String>,
}

impl UserEntry {
    pub fn role(&self) -> Role {
        parse_role(self.role.as_deref())
    }
}

/// Credentials section keyed by user id.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Credentials {
    #[serde(default)]
    pub usernames: BTreeMap<String, UserEntry>,
}

/// Session cookie settings consumed by the auth front end.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CookieConfig {
    pub name: String,
    pub key: String,
    #[serde(default = "default_cookie_expiry_days")]
    pub expiry_days: u32,
}

fn default_cookie_expiry_days() -> u32 {
    30
}

/// Optional logging section.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoggingConfig {
    #[serde(default)]
    pub level: Option<String>,
    /// Absolute log directory; logging stays off when absent.
    #[serde(default)]
    pub dir: Option<String>,
}

/// Root configuration document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub credentials: Credentials,
    #[serde(default)]
    pub cookie: Option<CookieConfig>,
    #[serde(default)]
    pub logging: Option<LoggingConfig>,
}

impl AppConfig {
    /// Reads and validates a YAML configuration file.
    ///
    /// # Errors
    /// - `ConfigError::Io` when the file is missing or unreadable.
    /// - `ConfigError::Parse` / `ConfigError::Invalid` for malformed content.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path).map_err(|source| {
            error!(
                "event=config_load module=config status=error error_code=config_unreadable path={}",
                path.display()
            );
            ConfigError::Io {
                path: path.to_path_buf(),
                source,
            }
        })?;
        let config = Self::from_yaml_str(&contents)?;
        info!(
            "event=config_load module=config status=ok users={}",
            config.credentials.usernames.len()
        );
        Ok(config)
    }

    /// Parses and validates configuration text.
    pub fn from_yaml_str(contents: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_yaml::from_str(contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Validates declaration-level invariants.
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (user_id, entry) in &self.credentials.usernames {
            if user_id.trim().is_empty() {
                return Err(ConfigError::Invalid("user id must not be empty".to_string()));
            }
            if entry.name.trim().is_empty() {
                return Err(ConfigError::Invalid(format!(
                    "user `{user_id}` has an empty display name"
                )));
            }
        }
        if let Some(cookie) = &self.cookie {
            if cookie.name.trim().is_empty() {
                return Err(ConfigError::Invalid(
                    "cookie name must not be empty".to_string(),
                ));
            }
        }
        Ok(())
    }

    pub fn user(&self, user_id: &str) -> Option<&UserEntry> {
        self.credentials.usernames.get(user_id)
    }
}

impl UserDirectory for AppConfig {
    fn display_name(&self, user_id: &str) -> Option<String> {
        self.user(user_id).map(|entry| entry.name.clone())
    }

    fn representatives(&self) -> Vec<Representative> {
        self.credentials
            .usernames
            .iter()
            .filter(|(_, entry)| entry.role() == Role::Representative)
            .map(|(user_id, entry)| Representative {
                user_id: user_id.clone(),
                display_name: entry.name.clone(),
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::{AppConfig, ConfigError};
    use crate::model::identity::Role;
    use crate::repo::user_directory::UserDirectory;

    const SAMPLE: &str = r#"
credentials:
  usernames:
    mmanager:
      name: Mia Manager
      email: mia@example.com
      password: "$2b$12$hash"
      role: Manager
    rrep:
      name: Rolf Rep
      role: Representative
    guest:
      name: Gast
cookie:
  name: lead_cookie
  key: secret
  expiry_days: 7
"#;

    #[test]
    fn parses_users_roles_and_cookie() {
        let config = AppConfig::from_yaml_str(SAMPLE).expect("sample config should parse");
        assert_eq!(config.user("mmanager").map(|u| u.role()), Some(Role::Manager));
        assert_eq!(config.user("guest").map(|u| u.role()), Some(Role::Default));
        assert_eq!(config.cookie.as_ref().map(|c| c.expiry_days), Some(7));
        assert!(config.logging.is_none());
    }

    #[test]
    fn directory_lists_representatives_only() {
        let config = AppConfig::from_yaml_str(SAMPLE).unwrap();
        let reps = config.representatives();
        assert_eq!(reps.len(), 1);
        assert_eq!(reps[0].user_id, "rrep");
        assert_eq!(reps[0].display_name, "Rolf Rep");
        assert_eq!(config.display_name("guest").as_deref(), Some("Gast"));
        assert_eq!(config.display_name("nobody"), None);
    }

    #[test]
    fn rejects_blank_display_names() {
        let err = AppConfig::from_yaml_str("credentials:\n  usernames:\n    x:\n      name: '  '\n")
            .expect_err("blank name must fail");
        assert!(matches!(err, ConfigError::Invalid(_)));
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let err = AppConfig::load("/nonexistent/leadgen/config.yaml")
            .expect_err("missing file must fail");
        assert!(matches!(err, ConfigError::Io { .. }));
    }
}

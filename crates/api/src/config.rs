//! Process configuration from environment variables.

use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;

use thiserror::Error;
use tracing::{info, warn};

use trattoria_auth::{PolicyDocument, PolicyError, RolePermissionTable, check_login_path};

pub const BIND_ADDR_VAR: &str = "TRATTORIA_BIND_ADDR";
pub const SESSION_SECRET_VAR: &str = "SESSION_SECRET";
pub const LOGIN_PATH_VAR: &str = "TRATTORIA_LOGIN_PATH";
pub const IDENTITY_TIMEOUT_VAR: &str = "TRATTORIA_IDENTITY_TIMEOUT_MS";
pub const POLICY_PATH_VAR: &str = "TRATTORIA_POLICY_PATH";

const DEV_SESSION_SECRET: &str = "dev-secret";

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("invalid {var}: {reason}")]
    Invalid { var: &'static str, reason: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiConfig {
    pub bind_addr: SocketAddr,
    pub session_secret: String,
    pub login_path: String,
    pub identity_timeout: Duration,
    /// JSON policy document replacing the built-in table.
    pub policy_path: Option<PathBuf>,
}

impl ApiConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Build from an arbitrary variable source (tests pass a map).
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let bind_addr = match lookup(BIND_ADDR_VAR) {
            Some(raw) => raw.parse().map_err(|e| ConfigError::Invalid {
                var: BIND_ADDR_VAR,
                reason: format!("{e}"),
            })?,
            None => SocketAddr::from(([0, 0, 0, 0], 8080)),
        };

        let session_secret = match lookup(SESSION_SECRET_VAR) {
            Some(secret) if !secret.is_empty() => secret,
            Some(_) => {
                return Err(ConfigError::Invalid {
                    var: SESSION_SECRET_VAR,
                    reason: "must not be empty".to_string(),
                });
            }
            None => {
                warn!("{SESSION_SECRET_VAR} not set; using insecure dev default");
                DEV_SESSION_SECRET.to_string()
            }
        };

        let login_path = lookup(LOGIN_PATH_VAR).unwrap_or_else(|| "/login".to_string());
        check_login_path(&login_path).map_err(|e| ConfigError::Invalid {
            var: LOGIN_PATH_VAR,
            reason: e.to_string(),
        })?;

        let identity_timeout = match lookup(IDENTITY_TIMEOUT_VAR) {
            Some(raw) => {
                let ms: u64 = raw.trim().parse().map_err(|e| ConfigError::Invalid {
                    var: IDENTITY_TIMEOUT_VAR,
                    reason: format!("{e}"),
                })?;
                if ms == 0 {
                    return Err(ConfigError::Invalid {
                        var: IDENTITY_TIMEOUT_VAR,
                        reason: "must be greater than zero".to_string(),
                    });
                }
                Duration::from_millis(ms)
            }
            None => Duration::from_secs(5),
        };

        let policy_path = lookup(POLICY_PATH_VAR)
            .filter(|raw| !raw.trim().is_empty())
            .map(PathBuf::from);

        Ok(Self {
            bind_addr,
            session_secret,
            login_path,
            identity_timeout,
            policy_path,
        })
    }

    /// The table to serve: the policy file when configured, otherwise the
    /// built-in grid.
    pub fn load_table(&self) -> Result<RolePermissionTable, PolicyError> {
        match &self.policy_path {
            Some(path) => {
                let document = PolicyDocument::load(path)?;
                info!(path = %path.display(), "loaded role permission table from file");
                Ok(RolePermissionTable::from_document(&document, 0))
            }
            None => Ok(RolePermissionTable::builtin()),
        }
    }
}

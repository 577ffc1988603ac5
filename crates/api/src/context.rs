use std::sync::Arc;
use std::time::Duration;

use trattoria_auth::{IdentityProvider, PolicyStore};

use crate::config::ApiConfig;
use crate::jwt::JwtIdentityProvider;

/// Shared request-independent state.
#[derive(Clone)]
pub struct AppState {
    pub policy: Arc<PolicyStore>,
    pub identity: Arc<dyn IdentityProvider>,
    pub identity_timeout: Duration,
    pub login_path: Arc<str>,
}

impl AppState {
    pub fn new(
        policy: Arc<PolicyStore>,
        identity: Arc<dyn IdentityProvider>,
        identity_timeout: Duration,
        login_path: impl Into<Arc<str>>,
    ) -> Self {
        Self {
            policy,
            identity,
            identity_timeout,
            login_path: login_path.into(),
        }
    }

    pub fn from_config(config: &ApiConfig) -> anyhow::Result<Self> {
        use anyhow::Context;

        let table = config.load_table().context("failed to load role permission table")?;
        Ok(Self::new(
            Arc::new(PolicyStore::new(table)),
            Arc::new(JwtIdentityProvider::hs256(config.session_secret.as_bytes())),
            config.identity_timeout,
            config.login_path.as_str(),
        ))
    }
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState")
            .field("table_version", &self.policy.current().version())
            .field("identity_timeout", &self.identity_timeout)
            .field("login_path", &self.login_path)
            .finish_non_exhaustive()
    }
}

//! Identity boundary: who is asking, as reported by an external provider.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, warn};

use trattoria_core::UserId;

use crate::{Role, TokenValidationError};

/// A signed-in user as reported by the identity provider.
///
/// The role tag is kept verbatim; [`Identity::role`] turns it into a [`Role`]
/// and yields `None` for anything unrecognised.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    pub user_id: UserId,
    pub role: Option<String>,
}

impl Identity {
    pub fn new(user_id: UserId, role: Option<String>) -> Self {
        Self { user_id, role }
    }

    pub fn with_role(user_id: UserId, role: Role) -> Self {
        Self::new(user_id, Some(role.as_str().to_string()))
    }

    pub fn role(&self) -> Option<Role> {
        self.role.as_deref().and_then(Role::parse)
    }
}

/// Where identity resolution currently stands.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IdentityState {
    /// A lookup is in flight; nothing may be decided yet.
    Loading,
    /// Settled. `None` means nobody is signed in.
    Resolved(Option<Identity>),
}

impl IdentityState {
    pub fn anonymous() -> Self {
        IdentityState::Resolved(None)
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, IdentityState::Loading)
    }

    /// The settled identity, if any. `Loading` has none.
    pub fn identity(&self) -> Option<&Identity> {
        match self {
            IdentityState::Resolved(identity) => identity.as_ref(),
            IdentityState::Loading => None,
        }
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum IdentityError {
    #[error("invalid session token: {0}")]
    InvalidToken(String),

    #[error("session rejected: {0}")]
    Rejected(#[from] TokenValidationError),

    #[error("identity provider unavailable: {0}")]
    Unavailable(String),
}

/// External source of identities (session store, token verifier, ...).
#[async_trait]
pub trait IdentityProvider: Send + Sync {
    /// `Ok(None)` means the token is well-formed but belongs to nobody.
    async fn resolve(&self, token: &str) -> Result<Option<Identity>, IdentityError>;
}

#[async_trait]
impl<P: IdentityProvider + ?Sized> IdentityProvider for Arc<P> {
    async fn resolve(&self, token: &str) -> Result<Option<Identity>, IdentityError> {
        (**self).resolve(token).await
    }
}

/// Ask `provider` about `token`, bounded by `timeout`.
///
/// Every failure collapses to "nobody signed in".
pub async fn resolve_with_timeout<P>(provider: &P, token: &str, timeout: Duration) -> Option<Identity>
where
    P: IdentityProvider + ?Sized,
{
    match tokio::time::timeout(timeout, provider.resolve(token)).await {
        Ok(Ok(identity)) => identity,
        Ok(Err(IdentityError::Unavailable(reason))) => {
            warn!(%reason, "identity provider unavailable; treating request as anonymous");
            None
        }
        Ok(Err(err)) => {
            debug!(error = %err, "session token refused");
            None
        }
        Err(_) => {
            warn!(
                timeout_ms = timeout.as_millis() as u64,
                "identity resolution timed out; treating request as anonymous"
            );
            None
        }
    }
}

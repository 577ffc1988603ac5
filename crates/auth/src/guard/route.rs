use tracing::debug;
use url::form_urlencoded;

use trattoria_core::{DomainError, DomainResult};

use crate::{IdentityState, PermissionEvaluator, Requirement, RolePermissionTable};

/// Route guard state: `Loading -> {Authorized, Unauthorized}`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RouteDecision {
    /// Identity not settled yet. Render nothing and do not redirect.
    Loading,
    Authorized,
    /// Send the user to sign in.
    Unauthorized { redirect_to: String },
}

/// Accepts only local absolute paths (`/login`), never a URL or a
/// protocol-relative `//host` reference. Browsers read `\` as `/`, so `/\host`
/// counts as protocol-relative too.
pub fn check_login_path(path: &str) -> DomainResult<()> {
    if is_local_path(path) {
        Ok(())
    } else {
        Err(DomainError::validation(format!(
            "login path must be a local absolute path, got '{path}'"
        )))
    }
}

fn is_local_path(path: &str) -> bool {
    let mut bytes = path.bytes();
    bytes.next() == Some(b'/')
        && !matches!(bytes.next(), Some(b'/' | b'\\'))
        && !path.chars().any(char::is_control)
}

/// Navigation guard for protected pages.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteGuard {
    requirement: Requirement,
    login_path: String,
}

impl RouteGuard {
    /// `login_path` must pass [`check_login_path`].
    pub fn new(requirement: Requirement, login_path: impl Into<String>) -> DomainResult<Self> {
        let login_path = login_path.into();
        check_login_path(&login_path)?;
        Ok(Self {
            requirement,
            login_path,
        })
    }

    pub fn requirement(&self) -> &Requirement {
        &self.requirement
    }

    pub fn login_path(&self) -> &str {
        &self.login_path
    }

    /// Decide a navigation to `requested` (used as the `next` parameter of the
    /// sign-in redirect when given).
    pub fn decide(
        &self,
        state: &IdentityState,
        table: &RolePermissionTable,
        requested: Option<&str>,
    ) -> RouteDecision {
        let identity = match state {
            IdentityState::Loading => return RouteDecision::Loading,
            IdentityState::Resolved(identity) => identity.as_ref(),
        };

        let eval = PermissionEvaluator::new(identity, table);
        if self.requirement.is_met(&eval) {
            return RouteDecision::Authorized;
        }

        debug!(
            requirement = %self.requirement,
            authenticated = eval.is_authenticated(),
            role = ?eval.role(),
            "navigation refused"
        );
        RouteDecision::Unauthorized {
            redirect_to: self.redirect_target(requested),
        }
    }

    fn redirect_target(&self, requested: Option<&str>) -> String {
        let Some(next) = requested.filter(|p| is_local_path(p)) else {
            return self.login_path.clone();
        };
        let query = form_urlencoded::Serializer::new(String::new())
            .append_pair("next", next)
            .finish();
        let separator = if self.login_path.contains('?') { '&' } else { '?' };
        format!("{}{}{}", self.login_path, separator, query)
    }
}

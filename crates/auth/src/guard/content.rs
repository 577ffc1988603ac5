use std::borrow::Cow;

use tracing::debug;

use crate::{IdentityState, PermissionEvaluator, Requirement, RolePermissionTable};

pub const INSUFFICIENT_PERMISSIONS: &str = "You do not have permission to view this content.";

/// What to show in place of guarded content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Fallback {
    /// Render nothing.
    Hide,
    /// Render an inline notice.
    Notice(Cow<'static, str>),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContentDecision {
    Render,
    Fallback(Fallback),
}

impl ContentDecision {
    pub fn is_render(&self) -> bool {
        matches!(self, ContentDecision::Render)
    }
}

/// Conditional-rendering guard.
///
/// An identity that is still loading counts as no identity here: the content
/// stays behind the fallback until someone with access is known.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContentGuard {
    requirement: Requirement,
    fallback: Fallback,
}

impl ContentGuard {
    /// Guard that hides the content when the requirement is not met.
    pub fn new(requirement: Requirement) -> Self {
        Self {
            requirement,
            fallback: Fallback::Hide,
        }
    }

    pub fn with_fallback(mut self, fallback: Fallback) -> Self {
        self.fallback = fallback;
        self
    }

    /// Show the standard "insufficient permissions" notice instead of hiding.
    pub fn with_notice(self) -> Self {
        self.with_fallback(Fallback::Notice(Cow::Borrowed(INSUFFICIENT_PERMISSIONS)))
    }

    pub fn requirement(&self) -> &Requirement {
        &self.requirement
    }

    pub fn decide(&self, state: &IdentityState, table: &RolePermissionTable) -> ContentDecision {
        let eval = PermissionEvaluator::new(state.identity(), table);
        self.decide_with(&eval)
    }

    pub fn decide_with(&self, eval: &PermissionEvaluator<'_>) -> ContentDecision {
        if self.requirement.is_met(eval) {
            ContentDecision::Render
        } else {
            debug!(requirement = %self.requirement, role = ?eval.role(), "content withheld");
            ContentDecision::Fallback(self.fallback.clone())
        }
    }
}

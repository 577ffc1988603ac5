//! Consumers of the evaluator.
//!
//! [`ContentGuard`] decides whether a fragment is shown; [`RouteGuard`] decides
//! whether a navigation proceeds or is sent to sign-in. The two share nothing
//! but the evaluator.

mod content;
mod route;

pub use content::{ContentDecision, ContentGuard, Fallback, INSUFFICIENT_PERMISSIONS};
pub use route::{RouteDecision, RouteGuard, check_login_path};

//! `trattoria-auth`: role/permission evaluation and the guards built on it.
//!
//! Pure decision logic: no HTTP, no storage. The only async piece is
//! [`IdentityResolver`], which waits on an external [`IdentityProvider`].

pub mod claims;
pub mod evaluator;
pub mod explain;
pub mod groups;
pub mod guard;
pub mod identity;
pub mod navigation;
pub mod permissions;
pub mod requirement;
pub mod resolver;
pub mod roles;
pub mod store;
pub mod table;

pub use claims::{SessionClaims, TokenValidationError, validate_claims};
pub use evaluator::PermissionEvaluator;
pub use explain::{Explanation, RbacRegistry, explain};
pub use groups::RoleGroup;
pub use guard::{
    ContentDecision, ContentGuard, Fallback, INSUFFICIENT_PERMISSIONS, RouteDecision, RouteGuard,
    check_login_path,
};
pub use identity::{Identity, IdentityError, IdentityProvider, IdentityState, resolve_with_timeout};
pub use navigation::{AdminSection, visible_sections};
pub use permissions::{Permission, UnknownPermission};
pub use requirement::{Match, Requirement};
pub use resolver::{IdentityResolver, Resolution};
pub use roles::{Role, UnknownRole};
pub use store::PolicyStore;
pub use table::{PolicyDocument, PolicyError, RolePermissionTable};

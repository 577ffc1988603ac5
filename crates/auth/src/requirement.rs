use crate::{Permission, PermissionEvaluator, Role, RoleGroup};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Match {
    All,
    Any,
}

/// Declarative access requirement attached to a guard.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Requirement {
    Permission(Permission),
    Permissions { permissions: Vec<Permission>, mode: Match },
    Role(Role),
    Roles(Vec<Role>),
    Group(RoleGroup),
}

impl Requirement {
    pub fn permission(permission: Permission) -> Self {
        Requirement::Permission(permission)
    }

    pub fn all(permissions: impl Into<Vec<Permission>>) -> Self {
        Requirement::Permissions {
            permissions: permissions.into(),
            mode: Match::All,
        }
    }

    pub fn any(permissions: impl Into<Vec<Permission>>) -> Self {
        Requirement::Permissions {
            permissions: permissions.into(),
            mode: Match::Any,
        }
    }

    pub fn role(role: Role) -> Self {
        Requirement::Role(role)
    }

    pub fn any_role(roles: impl Into<Vec<Role>>) -> Self {
        Requirement::Roles(roles.into())
    }

    pub fn group(group: RoleGroup) -> Self {
        Requirement::Group(group)
    }

    pub fn is_met(&self, eval: &PermissionEvaluator<'_>) -> bool {
        match self {
            Requirement::Permission(p) => eval.has_permission(*p),
            Requirement::Permissions { permissions, mode: Match::All } => {
                eval.has_all_permissions(permissions)
            }
            Requirement::Permissions { permissions, mode: Match::Any } => {
                eval.has_any_permission(permissions)
            }
            Requirement::Role(role) => eval.has_role(*role),
            Requirement::Roles(roles) => eval.has_any_role(roles),
            Requirement::Group(group) => eval.in_group(*group),
        }
    }

    /// Permissions this requirement names, if it is permission-based.
    pub fn permissions(&self) -> &[Permission] {
        match self {
            Requirement::Permission(p) => core::slice::from_ref(p),
            Requirement::Permissions { permissions, .. } => permissions,
            Requirement::Role(_) | Requirement::Roles(_) | Requirement::Group(_) => &[],
        }
    }
}

impl core::fmt::Display for Requirement {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        fn list<T: core::fmt::Display>(items: &[T]) -> String {
            items.iter().map(ToString::to_string).collect::<Vec<_>>().join(", ")
        }

        match self {
            Requirement::Permission(p) => write!(f, "permission {p}"),
            Requirement::Permissions { permissions, mode: Match::All } => {
                write!(f, "all of [{}]", list(permissions))
            }
            Requirement::Permissions { permissions, mode: Match::Any } => {
                write!(f, "any of [{}]", list(permissions))
            }
            Requirement::Role(role) => write!(f, "role {role}"),
            Requirement::Roles(roles) => write!(f, "any role of [{}]", list(roles)),
            Requirement::Group(group) => write!(f, "group {group}"),
        }
    }
}

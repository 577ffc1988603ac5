//! Authorization explanations and the read-only RBAC registry.
//!
//! These answer "why was this allowed/denied?" for the admin permissions
//! screen. They never change a decision; the evaluator stays the only judge.

use serde::Serialize;

use crate::{Permission, PermissionEvaluator, Requirement, Role, RoleGroup, RolePermissionTable};

/// Detailed explanation of an authorization decision.
#[derive(Debug, Clone, Serialize)]
pub struct Explanation {
    /// The requirement that was checked, in readable form.
    pub required: String,

    pub granted: bool,

    /// Human-readable reason for the decision.
    pub reason: String,

    pub subject: SubjectState,

    /// If denied, what was missing.
    pub denial: Option<Denial>,
}

/// Who the evaluator was looking at.
#[derive(Debug, Clone, Serialize)]
pub struct SubjectState {
    pub authenticated: bool,
    pub role: Option<Role>,
    pub groups: Vec<RoleGroup>,
    pub effective_permissions: Vec<Permission>,
    pub table_version: u64,
}

#[derive(Debug, Clone, Serialize)]
pub struct Denial {
    pub kind: DenialKind,
    pub missing_permissions: Vec<Permission>,
    /// Roles that would satisfy the requirement under the same table.
    pub granting_roles: Vec<Role>,
    pub suggestions: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DenialKind {
    NoIdentity,
    NoRole,
    MissingPermission,
    RoleMismatch,
}

/// Explain why `requirement` is (or is not) met for the evaluator's subject.
pub fn explain(eval: &PermissionEvaluator<'_>, requirement: &Requirement) -> Explanation {
    let subject = SubjectState {
        authenticated: eval.is_authenticated(),
        role: eval.role(),
        groups: eval.role().map(RoleGroup::of).unwrap_or_default(),
        effective_permissions: eval.permissions(),
        table_version: eval.table().version(),
    };

    if requirement.is_met(eval) {
        let reason = match eval.role() {
            Some(role) => format!("role '{role}' satisfies {requirement}"),
            None => format!("{requirement} is satisfied without any permission"),
        };
        return Explanation {
            required: requirement.to_string(),
            granted: true,
            reason,
            subject,
            denial: None,
        };
    }

    let granting_roles: Vec<Role> = Role::ALL
        .into_iter()
        .filter(|role| requirement.is_met(&PermissionEvaluator::for_role(Some(*role), eval.table())))
        .collect();

    let missing_permissions: Vec<Permission> = requirement
        .permissions()
        .iter()
        .copied()
        .filter(|p| !eval.has_permission(*p))
        .collect();

    let (kind, reason) = if !eval.is_authenticated() {
        (DenialKind::NoIdentity, "nobody is signed in".to_string())
    } else if eval.role().is_none() {
        (
            DenialKind::NoRole,
            "the signed-in user has no recognised role".to_string(),
        )
    } else if requirement.permissions().is_empty() {
        (
            DenialKind::RoleMismatch,
            format!("role '{}' does not satisfy {requirement}", subject_role(eval)),
        )
    } else {
        (
            DenialKind::MissingPermission,
            format!(
                "role '{}' lacks {}",
                subject_role(eval),
                missing_permissions
                    .iter()
                    .map(|p| p.as_str())
                    .collect::<Vec<_>>()
                    .join(", ")
            ),
        )
    };

    let mut suggestions = Vec::new();
    if kind == DenialKind::NoIdentity {
        suggestions.push("Sign in with a staff account".to_string());
    }
    if !granting_roles.is_empty() {
        suggestions.push(format!(
            "Ask an administrator for one of these roles: {}",
            granting_roles.iter().map(|r| r.as_str()).collect::<Vec<_>>().join(", ")
        ));
    }

    Explanation {
        required: requirement.to_string(),
        granted: false,
        reason,
        subject,
        denial: Some(Denial {
            kind,
            missing_permissions,
            granting_roles,
            suggestions,
        }),
    }
}

fn subject_role(eval: &PermissionEvaluator<'_>) -> &'static str {
    eval.role().map(Role::as_str).unwrap_or("none")
}

/// Role definition with its granted permissions (for audit/display).
#[derive(Debug, Clone, Serialize)]
pub struct RoleDefinition {
    pub role: Role,
    pub description: &'static str,
    pub groups: Vec<RoleGroup>,
    pub permissions: Vec<Permission>,
}

/// Permission definition (for audit/display).
#[derive(Debug, Clone, Serialize)]
pub struct PermissionDefinition {
    pub permission: Permission,
    pub category: &'static str,
    pub description: String,
    pub granted_to: Vec<Role>,
}

/// Every role and permission with the grants of one table.
#[derive(Debug, Clone, Serialize)]
pub struct RbacRegistry {
    pub version: u64,
    pub roles: Vec<RoleDefinition>,
    pub permissions: Vec<PermissionDefinition>,
}

impl RbacRegistry {
    pub fn from_table(table: &RolePermissionTable) -> Self {
        let roles = Role::ALL
            .into_iter()
            .map(|role| RoleDefinition {
                role,
                description: role.description(),
                groups: RoleGroup::of(role),
                permissions: table.permissions_for(role).iter().copied().collect(),
            })
            .collect();

        let permissions = Permission::ALL
            .into_iter()
            .map(|permission| PermissionDefinition {
                permission,
                category: permission.category(),
                description: permission.description(),
                granted_to: table.roles_with(permission),
            })
            .collect();

        Self {
            version: table.version(),
            roles,
            permissions,
        }
    }

    pub fn role(&self, role: Role) -> Option<&RoleDefinition> {
        self.roles.iter().find(|def| def.role == role)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Identity;
    use trattoria_core::UserId;

    #[test]
    fn granted_explanation_names_the_role() {
        let table = RolePermissionTable::builtin();
        let eval = PermissionEvaluator::for_role(Some(Role::Manager), &table);
        let e = explain(&eval, &Requirement::permission(Permission::ViewOrders));

        assert!(e.granted);
        assert!(e.denial.is_none());
        assert!(e.reason.contains("manager"));
        assert_eq!(e.subject.groups, vec![RoleGroup::Management, RoleGroup::Staff]);
    }

    #[test]
    fn missing_permission_lists_what_and_who() {
        let table = RolePermissionTable::builtin();
        let eval = PermissionEvaluator::for_role(Some(Role::Chef), &table);
        let e = explain(
            &eval,
            &Requirement::all([Permission::ViewOrders, Permission::ManageMenu]),
        );

        assert!(!e.granted);
        let denial = e.denial.unwrap();
        assert_eq!(denial.kind, DenialKind::MissingPermission);
        assert_eq!(denial.missing_permissions, vec![Permission::ManageMenu]);
        assert_eq!(
            denial.granting_roles,
            vec![Role::Admin, Role::Owner, Role::Manager, Role::HeadChef]
        );
    }

    #[test]
    fn denial_kinds_for_missing_subjects() {
        let table = RolePermissionTable::builtin();
        let req = Requirement::permission(Permission::ManagePermissions);

        let anonymous = explain(&PermissionEvaluator::anonymous(&table), &req);
        assert_eq!(anonymous.denial.unwrap().kind, DenialKind::NoIdentity);

        let stranger = Identity::new(UserId::new(), Some("sommelier".into()));
        let unknown = explain(&PermissionEvaluator::new(Some(&stranger), &table), &req);
        assert_eq!(unknown.denial.unwrap().kind, DenialKind::NoRole);

        let waiter = PermissionEvaluator::for_role(Some(Role::Waiter), &table);
        let mismatch = explain(&waiter, &Requirement::group(RoleGroup::Management));
        assert_eq!(mismatch.denial.unwrap().kind, DenialKind::RoleMismatch);
    }

    #[test]
    fn registry_mirrors_the_table() {
        let table = RolePermissionTable::builtin();
        let registry = RbacRegistry::from_table(&table);

        assert_eq!(registry.roles.len(), Role::ALL.len());
        assert_eq!(registry.permissions.len(), Permission::ALL.len());
        assert!(registry.role(Role::User).unwrap().permissions.is_empty());

        let manage_perms = registry
            .permissions
            .iter()
            .find(|d| d.permission == Permission::ManagePermissions)
            .unwrap();
        assert_eq!(manage_perms.granted_to, vec![Role::Admin]);
        assert_eq!(manage_perms.category, "permissions");

        let json = serde_json::to_value(&registry).unwrap();
        assert_eq!(json["roles"][3]["role"], "head_chef");
    }
}

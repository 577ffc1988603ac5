//! Permission evaluation for one identity against one table.
//!
//! - No IO
//! - No panics
//! - No errors: anything missing or unrecognised is "no access"

use std::collections::BTreeSet;

use crate::{Identity, Permission, Role, RoleGroup, RolePermissionTable};

static NO_PERMISSIONS: BTreeSet<Permission> = BTreeSet::new();

/// Answers authorization questions for the current user.
///
/// The role's permission set is looked up once, when the evaluator is built,
/// and reused for every query made through it (one request, one render).
#[derive(Debug, Clone, Copy)]
pub struct PermissionEvaluator<'a> {
    authenticated: bool,
    role: Option<Role>,
    granted: &'a BTreeSet<Permission>,
    table: &'a RolePermissionTable,
}

impl<'a> PermissionEvaluator<'a> {
    pub fn new(identity: Option<&Identity>, table: &'a RolePermissionTable) -> Self {
        let role = identity.and_then(Identity::role);
        Self {
            authenticated: identity.is_some(),
            role,
            granted: Self::lookup(role, table),
            table,
        }
    }

    /// Evaluator for a known role (or a signed-in user without one).
    pub fn for_role(role: Option<Role>, table: &'a RolePermissionTable) -> Self {
        Self {
            authenticated: true,
            role,
            granted: Self::lookup(role, table),
            table,
        }
    }

    pub fn anonymous(table: &'a RolePermissionTable) -> Self {
        Self::new(None, table)
    }

    fn lookup(role: Option<Role>, table: &'a RolePermissionTable) -> &'a BTreeSet<Permission> {
        match role {
            Some(role) => table.permissions_for(role),
            None => &NO_PERMISSIONS,
        }
    }

    pub fn is_authenticated(&self) -> bool {
        self.authenticated
    }

    pub fn role(&self) -> Option<Role> {
        self.role
    }

    pub fn table(&self) -> &'a RolePermissionTable {
        self.table
    }

    /// Effective permissions in a stable order.
    pub fn permissions(&self) -> Vec<Permission> {
        self.granted.iter().copied().collect()
    }

    pub fn has_permission(&self, permission: Permission) -> bool {
        self.granted.contains(&permission)
    }

    /// `false` for an empty slice.
    pub fn has_any_permission(&self, permissions: &[Permission]) -> bool {
        permissions.iter().any(|p| self.has_permission(*p))
    }

    /// `true` for an empty slice.
    pub fn has_all_permissions(&self, permissions: &[Permission]) -> bool {
        permissions.iter().all(|p| self.has_permission(*p))
    }

    pub fn has_role(&self, role: Role) -> bool {
        self.role == Some(role)
    }

    pub fn has_any_role(&self, roles: &[Role]) -> bool {
        self.role.is_some_and(|role| roles.contains(&role))
    }

    pub fn in_group(&self, group: RoleGroup) -> bool {
        self.has_any_role(group.members())
    }

    pub fn is_admin(&self) -> bool {
        self.in_group(RoleGroup::Admin)
    }

    pub fn is_manager(&self) -> bool {
        self.in_group(RoleGroup::Management)
    }

    pub fn is_staff(&self) -> bool {
        self.in_group(RoleGroup::Staff)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::PolicyDocument;
    use trattoria_core::UserId;

    fn manager_only_table() -> RolePermissionTable {
        let doc = PolicyDocument::from_json_str(
            r#"{ "roles": { "manager": ["view-dashboard", "view-orders"] } }"#,
        )
        .unwrap();
        RolePermissionTable::from_document(&doc, 1)
    }

    #[test]
    fn manager_scenario() {
        let table = manager_only_table();
        let identity = Identity::with_role(UserId::new(), Role::Manager);
        let eval = PermissionEvaluator::new(Some(&identity), &table);

        assert!(eval.has_permission(Permission::ViewDashboard));
        assert!(!eval.has_permission(Permission::ManagePermissions));
        assert!(eval.has_all_permissions(&[Permission::ViewDashboard, Permission::ViewOrders]));
        assert!(!eval.has_all_permissions(&[Permission::ViewDashboard, Permission::ManagePermissions]));
        assert!(eval.has_any_permission(&[Permission::ViewDashboard, Permission::ManagePermissions]));
    }

    #[test]
    fn cashier_scenario() {
        let table = RolePermissionTable::builtin();
        let identity = Identity::with_role(UserId::new(), Role::Cashier);
        let eval = PermissionEvaluator::new(Some(&identity), &table);

        assert!(!eval.is_manager());
        assert!(eval.is_staff());
        assert!(!eval.is_admin());
    }

    #[test]
    fn no_identity_denies_everything() {
        let table = RolePermissionTable::builtin();
        let eval = PermissionEvaluator::anonymous(&table);

        assert!(!eval.is_authenticated());
        for p in Permission::ALL {
            assert!(!eval.has_permission(p));
        }
        assert!(!eval.has_any_permission(&Permission::ALL));
        assert!(!eval.has_all_permissions(&Permission::ALL));
        for r in Role::ALL {
            assert!(!eval.has_role(r));
        }
        assert!(!eval.has_any_role(&Role::ALL));
        assert!(!eval.is_admin() && !eval.is_manager() && !eval.is_staff());
        assert!(eval.permissions().is_empty());
    }

    #[test]
    fn unknown_role_tag_denies_everything() {
        let table = RolePermissionTable::builtin();
        for tag in ["sommelier", "ADMIN", "Admin", "admin ", ""] {
            let identity = Identity::new(UserId::new(), Some(tag.to_string()));
            let eval = PermissionEvaluator::new(Some(&identity), &table);

            assert!(eval.is_authenticated());
            assert_eq!(eval.role(), None, "{tag:?}");
            assert!(!eval.has_any_permission(&Permission::ALL), "{tag:?}");
            assert!(!eval.has_any_role(&Role::ALL), "{tag:?}");
        }
    }

    #[test]
    fn empty_queries_keep_their_asymmetry() {
        let table = RolePermissionTable::builtin();
        let admin = PermissionEvaluator::for_role(Some(Role::Admin), &table);
        let nobody = PermissionEvaluator::anonymous(&table);

        for eval in [admin, nobody] {
            assert!(!eval.has_any_permission(&[]));
            assert!(eval.has_all_permissions(&[]));
            assert!(!eval.has_any_role(&[]));
        }
    }

    #[test]
    fn has_role_is_strict_equality() {
        let table = RolePermissionTable::builtin();
        let eval = PermissionEvaluator::for_role(Some(Role::HeadChef), &table);

        assert!(eval.has_role(Role::HeadChef));
        assert!(!eval.has_role(Role::Chef));
        assert!(eval.has_any_role(&[Role::Chef, Role::HeadChef]));
        assert!(!eval.has_any_role(&[Role::Chef, Role::Waiter]));
    }

    mod proptest_tests {
        use super::*;
        use proptest::prelude::*;
        use proptest::sample::{select, subsequence};

        fn role() -> impl Strategy<Value = Option<Role>> {
            prop::option::of(select(Role::ALL.to_vec()))
        }

        fn permissions() -> impl Strategy<Value = Vec<Permission>> {
            subsequence(Permission::ALL.to_vec(), 0..=Permission::ALL.len())
        }

        proptest! {
            /// Property: a single check is exactly membership in the table row.
            #[test]
            fn has_permission_matches_table(role in role(), p in select(Permission::ALL.to_vec())) {
                let table = RolePermissionTable::builtin();
                let eval = PermissionEvaluator::for_role(role, &table);
                let expected = role.is_some_and(|r| table.permissions_for(r).contains(&p));
                prop_assert_eq!(eval.has_permission(p), expected);
            }

            /// Property: all-of implies any-of for non-empty sets.
            #[test]
            fn all_implies_any(role in role(), perms in permissions()) {
                let table = RolePermissionTable::builtin();
                let eval = PermissionEvaluator::for_role(role, &table);
                if !perms.is_empty() && eval.has_all_permissions(&perms) {
                    prop_assert!(eval.has_any_permission(&perms));
                }
            }

            /// Property: any-of / all-of agree with folding the single check.
            #[test]
            fn set_queries_fold_single_checks(role in role(), perms in permissions()) {
                let table = RolePermissionTable::builtin();
                let eval = PermissionEvaluator::for_role(role, &table);
                let singles: Vec<bool> = perms.iter().map(|p| eval.has_permission(*p)).collect();
                prop_assert_eq!(eval.has_any_permission(&perms), singles.iter().any(|b| *b));
                prop_assert_eq!(eval.has_all_permissions(&perms), singles.iter().all(|b| *b));
            }

            /// Property: role checks are plain equality / membership.
            #[test]
            fn role_checks_are_exact(current in role(), asked in select(Role::ALL.to_vec())) {
                let table = RolePermissionTable::builtin();
                let eval = PermissionEvaluator::for_role(current, &table);
                prop_assert_eq!(eval.has_role(asked), current == Some(asked));
                prop_assert_eq!(eval.has_any_role(&[asked]), current == Some(asked));
            }
        }
    }
}

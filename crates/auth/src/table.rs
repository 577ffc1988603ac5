//! Static role→permission mapping.
//!
//! The table is total over [`Role`] and immutable once built. Changing
//! permissions means building a new table and swapping it in through
//! [`crate::PolicyStore`].

use std::collections::{BTreeMap, BTreeSet};
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::{Permission, Role};

static NO_PERMISSIONS: BTreeSet<Permission> = BTreeSet::new();

#[derive(Debug, Error)]
pub enum PolicyError {
    #[error("failed to read policy file '{path}': {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid policy document: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Serialized form of a role→permission table.
///
/// ```json
/// { "roles": { "manager": ["view-dashboard", "view-orders"] } }
/// ```
///
/// Only the enumerated role and permission tags deserialize; anything else is
/// a [`PolicyError::Parse`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PolicyDocument {
    pub roles: BTreeMap<Role, Vec<Permission>>,
}

impl PolicyDocument {
    pub fn from_json_str(raw: &str) -> Result<Self, PolicyError> {
        Ok(serde_json::from_str(raw)?)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, PolicyError> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path).map_err(|source| PolicyError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_json_str(&raw)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RolePermissionTable {
    version: u64,
    grants: BTreeMap<Role, BTreeSet<Permission>>,
}

impl RolePermissionTable {
    /// The permission grid shipped with the application.
    pub fn builtin() -> Self {
        use Permission::*;

        let grid: [(Role, &[Permission]); 8] = [
            (Role::Admin, &Permission::ALL),
            (
                Role::Owner,
                &[
                    ViewDashboard,
                    ViewOrders,
                    ManageOrders,
                    ViewMenu,
                    ManageMenu,
                    ViewInventory,
                    ManageInventory,
                    ViewCashRegister,
                    ManageCashRegister,
                    ViewReservations,
                    ManageReservations,
                    ViewReports,
                    ViewUsers,
                    ManageUsers,
                    ViewSettings,
                    ManageSettings,
                ],
            ),
            (
                Role::Manager,
                &[
                    ViewDashboard,
                    ViewOrders,
                    ManageOrders,
                    ViewMenu,
                    ManageMenu,
                    ViewInventory,
                    ManageInventory,
                    ViewCashRegister,
                    ViewReservations,
                    ManageReservations,
                    ViewReports,
                    ViewUsers,
                    ViewSettings,
                ],
            ),
            (
                Role::HeadChef,
                &[
                    ViewDashboard,
                    ViewOrders,
                    ManageOrders,
                    ViewMenu,
                    ManageMenu,
                    ViewInventory,
                    ManageInventory,
                ],
            ),
            (Role::Chef, &[ViewOrders, ManageOrders, ViewMenu, ViewInventory]),
            (
                Role::Waiter,
                &[ViewOrders, ManageOrders, ViewMenu, ViewReservations, ManageReservations],
            ),
            (
                Role::Cashier,
                &[ViewOrders, ViewMenu, ViewCashRegister, ManageCashRegister],
            ),
            (Role::User, &[]),
        ];

        Self::from_grants(
            0,
            grid.into_iter()
                .map(|(role, perms)| (role, perms.iter().copied().collect())),
        )
    }

    /// Build a table from a document. Roles the document leaves out get no
    /// permissions.
    pub fn from_document(document: &PolicyDocument, version: u64) -> Self {
        Self::from_grants(
            version,
            document
                .roles
                .iter()
                .map(|(role, perms)| (*role, perms.iter().copied().collect())),
        )
    }

    fn from_grants(
        version: u64,
        grants: impl IntoIterator<Item = (Role, BTreeSet<Permission>)>,
    ) -> Self {
        let mut table: BTreeMap<Role, BTreeSet<Permission>> =
            Role::ALL.into_iter().map(|role| (role, BTreeSet::new())).collect();
        for (role, perms) in grants {
            table.entry(role).or_default().extend(perms);
        }
        Self {
            version,
            grants: table,
        }
    }

    pub fn version(&self) -> u64 {
        self.version
    }

    pub(crate) fn with_version(mut self, version: u64) -> Self {
        self.version = version;
        self
    }

    pub fn permissions_for(&self, role: Role) -> &BTreeSet<Permission> {
        self.grants.get(&role).unwrap_or(&NO_PERMISSIONS)
    }

    pub fn grants(&self, role: Role, permission: Permission) -> bool {
        self.permissions_for(role).contains(&permission)
    }

    /// Roles holding `permission`, in declaration order.
    pub fn roles_with(&self, permission: Permission) -> Vec<Role> {
        Role::ALL
            .into_iter()
            .filter(|role| self.grants(*role, permission))
            .collect()
    }

    pub fn to_document(&self) -> PolicyDocument {
        PolicyDocument {
            roles: self
                .grants
                .iter()
                .map(|(role, perms)| (*role, perms.iter().copied().collect()))
                .collect(),
        }
    }
}

impl Default for RolePermissionTable {
    fn default() -> Self {
        Self::builtin()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_is_total() {
        let table = RolePermissionTable::builtin();
        for role in Role::ALL {
            // Must not fall through to the shared empty set for staff roles.
            if role != Role::User {
                assert!(!table.permissions_for(role).is_empty(), "{role}");
            }
        }
        assert!(table.permissions_for(Role::User).is_empty());
    }

    #[test]
    fn builtin_manager_grid() {
        let table = RolePermissionTable::builtin();
        assert!(table.grants(Role::Manager, Permission::ViewDashboard));
        assert!(table.grants(Role::Manager, Permission::ViewOrders));
        assert!(!table.grants(Role::Manager, Permission::ManagePermissions));
    }

    #[test]
    fn only_admin_manages_permissions() {
        let table = RolePermissionTable::builtin();
        assert_eq!(table.roles_with(Permission::ManagePermissions), vec![Role::Admin]);
        assert_eq!(table.permissions_for(Role::Admin).len(), Permission::ALL.len());
    }

    #[test]
    fn document_omitted_roles_get_nothing() {
        let doc = PolicyDocument::from_json_str(
            r#"{ "roles": { "manager": ["view-dashboard", "view-orders"] } }"#,
        )
        .unwrap();
        let table = RolePermissionTable::from_document(&doc, 7);

        assert_eq!(table.version(), 7);
        assert_eq!(
            table.permissions_for(Role::Manager).iter().copied().collect::<Vec<_>>(),
            vec![Permission::ViewDashboard, Permission::ViewOrders]
        );
        for role in Role::ALL.into_iter().filter(|r| *r != Role::Manager) {
            assert!(table.permissions_for(role).is_empty(), "{role}");
        }
    }

    #[test]
    fn document_rejects_unknown_tags() {
        let unknown_role = PolicyDocument::from_json_str(r#"{ "roles": { "sommelier": [] } }"#);
        assert!(matches!(unknown_role, Err(PolicyError::Parse(_))));

        let unknown_perm =
            PolicyDocument::from_json_str(r#"{ "roles": { "chef": ["view-wine-cellar"] } }"#);
        assert!(matches!(unknown_perm, Err(PolicyError::Parse(_))));

        let stray_field = PolicyDocument::from_json_str(r#"{ "roles": {}, "groups": {} }"#);
        assert!(matches!(stray_field, Err(PolicyError::Parse(_))));
    }

    #[test]
    fn document_export_rebuilds_the_same_grid() {
        let table = RolePermissionTable::builtin();
        let json = serde_json::to_string(&table.to_document()).unwrap();
        let rebuilt =
            RolePermissionTable::from_document(&PolicyDocument::from_json_str(&json).unwrap(), 0);
        assert_eq!(rebuilt, table);
    }

    #[test]
    fn load_reports_missing_file() {
        let err = PolicyDocument::load("/nonexistent/trattoria-policy.json").unwrap_err();
        assert!(matches!(err, PolicyError::Io { .. }));
        assert!(err.to_string().contains("trattoria-policy.json"));
    }
}

use core::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Capability within the admin back-office.
///
/// Tags are `<action>-<area>` (e.g. `view-orders`). The set is closed: there
/// is no way to mint a permission at runtime.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Permission {
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
    ManagePermissions,
    ViewSettings,
    ManageSettings,
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("unknown permission '{0}'")]
pub struct UnknownPermission(pub String);

impl Permission {
    pub const ALL: [Permission; 17] = [
        Permission::ViewDashboard,
        Permission::ViewOrders,
        Permission::ManageOrders,
        Permission::ViewMenu,
        Permission::ManageMenu,
        Permission::ViewInventory,
        Permission::ManageInventory,
        Permission::ViewCashRegister,
        Permission::ManageCashRegister,
        Permission::ViewReservations,
        Permission::ManageReservations,
        Permission::ViewReports,
        Permission::ViewUsers,
        Permission::ManageUsers,
        Permission::ManagePermissions,
        Permission::ViewSettings,
        Permission::ManageSettings,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Permission::ViewDashboard => "view-dashboard",
            Permission::ViewOrders => "view-orders",
            Permission::ManageOrders => "manage-orders",
            Permission::ViewMenu => "view-menu",
            Permission::ManageMenu => "manage-menu",
            Permission::ViewInventory => "view-inventory",
            Permission::ManageInventory => "manage-inventory",
            Permission::ViewCashRegister => "view-cash-register",
            Permission::ManageCashRegister => "manage-cash-register",
            Permission::ViewReservations => "view-reservations",
            Permission::ManageReservations => "manage-reservations",
            Permission::ViewReports => "view-reports",
            Permission::ViewUsers => "view-users",
            Permission::ManageUsers => "manage-users",
            Permission::ManagePermissions => "manage-permissions",
            Permission::ViewSettings => "view-settings",
            Permission::ManageSettings => "manage-settings",
        }
    }

    /// Exact, case-sensitive lookup. Unrecognised tags yield `None`.
    pub fn parse(tag: &str) -> Option<Permission> {
        Permission::ALL.into_iter().find(|p| p.as_str() == tag)
    }

    /// Back-office area the permission belongs to (`orders`, `cash-register`, ...).
    pub fn category(self) -> &'static str {
        let (_, area) = self.split();
        area
    }

    /// Human-readable summary for the permissions screen.
    pub fn description(self) -> String {
        let (action, area) = self.split();
        let action = match action {
            "view" => "View",
            "manage" => "Create, update and delete",
            other => other,
        };
        format!("{} {}", action, area.replace('-', " "))
    }

    fn split(self) -> (&'static str, &'static str) {
        // Every tag is `<action>-<area>`.
        self.as_str().split_once('-').unwrap_or(("", self.as_str()))
    }
}

impl core::fmt::Display for Permission {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Permission {
    type Err = UnknownPermission;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Permission::parse(s).ok_or_else(|| UnknownPermission(s.to_string()))
    }
}

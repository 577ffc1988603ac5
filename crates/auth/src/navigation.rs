//! Admin back-office sections and the requirement guarding each one.

use serde::Serialize;

use crate::{Permission, PermissionEvaluator, Requirement};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum AdminSection {
    Dashboard,
    Orders,
    Menu,
    Inventory,
    CashRegister,
    Reservations,
    Reports,
    Users,
    Permissions,
    Settings,
}

impl AdminSection {
    /// Sidebar order.
    pub const ALL: [AdminSection; 10] = [
        AdminSection::Dashboard,
        AdminSection::Orders,
        AdminSection::Menu,
        AdminSection::Inventory,
        AdminSection::CashRegister,
        AdminSection::Reservations,
        AdminSection::Reports,
        AdminSection::Users,
        AdminSection::Permissions,
        AdminSection::Settings,
    ];

    pub fn slug(self) -> &'static str {
        match self {
            AdminSection::Dashboard => "dashboard",
            AdminSection::Orders => "orders",
            AdminSection::Menu => "menu",
            AdminSection::Inventory => "inventory",
            AdminSection::CashRegister => "cash-register",
            AdminSection::Reservations => "reservations",
            AdminSection::Reports => "reports",
            AdminSection::Users => "users",
            AdminSection::Permissions => "permissions",
            AdminSection::Settings => "settings",
        }
    }

    pub fn from_slug(slug: &str) -> Option<Self> {
        AdminSection::ALL.into_iter().find(|s| s.slug() == slug)
    }

    pub fn title(self) -> &'static str {
        match self {
            AdminSection::Dashboard => "Dashboard",
            AdminSection::Orders => "Orders",
            AdminSection::Menu => "Menu",
            AdminSection::Inventory => "Inventory",
            AdminSection::CashRegister => "Cash register",
            AdminSection::Reservations => "Reservations",
            AdminSection::Reports => "Reports",
            AdminSection::Users => "Users",
            AdminSection::Permissions => "Permissions",
            AdminSection::Settings => "Settings",
        }
    }

    pub fn path(self) -> String {
        format!("/admin/{}", self.slug())
    }

    pub fn requirement(self) -> Requirement {
        let permission = match self {
            AdminSection::Dashboard => Permission::ViewDashboard,
            AdminSection::Orders => Permission::ViewOrders,
            AdminSection::Menu => Permission::ViewMenu,
            AdminSection::Inventory => Permission::ViewInventory,
            AdminSection::CashRegister => Permission::ViewCashRegister,
            AdminSection::Reservations => Permission::ViewReservations,
            AdminSection::Reports => Permission::ViewReports,
            AdminSection::Users => Permission::ViewUsers,
            AdminSection::Permissions => Permission::ManagePermissions,
            AdminSection::Settings => Permission::ViewSettings,
        };
        Requirement::permission(permission)
    }
}

/// Sections the current user may open, in sidebar order.
pub fn visible_sections(eval: &PermissionEvaluator<'_>) -> Vec<AdminSection> {
    AdminSection::ALL
        .into_iter()
        .filter(|section| section.requirement().is_met(eval))
        .collect()
}

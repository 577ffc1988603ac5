//! Named role groups behind the `is_admin` / `is_manager` / `is_staff` checks.
//!
//! Membership is configuration, not derived from the permission table.

use serde::{Deserialize, Serialize};

use crate::Role;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RoleGroup {
    Admin,
    Management,
    Staff,
}

const ADMIN: &[Role] = &[Role::Admin, Role::Owner];

const MANAGEMENT: &[Role] = &[Role::Admin, Role::Owner, Role::Manager];

const STAFF: &[Role] = &[
    Role::Admin,
    Role::Owner,
    Role::Manager,
    Role::HeadChef,
    Role::Chef,
    Role::Waiter,
    Role::Cashier,
];

impl RoleGroup {
    pub const ALL: [RoleGroup; 3] = [RoleGroup::Admin, RoleGroup::Management, RoleGroup::Staff];

    pub fn members(self) -> &'static [Role] {
        match self {
            RoleGroup::Admin => ADMIN,
            RoleGroup::Management => MANAGEMENT,
            RoleGroup::Staff => STAFF,
        }
    }

    pub fn contains(self, role: Role) -> bool {
        self.members().contains(&role)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            RoleGroup::Admin => "admin",
            RoleGroup::Management => "management",
            RoleGroup::Staff => "staff",
        }
    }

    /// Groups a role belongs to, in declaration order.
    pub fn of(role: Role) -> Vec<RoleGroup> {
        RoleGroup::ALL.into_iter().filter(|g| g.contains(role)).collect()
    }
}

impl core::fmt::Display for RoleGroup {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn staff_is_everyone_but_plain_users() {
        for role in Role::ALL {
            assert_eq!(RoleGroup::Staff.contains(role), role != Role::User, "{role}");
        }
    }

    #[test]
    fn groups_nest() {
        for role in RoleGroup::Admin.members() {
            assert!(RoleGroup::Management.contains(*role));
        }
        for role in RoleGroup::Management.members() {
            assert!(RoleGroup::Staff.contains(*role));
        }
    }

    #[test]
    fn cashier_is_staff_only() {
        assert_eq!(RoleGroup::of(Role::Cashier), vec![RoleGroup::Staff]);
        assert!(RoleGroup::of(Role::User).is_empty());
    }
}

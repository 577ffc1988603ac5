use core::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Role of a user in the restaurant.
///
/// A user holds exactly one role. Identity providers hand roles over as
/// opaque strings; [`Role::parse`] is the only way in, and it only accepts the
/// exact tags below.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    Admin,
    Owner,
    Manager,
    HeadChef,
    Chef,
    Waiter,
    Cashier,
    User,
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("unknown role '{0}'")]
pub struct UnknownRole(pub String);

impl Role {
    pub const ALL: [Role; 8] = [
        Role::Admin,
        Role::Owner,
        Role::Manager,
        Role::HeadChef,
        Role::Chef,
        Role::Waiter,
        Role::Cashier,
        Role::User,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Role::Admin => "admin",
            Role::Owner => "owner",
            Role::Manager => "manager",
            Role::HeadChef => "head_chef",
            Role::Chef => "chef",
            Role::Waiter => "waiter",
            Role::Cashier => "cashier",
            Role::User => "user",
        }
    }

    /// Exact, case-sensitive lookup. Unrecognised tags yield `None`.
    pub fn parse(tag: &str) -> Option<Role> {
        Role::ALL.into_iter().find(|role| role.as_str() == tag)
    }

    pub fn description(self) -> &'static str {
        match self {
            Role::Admin => "System administrator with every permission",
            Role::Owner => "Restaurant owner with full operational access",
            Role::Manager => "Floor manager running service, stock and bookings",
            Role::HeadChef => "Kitchen lead responsible for menu and stock",
            Role::Chef => "Kitchen staff working the order queue",
            Role::Waiter => "Front-of-house staff taking orders and bookings",
            Role::Cashier => "Till operator handling payments",
            Role::User => "Customer account without back-office access",
        }
    }
}

impl core::fmt::Display for Role {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = UnknownRole;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Role::parse(s).ok_or_else(|| UnknownRole(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_matches_every_tag_exactly() {
        for role in Role::ALL {
            assert_eq!(Role::parse(role.as_str()), Some(role));
        }
    }

    #[test]
    fn parse_is_case_sensitive_and_rejects_partials() {
        assert_eq!(Role::parse("Manager"), None);
        assert_eq!(Role::parse("MANAGER"), None);
        assert_eq!(Role::parse("manage"), None);
        assert_eq!(Role::parse(" manager"), None);
        assert_eq!(Role::parse("head-chef"), None);
        assert_eq!(Role::parse(""), None);
    }

    #[test]
    fn from_str_reports_the_offending_tag() {
        let err = "sommelier".parse::<Role>().unwrap_err();
        assert_eq!(err.to_string(), "unknown role 'sommelier'");
    }

    #[test]
    fn serde_uses_the_same_tags() {
        assert_eq!(serde_json::to_string(&Role::HeadChef).unwrap(), "\"head_chef\"");
        let role: Role = serde_json::from_str("\"cashier\"").unwrap();
        assert_eq!(role, Role::Cashier);
        assert!(serde_json::from_str::<Role>("\"barista\"").is_err());
    }
}

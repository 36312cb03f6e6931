//! Viewer roles and the role hierarchy

use serde::Deserialize;
use serde::Serialize;

/// A user role in the pharmacy hierarchy.
///
/// Roles are hierarchical: a numerically lower id outranks higher ids, so
/// `Admin` (1) is the most privileged and `Salesman` (4) the least. The wire
/// format is the numeric id.
///
/// # Example
///
/// ```
/// use pharmadesk_lib::model::Role;
///
/// assert!(Role::Admin.outranks(Role::Manager));
/// assert!(Role::Manager.can_act_on(Role::Pharmacist));
/// assert!(!Role::Manager.can_act_on(Role::Admin));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum Role {
    /// Full access, can act on any row.
    Admin = 1,
    /// Manages pharmacists and salesmen.
    Manager = 2,
    /// Dispenses drugs.
    Pharmacist = 3,
    /// Handles orders.
    Salesman = 4,
}

impl Role {
    /// Returns the numeric id of this role.
    pub fn id(self) -> u8 {
        self as u8
    }

    /// Returns the URL slug for this role.
    pub fn slug(self) -> &'static str {
        match self {
            Role::Admin => "admin",
            Role::Manager => "manager",
            Role::Pharmacist => "pharmacist",
            Role::Salesman => "salesman",
        }
    }

    /// Parses a role from its URL slug.
    pub fn from_slug(slug: &str) -> Option<Self> {
        match slug {
            "admin" => Some(Role::Admin),
            "manager" => Some(Role::Manager),
            "pharmacist" => Some(Role::Pharmacist),
            "salesman" => Some(Role::Salesman),
            _ => None,
        }
    }

    /// Returns `true` if this role strictly outranks `other`.
    pub fn outranks(self, other: Role) -> bool {
        self.id() < other.id()
    }

    /// Returns `true` if an actor with this role may edit or delete a row
    /// owned by `row_role`.
    ///
    /// Admin acts on anyone; every other role must strictly outrank the row.
    pub fn can_act_on(self, row_role: Role) -> bool {
        if self == Role::Admin {
            return true;
        }
        self.outranks(row_role)
    }
}

/// Error for an unknown numeric role id.
#[derive(Debug, Clone, thiserror::Error)]
#[error("Invalid role id: {0}")]
pub struct InvalidRole(pub u8);

impl TryFrom<u8> for Role {
    type Error = InvalidRole;

    fn try_from(id: u8) -> Result<Self, Self::Error> {
        match id {
            1 => Ok(Role::Admin),
            2 => Ok(Role::Manager),
            3 => Ok(Role::Pharmacist),
            4 => Ok(Role::Salesman),
            other => Err(InvalidRole(other)),
        }
    }
}

impl From<Role> for u8 {
    fn from(role: Role) -> u8 {
        role.id()
    }
}

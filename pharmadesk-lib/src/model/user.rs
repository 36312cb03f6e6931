//! User entity

use serde::Deserialize;
use serde::Serialize;

use super::CellValue;
use super::Role;
use super::TableRow;

/// A user account visible in the Users view.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    /// Unique identifier.
    pub id: String,
    /// First name.
    pub f_name: String,
    /// Last name.
    pub l_name: String,
    /// Email address.
    pub email: String,
    /// Phone number.
    pub phone: String,
    /// Role, numeric on the wire.
    #[serde(rename = "role_id")]
    pub role: Role,
    /// Avatar URL, if one was uploaded.
    #[serde(default)]
    pub avatar: Option<String>,
}

impl User {
    /// Full display name.
    pub fn name(&self) -> String {
        format!("{} {}", self.f_name, self.l_name)
    }
}

impl TableRow for User {
    fn id(&self) -> &str {
        &self.id
    }

    fn cell(&self, key: &str) -> CellValue {
        match key {
            "id" => self.id.as_str().into(),
            "name" => self.name().into(),
            "email" => self.email.as_str().into(),
            "phone" => self.phone.as_str().into(),
            "role" => CellValue::Int(self.role.id() as i64),
            "avatar" => self.avatar.as_deref().into(),
            _ => CellValue::Null,
        }
    }

    fn role(&self) -> Option<Role> {
        Some(self.role)
    }
}

/// The authenticated viewer, as returned by the session endpoint.
///
/// Only the role is consumed by this library; it parameterizes column
/// visibility. Session management itself lives outside.
#[derive(Debug, Clone, Deserialize)]
pub struct CurrentUser {
    /// Unique identifier.
    pub id: String,
    /// Email address.
    pub email: String,
    /// Viewer role.
    #[serde(rename = "role_id")]
    pub role: Role,
}

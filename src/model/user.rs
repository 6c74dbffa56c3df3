use super::record_id;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

record_id!(
    /// Type-safe identifier for Users.
    UserId,
    "user"
);

/// Role tags carried by a user. A user may hold several.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Role {
    Customer,
    Admin,
    Driver,
}

impl Role {
    /// Maps a requested signup role to the role actually granted.
    ///
    /// `DRIVER` and `AGENT` become [`Role::Driver`]; anything else, including an
    /// attempt to self-assign `ADMIN`, becomes [`Role::Customer`].
    pub fn from_signup(requested: Option<&str>) -> Self {
        match requested.map(|r| r.trim().to_ascii_uppercase()).as_deref() {
            Some("DRIVER") | Some("AGENT") => Role::Driver,
            _ => Role::Customer,
        }
    }
}

/// A registered account.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: UserId,
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub roles: BTreeSet<Role>,
}

impl User {
    pub fn has_role(&self, role: Role) -> bool {
        self.roles.contains(&role)
    }
}

/// Payload for creating a new user.
#[derive(Debug, Clone)]
pub struct UserCreate {
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub roles: BTreeSet<Role>,
}

/// Patch for an existing user. `None` leaves the field alone.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UserUpdate {
    pub name: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub roles: Option<BTreeSet<Role>>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum UserQuery {
    All,
    ByEmail(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_signup_role_mapping() {
        assert_eq!(Role::from_signup(Some("driver")), Role::Driver);
        assert_eq!(Role::from_signup(Some(" AGENT ")), Role::Driver);
        assert_eq!(Role::from_signup(Some("ADMIN")), Role::Customer);
        assert_eq!(Role::from_signup(None), Role::Customer);
    }
}

use serde::{Deserialize, Serialize};

/// Account role. The set is closed: every account is a seller, and admins
/// additionally moderate listings and manage users.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Role {
    Seller,
    Admin,
}

impl Role {
    /// Admin is a superset role: an admin passes every seller check.
    pub fn includes_seller(&self) -> bool {
        matches!(self, Role::Seller | Role::Admin)
    }

    pub fn is_admin(&self) -> bool {
        matches!(self, Role::Admin)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Seller => "SELLER",
            Role::Admin => "ADMIN",
        }
    }
}

impl core::fmt::Display for Role {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn admin_is_a_superset_of_seller() {
        assert!(Role::Admin.includes_seller());
        assert!(Role::Seller.includes_seller());
        assert!(!Role::Seller.is_admin());
    }

    #[test]
    fn roles_use_the_backend_labels() {
        assert_eq!(serde_json::to_string(&Role::Admin).unwrap(), "\"ADMIN\"");
        let parsed: Role = serde_json::from_str("\"SELLER\"").unwrap();
        assert_eq!(parsed, Role::Seller);
    }
}

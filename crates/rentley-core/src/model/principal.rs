// ── Principal domain type ──

use serde::{Deserialize, Serialize};

use super::role::Role;

/// Structured role reference as delivered by newer backend versions.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoleRef {
    pub id: i64,
    pub name: String,
}

/// The authenticated user as known to the client.
///
/// Carries at most one role, possibly under two representations: the
/// structured `role` reference and/or the plain `role_name` string
/// (older backend layers flatten it). Anonymous is represented by the
/// absence of a Principal, not by an empty one.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Principal {
    pub user_id: i64,
    pub username: String,
    pub first_name: String,
    pub last_name: String,
    pub email: Option<String>,
    pub phone_number: Option<String>,
    pub role: Option<RoleRef>,
    pub role_name: Option<String>,
}

impl Principal {
    /// Full name for display, falling back to the username.
    pub fn display_name(&self) -> String {
        let full = format!("{} {}", self.first_name, self.last_name);
        if full.trim().is_empty() {
            self.username.clone()
        } else {
            full.trim().to_owned()
        }
    }

    /// The raw role name, preferring the structured reference.
    pub fn raw_role_name(&self) -> Option<&str> {
        self.role
            .as_ref()
            .map(|r| r.name.as_str())
            .or(self.role_name.as_deref())
    }

    /// The canonical role, resolved through the alias table.
    pub fn canonical_role(&self) -> Option<Role> {
        self.raw_role_name().and_then(Role::from_name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn principal(role: Option<RoleRef>, role_name: Option<&str>) -> Principal {
        Principal {
            user_id: 1,
            username: "ayse".into(),
            first_name: "Ayşe".into(),
            last_name: "Demir".into(),
            email: None,
            phone_number: None,
            role,
            role_name: role_name.map(str::to_owned),
        }
    }

    #[test]
    fn structured_role_preferred_over_plain_string() {
        let p = principal(
            Some(RoleRef {
                id: 2,
                name: "Mudur".into(),
            }),
            Some("Customer"),
        );
        assert_eq!(p.canonical_role(), Some(Role::Manager));
    }

    #[test]
    fn plain_role_string_is_fallback() {
        let p = principal(None, Some("Personel"));
        assert_eq!(p.canonical_role(), Some(Role::Staff));
    }

    #[test]
    fn no_role_resolves_to_none() {
        let p = principal(None, None);
        assert_eq!(p.canonical_role(), None);
    }

    #[test]
    fn display_name_falls_back_to_username() {
        let mut p = principal(None, None);
        p.first_name = String::new();
        p.last_name = String::new();
        assert_eq!(p.display_name(), "ayse");
    }
}

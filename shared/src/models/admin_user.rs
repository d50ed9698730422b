//! Admin User Model

use serde::{Deserialize, Serialize};

/// Back-office role. `Owner` and `Admin` both clear the admin check;
/// `Staff` is read-mostly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::Type))]
#[cfg_attr(feature = "db", sqlx(rename_all = "snake_case"))]
#[serde(rename_all = "snake_case")]
pub enum AdminRole {
    Owner,
    Admin,
    Staff,
}

impl AdminRole {
    /// Owner and admin clear admin-only checks
    pub fn is_admin_level(&self) -> bool {
        matches!(self, Self::Owner | Self::Admin)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Owner => "owner",
            Self::Admin => "admin",
            Self::Staff => "staff",
        }
    }
}

/// Admin user account
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct AdminUser {
    pub id: i64,
    pub email: String,
    pub display_name: String,
    #[serde(skip_serializing)]
    pub hash_pass: String,
    pub role: AdminRole,
    pub is_active: bool,
    /// Incremented on role/permission/password/activation changes; tokens
    /// minted against an older version are rejected
    pub token_version: i64,
    pub created_at: i64,
}

/// Create admin user payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AdminUserCreate {
    pub email: String,
    pub password: String,
    pub display_name: Option<String>,
    pub role: AdminRole,
}

/// Update admin user payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AdminUserUpdate {
    pub email: Option<String>,
    pub password: Option<String>,
    pub display_name: Option<String>,
    pub role: Option<AdminRole>,
    pub is_active: Option<bool>,
}

/// Admin user without the password hash (list/detail views)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct AdminUserResponse {
    pub id: i64,
    pub email: String,
    pub display_name: String,
    pub role: AdminRole,
    pub is_active: bool,
    pub created_at: i64,
}

impl From<AdminUser> for AdminUserResponse {
    fn from(u: AdminUser) -> Self {
        Self {
            id: u.id,
            email: u.email,
            display_name: u.display_name,
            role: u.role,
            is_active: u.is_active,
            created_at: u.created_at,
        }
    }
}

/// Per-user permission override direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::Type))]
#[cfg_attr(feature = "db", sqlx(rename_all = "snake_case"))]
#[serde(rename_all = "snake_case")]
pub enum OverrideMode {
    Grant,
    Revoke,
}

/// One stored permission override row
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct PermissionOverride {
    pub id: i64,
    pub user_id: i64,
    pub permission: String,
    pub mode: OverrideMode,
}

/// Replacement payload for a user's full override set
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PermissionOverrideSet {
    #[serde(default)]
    pub grants: Vec<String>,
    #[serde(default)]
    pub revokes: Vec<String>,
}

/// Effective permissions: (role base ∪ grants) − revokes.
///
/// Pure set computation; repeated names and grant/revoke collisions resolve
/// in favour of revoke.
pub fn effective_permissions(base: &[String], overrides: &[PermissionOverride]) -> Vec<String> {
    use std::collections::BTreeSet;

    let mut set: BTreeSet<&str> = base.iter().map(String::as_str).collect();
    for o in overrides {
        if o.mode == OverrideMode::Grant {
            set.insert(o.permission.as_str());
        }
    }
    for o in overrides {
        if o.mode == OverrideMode::Revoke {
            set.remove(o.permission.as_str());
        }
    }
    set.into_iter().map(String::from).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ov(user_id: i64, permission: &str, mode: OverrideMode) -> PermissionOverride {
        PermissionOverride {
            id: 0,
            user_id,
            permission: permission.to_string(),
            mode,
        }
    }

    #[test]
    fn effective_permissions_is_set_difference() {
        let base = vec!["orders:read".to_string(), "orders:write".to_string()];
        let overrides = vec![
            ov(1, "jobs:run", OverrideMode::Grant),
            ov(1, "orders:write", OverrideMode::Revoke),
        ];
        let eff = effective_permissions(&base, &overrides);
        assert!(eff.contains(&"orders:read".to_string()));
        assert!(eff.contains(&"jobs:run".to_string()));
        assert!(!eff.contains(&"orders:write".to_string()));
    }

    #[test]
    fn revoke_wins_over_grant() {
        let base = vec![];
        let overrides = vec![
            ov(1, "jobs:run", OverrideMode::Grant),
            ov(1, "jobs:run", OverrideMode::Revoke),
        ];
        assert!(effective_permissions(&base, &overrides).is_empty());
    }
}

//! Permission catalog
//!
//! The closed set of permission names assignable through role overrides.
//! Anything outside this list is rejected before it reaches the database.

/// All known permissions
pub const ALL_PERMISSIONS: &[&str] = &[
    // Orders
    "orders:read",
    "orders:notes",
    "orders:release",
    // Search / analytics
    "search:read",
    "analytics:read",
    // Settings
    "channels:read",
    "channels:write",
    "tiers:read",
    "tiers:write",
    "preferences:write",
    // Background jobs / worker
    "jobs:read",
    "jobs:run",
    "logs:read",
    "shopify:read",
    "shopify:write",
];

/// Whether a permission name is in the known catalog
pub fn is_valid_permission(permission: &str) -> bool {
    ALL_PERMISSIONS.contains(&permission)
}

/// Base permissions granted by a role, before per-user overrides.
///
/// Admin-level roles pass every check through `is_admin()` anyway; the
/// explicit list matters for staff.
pub fn base_permissions(role: shared::models::AdminRole) -> Vec<String> {
    use shared::models::AdminRole;

    let names: &[&str] = match role {
        AdminRole::Owner | AdminRole::Admin => ALL_PERMISSIONS,
        AdminRole::Staff => &[
            "orders:read",
            "orders:notes",
            "search:read",
            "analytics:read",
            "channels:read",
            "tiers:read",
            "preferences:write",
            "jobs:read",
        ],
    };
    names.iter().map(|s| s.to_string()).collect()
}

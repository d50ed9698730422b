//! Admin User Repository
//!
//! Account CRUD with the business guards enforced defensively at this layer:
//! the last active admin-level account can never be deactivated, demoted, or
//! deleted; a user cannot delete their own account; role/permission/password
//! changes bump `token_version` so outstanding tokens die.

use sqlx::SqlitePool;

use super::{RepoError, RepoResult};
use crate::auth::password;
use shared::ErrorCode;
use shared::models::{
    AdminUser, AdminUserCreate, AdminUserUpdate, OverrideMode, PermissionOverride,
    PermissionOverrideSet,
};
use shared::util::{now_millis, snowflake_id};

const ADMIN_SELECT: &str = "SELECT id, email, display_name, hash_pass, role, is_active, \
     token_version, created_at FROM admin_user";

pub async fn find_all(pool: &SqlitePool) -> RepoResult<Vec<AdminUser>> {
    let sql = format!("{ADMIN_SELECT} ORDER BY email");
    let users = sqlx::query_as::<_, AdminUser>(&sql).fetch_all(pool).await?;
    Ok(users)
}

pub async fn find_by_id(pool: &SqlitePool, id: i64) -> RepoResult<Option<AdminUser>> {
    let sql = format!("{ADMIN_SELECT} WHERE id = ?");
    let user = sqlx::query_as::<_, AdminUser>(&sql)
        .bind(id)
        .fetch_optional(pool)
        .await?;
    Ok(user)
}

pub async fn find_by_email(pool: &SqlitePool, email: &str) -> RepoResult<Option<AdminUser>> {
    let sql = format!("{ADMIN_SELECT} WHERE email = ? LIMIT 1");
    let user = sqlx::query_as::<_, AdminUser>(&sql)
        .bind(email)
        .fetch_optional(pool)
        .await?;
    Ok(user)
}

/// Active admin-level accounts other than `excluding_id`
async fn count_other_active_admins(pool: &SqlitePool, excluding_id: i64) -> RepoResult<i64> {
    let count: i64 = sqlx::query_scalar(
        "SELECT COUNT(*) FROM admin_user \
         WHERE is_active = 1 AND role IN ('owner', 'admin') AND id != ?",
    )
    .bind(excluding_id)
    .fetch_one(pool)
    .await?;
    Ok(count)
}

/// Create a new admin user
pub async fn create(pool: &SqlitePool, data: AdminUserCreate) -> RepoResult<AdminUser> {
    // Check duplicate email
    if find_by_email(pool, &data.email).await?.is_some() {
        return Err(RepoError::Business(
            ErrorCode::EmailExists,
            format!("Email '{}' already registered", data.email),
        ));
    }

    let hash_pass = password::hash_password(&data.password)
        .map_err(|e| RepoError::Database(format!("Failed to hash password: {e}")))?;

    let display_name = data.display_name.unwrap_or_else(|| data.email.clone());
    let id = snowflake_id();

    sqlx::query(
        "INSERT INTO admin_user (id, email, display_name, hash_pass, role, is_active, \
         token_version, created_at) VALUES (?1, ?2, ?3, ?4, ?5, 1, 0, ?6)",
    )
    .bind(id)
    .bind(&data.email)
    .bind(&display_name)
    .bind(&hash_pass)
    .bind(data.role)
    .bind(now_millis())
    .execute(pool)
    .await?;

    find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::Database("Failed to create admin user".into()))
}

/// Update an admin user.
///
/// Deactivating or demoting the last active admin-level account fails with
/// the record untouched.
pub async fn update(pool: &SqlitePool, id: i64, data: AdminUserUpdate) -> RepoResult<AdminUser> {
    let existing = find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::Business(ErrorCode::UserNotFound, format!("User {id} not found")))?;

    // Check duplicate email if changing
    if let Some(ref new_email) = data.email
        && new_email != &existing.email
        && find_by_email(pool, new_email).await?.is_some()
    {
        return Err(RepoError::Business(
            ErrorCode::EmailExists,
            format!("Email '{new_email}' already registered"),
        ));
    }

    let deactivating = existing.is_active && data.is_active == Some(false);
    let demoting = existing.role.is_admin_level()
        && data.role.is_some_and(|r| !r.is_admin_level());
    if (deactivating || demoting)
        && existing.is_active
        && existing.role.is_admin_level()
        && count_other_active_admins(pool, id).await? == 0
    {
        return Err(RepoError::Business(
            ErrorCode::LastAdmin,
            "Cannot disable or demote the last active admin".into(),
        ));
    }

    let hash_pass = match data.password {
        Some(ref p) => Some(
            password::hash_password(p)
                .map_err(|e| RepoError::Database(format!("Failed to hash password: {e}")))?,
        ),
        None => None,
    };

    // Role, activation and password changes force re-authentication
    let bump_version = data.role.is_some_and(|r| r != existing.role)
        || data
            .is_active
            .is_some_and(|active| active != existing.is_active)
        || hash_pass.is_some();

    let rows = sqlx::query(
        "UPDATE admin_user SET \
            email = COALESCE(?1, email), \
            display_name = COALESCE(?2, display_name), \
            hash_pass = COALESCE(?3, hash_pass), \
            role = COALESCE(?4, role), \
            is_active = COALESCE(?5, is_active), \
            token_version = token_version + ?6 \
         WHERE id = ?7",
    )
    .bind(&data.email)
    .bind(&data.display_name)
    .bind(&hash_pass)
    .bind(data.role)
    .bind(data.is_active)
    .bind(if bump_version { 1 } else { 0 })
    .bind(id)
    .execute(pool)
    .await?;

    if rows.rows_affected() == 0 {
        return Err(RepoError::Business(
            ErrorCode::UserNotFound,
            format!("User {id} not found"),
        ));
    }
    find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::Business(ErrorCode::UserNotFound, format!("User {id} not found")))
}

/// Delete an admin user (and their overrides and grid preferences).
pub async fn delete(pool: &SqlitePool, id: i64, acting_user_id: i64) -> RepoResult<bool> {
    if id == acting_user_id {
        return Err(RepoError::Business(
            ErrorCode::CannotDeleteSelf,
            "Cannot delete your own account".into(),
        ));
    }

    let existing = find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::Business(ErrorCode::UserNotFound, format!("User {id} not found")))?;

    if existing.is_active
        && existing.role.is_admin_level()
        && count_other_active_admins(pool, id).await? == 0
    {
        return Err(RepoError::Business(
            ErrorCode::LastAdmin,
            "Cannot delete the last active admin".into(),
        ));
    }

    let mut tx = pool.begin().await?;
    sqlx::query("DELETE FROM permission_override WHERE user_id = ?")
        .bind(id)
        .execute(&mut *tx)
        .await?;
    sqlx::query("DELETE FROM grid_preference WHERE user_id = ?")
        .bind(id)
        .execute(&mut *tx)
        .await?;
    sqlx::query("DELETE FROM admin_user WHERE id = ?")
        .bind(id)
        .execute(&mut *tx)
        .await?;
    tx.commit().await?;
    Ok(true)
}

/// Stored overrides for one user
pub async fn overrides_for_user(
    pool: &SqlitePool,
    user_id: i64,
) -> RepoResult<Vec<PermissionOverride>> {
    let overrides = sqlx::query_as::<_, PermissionOverride>(
        "SELECT id, user_id, permission, mode FROM permission_override \
         WHERE user_id = ? ORDER BY permission",
    )
    .bind(user_id)
    .fetch_all(pool)
    .await?;
    Ok(overrides)
}

/// Replace a user's full override set atomically.
///
/// Delete + insert run as one transaction: any failure (for example a
/// duplicate permission in the payload) rolls the whole replacement back and
/// the previous set stays intact. The token version bumps inside the same
/// transaction so a partial bump cannot happen either.
pub async fn replace_overrides(
    pool: &SqlitePool,
    user_id: i64,
    set: &PermissionOverrideSet,
) -> RepoResult<Vec<PermissionOverride>> {
    find_by_id(pool, user_id)
        .await?
        .ok_or_else(|| {
            RepoError::Business(ErrorCode::UserNotFound, format!("User {user_id} not found"))
        })?;

    let mut tx = pool.begin().await?;

    sqlx::query("DELETE FROM permission_override WHERE user_id = ?")
        .bind(user_id)
        .execute(&mut *tx)
        .await?;

    for (mode, names) in [
        (OverrideMode::Grant, &set.grants),
        (OverrideMode::Revoke, &set.revokes),
    ] {
        for permission in names {
            sqlx::query(
                "INSERT INTO permission_override (id, user_id, permission, mode) \
                 VALUES (?1, ?2, ?3, ?4)",
            )
            .bind(snowflake_id())
            .bind(user_id)
            .bind(permission)
            .bind(mode)
            .execute(&mut *tx)
            .await?;
        }
    }

    sqlx::query("UPDATE admin_user SET token_version = token_version + 1 WHERE id = ?")
        .bind(user_id)
        .execute(&mut *tx)
        .await?;

    tx.commit().await?;

    overrides_for_user(pool, user_id).await
}

//! Admin User API Handlers
//!
//! Account CRUD and per-user permission overrides. The business guards
//! (last admin, self-delete) live in the repository; handlers validate
//! input shape and log who did what.

use axum::{
    Json,
    extract::{Extension, Path, State},
};
use serde::Serialize;

use crate::auth::permissions::{ALL_PERMISSIONS, base_permissions, is_valid_permission};
use crate::auth::CurrentUser;
use crate::core::ServerState;
use crate::db::repository::admin_user;
use crate::utils::validation::{
    MAX_EMAIL_LEN, MAX_NAME_LEN, MAX_PASSWORD_LEN, validate_optional_text, validate_required_text,
};
use crate::utils::{AppResult, ok};
use shared::models::{
    AdminUserCreate, AdminUserResponse, AdminUserUpdate, PermissionOverrideSet,
    effective_permissions,
};
use shared::{ApiResponse, AppError, ErrorCode};

fn validate_email(email: &str) -> AppResult<()> {
    validate_required_text(email, "email", MAX_EMAIL_LEN)?;
    if !email.contains('@') {
        return Err(AppError::validation("Invalid email address"));
    }
    Ok(())
}

fn validate_password(password: &str) -> AppResult<()> {
    if password.len() < 8 {
        return Err(AppError::validation("Password must be at least 8 characters"));
    }
    if password.len() > MAX_PASSWORD_LEN {
        return Err(AppError::validation("Password too long"));
    }
    Ok(())
}

/// GET /api/admin/users
pub async fn list(
    State(state): State<ServerState>,
) -> AppResult<Json<ApiResponse<Vec<AdminUserResponse>>>> {
    let users = admin_user::find_all(&state.pool)
        .await
        .map_err(AppError::from)?;
    Ok(ok(users.into_iter().map(AdminUserResponse::from).collect()))
}

/// GET /api/admin/users/{id}
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> AppResult<Json<ApiResponse<AdminUserResponse>>> {
    let user = admin_user::find_by_id(&state.pool, id)
        .await
        .map_err(AppError::from)?
        .ok_or_else(|| {
            AppError::with_message(ErrorCode::UserNotFound, format!("User {id} not found"))
        })?;
    Ok(ok(user.into()))
}

/// POST /api/admin/users
pub async fn create(
    State(state): State<ServerState>,
    Extension(current_user): Extension<CurrentUser>,
    Json(payload): Json<AdminUserCreate>,
) -> AppResult<Json<ApiResponse<AdminUserResponse>>> {
    validate_email(&payload.email)?;
    validate_password(&payload.password)?;
    validate_optional_text(&payload.display_name, "display_name", MAX_NAME_LEN)?;

    tracing::info!(
        actor = current_user.id,
        email = %payload.email,
        role = payload.role.as_str(),
        "Creating admin user"
    );

    let user = admin_user::create(&state.pool, payload)
        .await
        .map_err(AppError::from)?;
    Ok(ok(user.into()))
}

/// PUT /api/admin/users/{id}
pub async fn update(
    State(state): State<ServerState>,
    Extension(current_user): Extension<CurrentUser>,
    Path(id): Path<i64>,
    Json(payload): Json<AdminUserUpdate>,
) -> AppResult<Json<ApiResponse<AdminUserResponse>>> {
    if let Some(ref email) = payload.email {
        validate_email(email)?;
    }
    if let Some(ref password) = payload.password {
        validate_password(password)?;
    }
    validate_optional_text(&payload.display_name, "display_name", MAX_NAME_LEN)?;

    tracing::info!(actor = current_user.id, user_id = id, "Updating admin user");

    let user = admin_user::update(&state.pool, id, payload)
        .await
        .map_err(AppError::from)?;
    Ok(ok(user.into()))
}

/// DELETE /api/admin/users/{id}
pub async fn delete(
    State(state): State<ServerState>,
    Extension(current_user): Extension<CurrentUser>,
    Path(id): Path<i64>,
) -> AppResult<Json<ApiResponse<bool>>> {
    tracing::info!(actor = current_user.id, user_id = id, "Deleting admin user");

    let deleted = admin_user::delete(&state.pool, id, current_user.id)
        .await
        .map_err(AppError::from)?;
    Ok(ok(deleted))
}

/// Override state for one user: the stored set plus the resolved effect
#[derive(Debug, Serialize)]
pub struct OverrideView {
    pub overrides: Vec<shared::models::PermissionOverride>,
    pub effective_permissions: Vec<String>,
}

/// GET /api/admin/users/{id}/overrides
pub async fn get_overrides(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> AppResult<Json<ApiResponse<OverrideView>>> {
    let user = admin_user::find_by_id(&state.pool, id)
        .await
        .map_err(AppError::from)?
        .ok_or_else(|| {
            AppError::with_message(ErrorCode::UserNotFound, format!("User {id} not found"))
        })?;
    let overrides = admin_user::overrides_for_user(&state.pool, id)
        .await
        .map_err(AppError::from)?;
    let effective = effective_permissions(&base_permissions(user.role), &overrides);
    Ok(ok(OverrideView {
        overrides,
        effective_permissions: effective,
    }))
}

/// PUT /api/admin/users/{id}/overrides — atomic replacement
pub async fn put_overrides(
    State(state): State<ServerState>,
    Extension(current_user): Extension<CurrentUser>,
    Path(id): Path<i64>,
    Json(payload): Json<PermissionOverrideSet>,
) -> AppResult<Json<ApiResponse<OverrideView>>> {
    for permission in payload.grants.iter().chain(payload.revokes.iter()) {
        if !is_valid_permission(permission) {
            return Err(AppError::with_message(
                ErrorCode::InvalidPermission,
                format!("Unknown permission: {permission}"),
            ));
        }
    }

    tracing::info!(
        actor = current_user.id,
        user_id = id,
        grants = payload.grants.len(),
        revokes = payload.revokes.len(),
        "Replacing permission overrides"
    );

    let overrides = admin_user::replace_overrides(&state.pool, id, &payload)
        .await
        .map_err(AppError::from)?;

    let user = admin_user::find_by_id(&state.pool, id)
        .await
        .map_err(AppError::from)?
        .ok_or_else(|| {
            AppError::with_message(ErrorCode::UserNotFound, format!("User {id} not found"))
        })?;
    let effective = effective_permissions(&base_permissions(user.role), &overrides);
    Ok(ok(OverrideView {
        overrides,
        effective_permissions: effective,
    }))
}

/// GET /api/admin/permissions — the full permission catalog
pub async fn get_all_permissions() -> AppResult<Json<ApiResponse<Vec<String>>>> {
    Ok(ok(ALL_PERMISSIONS.iter().map(|s| s.to_string()).collect()))
}

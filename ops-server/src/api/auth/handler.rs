//! Auth API Handlers

use axum::{
    Json,
    extract::{Extension, State},
};

use crate::auth::{CurrentUser, permissions};
use crate::core::ServerState;
use crate::db::repository::admin_user;
use crate::security_log;
use crate::utils::{AppResult, ok};
use shared::client::{LoginRequest, LoginResponse, UserInfo};
use shared::models::effective_permissions;
use shared::{ApiResponse, AppError};

/// POST /api/auth/login
///
/// The same invalid-credentials error covers unknown email, wrong password,
/// and disabled accounts, so nothing about the account leaks.
pub async fn login(
    State(state): State<ServerState>,
    Json(payload): Json<LoginRequest>,
) -> AppResult<Json<ApiResponse<LoginResponse>>> {
    let user = admin_user::find_by_email(&state.pool, &payload.email)
        .await
        .map_err(AppError::from)?
        .ok_or_else(AppError::invalid_credentials)?;

    let verified = crate::auth::password::verify_password(&payload.password, &user.hash_pass)
        .map_err(|e| AppError::internal(format!("Password verification failed: {e}")))?;
    if !verified || !user.is_active {
        security_log!("WARN", "login_rejected", email = payload.email.clone());
        return Err(AppError::invalid_credentials());
    }

    let overrides = admin_user::overrides_for_user(&state.pool, user.id)
        .await
        .map_err(AppError::from)?;
    let permissions =
        effective_permissions(&permissions::base_permissions(user.role), &overrides);

    let token = state
        .jwt_service
        .generate_token(
            user.id,
            &user.email,
            &user.display_name,
            user.role,
            &permissions,
            user.token_version,
        )
        .map_err(|e| AppError::internal(format!("Token generation failed: {e}")))?;

    security_log!("INFO", "login_success", user_id = user.id, email = user.email.clone());

    Ok(ok(LoginResponse {
        token,
        user: UserInfo {
            id: user.id,
            email: user.email,
            display_name: user.display_name,
            role: user.role.as_str().to_string(),
            permissions,
        },
    }))
}

/// GET /api/auth/me
pub async fn me(
    Extension(current_user): Extension<CurrentUser>,
) -> AppResult<Json<ApiResponse<UserInfo>>> {
    Ok(ok(UserInfo {
        id: current_user.id,
        email: current_user.email,
        display_name: current_user.display_name,
        role: current_user.role.as_str().to_string(),
        permissions: current_user.permissions,
    }))
}

/// POST /api/auth/logout
///
/// Stateless tokens: the client drops the token; revocation happens through
/// the token-version counter when an admin changes the account.
pub async fn logout(
    Extension(current_user): Extension<CurrentUser>,
) -> AppResult<Json<ApiResponse<bool>>> {
    security_log!("INFO", "logout", user_id = current_user.id);
    Ok(ok(true))
}

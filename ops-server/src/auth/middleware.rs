//! Authentication middleware
//!
//! Axum middleware for JWT authentication and authorization. Both checks
//! fail closed: a missing user context is always a denial, never a
//! pass-through.

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};

use crate::auth::{CurrentUser, JwtService};
use crate::core::ServerState;
use crate::db::repository::admin_user;
use crate::security_log;
use shared::{AppError, ErrorCode};

/// Raw bearer token of the authenticated request, kept for proxy calls that
/// forward the caller's identity to the worker service.
#[derive(Debug, Clone)]
pub struct AuthToken(pub String);

/// Authentication middleware — requires a logged-in user.
///
/// Extracts and validates the JWT from `Authorization: Bearer <token>`, then
/// re-reads the account row: a disabled account or a stale token version
/// (bumped by role/permission/password changes) is rejected even when the
/// signature is still valid. On success a [`CurrentUser`] is injected into
/// the request extensions.
///
/// # Paths that skip authentication
///
/// - `OPTIONS *` (CORS preflight)
/// - non-`/api/` paths
/// - `/api/auth/login`
/// - `/api/health`
pub async fn require_auth(
    State(state): State<ServerState>,
    mut req: Request,
    next: Next,
) -> Result<Response, AppError> {
    let path = req.uri().path();

    // Allow CORS preflight through
    if req.method() == http::Method::OPTIONS {
        return Ok(next.run(req).await);
    }

    // Non-API routes fall through to their own 404 handling
    if !path.starts_with("/api/") {
        return Ok(next.run(req).await);
    }

    let is_public_api_route = path == "/api/auth/login" || path == "/api/health";
    if is_public_api_route {
        return Ok(next.run(req).await);
    }

    let auth_header = req
        .headers()
        .get(http::header::AUTHORIZATION)
        .and_then(|h| h.to_str().ok());

    let token = match auth_header {
        Some(header) => JwtService::extract_from_header(header)
            .ok_or_else(|| AppError::invalid_token("Invalid authorization header"))?
            .to_string(),
        None => {
            security_log!("WARN", "auth_missing", uri = format!("{:?}", req.uri()));
            return Err(AppError::unauthorized());
        }
    };

    let claims = match state.jwt_service.validate_token(&token) {
        Ok(claims) => claims,
        Err(e) => {
            security_log!(
                "WARN",
                "auth_failed",
                error = format!("{}", e),
                uri = format!("{:?}", req.uri())
            );
            return match e {
                crate::auth::JwtError::ExpiredToken => Err(AppError::token_expired()),
                _ => Err(AppError::invalid_token("Invalid token")),
            };
        }
    };

    let user = CurrentUser::try_from(claims)
        .map_err(|_| AppError::invalid_token("Invalid token"))?;

    // Token is cryptographically valid; now check it is still honoured.
    let account = admin_user::find_by_id(&state.pool, user.id)
        .await
        .map_err(AppError::from)?
        .ok_or_else(|| AppError::new(ErrorCode::SessionRevoked))?;

    if !account.is_active {
        security_log!("WARN", "auth_disabled_account", user_id = user.id);
        return Err(AppError::new(ErrorCode::AccountDisabled));
    }

    if account.token_version != user.token_version {
        security_log!(
            "WARN",
            "auth_stale_token",
            user_id = user.id,
            token_version = user.token_version,
            current_version = account.token_version
        );
        return Err(AppError::new(ErrorCode::SessionRevoked));
    }

    req.extensions_mut().insert(AuthToken(token));
    req.extensions_mut().insert(user);
    Ok(next.run(req).await)
}

/// Admin middleware — requires role `owner` or `admin`.
pub async fn require_admin(req: Request, next: Next) -> Result<Response, AppError> {
    let user = req
        .extensions()
        .get::<CurrentUser>()
        .ok_or(AppError::unauthorized())?;
    if !user.is_admin() {
        security_log!(
            "WARN",
            "admin_required",
            user_id = user.id,
            email = user.email.clone(),
            role = user.role.as_str()
        );
        return Err(AppError::new(ErrorCode::AdminRequired));
    }

    Ok(next.run(req).await)
}

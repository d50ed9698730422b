//! Shopify API Handlers (proxied)
//!
//! Connection config, sync trigger, and test-connection all live in the
//! worker process; this surface forwards and translates.

use axum::{
    Json,
    extract::{Extension, State},
};

use crate::auth::{AuthToken, CurrentUser};
use crate::core::ServerState;
use crate::utils::validation::{MAX_NAME_LEN, validate_required_text};
use crate::utils::{AppResult, ok};
use shared::client::{JobActionResponse, ShopifyConfig, ShopifyConnectionStatus};
use shared::ApiResponse;

/// GET /api/shopify/config
pub async fn get_config(
    State(state): State<ServerState>,
    Extension(AuthToken(token)): Extension<AuthToken>,
) -> AppResult<Json<ApiResponse<ShopifyConfig>>> {
    let config = state.worker.shopify_config(&token).await?;
    Ok(ok(config))
}

/// PUT /api/shopify/config
pub async fn put_config(
    State(state): State<ServerState>,
    Extension(current_user): Extension<CurrentUser>,
    Extension(AuthToken(token)): Extension<AuthToken>,
    Json(payload): Json<ShopifyConfig>,
) -> AppResult<Json<ApiResponse<ShopifyConfig>>> {
    validate_required_text(&payload.shop_domain, "shop_domain", MAX_NAME_LEN)?;
    validate_required_text(&payload.api_version, "api_version", MAX_NAME_LEN)?;

    tracing::info!(
        actor = current_user.id,
        shop = %payload.shop_domain,
        "Updating Shopify config"
    );

    let config = state.worker.shopify_config_update(&token, &payload).await?;
    Ok(ok(config))
}

/// POST /api/shopify/test-connection
pub async fn test_connection(
    State(state): State<ServerState>,
    Extension(AuthToken(token)): Extension<AuthToken>,
) -> AppResult<Json<ApiResponse<ShopifyConnectionStatus>>> {
    let status = state.worker.shopify_test_connection(&token).await?;
    Ok(ok(status))
}

/// POST /api/shopify/sync — trigger a catalog/metadata sync run
pub async fn sync(
    State(state): State<ServerState>,
    Extension(current_user): Extension<CurrentUser>,
    Extension(AuthToken(token)): Extension<AuthToken>,
) -> AppResult<Json<ApiResponse<JobActionResponse>>> {
    tracing::info!(actor = current_user.id, "Triggering Shopify sync");
    let response = state.worker.shopify_sync(&token).await?;
    Ok(ok(response))
}

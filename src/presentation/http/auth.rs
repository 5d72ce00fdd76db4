use axum::extract::FromRequestParts;
use axum::http::StatusCode;
use axum::http::request::Parts;

use crate::bootstrap::app_context::AppContext;

pub const API_KEY_HEADER: &str = "x-api-key";

/// The raw `X-API-Key` header value. Missing header is an immediate 401.
pub struct ApiKey(pub String);

#[axum::async_trait]
impl<S> FromRequestParts<S> for ApiKey
where
    S: Send + Sync,
{
    type Rejection = StatusCode;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .headers
            .get(API_KEY_HEADER)
            .and_then(|v| v.to_str().ok())
            .map(|v| ApiKey(v.trim().to_string()))
            .ok_or(StatusCode::UNAUTHORIZED)
    }
}

/// Resolve the calling wizard from its API key.
pub async fn authenticate(ctx: &AppContext, key: &ApiKey) -> Result<String, StatusCode> {
    let repo = ctx.wizard_repo();
    let wizard = repo.find_by_api_key(&key.0).await.map_err(|e| {
        tracing::error!(error = ?e, "wizard_lookup_failed");
        StatusCode::INTERNAL_SERVER_ERROR
    })?;
    wizard.map(|w| w.name).ok_or(StatusCode::UNAUTHORIZED)
}

/// Admin routes require the configured admin wizard's key; any other valid
/// key is 403.
pub async fn require_admin(ctx: &AppContext, key: &ApiKey) -> Result<String, StatusCode> {
    let name = authenticate(ctx, key).await?;
    if name == ctx.cfg.admin_wizard {
        Ok(name)
    } else {
        Err(StatusCode::FORBIDDEN)
    }
}

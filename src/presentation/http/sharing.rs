use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    routing::{get, post},
};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::application::use_cases::sharing::approve_request::{ApproveRequest, ApproveRequestError};
use crate::application::use_cases::sharing::list_requests::ListAccessRequests;
use crate::application::use_cases::sharing::request_access::{RequestAccess, RequestAccessError};
use crate::application::use_cases::sharing::share_note::{ShareNote, ShareNoteError};
use crate::bootstrap::app_context::AppContext;
use crate::domain::share::AccessRequest;
use crate::presentation::http::MessageResponse;
use crate::presentation::http::auth::{self, ApiKey};

#[derive(Debug, Deserialize, ToSchema)]
pub struct ShareNoteRequest {
    pub note_id: Uuid,
    pub wizard_name: String,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct AccessRequestBody {
    /// Wizard whose notes the caller wants to read.
    pub wizard_name: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct AccessRequestCreated {
    pub message: String,
    pub request_id: Uuid,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct AccessRequestItem {
    pub request_id: Uuid,
    pub from_wizard: String,
    pub to_wizard: String,
    pub status: String,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

impl From<AccessRequest> for AccessRequestItem {
    fn from(r: AccessRequest) -> Self {
        AccessRequestItem {
            request_id: r.request_id,
            from_wizard: r.from_wizard,
            to_wizard: r.to_wizard,
            status: r.status.as_str().to_string(),
            created_at: r.created_at,
        }
    }
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct ApproveRequestBody {
    pub request_id: Uuid,
}

#[utoipa::path(
    post,
    path = "/notes/share",
    tag = "Sharing",
    request_body = ShareNoteRequest,
    responses(
        (status = 200, body = MessageResponse),
        (status = 403, description = "Only the owner can share a note"),
        (status = 404, description = "Note or recipient not found")
    )
)]
pub async fn share_note(
    State(ctx): State<AppContext>,
    key: ApiKey,
    Json(req): Json<ShareNoteRequest>,
) -> Result<Json<MessageResponse>, StatusCode> {
    let wizard = auth::authenticate(&ctx, &key).await?;
    let notes = ctx.note_repo();
    let wizards = ctx.wizard_repo();
    let shares = ctx.share_repo();
    let uc = ShareNote {
        notes: notes.as_ref(),
        wizards: wizards.as_ref(),
        shares: shares.as_ref(),
    };
    uc.execute(&wizard, req.note_id, &req.wizard_name)
        .await
        .map_err(|e| match e {
            ShareNoteError::NoteNotFound => StatusCode::NOT_FOUND,
            ShareNoteError::NotOwner => StatusCode::FORBIDDEN,
            ShareNoteError::WizardNotFound => StatusCode::NOT_FOUND,
            ShareNoteError::Other(e) => {
                tracing::error!(note_id = %req.note_id, error = ?e, "share_note_failed");
                StatusCode::INTERNAL_SERVER_ERROR
            }
        })?;
    Ok(Json(MessageResponse {
        message: format!("Note shared with {}", req.wizard_name),
    }))
}

#[utoipa::path(
    post,
    path = "/access-requests",
    tag = "Sharing",
    request_body = AccessRequestBody,
    responses(
        (status = 200, body = AccessRequestCreated),
        (status = 400, description = "Cannot request access from yourself"),
        (status = 404, description = "Wizard not found")
    )
)]
pub async fn request_access(
    State(ctx): State<AppContext>,
    key: ApiKey,
    Json(req): Json<AccessRequestBody>,
) -> Result<Json<AccessRequestCreated>, StatusCode> {
    let wizard = auth::authenticate(&ctx, &key).await?;
    let wizards = ctx.wizard_repo();
    let shares = ctx.share_repo();
    let uc = RequestAccess {
        wizards: wizards.as_ref(),
        shares: shares.as_ref(),
    };
    let request = uc
        .execute(&wizard, &req.wizard_name)
        .await
        .map_err(|e| match e {
            RequestAccessError::WizardNotFound => StatusCode::NOT_FOUND,
            RequestAccessError::SelfRequest => StatusCode::BAD_REQUEST,
            RequestAccessError::Other(e) => {
                tracing::error!(error = ?e, "request_access_failed");
                StatusCode::INTERNAL_SERVER_ERROR
            }
        })?;
    Ok(Json(AccessRequestCreated {
        message: "Access request sent".into(),
        request_id: request.request_id,
    }))
}

#[utoipa::path(
    get,
    path = "/access-requests",
    tag = "Sharing",
    responses((status = 200, description = "Requests addressed to the caller", body = [AccessRequestItem]))
)]
pub async fn list_requests(
    State(ctx): State<AppContext>,
    key: ApiKey,
) -> Result<Json<Vec<AccessRequestItem>>, StatusCode> {
    let wizard = auth::authenticate(&ctx, &key).await?;
    let shares = ctx.share_repo();
    let uc = ListAccessRequests {
        shares: shares.as_ref(),
    };
    let requests = uc
        .execute(&wizard)
        .await
        .map_err(|_| StatusCode::INTERNAL_SERVER_ERROR)?;
    Ok(Json(requests.into_iter().map(Into::into).collect()))
}

#[utoipa::path(
    post,
    path = "/access-requests/approve",
    tag = "Sharing",
    request_body = ApproveRequestBody,
    responses(
        (status = 200, body = MessageResponse),
        (status = 400, description = "Request already processed"),
        (status = 403, description = "Request is addressed to another wizard"),
        (status = 404, description = "Request not found")
    )
)]
pub async fn approve_request(
    State(ctx): State<AppContext>,
    key: ApiKey,
    Json(req): Json<ApproveRequestBody>,
) -> Result<Json<MessageResponse>, StatusCode> {
    let wizard = auth::authenticate(&ctx, &key).await?;
    let notes = ctx.note_repo();
    let shares = ctx.share_repo();
    let uc = ApproveRequest {
        notes: notes.as_ref(),
        shares: shares.as_ref(),
    };
    uc.execute(&wizard, req.request_id)
        .await
        .map_err(|e| match e {
            ApproveRequestError::NotFound => StatusCode::NOT_FOUND,
            ApproveRequestError::NotRecipient => StatusCode::FORBIDDEN,
            ApproveRequestError::AlreadyProcessed => StatusCode::BAD_REQUEST,
            ApproveRequestError::Other(e) => {
                tracing::error!(request_id = %req.request_id, error = ?e, "approve_request_failed");
                StatusCode::INTERNAL_SERVER_ERROR
            }
        })?;
    Ok(Json(MessageResponse {
        message: "Access granted".into(),
    }))
}

pub fn routes(ctx: AppContext) -> Router {
    Router::new()
        .route("/notes/share", post(share_note))
        .route("/access-requests", get(list_requests).post(request_access))
        .route("/access-requests/approve", post(approve_request))
        .with_state(ctx)
}

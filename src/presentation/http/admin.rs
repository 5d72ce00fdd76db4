use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    response::Html,
    routing::{delete, get, post},
};
use serde::Deserialize;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::application::use_cases::admin::clear_shares::ClearShares;
use crate::application::use_cases::admin::download_encrypted::DownloadEncryptedNote;
use crate::application::use_cases::admin::list_all_notes::ListAllNotes;
use crate::application::use_cases::notes::delete_note::DeleteNote;
use crate::application::use_cases::wizards::create_wizard::CreateWizard;
use crate::application::ports::wizard_repository::CreateWizardError;
use crate::bootstrap::app_context::AppContext;
use crate::domain::note::NoteMeta;
use crate::presentation::http::MessageResponse;
use crate::presentation::http::auth::{self, ApiKey};
use crate::presentation::http::notes::NoteItem;

#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateWizardRequest {
    pub name: String,
    pub api_key: String,
}

#[utoipa::path(
    get,
    path = "/admin/notes",
    tag = "Admin",
    responses(
        (status = 200, description = "Every note in the store", body = [NoteItem]),
        (status = 403, description = "Admin key required")
    )
)]
pub async fn list_all_notes(
    State(ctx): State<AppContext>,
    key: ApiKey,
) -> Result<Json<Vec<NoteItem>>, StatusCode> {
    auth::require_admin(&ctx, &key).await?;
    let notes = ctx.note_repo();
    let shares = ctx.share_repo();
    let uc = ListAllNotes {
        notes: notes.as_ref(),
        shares: shares.as_ref(),
    };
    let items = uc
        .execute()
        .await
        .map_err(|_| StatusCode::INTERNAL_SERVER_ERROR)?;
    Ok(Json(items.into_iter().map(Into::into).collect()))
}

#[utoipa::path(
    get,
    path = "/admin/notes/{id}/download",
    tag = "Admin",
    params(("id" = Uuid, Path, description = "Note ID")),
    responses(
        (status = 200, description = "Stored ciphertext as an HTML page", content_type = "text/html"),
        (status = 403, description = "Admin key required"),
        (status = 404, description = "Note not found")
    )
)]
pub async fn download_encrypted(
    State(ctx): State<AppContext>,
    key: ApiKey,
    Path(id): Path<Uuid>,
) -> Result<Html<String>, StatusCode> {
    auth::require_admin(&ctx, &key).await?;
    let notes = ctx.note_repo();
    let vault = ctx.note_vault();
    let uc = DownloadEncryptedNote {
        notes: notes.as_ref(),
        vault: vault.as_ref(),
    };
    let (meta, ciphertext) = uc
        .execute(id)
        .await
        .map_err(|e| {
            tracing::error!(note_id = %id, error = ?e, "download_encrypted_failed");
            StatusCode::INTERNAL_SERVER_ERROR
        })?
        .ok_or(StatusCode::NOT_FOUND)?;
    Ok(Html(render_encrypted_page(&meta, &ciphertext)))
}

#[utoipa::path(
    delete,
    path = "/admin/notes/{id}",
    tag = "Admin",
    params(("id" = Uuid, Path, description = "Note ID")),
    responses(
        (status = 200, body = MessageResponse),
        (status = 403, description = "Admin key required"),
        (status = 404, description = "Note not found")
    )
)]
pub async fn delete_any_note(
    State(ctx): State<AppContext>,
    key: ApiKey,
    Path(id): Path<Uuid>,
) -> Result<Json<MessageResponse>, StatusCode> {
    auth::require_admin(&ctx, &key).await?;
    let notes = ctx.note_repo();
    let shares = ctx.share_repo();
    let vault = ctx.note_vault();
    let uc = DeleteNote {
        notes: notes.as_ref(),
        shares: shares.as_ref(),
        vault: vault.as_ref(),
    };
    let deleted = uc.execute(id).await.map_err(|e| {
        tracing::error!(note_id = %id, error = ?e, "admin_delete_failed");
        StatusCode::INTERNAL_SERVER_ERROR
    })?;
    if deleted {
        Ok(Json(MessageResponse {
            message: "Note deleted by admin".into(),
        }))
    } else {
        Err(StatusCode::NOT_FOUND)
    }
}

#[utoipa::path(
    delete,
    path = "/admin/shares",
    tag = "Admin",
    responses(
        (status = 200, body = MessageResponse),
        (status = 403, description = "Admin key required")
    )
)]
pub async fn clear_shares(
    State(ctx): State<AppContext>,
    key: ApiKey,
) -> Result<Json<MessageResponse>, StatusCode> {
    auth::require_admin(&ctx, &key).await?;
    let shares = ctx.share_repo();
    let uc = ClearShares {
        shares: shares.as_ref(),
    };
    uc.execute().await.map_err(|e| {
        tracing::error!(error = ?e, "clear_shares_failed");
        StatusCode::INTERNAL_SERVER_ERROR
    })?;
    Ok(Json(MessageResponse {
        message: "All shares removed".into(),
    }))
}

#[utoipa::path(
    post,
    path = "/admin/wizards",
    tag = "Admin",
    request_body = CreateWizardRequest,
    responses(
        (status = 200, body = MessageResponse),
        (status = 400, description = "Wizard already exists"),
        (status = 403, description = "Admin key required")
    )
)]
pub async fn create_wizard(
    State(ctx): State<AppContext>,
    key: ApiKey,
    Json(req): Json<CreateWizardRequest>,
) -> Result<Json<MessageResponse>, StatusCode> {
    auth::require_admin(&ctx, &key).await?;
    let repo = ctx.wizard_repo();
    let uc = CreateWizard {
        repo: repo.as_ref(),
    };
    uc.execute(&req.name, &req.api_key)
        .await
        .map_err(|e| match e {
            CreateWizardError::AlreadyExists => StatusCode::BAD_REQUEST,
            CreateWizardError::Other(e) => {
                tracing::error!(error = ?e, "create_wizard_failed");
                StatusCode::INTERNAL_SERVER_ERROR
            }
        })?;
    Ok(Json(MessageResponse {
        message: format!("Wizard {} created", req.name),
    }))
}

fn render_encrypted_page(meta: &NoteMeta, ciphertext: &str) -> String {
    let title = htmlescape::encode_minimal(&meta.title);
    let owner = htmlescape::encode_minimal(&meta.owner);
    let ciphertext = htmlescape::encode_minimal(ciphertext);
    format!(
        r#"<!DOCTYPE html>
<html>
<head>
    <title>Encrypted: {title}</title>
    <style>
        body {{
            font-family: 'Courier New', monospace;
            max-width: 800px;
            margin: 50px auto;
            padding: 20px;
            background: #1a1a1a;
            color: #00ff00;
        }}
        .container {{
            border: 1px solid #00ff00;
            padding: 30px;
        }}
        h1 {{
            border-bottom: 1px solid #00ff00;
            padding-bottom: 10px;
        }}
        .meta {{
            opacity: 0.7;
            margin-bottom: 20px;
        }}
        .ciphertext {{
            word-break: break-all;
            white-space: pre-wrap;
        }}
    </style>
</head>
<body>
    <div class="container">
        <h1>&#9889; Mischief Managed &#9889;</h1>
        <div class="meta">
            <strong>Title:</strong> {title}<br>
            <strong>Owner:</strong> {owner}<br>
            <strong>Created:</strong> {created_at}
        </div>
        <div class="ciphertext">{ciphertext}</div>
    </div>
</body>
</html>
"#,
        created_at = meta.created_at.to_rfc3339(),
    )
}

pub fn routes(ctx: AppContext) -> Router {
    Router::new()
        .route("/admin/notes", get(list_all_notes))
        .route("/admin/notes/:id/download", get(download_encrypted))
        .route("/admin/notes/:id", delete(delete_any_note))
        .route("/admin/shares", delete(clear_shares))
        .route("/admin/wizards", post(create_wizard))
        .with_state(ctx)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn encrypted_page_escapes_metadata_and_keeps_ciphertext() {
        let meta = NoteMeta {
            id: Uuid::new_v4(),
            title: "<b>secret</b>".into(),
            owner: "Dumbledore".into(),
            created_at: chrono::Utc::now(),
        };
        let html = render_encrypted_page(&meta, "v1:abc:def");
        assert!(html.contains("&lt;b&gt;secret&lt;/b&gt;"));
        assert!(!html.contains("<b>secret</b>"));
        assert!(html.contains("v1:abc:def"));
        assert!(html.contains("Mischief Managed"));
    }
}

use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    response::Html,
    routing::get,
};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::application::access::{self, AccessError};
use crate::application::use_cases::notes::create_note::CreateNote;
use crate::application::use_cases::notes::delete_note::DeleteNote;
use crate::application::use_cases::notes::list_notes::{ListNotes, NoteWithShares};
use crate::application::use_cases::notes::read_note::{NoteContent, ReadNote};
use crate::bootstrap::app_context::AppContext;
use crate::presentation::http::MessageResponse;
use crate::presentation::http::auth::{self, ApiKey};

#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateNoteRequest {
    pub title: String,
    pub content: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct NoteItem {
    pub note_id: Uuid,
    pub title: String,
    pub owner: String,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub shared_with: Vec<String>,
}

impl From<NoteWithShares> for NoteItem {
    fn from(n: NoteWithShares) -> Self {
        NoteItem {
            note_id: n.meta.id,
            title: n.meta.title,
            owner: n.meta.owner,
            created_at: n.meta.created_at,
            shared_with: n.shared_with,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct NoteContentResponse {
    pub note_id: Uuid,
    pub title: String,
    pub content: String,
    pub owner: String,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

#[utoipa::path(
    post,
    path = "/notes",
    tag = "Notes",
    request_body = CreateNoteRequest,
    responses((status = 200, body = NoteItem))
)]
pub async fn create_note(
    State(ctx): State<AppContext>,
    key: ApiKey,
    Json(req): Json<CreateNoteRequest>,
) -> Result<Json<NoteItem>, StatusCode> {
    let wizard = auth::authenticate(&ctx, &key).await?;
    let notes = ctx.note_repo();
    let vault = ctx.note_vault();
    let uc = CreateNote {
        repo: notes.as_ref(),
        vault: vault.as_ref(),
    };
    let meta = uc.execute(&wizard, &req.title, &req.content).await.map_err(|e| {
        tracing::error!(error = ?e, "create_note_failed");
        StatusCode::INTERNAL_SERVER_ERROR
    })?;
    Ok(Json(NoteItem {
        note_id: meta.id,
        title: meta.title,
        owner: meta.owner,
        created_at: meta.created_at,
        shared_with: Vec::new(),
    }))
}

#[utoipa::path(
    get,
    path = "/notes",
    tag = "Notes",
    responses((status = 200, description = "Notes owned by or shared with the caller", body = [NoteItem]))
)]
pub async fn list_notes(
    State(ctx): State<AppContext>,
    key: ApiKey,
) -> Result<Json<Vec<NoteItem>>, StatusCode> {
    let wizard = auth::authenticate(&ctx, &key).await?;
    let notes = ctx.note_repo();
    let shares = ctx.share_repo();
    let uc = ListNotes {
        notes: notes.as_ref(),
        shares: shares.as_ref(),
    };
    let items = uc
        .execute(&wizard)
        .await
        .map_err(|_| StatusCode::INTERNAL_SERVER_ERROR)?;
    Ok(Json(items.into_iter().map(Into::into).collect()))
}

async fn load_readable_note(
    ctx: &AppContext,
    wizard: &str,
    id: Uuid,
) -> Result<NoteContent, StatusCode> {
    let notes = ctx.note_repo();
    let shares = ctx.share_repo();
    if notes
        .get(id)
        .await
        .map_err(|_| StatusCode::INTERNAL_SERVER_ERROR)?
        .is_none()
    {
        return Err(StatusCode::NOT_FOUND);
    }
    access::require_view(notes.as_ref(), shares.as_ref(), wizard, id)
        .await
        .map_err(|e| match e {
            AccessError::Forbidden => StatusCode::FORBIDDEN,
            AccessError::Other(e) => {
                tracing::error!(note_id = %id, error = ?e, "access_check_failed");
                StatusCode::INTERNAL_SERVER_ERROR
            }
        })?;

    let vault = ctx.note_vault();
    let uc = ReadNote {
        notes: notes.as_ref(),
        vault: vault.as_ref(),
    };
    uc.execute(id)
        .await
        .map_err(|e| {
            tracing::error!(note_id = %id, error = ?e, "read_note_failed");
            StatusCode::INTERNAL_SERVER_ERROR
        })?
        .ok_or(StatusCode::NOT_FOUND)
}

#[utoipa::path(
    get,
    path = "/notes/{id}",
    tag = "Notes",
    params(("id" = Uuid, Path, description = "Note ID")),
    responses(
        (status = 200, body = NoteContentResponse),
        (status = 403, description = "Access denied"),
        (status = 404, description = "Note not found")
    )
)]
pub async fn read_note(
    State(ctx): State<AppContext>,
    key: ApiKey,
    Path(id): Path<Uuid>,
) -> Result<Json<NoteContentResponse>, StatusCode> {
    let wizard = auth::authenticate(&ctx, &key).await?;
    let doc = load_readable_note(&ctx, &wizard, id).await?;
    Ok(Json(NoteContentResponse {
        note_id: doc.meta.id,
        title: doc.meta.title,
        content: doc.content,
        owner: doc.meta.owner,
        created_at: doc.meta.created_at,
    }))
}

#[utoipa::path(
    get,
    path = "/notes/{id}/download",
    tag = "Notes",
    params(("id" = Uuid, Path, description = "Note ID")),
    responses(
        (status = 200, description = "Decrypted note as an HTML page", content_type = "text/html"),
        (status = 403, description = "Access denied"),
        (status = 404, description = "Note not found")
    )
)]
pub async fn download_note(
    State(ctx): State<AppContext>,
    key: ApiKey,
    Path(id): Path<Uuid>,
) -> Result<Html<String>, StatusCode> {
    let wizard = auth::authenticate(&ctx, &key).await?;
    let doc = load_readable_note(&ctx, &wizard, id).await?;
    Ok(Html(render_note_page(&doc)))
}

#[utoipa::path(
    delete,
    path = "/notes/{id}",
    tag = "Notes",
    params(("id" = Uuid, Path, description = "Note ID")),
    responses(
        (status = 200, body = MessageResponse),
        (status = 403, description = "Only the owner can delete a note"),
        (status = 404, description = "Note not found")
    )
)]
pub async fn delete_note(
    State(ctx): State<AppContext>,
    key: ApiKey,
    Path(id): Path<Uuid>,
) -> Result<Json<MessageResponse>, StatusCode> {
    let wizard = auth::authenticate(&ctx, &key).await?;
    let notes = ctx.note_repo();
    let shares = ctx.share_repo();
    if notes
        .get(id)
        .await
        .map_err(|_| StatusCode::INTERNAL_SERVER_ERROR)?
        .is_none()
    {
        return Err(StatusCode::NOT_FOUND);
    }
    access::require_owner(notes.as_ref(), shares.as_ref(), &wizard, id)
        .await
        .map_err(|e| match e {
            AccessError::Forbidden => StatusCode::FORBIDDEN,
            AccessError::Other(e) => {
                tracing::error!(note_id = %id, error = ?e, "access_check_failed");
                StatusCode::INTERNAL_SERVER_ERROR
            }
        })?;

    let vault = ctx.note_vault();
    let uc = DeleteNote {
        notes: notes.as_ref(),
        shares: shares.as_ref(),
        vault: vault.as_ref(),
    };
    let deleted = uc.execute(id).await.map_err(|e| {
        tracing::error!(note_id = %id, error = ?e, "delete_note_failed");
        StatusCode::INTERNAL_SERVER_ERROR
    })?;
    if deleted {
        Ok(Json(MessageResponse {
            message: "Note deleted".into(),
        }))
    } else {
        Err(StatusCode::NOT_FOUND)
    }
}

fn render_note_page(doc: &NoteContent) -> String {
    let title = htmlescape::encode_minimal(&doc.meta.title);
    let owner = htmlescape::encode_minimal(&doc.meta.owner);
    let content = htmlescape::encode_minimal(&doc.content);
    let created_at = doc.meta.created_at.to_rfc3339();
    format!(
        r#"<!DOCTYPE html>
<html>
<head>
    <title>{title}</title>
    <style>
        body {{
            font-family: 'Georgia', serif;
            max-width: 800px;
            margin: 50px auto;
            padding: 20px;
            background: #f5f5f5;
        }}
        .container {{
            background: white;
            padding: 40px;
            border-radius: 8px;
            box-shadow: 0 2px 4px rgba(0,0,0,0.1);
        }}
        h1 {{
            color: #2c3e50;
            border-bottom: 3px solid #3498db;
            padding-bottom: 10px;
        }}
        .meta {{
            color: #7f8c8d;
            font-size: 0.9em;
            margin-bottom: 20px;
        }}
        .content {{
            line-height: 1.6;
            color: #34495e;
            white-space: pre-wrap;
        }}
    </style>
</head>
<body>
    <div class="container">
        <h1>{title}</h1>
        <div class="meta">
            <strong>Owner:</strong> {owner} |
            <strong>Created:</strong> {created_at}
        </div>
        <div class="content">{content}</div>
    </div>
</body>
</html>
"#
    )
}

pub fn routes(ctx: AppContext) -> Router {
    Router::new()
        .route("/notes", get(list_notes).post(create_note))
        .route("/notes/:id", get(read_note).delete(delete_note))
        .route("/notes/:id/download", get(download_note))
        .with_state(ctx)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::note::NoteMeta;

    #[test]
    fn download_page_escapes_user_controlled_fields() {
        let doc = NoteContent {
            meta: NoteMeta {
                id: Uuid::new_v4(),
                title: "<script>alert(1)</script>".into(),
                owner: "Harry & co".into(),
                created_at: chrono::Utc::now(),
            },
            content: "1 < 2 && 3 > 2".into(),
        };
        let html = render_note_page(&doc);
        assert!(!html.contains("<script>alert"));
        assert!(html.contains("&lt;script&gt;"));
        assert!(html.contains("Harry &amp; co"));
        assert!(html.contains("1 &lt; 2 &amp;&amp; 3 &gt; 2"));
    }
}

use axum::{Json, Router, extract::State, http::StatusCode, routing::get};
use serde::Serialize;
use utoipa::ToSchema;

use crate::application::use_cases::wizards::list_wizards::ListWizards;
use crate::bootstrap::app_context::AppContext;

#[derive(Debug, Serialize, ToSchema)]
pub struct WizardItem {
    pub name: String,
}

/// Names only; keys never leave the store.
#[utoipa::path(
    get,
    path = "/wizards",
    tag = "Wizards",
    responses((status = 200, body = [WizardItem]))
)]
pub async fn list_wizards(
    State(ctx): State<AppContext>,
) -> Result<Json<Vec<WizardItem>>, StatusCode> {
    let repo = ctx.wizard_repo();
    let uc = ListWizards {
        repo: repo.as_ref(),
    };
    let names = uc
        .execute()
        .await
        .map_err(|_| StatusCode::INTERNAL_SERVER_ERROR)?;
    Ok(Json(
        names.into_iter().map(|name| WizardItem { name }).collect(),
    ))
}

pub fn routes(ctx: AppContext) -> Router {
    Router::new()
        .route("/wizards", get(list_wizards))
        .with_state(ctx)
}

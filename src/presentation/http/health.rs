use axum::{Json, Router, routing::get};
use serde::Serialize;
use utoipa::ToSchema;

#[derive(Debug, Serialize, ToSchema)]
pub struct ServiceStatus {
    pub status: &'static str,
    pub message: &'static str,
    pub docs: &'static str,
}

#[utoipa::path(
    get,
    path = "/",
    tag = "Health",
    responses((status = 200, body = ServiceStatus))
)]
pub async fn root() -> Json<ServiceStatus> {
    Json(ServiceStatus {
        status: "operational",
        message: "Mischief Managed API is running",
        docs: "/docs",
    })
}

pub fn routes() -> Router {
    Router::new().route("/", get(root))
}

use serde::Serialize;
use utoipa::ToSchema;

pub mod admin;
pub mod auth;
pub mod health;
pub mod notes;
pub mod sharing;
pub mod wizards;

#[derive(Debug, Serialize, ToSchema)]
pub struct MessageResponse {
    pub message: String,
}

use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RequestStatus {
    Pending,
    Approved,
}

impl RequestStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            RequestStatus::Pending => "pending",
            RequestStatus::Approved => "approved",
        }
    }
}

/// A wizard asking another wizard for access to all of their notes.
/// Approval turns into share grants for every note the recipient owns.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccessRequest {
    pub request_id: Uuid,
    pub from_wizard: String,
    pub to_wizard: String,
    pub status: RequestStatus,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

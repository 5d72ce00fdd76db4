use std::collections::HashMap;

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::share::{AccessRequest, RequestStatus};

#[async_trait]
pub trait ShareRepository: Send + Sync {
    async fn all_shares(&self) -> anyhow::Result<HashMap<Uuid, Vec<String>>>;

    async fn is_shared_with(&self, note_id: Uuid, wizard: &str) -> anyhow::Result<bool>;

    /// Idempotent: granting the same wizard twice keeps a single entry.
    async fn add_share(&self, note_id: Uuid, wizard: &str) -> anyhow::Result<()>;

    async fn add_shares(&self, note_ids: &[Uuid], wizard: &str) -> anyhow::Result<()>;

    /// Drop every grant for one note (used when the note is deleted).
    async fn remove_note(&self, note_id: Uuid) -> anyhow::Result<()>;

    /// Drop every grant; access requests are kept.
    async fn clear_shares(&self) -> anyhow::Result<()>;

    async fn add_request(&self, request: &AccessRequest) -> anyhow::Result<()>;

    async fn list_requests_to(&self, wizard: &str) -> anyhow::Result<Vec<AccessRequest>>;

    async fn find_request(&self, request_id: Uuid) -> anyhow::Result<Option<AccessRequest>>;

    /// Returns false when no request with that id exists.
    async fn set_request_status(
        &self,
        request_id: Uuid,
        status: RequestStatus,
    ) -> anyhow::Result<bool>;
}

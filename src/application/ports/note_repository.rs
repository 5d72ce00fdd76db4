use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::note::NoteMeta;

#[async_trait]
pub trait NoteRepository: Send + Sync {
    async fn insert(&self, meta: &NoteMeta) -> anyhow::Result<()>;

    async fn get(&self, id: Uuid) -> anyhow::Result<Option<NoteMeta>>;

    async fn list_all(&self) -> anyhow::Result<Vec<NoteMeta>>;

    async fn list_owned_by(&self, owner: &str) -> anyhow::Result<Vec<NoteMeta>>;

    /// Returns false when the note did not exist.
    async fn delete(&self, id: Uuid) -> anyhow::Result<bool>;
}

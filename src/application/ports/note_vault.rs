use async_trait::async_trait;
use uuid::Uuid;

/// Storage for note bodies. Implementations encrypt on write and decrypt on
/// read; `load_encrypted` exposes the ciphertext as stored for the admin
/// download.
#[async_trait]
pub trait NoteVault: Send + Sync {
    async fn store(&self, note_id: Uuid, plaintext: &str) -> anyhow::Result<()>;

    /// `Ok(None)` when no body file exists; decryption failure is an error.
    async fn load(&self, note_id: Uuid) -> anyhow::Result<Option<String>>;

    async fn load_encrypted(&self, note_id: Uuid) -> anyhow::Result<Option<String>>;

    /// Deleting a missing body is not an error.
    async fn delete(&self, note_id: Uuid) -> anyhow::Result<()>;
}

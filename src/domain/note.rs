use uuid::Uuid;

/// Note metadata. The body lives in the vault as a separate encrypted file
/// keyed by `id`.
#[derive(Debug, Clone)]
pub struct NoteMeta {
    pub id: Uuid,
    pub title: String,
    pub owner: String,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

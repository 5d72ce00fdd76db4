use chrono::Utc;
use uuid::Uuid;

use crate::application::ports::note_repository::NoteRepository;
use crate::application::ports::note_vault::NoteVault;
use crate::domain::note::NoteMeta;

pub struct CreateNote<'a, R: NoteRepository + ?Sized, V: NoteVault + ?Sized> {
    pub repo: &'a R,
    pub vault: &'a V,
}

impl<'a, R: NoteRepository + ?Sized, V: NoteVault + ?Sized> CreateNote<'a, R, V> {
    pub async fn execute(
        &self,
        owner: &str,
        title: &str,
        content: &str,
    ) -> anyhow::Result<NoteMeta> {
        let meta = NoteMeta {
            id: Uuid::new_v4(),
            title: title.to_string(),
            owner: owner.to_string(),
            created_at: Utc::now(),
        };
        self.repo.insert(&meta).await?;
        self.vault.store(meta.id, content).await?;
        Ok(meta)
    }
}

use uuid::Uuid;

use crate::application::ports::note_repository::NoteRepository;
use crate::application::ports::note_vault::NoteVault;
use crate::domain::note::NoteMeta;

pub struct NoteContent {
    pub meta: NoteMeta,
    pub content: String,
}

/// Decrypted note content. `Ok(None)` when the metadata or the body file is
/// missing; access is the caller's responsibility.
pub struct ReadNote<'a, N: NoteRepository + ?Sized, V: NoteVault + ?Sized> {
    pub notes: &'a N,
    pub vault: &'a V,
}

impl<'a, N: NoteRepository + ?Sized, V: NoteVault + ?Sized> ReadNote<'a, N, V> {
    pub async fn execute(&self, id: Uuid) -> anyhow::Result<Option<NoteContent>> {
        let Some(meta) = self.notes.get(id).await? else {
            return Ok(None);
        };
        let Some(content) = self.vault.load(id).await? else {
            return Ok(None);
        };
        Ok(Some(NoteContent { meta, content }))
    }
}

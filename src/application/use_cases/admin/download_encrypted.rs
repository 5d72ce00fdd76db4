use uuid::Uuid;

use crate::application::ports::note_repository::NoteRepository;
use crate::application::ports::note_vault::NoteVault;
use crate::domain::note::NoteMeta;

/// The stored ciphertext of a note, never decrypted.
pub struct DownloadEncryptedNote<'a, N: NoteRepository + ?Sized, V: NoteVault + ?Sized> {
    pub notes: &'a N,
    pub vault: &'a V,
}

impl<'a, N: NoteRepository + ?Sized, V: NoteVault + ?Sized> DownloadEncryptedNote<'a, N, V> {
    pub async fn execute(&self, id: Uuid) -> anyhow::Result<Option<(NoteMeta, String)>> {
        let Some(meta) = self.notes.get(id).await? else {
            return Ok(None);
        };
        let Some(ciphertext) = self.vault.load_encrypted(id).await? else {
            return Ok(None);
        };
        Ok(Some((meta, ciphertext)))
    }
}

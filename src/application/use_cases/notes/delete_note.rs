use uuid::Uuid;

use crate::application::ports::note_repository::NoteRepository;
use crate::application::ports::note_vault::NoteVault;
use crate::application::ports::share_repository::ShareRepository;

/// Removes metadata, body file, and share grants together.
pub struct DeleteNote<'a, N, S, V>
where
    N: NoteRepository + ?Sized,
    S: ShareRepository + ?Sized,
    V: NoteVault + ?Sized,
{
    pub notes: &'a N,
    pub shares: &'a S,
    pub vault: &'a V,
}

impl<'a, N, S, V> DeleteNote<'a, N, S, V>
where
    N: NoteRepository + ?Sized,
    S: ShareRepository + ?Sized,
    V: NoteVault + ?Sized,
{
    pub async fn execute(&self, id: Uuid) -> anyhow::Result<bool> {
        if !self.notes.delete(id).await? {
            return Ok(false);
        }
        self.vault.delete(id).await?;
        self.shares.remove_note(id).await?;
        Ok(true)
    }
}

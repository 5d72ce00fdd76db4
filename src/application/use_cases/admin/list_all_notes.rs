use crate::application::ports::note_repository::NoteRepository;
use crate::application::ports::share_repository::ShareRepository;
use crate::application::use_cases::notes::list_notes::NoteWithShares;

/// Every note in the store regardless of owner, with its share list.
pub struct ListAllNotes<'a, N: NoteRepository + ?Sized, S: ShareRepository + ?Sized> {
    pub notes: &'a N,
    pub shares: &'a S,
}

impl<'a, N: NoteRepository + ?Sized, S: ShareRepository + ?Sized> ListAllNotes<'a, N, S> {
    pub async fn execute(&self) -> anyhow::Result<Vec<NoteWithShares>> {
        let all = self.notes.list_all().await?;
        let share_map = self.shares.all_shares().await?;
        Ok(all
            .into_iter()
            .map(|meta| {
                let shared_with = share_map.get(&meta.id).cloned().unwrap_or_default();
                NoteWithShares { meta, shared_with }
            })
            .collect())
    }
}

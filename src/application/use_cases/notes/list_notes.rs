use crate::application::ports::note_repository::NoteRepository;
use crate::application::ports::share_repository::ShareRepository;
use crate::domain::note::NoteMeta;

pub struct NoteWithShares {
    pub meta: NoteMeta,
    pub shared_with: Vec<String>,
}

/// Notes the wizard owns plus notes shared with them.
pub struct ListNotes<'a, N: NoteRepository + ?Sized, S: ShareRepository + ?Sized> {
    pub notes: &'a N,
    pub shares: &'a S,
}

impl<'a, N: NoteRepository + ?Sized, S: ShareRepository + ?Sized> ListNotes<'a, N, S> {
    pub async fn execute(&self, wizard: &str) -> anyhow::Result<Vec<NoteWithShares>> {
        let all = self.notes.list_all().await?;
        let share_map = self.shares.all_shares().await?;
        let mut out = Vec::new();
        for meta in all {
            let shared_with = share_map.get(&meta.id).cloned().unwrap_or_default();
            if meta.owner == wizard || shared_with.iter().any(|w| w == wizard) {
                out.push(NoteWithShares { meta, shared_with });
            }
        }
        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::store::notes::JsonNoteRepository;
    use crate::infrastructure::store::shares::JsonShareRepository;
    use tempfile::TempDir;
    use uuid::Uuid;

    async fn add_note(notes: &JsonNoteRepository, owner: &str, title: &str) -> Uuid {
        let meta = NoteMeta {
            id: Uuid::new_v4(),
            title: title.into(),
            owner: owner.into(),
            created_at: chrono::Utc::now(),
        };
        notes.insert(&meta).await.unwrap();
        meta.id
    }

    #[tokio::test]
    async fn caller_sees_owned_and_shared_notes_only() {
        let temp = TempDir::new().unwrap();
        let notes = JsonNoteRepository::open(temp.path().join("notes_meta.json")).unwrap();
        let shares = JsonShareRepository::open(temp.path().join("share_data.json")).unwrap();

        let owned = add_note(&notes, "Harry", "Quidditch plays").await;
        let shared = add_note(&notes, "Hermione", "Arithmancy").await;
        let hidden = add_note(&notes, "Hermione", "Diary").await;
        shares.add_share(shared, "Harry").await.unwrap();
        shares.add_share(hidden, "Ron").await.unwrap();

        let uc = ListNotes {
            notes: &notes,
            shares: &shares,
        };
        let visible = uc.execute("Harry").await.unwrap();
        let ids: Vec<Uuid> = visible.iter().map(|n| n.meta.id).collect();
        assert_eq!(visible.len(), 2);
        assert!(ids.contains(&owned));
        assert!(ids.contains(&shared));
        assert!(!ids.contains(&hidden));

        let shared_item = visible.iter().find(|n| n.meta.id == shared).unwrap();
        assert_eq!(shared_item.shared_with, vec!["Harry"]);
        let owned_item = visible.iter().find(|n| n.meta.id == owned).unwrap();
        assert!(owned_item.shared_with.is_empty());

        assert!(uc.execute("Luna").await.unwrap().is_empty());
    }
}

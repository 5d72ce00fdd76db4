use std::collections::BTreeMap;
use std::path::Path;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::application::ports::note_repository::NoteRepository;
use crate::domain::note::NoteMeta;
use crate::infrastructure::store::json_file::JsonFile;

// On disk: { "<uuid>": { "title": ..., "owner": ..., "created_at": ... } }
#[derive(Debug, Clone, Serialize, Deserialize)]
struct NoteRecord {
    title: String,
    owner: String,
    created_at: chrono::DateTime<chrono::Utc>,
}

type NoteMap = BTreeMap<Uuid, NoteRecord>;

fn to_meta(id: Uuid, rec: NoteRecord) -> NoteMeta {
    NoteMeta {
        id,
        title: rec.title,
        owner: rec.owner,
        created_at: rec.created_at,
    }
}

pub struct JsonNoteRepository {
    file: JsonFile<NoteMap>,
}

impl JsonNoteRepository {
    pub fn open(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        Ok(Self {
            file: JsonFile::open(path.as_ref().to_path_buf(), &NoteMap::new())?,
        })
    }
}

#[async_trait]
impl NoteRepository for JsonNoteRepository {
    async fn insert(&self, meta: &NoteMeta) -> anyhow::Result<()> {
        let record = NoteRecord {
            title: meta.title.clone(),
            owner: meta.owner.clone(),
            created_at: meta.created_at,
        };
        let id = meta.id;
        self.file
            .update(move |notes| {
                notes.insert(id, record);
            })
            .await
    }

    async fn get(&self, id: Uuid) -> anyhow::Result<Option<NoteMeta>> {
        let mut notes = self.file.read().await?;
        Ok(notes.remove(&id).map(|rec| to_meta(id, rec)))
    }

    async fn list_all(&self) -> anyhow::Result<Vec<NoteMeta>> {
        Ok(self
            .file
            .read()
            .await?
            .into_iter()
            .map(|(id, rec)| to_meta(id, rec))
            .collect())
    }

    async fn list_owned_by(&self, owner: &str) -> anyhow::Result<Vec<NoteMeta>> {
        Ok(self
            .file
            .read()
            .await?
            .into_iter()
            .filter(|(_, rec)| rec.owner == owner)
            .map(|(id, rec)| to_meta(id, rec))
            .collect())
    }

    async fn delete(&self, id: Uuid) -> anyhow::Result<bool> {
        self.file
            .update(move |notes| notes.remove(&id).is_some())
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn meta(owner: &str, title: &str) -> NoteMeta {
        NoteMeta {
            id: Uuid::new_v4(),
            title: title.into(),
            owner: owner.into(),
            created_at: chrono::Utc::now(),
        }
    }

    #[tokio::test]
    async fn insert_get_delete_survive_reopen() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("notes_meta.json");
        let repo = JsonNoteRepository::open(&path).unwrap();
        let note = meta("Harry", "Half-Blood Prince margin notes");
        repo.insert(&note).await.unwrap();

        let repo = JsonNoteRepository::open(&path).unwrap();
        let loaded = repo.get(note.id).await.unwrap().unwrap();
        assert_eq!(loaded.title, note.title);
        assert_eq!(loaded.owner, "Harry");

        assert!(repo.delete(note.id).await.unwrap());
        assert!(!repo.delete(note.id).await.unwrap());
        assert!(repo.get(note.id).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn list_owned_by_filters_by_owner() {
        let temp = TempDir::new().unwrap();
        let repo = JsonNoteRepository::open(temp.path().join("notes_meta.json")).unwrap();
        repo.insert(&meta("Harry", "one")).await.unwrap();
        repo.insert(&meta("Harry", "two")).await.unwrap();
        repo.insert(&meta("Hermione", "three")).await.unwrap();

        assert_eq!(repo.list_owned_by("Harry").await.unwrap().len(), 2);
        assert_eq!(repo.list_owned_by("Hermione").await.unwrap().len(), 1);
        assert!(repo.list_owned_by("Ron").await.unwrap().is_empty());
        assert_eq!(repo.list_all().await.unwrap().len(), 3);
    }
}

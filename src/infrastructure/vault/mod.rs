use std::path::PathBuf;

use anyhow::Context;
use async_trait::async_trait;
use uuid::Uuid;

use crate::application::ports::note_vault::NoteVault;
use crate::infrastructure::crypto::NoteCipher;

/// Note bodies as individual files, encrypted at rest: `<notes_dir>/<id>.txt`
/// holds the cipher's `v1:...` string.
pub struct FsNoteVault {
    notes_dir: PathBuf,
    cipher: NoteCipher,
}

impl FsNoteVault {
    pub fn new(notes_dir: impl Into<PathBuf>, cipher: NoteCipher) -> anyhow::Result<Self> {
        let notes_dir = notes_dir.into();
        std::fs::create_dir_all(&notes_dir)
            .with_context(|| format!("create {}", notes_dir.display()))?;
        Ok(Self { notes_dir, cipher })
    }

    fn note_path(&self, note_id: Uuid) -> PathBuf {
        self.notes_dir.join(format!("{}.txt", note_id))
    }
}

#[async_trait]
impl NoteVault for FsNoteVault {
    async fn store(&self, note_id: Uuid, plaintext: &str) -> anyhow::Result<()> {
        let encrypted = self.cipher.encrypt(plaintext)?;
        tokio::fs::write(self.note_path(note_id), encrypted)
            .await
            .with_context(|| format!("write note body {}", note_id))?;
        Ok(())
    }

    async fn load(&self, note_id: Uuid) -> anyhow::Result<Option<String>> {
        match self.load_encrypted(note_id).await? {
            Some(raw) => Ok(Some(self.cipher.decrypt(&raw)?)),
            None => Ok(None),
        }
    }

    async fn load_encrypted(&self, note_id: Uuid) -> anyhow::Result<Option<String>> {
        match tokio::fs::read_to_string(self.note_path(note_id)).await {
            Ok(raw) => Ok(Some(raw)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e).with_context(|| format!("read note body {}", note_id)),
        }
    }

    async fn delete(&self, note_id: Uuid) -> anyhow::Result<()> {
        match tokio::fs::remove_file(self.note_path(note_id)).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e).with_context(|| format!("delete note body {}", note_id)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn vault(temp: &TempDir) -> FsNoteVault {
        FsNoteVault::new(temp.path().join("notes"), NoteCipher::from_secret("test")).unwrap()
    }

    #[tokio::test]
    async fn bodies_are_encrypted_on_disk() {
        let temp = TempDir::new().unwrap();
        let vault = vault(&temp);
        let id = Uuid::new_v4();
        vault.store(id, "wingardium leviosa").await.unwrap();

        let raw = vault.load_encrypted(id).await.unwrap().unwrap();
        assert!(raw.starts_with("v1:"));
        assert!(!raw.contains("wingardium"));

        assert_eq!(
            vault.load(id).await.unwrap().unwrap(),
            "wingardium leviosa"
        );
    }

    #[tokio::test]
    async fn missing_bodies_load_as_none_and_delete_is_quiet() {
        let temp = TempDir::new().unwrap();
        let vault = vault(&temp);
        let id = Uuid::new_v4();
        assert!(vault.load(id).await.unwrap().is_none());
        vault.delete(id).await.unwrap();

        vault.store(id, "x").await.unwrap();
        vault.delete(id).await.unwrap();
        assert!(vault.load_encrypted(id).await.unwrap().is_none());
    }
}

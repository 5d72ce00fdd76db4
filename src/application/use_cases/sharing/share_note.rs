use uuid::Uuid;

use crate::application::ports::note_repository::NoteRepository;
use crate::application::ports::share_repository::ShareRepository;
use crate::application::ports::wizard_repository::WizardRepository;

#[derive(Debug, thiserror::Error)]
pub enum ShareNoteError {
    #[error("note not found")]
    NoteNotFound,
    #[error("only the owner can share a note")]
    NotOwner,
    #[error("wizard not found")]
    WizardNotFound,
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

pub struct ShareNote<'a, N, W, S>
where
    N: NoteRepository + ?Sized,
    W: WizardRepository + ?Sized,
    S: ShareRepository + ?Sized,
{
    pub notes: &'a N,
    pub wizards: &'a W,
    pub shares: &'a S,
}

impl<'a, N, W, S> ShareNote<'a, N, W, S>
where
    N: NoteRepository + ?Sized,
    W: WizardRepository + ?Sized,
    S: ShareRepository + ?Sized,
{
    pub async fn execute(
        &self,
        owner: &str,
        note_id: Uuid,
        recipient: &str,
    ) -> Result<(), ShareNoteError> {
        let meta = self
            .notes
            .get(note_id)
            .await?
            .ok_or(ShareNoteError::NoteNotFound)?;
        if meta.owner != owner {
            return Err(ShareNoteError::NotOwner);
        }
        if !self.wizards.exists(recipient).await? {
            return Err(ShareNoteError::WizardNotFound);
        }
        self.shares.add_share(note_id, recipient).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::use_cases::notes::create_note::CreateNote;
    use crate::infrastructure::crypto::NoteCipher;
    use crate::infrastructure::store::notes::JsonNoteRepository;
    use crate::infrastructure::store::shares::JsonShareRepository;
    use crate::infrastructure::store::wizards::JsonWizardRepository;
    use crate::infrastructure::vault::FsNoteVault;
    use tempfile::TempDir;

    struct Fixture {
        _temp: TempDir,
        notes: JsonNoteRepository,
        wizards: JsonWizardRepository,
        shares: JsonShareRepository,
        vault: FsNoteVault,
    }

    async fn fixture() -> Fixture {
        let temp = TempDir::new().unwrap();
        let seed = vec![
            ("Harry".to_string(), "key-harry".to_string()),
            ("Hermione".to_string(), "key-hermione".to_string()),
        ];
        Fixture {
            notes: JsonNoteRepository::open(temp.path().join("notes_meta.json")).unwrap(),
            wizards: JsonWizardRepository::open(temp.path().join("wizards_info.json"), &seed)
                .unwrap(),
            shares: JsonShareRepository::open(temp.path().join("share_data.json")).unwrap(),
            vault: FsNoteVault::new(temp.path().join("notes"), NoteCipher::from_secret("test"))
                .unwrap(),
            _temp: temp,
        }
    }

    #[tokio::test]
    async fn owner_shares_with_known_wizard() {
        let fx = fixture().await;
        let uc = CreateNote {
            repo: &fx.notes,
            vault: &fx.vault,
        };
        let meta = uc.execute("Harry", "Map", "lemon drops").await.unwrap();

        let share = ShareNote {
            notes: &fx.notes,
            wizards: &fx.wizards,
            shares: &fx.shares,
        };
        share.execute("Harry", meta.id, "Hermione").await.unwrap();
        assert!(fx.shares.is_shared_with(meta.id, "Hermione").await.unwrap());
    }

    #[tokio::test]
    async fn non_owner_cannot_share() {
        let fx = fixture().await;
        let uc = CreateNote {
            repo: &fx.notes,
            vault: &fx.vault,
        };
        let meta = uc.execute("Harry", "Map", "lemon drops").await.unwrap();

        let share = ShareNote {
            notes: &fx.notes,
            wizards: &fx.wizards,
            shares: &fx.shares,
        };
        let err = share.execute("Hermione", meta.id, "Hermione").await;
        assert!(matches!(err, Err(ShareNoteError::NotOwner)));
    }

    #[tokio::test]
    async fn unknown_note_and_unknown_recipient_are_rejected() {
        let fx = fixture().await;
        let share = ShareNote {
            notes: &fx.notes,
            wizards: &fx.wizards,
            shares: &fx.shares,
        };
        let err = share.execute("Harry", Uuid::new_v4(), "Hermione").await;
        assert!(matches!(err, Err(ShareNoteError::NoteNotFound)));

        let uc = CreateNote {
            repo: &fx.notes,
            vault: &fx.vault,
        };
        let meta = uc.execute("Harry", "Map", "lemon drops").await.unwrap();
        let err = share.execute("Harry", meta.id, "Voldemort").await;
        assert!(matches!(err, Err(ShareNoteError::WizardNotFound)));
    }
}

use uuid::Uuid;

use crate::application::ports::note_repository::NoteRepository;
use crate::application::ports::share_repository::ShareRepository;
use crate::domain::share::RequestStatus;

#[derive(Debug, thiserror::Error)]
pub enum ApproveRequestError {
    #[error("request not found")]
    NotFound,
    #[error("request is addressed to another wizard")]
    NotRecipient,
    #[error("request already processed")]
    AlreadyProcessed,
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Approval shares every note the recipient owns with the requester, then
/// marks the request approved.
pub struct ApproveRequest<'a, N, S>
where
    N: NoteRepository + ?Sized,
    S: ShareRepository + ?Sized,
{
    pub notes: &'a N,
    pub shares: &'a S,
}

impl<'a, N, S> ApproveRequest<'a, N, S>
where
    N: NoteRepository + ?Sized,
    S: ShareRepository + ?Sized,
{
    pub async fn execute(&self, wizard: &str, request_id: Uuid) -> Result<(), ApproveRequestError> {
        let request = self
            .shares
            .find_request(request_id)
            .await?
            .ok_or(ApproveRequestError::NotFound)?;
        if request.to_wizard != wizard {
            return Err(ApproveRequestError::NotRecipient);
        }
        if request.status != RequestStatus::Pending {
            return Err(ApproveRequestError::AlreadyProcessed);
        }
        let owned = self.notes.list_owned_by(wizard).await?;
        let ids: Vec<Uuid> = owned.iter().map(|m| m.id).collect();
        self.shares.add_shares(&ids, &request.from_wizard).await?;
        self.shares
            .set_request_status(request_id, RequestStatus::Approved)
            .await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::use_cases::sharing::request_access::{
        RequestAccess, RequestAccessError,
    };
    use crate::domain::note::NoteMeta;
    use crate::infrastructure::store::notes::JsonNoteRepository;
    use crate::infrastructure::store::shares::JsonShareRepository;
    use crate::infrastructure::store::wizards::JsonWizardRepository;
    use tempfile::TempDir;

    async fn fixture() -> (TempDir, JsonNoteRepository, JsonWizardRepository, JsonShareRepository)
    {
        let temp = TempDir::new().unwrap();
        let seed = vec![
            ("Harry".to_string(), "key-harry".to_string()),
            ("Hermione".to_string(), "key-hermione".to_string()),
        ];
        let notes = JsonNoteRepository::open(temp.path().join("notes_meta.json")).unwrap();
        let wizards =
            JsonWizardRepository::open(temp.path().join("wizards_info.json"), &seed).unwrap();
        let shares = JsonShareRepository::open(temp.path().join("share_data.json")).unwrap();
        (temp, notes, wizards, shares)
    }

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
    async fn approval_shares_every_owned_note() {
        let (_temp, notes, wizards, shares) = fixture().await;
        let a = add_note(&notes, "Hermione", "Arithmancy").await;
        let b = add_note(&notes, "Hermione", "Runes").await;
        let other = add_note(&notes, "Harry", "Quidditch").await;

        let request = RequestAccess {
            wizards: &wizards,
            shares: &shares,
        }
        .execute("Harry", "Hermione")
        .await
        .unwrap();

        ApproveRequest {
            notes: &notes,
            shares: &shares,
        }
        .execute("Hermione", request.request_id)
        .await
        .unwrap();

        assert!(shares.is_shared_with(a, "Harry").await.unwrap());
        assert!(shares.is_shared_with(b, "Harry").await.unwrap());
        assert!(!shares.is_shared_with(other, "Harry").await.unwrap());

        let stored = shares.find_request(request.request_id).await.unwrap().unwrap();
        assert_eq!(stored.status, RequestStatus::Approved);
    }

    #[tokio::test]
    async fn only_the_recipient_may_approve_and_only_once() {
        let (_temp, notes, wizards, shares) = fixture().await;
        let request = RequestAccess {
            wizards: &wizards,
            shares: &shares,
        }
        .execute("Harry", "Hermione")
        .await
        .unwrap();

        let uc = ApproveRequest {
            notes: &notes,
            shares: &shares,
        };
        let err = uc.execute("Harry", request.request_id).await;
        assert!(matches!(err, Err(ApproveRequestError::NotRecipient)));

        uc.execute("Hermione", request.request_id).await.unwrap();
        let err = uc.execute("Hermione", request.request_id).await;
        assert!(matches!(err, Err(ApproveRequestError::AlreadyProcessed)));

        let err = uc.execute("Hermione", Uuid::new_v4()).await;
        assert!(matches!(err, Err(ApproveRequestError::NotFound)));
    }

    #[tokio::test]
    async fn self_requests_and_unknown_targets_are_rejected() {
        let (_temp, _notes, wizards, shares) = fixture().await;
        let uc = RequestAccess {
            wizards: &wizards,
            shares: &shares,
        };
        let err = uc.execute("Harry", "Harry").await;
        assert!(matches!(err, Err(RequestAccessError::SelfRequest)));
        let err = uc.execute("Harry", "Voldemort").await;
        assert!(matches!(err, Err(RequestAccessError::WizardNotFound)));
    }
}

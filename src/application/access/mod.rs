use uuid::Uuid;

use crate::application::ports::note_repository::NoteRepository;
use crate::application::ports::share_repository::ShareRepository;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Capability {
    None,
    View,
    Owner,
}

#[derive(Debug, thiserror::Error)]
pub enum AccessError {
    #[error("forbidden")]
    Forbidden,
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

// Admin routes bypass this policy entirely; handlers gate them with
// `require_admin` instead.

pub async fn resolve_note<N, S>(
    notes: &N,
    shares: &S,
    wizard: &str,
    note_id: Uuid,
) -> anyhow::Result<Capability>
where
    N: NoteRepository + ?Sized,
    S: ShareRepository + ?Sized,
{
    let Some(meta) = notes.get(note_id).await? else {
        return Ok(Capability::None);
    };
    if meta.owner == wizard {
        return Ok(Capability::Owner);
    }
    if shares.is_shared_with(note_id, wizard).await? {
        return Ok(Capability::View);
    }
    Ok(Capability::None)
}

pub async fn require_view<N, S>(
    notes: &N,
    shares: &S,
    wizard: &str,
    note_id: Uuid,
) -> Result<Capability, AccessError>
where
    N: NoteRepository + ?Sized,
    S: ShareRepository + ?Sized,
{
    let cap = resolve_note(notes, shares, wizard, note_id).await?;
    if cap >= Capability::View {
        Ok(cap)
    } else {
        Err(AccessError::Forbidden)
    }
}

pub async fn require_owner<N, S>(
    notes: &N,
    shares: &S,
    wizard: &str,
    note_id: Uuid,
) -> Result<(), AccessError>
where
    N: NoteRepository + ?Sized,
    S: ShareRepository + ?Sized,
{
    let cap = resolve_note(notes, shares, wizard, note_id).await?;
    if cap >= Capability::Owner {
        Ok(())
    } else {
        Err(AccessError::Forbidden)
    }
}

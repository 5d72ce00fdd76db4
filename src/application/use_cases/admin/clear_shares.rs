use crate::application::ports::share_repository::ShareRepository;

/// Drops every share grant. Access requests survive so their history stays
/// auditable.
pub struct ClearShares<'a, S: ShareRepository + ?Sized> {
    pub shares: &'a S,
}

impl<'a, S: ShareRepository + ?Sized> ClearShares<'a, S> {
    pub async fn execute(&self) -> anyhow::Result<()> {
        self.shares.clear_shares().await
    }
}

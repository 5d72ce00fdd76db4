use crate::application::ports::share_repository::ShareRepository;
use crate::domain::share::AccessRequest;

/// Requests addressed to the wizard, pending or not.
pub struct ListAccessRequests<'a, S: ShareRepository + ?Sized> {
    pub shares: &'a S,
}

impl<'a, S: ShareRepository + ?Sized> ListAccessRequests<'a, S> {
    pub async fn execute(&self, wizard: &str) -> anyhow::Result<Vec<AccessRequest>> {
        self.shares.list_requests_to(wizard).await
    }
}

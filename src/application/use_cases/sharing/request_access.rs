use chrono::Utc;
use uuid::Uuid;

use crate::application::ports::share_repository::ShareRepository;
use crate::application::ports::wizard_repository::WizardRepository;
use crate::domain::share::{AccessRequest, RequestStatus};

#[derive(Debug, thiserror::Error)]
pub enum RequestAccessError {
    #[error("wizard not found")]
    WizardNotFound,
    #[error("cannot request access from yourself")]
    SelfRequest,
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

pub struct RequestAccess<'a, W, S>
where
    W: WizardRepository + ?Sized,
    S: ShareRepository + ?Sized,
{
    pub wizards: &'a W,
    pub shares: &'a S,
}

impl<'a, W, S> RequestAccess<'a, W, S>
where
    W: WizardRepository + ?Sized,
    S: ShareRepository + ?Sized,
{
    pub async fn execute(&self, from: &str, to: &str) -> Result<AccessRequest, RequestAccessError> {
        if !self.wizards.exists(to).await? {
            return Err(RequestAccessError::WizardNotFound);
        }
        if from == to {
            return Err(RequestAccessError::SelfRequest);
        }
        let request = AccessRequest {
            request_id: Uuid::new_v4(),
            from_wizard: from.to_string(),
            to_wizard: to.to_string(),
            status: RequestStatus::Pending,
            created_at: Utc::now(),
        };
        self.shares.add_request(&request).await?;
        Ok(request)
    }
}

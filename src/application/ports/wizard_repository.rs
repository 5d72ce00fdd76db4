use async_trait::async_trait;

use crate::domain::wizard::Wizard;

#[derive(Debug, thiserror::Error)]
pub enum CreateWizardError {
    #[error("wizard already exists")]
    AlreadyExists,
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

#[async_trait]
pub trait WizardRepository: Send + Sync {
    /// Names only; API keys stay inside the store.
    async fn list_names(&self) -> anyhow::Result<Vec<String>>;

    async fn exists(&self, name: &str) -> anyhow::Result<bool>;

    async fn find_by_api_key(&self, api_key: &str) -> anyhow::Result<Option<Wizard>>;

    async fn create(&self, name: &str, api_key: &str) -> Result<(), CreateWizardError>;
}

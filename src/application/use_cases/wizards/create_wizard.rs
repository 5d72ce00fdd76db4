use crate::application::ports::wizard_repository::{CreateWizardError, WizardRepository};

pub struct CreateWizard<'a, R: WizardRepository + ?Sized> {
    pub repo: &'a R,
}

impl<'a, R: WizardRepository + ?Sized> CreateWizard<'a, R> {
    pub async fn execute(&self, name: &str, api_key: &str) -> Result<(), CreateWizardError> {
        self.repo.create(name, api_key).await
    }
}

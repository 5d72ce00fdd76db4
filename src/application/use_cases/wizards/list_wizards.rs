use crate::application::ports::wizard_repository::WizardRepository;

pub struct ListWizards<'a, R: WizardRepository + ?Sized> {
    pub repo: &'a R,
}

impl<'a, R: WizardRepository + ?Sized> ListWizards<'a, R> {
    pub async fn execute(&self) -> anyhow::Result<Vec<String>> {
        self.repo.list_names().await
    }
}

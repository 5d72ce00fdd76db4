use std::sync::Arc;

use crate::application::ports::note_repository::NoteRepository;
use crate::application::ports::note_vault::NoteVault;
use crate::application::ports::share_repository::ShareRepository;
use crate::application::ports::wizard_repository::WizardRepository;
use crate::bootstrap::config::Config;

#[derive(Clone)]
pub struct AppContext {
    pub cfg: Config,
    services: Arc<AppServices>,
}

#[derive(Clone)]
pub struct AppServices {
    wizard_repo: Arc<dyn WizardRepository>,
    note_repo: Arc<dyn NoteRepository>,
    share_repo: Arc<dyn ShareRepository>,
    note_vault: Arc<dyn NoteVault>,
}

impl AppServices {
    pub fn new(
        wizard_repo: Arc<dyn WizardRepository>,
        note_repo: Arc<dyn NoteRepository>,
        share_repo: Arc<dyn ShareRepository>,
        note_vault: Arc<dyn NoteVault>,
    ) -> Self {
        Self {
            wizard_repo,
            note_repo,
            share_repo,
            note_vault,
        }
    }
}

impl AppContext {
    pub fn new(cfg: Config, services: AppServices) -> Self {
        Self {
            cfg,
            services: Arc::new(services),
        }
    }

    pub fn wizard_repo(&self) -> Arc<dyn WizardRepository> {
        self.services.wizard_repo.clone()
    }

    pub fn note_repo(&self) -> Arc<dyn NoteRepository> {
        self.services.note_repo.clone()
    }

    pub fn share_repo(&self) -> Arc<dyn ShareRepository> {
        self.services.share_repo.clone()
    }

    pub fn note_vault(&self) -> Arc<dyn NoteVault> {
        self.services.note_vault.clone()
    }
}

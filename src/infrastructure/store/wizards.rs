use std::collections::BTreeMap;
use std::path::Path;

use async_trait::async_trait;

use crate::application::ports::wizard_repository::{CreateWizardError, WizardRepository};
use crate::domain::wizard::Wizard;
use crate::infrastructure::store::json_file::JsonFile;

// On disk: { "Harry": "harry_secret_key_123", ... }
type WizardMap = BTreeMap<String, String>;

pub struct JsonWizardRepository {
    file: JsonFile<WizardMap>,
}

impl JsonWizardRepository {
    /// `seed` is only written when the file does not exist yet.
    pub fn open(path: impl AsRef<Path>, seed: &[(String, String)]) -> anyhow::Result<Self> {
        let initial: WizardMap = seed.iter().cloned().collect();
        Ok(Self {
            file: JsonFile::open(path.as_ref().to_path_buf(), &initial)?,
        })
    }
}

#[async_trait]
impl WizardRepository for JsonWizardRepository {
    async fn list_names(&self) -> anyhow::Result<Vec<String>> {
        Ok(self.file.read().await?.into_keys().collect())
    }

    async fn exists(&self, name: &str) -> anyhow::Result<bool> {
        Ok(self.file.read().await?.contains_key(name))
    }

    async fn find_by_api_key(&self, api_key: &str) -> anyhow::Result<Option<Wizard>> {
        let wizards = self.file.read().await?;
        Ok(wizards
            .into_iter()
            .find(|(_, key)| key == api_key)
            .map(|(name, key)| Wizard {
                name,
                api_key: key,
            }))
    }

    async fn create(&self, name: &str, api_key: &str) -> Result<(), CreateWizardError> {
        let inserted = self
            .file
            .update(|wizards| {
                if wizards.contains_key(name) {
                    false
                } else {
                    wizards.insert(name.to_string(), api_key.to_string());
                    true
                }
            })
            .await
            .map_err(CreateWizardError::Other)?;
        if inserted {
            Ok(())
        } else {
            Err(CreateWizardError::AlreadyExists)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn seed() -> Vec<(String, String)> {
        vec![
            ("Harry".to_string(), "key-harry".to_string()),
            ("Hermione".to_string(), "key-hermione".to_string()),
        ]
    }

    #[tokio::test]
    async fn seeds_on_first_open_only() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("wizards_info.json");
        let repo = JsonWizardRepository::open(&path, &seed()).unwrap();
        repo.create("Luna", "key-luna").await.unwrap();

        // Reopening with a different seed must not reset the store
        let repo = JsonWizardRepository::open(&path, &[]).unwrap();
        let mut names = repo.list_names().await.unwrap();
        names.sort();
        assert_eq!(names, vec!["Harry", "Hermione", "Luna"]);
    }

    #[tokio::test]
    async fn lookup_by_api_key() {
        let temp = TempDir::new().unwrap();
        let repo =
            JsonWizardRepository::open(temp.path().join("wizards_info.json"), &seed()).unwrap();
        let found = repo.find_by_api_key("key-hermione").await.unwrap().unwrap();
        assert_eq!(found.name, "Hermione");
        assert!(repo.find_by_api_key("wrong").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn duplicate_names_are_rejected() {
        let temp = TempDir::new().unwrap();
        let repo =
            JsonWizardRepository::open(temp.path().join("wizards_info.json"), &seed()).unwrap();
        let err = repo.create("Harry", "another-key").await;
        assert!(matches!(err, Err(CreateWizardError::AlreadyExists)));
        // the original key is untouched
        assert!(repo.find_by_api_key("key-harry").await.unwrap().is_some());
    }
}

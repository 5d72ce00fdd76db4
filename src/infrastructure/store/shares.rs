use std::collections::{BTreeMap, HashMap};
use std::path::Path;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::application::ports::share_repository::ShareRepository;
use crate::domain::share::{AccessRequest, RequestStatus};
use crate::infrastructure::store::json_file::JsonFile;

// On disk: { "shares": { "<note uuid>": ["Harry", ...] }, "requests": [...] }
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct ShareData {
    shares: BTreeMap<Uuid, Vec<String>>,
    requests: Vec<AccessRequest>,
}

pub struct JsonShareRepository {
    file: JsonFile<ShareData>,
}

impl JsonShareRepository {
    pub fn open(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        Ok(Self {
            file: JsonFile::open(path.as_ref().to_path_buf(), &ShareData::default())?,
        })
    }
}

fn grant(shares: &mut BTreeMap<Uuid, Vec<String>>, note_id: Uuid, wizard: &str) {
    let entry = shares.entry(note_id).or_default();
    if !entry.iter().any(|w| w == wizard) {
        entry.push(wizard.to_string());
    }
}

#[async_trait]
impl ShareRepository for JsonShareRepository {
    async fn all_shares(&self) -> anyhow::Result<HashMap<Uuid, Vec<String>>> {
        Ok(self.file.read().await?.shares.into_iter().collect())
    }

    async fn is_shared_with(&self, note_id: Uuid, wizard: &str) -> anyhow::Result<bool> {
        Ok(self
            .file
            .read()
            .await?
            .shares
            .get(&note_id)
            .is_some_and(|names| names.iter().any(|w| w == wizard)))
    }

    async fn add_share(&self, note_id: Uuid, wizard: &str) -> anyhow::Result<()> {
        let wizard = wizard.to_string();
        self.file
            .update(move |data| grant(&mut data.shares, note_id, &wizard))
            .await
    }

    async fn add_shares(&self, note_ids: &[Uuid], wizard: &str) -> anyhow::Result<()> {
        let wizard = wizard.to_string();
        let note_ids = note_ids.to_vec();
        self.file
            .update(move |data| {
                for id in note_ids {
                    grant(&mut data.shares, id, &wizard);
                }
            })
            .await
    }

    async fn remove_note(&self, note_id: Uuid) -> anyhow::Result<()> {
        self.file
            .update(move |data| {
                data.shares.remove(&note_id);
            })
            .await
    }

    async fn clear_shares(&self) -> anyhow::Result<()> {
        self.file
            .update(|data| {
                data.shares.clear();
            })
            .await
    }

    async fn add_request(&self, request: &AccessRequest) -> anyhow::Result<()> {
        let request = request.clone();
        self.file
            .update(move |data| {
                data.requests.push(request);
            })
            .await
    }

    async fn list_requests_to(&self, wizard: &str) -> anyhow::Result<Vec<AccessRequest>> {
        Ok(self
            .file
            .read()
            .await?
            .requests
            .into_iter()
            .filter(|r| r.to_wizard == wizard)
            .collect())
    }

    async fn find_request(&self, request_id: Uuid) -> anyhow::Result<Option<AccessRequest>> {
        Ok(self
            .file
            .read()
            .await?
            .requests
            .into_iter()
            .find(|r| r.request_id == request_id))
    }

    async fn set_request_status(
        &self,
        request_id: Uuid,
        status: RequestStatus,
    ) -> anyhow::Result<bool> {
        self.file
            .update(move |data| {
                match data
                    .requests
                    .iter_mut()
                    .find(|r| r.request_id == request_id)
                {
                    Some(req) => {
                        req.status = status;
                        true
                    }
                    None => false,
                }
            })
            .await
    }
}

use std::marker::PhantomData;
use std::path::{Path, PathBuf};

use anyhow::Context;
use serde::Serialize;
use serde::de::DeserializeOwned;
use tokio::sync::Mutex;

/// One JSON document on disk behind an async lock.
///
/// Mutations rewrite the whole file through a temp file in the same
/// directory followed by a rename, so a reader never observes a partial
/// write and a crash mid-write leaves the previous document intact.
pub struct JsonFile<T> {
    path: PathBuf,
    lock: Mutex<()>,
    _marker: PhantomData<fn() -> T>,
}

impl<T> JsonFile<T>
where
    T: Serialize + DeserializeOwned,
{
    /// Opens the document, writing `initial` if the file does not exist yet.
    pub fn open(path: impl Into<PathBuf>, initial: &T) -> anyhow::Result<Self> {
        let path = path.into();
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("create {}", parent.display()))?;
        }
        if !path.exists() {
            write_atomic(&path, initial)?;
        }
        Ok(Self {
            path,
            lock: Mutex::new(()),
            _marker: PhantomData,
        })
    }

    pub async fn read(&self) -> anyhow::Result<T> {
        let _guard = self.lock.lock().await;
        read_document(&self.path)
    }

    /// Read-modify-write under the lock.
    pub async fn update<R>(&self, f: impl FnOnce(&mut T) -> R) -> anyhow::Result<R> {
        let _guard = self.lock.lock().await;
        let mut value = read_document(&self.path)?;
        let out = f(&mut value);
        write_atomic(&self.path, &value)?;
        Ok(out)
    }
}

fn read_document<T: DeserializeOwned>(path: &Path) -> anyhow::Result<T> {
    let raw = std::fs::read(path).with_context(|| format!("read {}", path.display()))?;
    serde_json::from_slice(&raw).with_context(|| format!("parse {}", path.display()))
}

fn write_atomic<T: Serialize>(path: &Path, value: &T) -> anyhow::Result<()> {
    let parent = path.parent().unwrap_or_else(|| Path::new("."));
    let tmp = tempfile::NamedTempFile::new_in(parent)
        .with_context(|| format!("temp file in {}", parent.display()))?;
    serde_json::to_writer_pretty(tmp.as_file(), value)
        .with_context(|| format!("serialize {}", path.display()))?;
    tmp.persist(path)
        .map_err(|e| anyhow::anyhow!("persist {}: {}", path.display(), e))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;
    use tempfile::TempDir;

    #[tokio::test]
    async fn initializes_missing_file_and_persists_updates() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("store.json");

        let file: JsonFile<BTreeMap<String, u32>> =
            JsonFile::open(&path, &BTreeMap::new()).unwrap();
        assert!(path.exists());
        assert!(file.read().await.unwrap().is_empty());

        file.update(|m| m.insert("galleons".into(), 17)).await.unwrap();

        // A fresh handle sees the data written through the first one
        let reopened: JsonFile<BTreeMap<String, u32>> =
            JsonFile::open(&path, &BTreeMap::new()).unwrap();
        assert_eq!(reopened.read().await.unwrap().get("galleons"), Some(&17));
    }

    #[tokio::test]
    async fn open_does_not_clobber_existing_data() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("store.json");
        let file: JsonFile<Vec<String>> = JsonFile::open(&path, &Vec::new()).unwrap();
        file.update(|v| v.push("hedwig".into())).await.unwrap();

        let again: JsonFile<Vec<String>> = JsonFile::open(&path, &Vec::new()).unwrap();
        assert_eq!(again.read().await.unwrap(), vec!["hedwig".to_string()]);
    }
}

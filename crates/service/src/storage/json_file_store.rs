use std::{io::ErrorKind, path::PathBuf};

use async_trait::async_trait;
use serde::{de::DeserializeOwned, Serialize};
use tokio::fs;
use tracing::{debug, info};

use super::{decode_collection, encode_collection, Collection, CollectionStorage, Loaded};
use crate::errors::ServiceError;

/// JSON-file-backed collection storage.
///
/// Each collection lives in `<data_dir>/<name>.json` as a pretty-printed
/// array. Every save rewrites the whole file; with `atomic_writes` the new
/// content goes to `<name>.json.tmp` first and is renamed into place.
#[derive(Clone, Debug)]
pub struct JsonFileStorage {
    data_dir: PathBuf,
    atomic_writes: bool,
    fail_on_corrupt: bool,
}

impl JsonFileStorage {
    /// Initialize storage rooted at `data_dir`, creating the directory (and
    /// parents) if missing.
    pub async fn new<P: Into<PathBuf>>(data_dir: P) -> Result<Self, ServiceError> {
        let data_dir = data_dir.into();
        match fs::metadata(&data_dir).await {
            Ok(meta) if meta.is_dir() => debug!(data_dir = %data_dir.display(), "data directory present"),
            Ok(_) => {
                return Err(ServiceError::storage(format!("{} exists but is not a directory", data_dir.display())))
            }
            Err(e) if e.kind() == ErrorKind::NotFound => {
                info!(data_dir = %data_dir.display(), "data directory not found; creating it");
                fs::create_dir_all(&data_dir)
                    .await
                    .map_err(|e| ServiceError::storage(format!("create {}: {e}", data_dir.display())))?;
            }
            Err(e) => return Err(ServiceError::storage(format!("inspect {}: {e}", data_dir.display()))),
        }
        Ok(Self { data_dir, atomic_writes: true, fail_on_corrupt: false })
    }

    pub async fn from_config(cfg: &configs::StorageConfig) -> Result<Self, ServiceError> {
        Ok(Self::new(&cfg.data_dir)
            .await?
            .with_atomic_writes(cfg.atomic_writes)
            .with_fail_on_corrupt(cfg.fail_on_corrupt))
    }

    pub fn with_atomic_writes(mut self, on: bool) -> Self {
        self.atomic_writes = on;
        self
    }

    pub fn with_fail_on_corrupt(mut self, on: bool) -> Self {
        self.fail_on_corrupt = on;
        self
    }

    pub fn path_of(&self, collection: Collection) -> PathBuf {
        self.data_dir.join(collection.file_name())
    }

    fn tmp_path_of(&self, collection: Collection) -> PathBuf {
        self.data_dir.join(format!("{}.tmp", collection.file_name()))
    }
}

#[async_trait]
impl CollectionStorage for JsonFileStorage {
    async fn exists(&self, collection: Collection) -> Result<bool, ServiceError> {
        fs::try_exists(self.path_of(collection)).await.map_err(ServiceError::storage)
    }

    async fn read<T>(&self, collection: Collection) -> Result<Loaded<T>, ServiceError>
    where
        T: DeserializeOwned + Send,
    {
        let path = self.path_of(collection);
        match fs::read(&path).await {
            Ok(bytes) => decode_collection(collection, &bytes, self.fail_on_corrupt),
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!(%collection, path = %path.display(), "collection file absent");
                Ok(Loaded::complete(Vec::new()))
            }
            Err(e) => Err(ServiceError::storage(format!("read {}: {e}", path.display()))),
        }
    }

    async fn save<T>(&self, collection: Collection, records: &[T]) -> Result<(), ServiceError>
    where
        T: Serialize + Sync,
    {
        let data = encode_collection(records)?;
        let path = self.path_of(collection);
        if self.atomic_writes {
            let tmp = self.tmp_path_of(collection);
            fs::write(&tmp, &data)
                .await
                .map_err(|e| ServiceError::storage(format!("write {}: {e}", tmp.display())))?;
            fs::rename(&tmp, &path)
                .await
                .map_err(|e| ServiceError::storage(format!("rename into {}: {e}", path.display())))?;
        } else {
            fs::write(&path, &data)
                .await
                .map_err(|e| ServiceError::storage(format!("write {}: {e}", path.display())))?;
        }
        debug!(%collection, records = records.len(), bytes = data.len(), "collection saved");
        Ok(())
    }
}

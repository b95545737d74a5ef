//! Simple in-memory storage for tests and doc examples.
//!
//! Collections are kept as serialized bytes so loads go through the same
//! decoding path as the file-backed storage.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;
use serde::{de::DeserializeOwned, Serialize};

use super::{decode_collection, encode_collection, Collection, CollectionStorage, Loaded};
use crate::errors::ServiceError;

#[derive(Default)]
pub struct MemoryStorage {
    collections: Mutex<HashMap<Collection, Vec<u8>>>,
    fail_saves: AtomicBool,
    saves: AtomicUsize,
    strict: bool,
}

impl MemoryStorage {
    pub fn strict() -> Self {
        Self { strict: true, ..Self::default() }
    }

    /// Place raw bytes in a collection, bypassing serialization.
    pub fn put_raw(&self, collection: Collection, bytes: impl Into<Vec<u8>>) -> Result<(), ServiceError> {
        self.lock()?.insert(collection, bytes.into());
        Ok(())
    }

    pub fn raw(&self, collection: Collection) -> Result<Option<Vec<u8>>, ServiceError> {
        Ok(self.lock()?.get(&collection).cloned())
    }

    /// Make every following save fail until switched off again.
    pub fn fail_saves(&self, on: bool) {
        self.fail_saves.store(on, Ordering::SeqCst);
    }

    /// Number of successful collection saves so far.
    pub fn save_count(&self) -> usize {
        self.saves.load(Ordering::SeqCst)
    }

    fn lock(&self) -> Result<std::sync::MutexGuard<'_, HashMap<Collection, Vec<u8>>>, ServiceError> {
        self.collections.lock().map_err(|_| ServiceError::storage("memory storage poisoned"))
    }
}

#[async_trait]
impl CollectionStorage for MemoryStorage {
    async fn exists(&self, collection: Collection) -> Result<bool, ServiceError> {
        Ok(self.lock()?.contains_key(&collection))
    }

    async fn read<T>(&self, collection: Collection) -> Result<Loaded<T>, ServiceError>
    where
        T: DeserializeOwned + Send,
    {
        match self.raw(collection)? {
            Some(bytes) => decode_collection(collection, &bytes, self.strict),
            None => Ok(Loaded::complete(Vec::new())),
        }
    }

    async fn save<T>(&self, collection: Collection, records: &[T]) -> Result<(), ServiceError>
    where
        T: Serialize + Sync,
    {
        if self.fail_saves.load(Ordering::SeqCst) {
            return Err(ServiceError::storage(format!("simulated failure saving {collection}")));
        }
        let data = encode_collection(records)?;
        self.lock()?.insert(collection, data);
        self.saves.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

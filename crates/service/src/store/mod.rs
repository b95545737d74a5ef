//! In-memory record store.
//!
//! [`RecordStore`] owns the users, items and claims for the lifetime of a
//! session. Reads come straight from memory; every mutation rewrites all
//! three collections through the storage backend before it returns.
//!
//! A collection that could not be read in full is never written back, so
//! entries the store could not decode stay on disk for someone to repair.
//! Operations that would change such a collection fail with
//! [`ServiceError::PartlyLoaded`].

mod claims;
mod items;
mod users;

use std::sync::Arc;

use models::{Claim, ReportedItem, User};
use serde::Serialize;
use tracing::{debug, error, info, instrument, warn};

use crate::bootstrap::bootstrap;
use crate::errors::ServiceError;
use crate::ids::IdGenerator;
use crate::storage::{Collection, CollectionStorage, Loaded};

pub struct RecordStore<S: CollectionStorage> {
    storage: Arc<S>,
    ids: IdGenerator,
    users: Vec<User>,
    items: Vec<ReportedItem>,
    claims: Vec<Claim>,
    partly_loaded: Vec<Collection>,
}

impl<S: CollectionStorage> RecordStore<S> {
    /// Seed missing collections, then load all three into memory.
    ///
    /// # Examples
    /// ```
    /// use std::sync::Arc;
    /// use service::{ids::IdGenerator, storage::mock::MemoryStorage, RecordStore};
    /// let storage = Arc::new(MemoryStorage::default());
    /// let store = tokio_test::block_on(RecordStore::open(storage, IdGenerator::default())).unwrap();
    /// assert_eq!(store.users().len(), 1);
    /// assert!(store.items().is_empty());
    /// ```
    #[instrument(skip_all)]
    pub async fn open(storage: Arc<S>, ids: IdGenerator) -> Result<Self, ServiceError> {
        let seeded = bootstrap(storage.as_ref()).await?;
        let users: Loaded<User> = storage.read(Collection::Users).await?;
        let items: Loaded<ReportedItem> = storage.read(Collection::Items).await?;
        let claims: Loaded<Claim> = storage.read(Collection::Claims).await?;

        let mut partly_loaded = Vec::new();
        for (collection, complete) in [
            (Collection::Users, users.is_complete()),
            (Collection::Items, items.is_complete()),
            (Collection::Claims, claims.is_complete()),
        ] {
            if !complete {
                warn!(%collection, event = "collection_write_protected", "collection will not be rewritten this session");
                partly_loaded.push(collection);
            }
        }

        info!(
            event = "store_opened",
            users = users.records.len(),
            items = items.records.len(),
            claims = claims.records.len(),
            seeded = seeded.len(),
            partly_loaded = partly_loaded.len(),
            "record store loaded"
        );
        Ok(Self {
            storage,
            ids,
            users: users.records,
            items: items.records,
            claims: claims.records,
            partly_loaded,
        })
    }

    pub fn users(&self) -> &[User] {
        &self.users
    }

    /// Every item in report order.
    pub fn items(&self) -> &[ReportedItem] {
        &self.items
    }

    pub fn claims(&self) -> &[Claim] {
        &self.claims
    }

    /// Collections that were not read in full and are left untouched on disk.
    pub fn partly_loaded(&self) -> &[Collection] {
        &self.partly_loaded
    }

    /// Fail before mutating `collection` if it was only partly loaded.
    fn ensure_writable(&self, collection: Collection) -> Result<(), ServiceError> {
        if self.partly_loaded.contains(&collection) {
            return Err(ServiceError::PartlyLoaded(collection.name().to_string()));
        }
        Ok(())
    }

    /// Rewrite all three collections, even the ones that did not change,
    /// except those that were only partly loaded.
    async fn persist(&self) -> Result<(), ServiceError> {
        self.save_unless_partly_loaded(Collection::Users, &self.users).await?;
        self.save_unless_partly_loaded(Collection::Items, &self.items).await?;
        self.save_unless_partly_loaded(Collection::Claims, &self.claims).await?;
        Ok(())
    }

    async fn save_unless_partly_loaded<T>(&self, collection: Collection, records: &[T]) -> Result<(), ServiceError>
    where
        T: Serialize + Sync,
    {
        if self.partly_loaded.contains(&collection) {
            debug!(%collection, "skipping save of partly loaded collection");
            return Ok(());
        }
        self.storage.save(collection, records).await
    }

    /// Persist, or revert the in-memory change with `undo` and try to bring
    /// disk back in line before reporting the original failure.
    async fn persist_or_undo<F>(&mut self, undo: F) -> Result<(), ServiceError>
    where
        F: FnOnce(&mut Self),
    {
        let Err(e) = self.persist().await else {
            return Ok(());
        };
        undo(self);
        if let Err(again) = self.persist().await {
            error!(event = "resync_failed", error = %again, "disk may disagree with memory until the next successful write");
        }
        Err(e)
    }
}

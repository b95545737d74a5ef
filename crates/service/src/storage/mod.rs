//! Storage abstractions for the record store
//!
//! A [`CollectionStorage`] reads and writes whole collections; it owns no
//! records itself. `json_file_store` persists to disk, `mock` keeps bytes in
//! memory for tests and examples.

pub mod json_file_store;
pub mod mock;

use std::fmt;

use async_trait::async_trait;
use serde::{de::DeserializeOwned, Serialize};
use serde_json::Value;
use tracing::warn;

use crate::errors::ServiceError;

pub use json_file_store::JsonFileStorage;

/// The three persisted collections.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Collection {
    Users,
    Items,
    Claims,
}

impl Collection {
    pub const ALL: [Collection; 3] = [Collection::Users, Collection::Items, Collection::Claims];

    pub fn name(self) -> &'static str {
        match self {
            Collection::Users => "users",
            Collection::Items => "items",
            Collection::Claims => "claims",
        }
    }

    pub fn file_name(self) -> &'static str {
        match self {
            Collection::Users => "users.json",
            Collection::Items => "items.json",
            Collection::Claims => "claims.json",
        }
    }
}

impl fmt::Display for Collection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Records read back from a collection, plus how much of the stored content
/// had to be left out.
#[derive(Debug)]
pub struct Loaded<T> {
    pub records: Vec<T>,
    /// Entries that parsed as JSON but not as a record.
    pub skipped: usize,
    /// The content was not a JSON array at all.
    pub unreadable: bool,
}

impl<T> Loaded<T> {
    pub fn complete(records: Vec<T>) -> Self {
        Self { records, skipped: 0, unreadable: false }
    }

    /// Whether every stored entry made it into `records`. Saving an
    /// incomplete collection would drop the rest from disk.
    pub fn is_complete(&self) -> bool {
        self.skipped == 0 && !self.unreadable
    }
}

/// Whole-collection persistence. Implementations can be file-backed or in-memory.
#[async_trait]
pub trait CollectionStorage: Send + Sync {
    /// Whether the collection has ever been written.
    async fn exists(&self, collection: Collection) -> Result<bool, ServiceError>;

    /// Read a collection, reporting anything that could not be decoded. An
    /// absent collection reads as complete and empty.
    async fn read<T>(&self, collection: Collection) -> Result<Loaded<T>, ServiceError>
    where
        T: DeserializeOwned + Send;

    /// Records only; see [`read`](Self::read).
    async fn load<T>(&self, collection: Collection) -> Result<Vec<T>, ServiceError>
    where
        T: DeserializeOwned + Send,
    {
        let loaded: Loaded<T> = self.read(collection).await?;
        Ok(loaded.records)
    }

    /// Replace the persisted collection with `records`.
    async fn save<T>(&self, collection: Collection, records: &[T]) -> Result<(), ServiceError>
    where
        T: Serialize + Sync;
}

/// Pretty-print a collection with four-space indentation, keys in field order.
pub(crate) fn encode_collection<T: Serialize>(records: &[T]) -> Result<Vec<u8>, ServiceError> {
    let mut out = Vec::new();
    let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
    let mut ser = serde_json::Serializer::with_formatter(&mut out, formatter);
    records.serialize(&mut ser).map_err(ServiceError::storage)?;
    Ok(out)
}

/// Parse a collection one record at a time. Content that is not a JSON array
/// reads as empty and entries that do not fit the record layout are skipped,
/// each with a warning, unless `strict` is set.
pub(crate) fn decode_collection<T: DeserializeOwned>(
    collection: Collection,
    bytes: &[u8],
    strict: bool,
) -> Result<Loaded<T>, ServiceError> {
    let corrupt = |reason: String| ServiceError::Corrupt { collection: collection.name().to_string(), reason };

    let entries: Vec<Value> = match serde_json::from_slice(bytes) {
        Ok(entries) => entries,
        Err(e) if strict => return Err(corrupt(e.to_string())),
        Err(e) => {
            warn!(%collection, error = %e, "collection unreadable; treating it as empty");
            return Ok(Loaded { records: Vec::new(), skipped: 0, unreadable: true });
        }
    };

    let mut records = Vec::with_capacity(entries.len());
    let mut skipped = 0;
    for (index, entry) in entries.into_iter().enumerate() {
        match serde_json::from_value(entry) {
            Ok(record) => records.push(record),
            Err(e) if strict => return Err(corrupt(format!("record {index}: {e}"))),
            Err(e) => {
                warn!(%collection, index, error = %e, "skipping record that does not fit the layout");
                skipped += 1;
            }
        }
    }
    Ok(Loaded { records, skipped, unreadable: false })
}

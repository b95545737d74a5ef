#![cfg(test)]
use std::sync::Arc;

use crate::ids::IdGenerator;
use crate::storage::mock::MemoryStorage;
use crate::store::RecordStore;

/// A freshly bootstrapped store over in-memory storage. The storage handle
/// is returned too so tests can inspect or sabotage writes.
pub async fn memory_store() -> Result<(Arc<MemoryStorage>, RecordStore<MemoryStorage>), anyhow::Error> {
    let storage = Arc::new(MemoryStorage::default());
    let store = RecordStore::open(Arc::clone(&storage), IdGenerator::default()).await?;
    Ok((storage, store))
}

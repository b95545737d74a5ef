//! First-run initialization of the persisted collections.

use models::{Claim, ReportedItem, User};
use tracing::{info, instrument};

use crate::errors::ServiceError;
use crate::storage::{Collection, CollectionStorage};

/// Create every collection that does not exist yet.
///
/// Users are seeded with [`User::default_admin`]; items and claims start
/// empty. Collections that already exist are left alone, even when empty or
/// unreadable. Returns the collections that were created.
#[instrument(skip(storage))]
pub async fn bootstrap<S: CollectionStorage>(storage: &S) -> Result<Vec<Collection>, ServiceError> {
    let mut created = Vec::new();
    for collection in Collection::ALL {
        if storage.exists(collection).await? {
            continue;
        }
        match collection {
            Collection::Users => storage.save(collection, &[User::default_admin()]).await?,
            Collection::Items => {
                let empty: Vec<ReportedItem> = Vec::new();
                storage.save(collection, &empty).await?
            }
            Collection::Claims => {
                let empty: Vec<Claim> = Vec::new();
                storage.save(collection, &empty).await?
            }
        }
        info!(%collection, event = "collection_seeded", "created missing collection");
        created.push(collection);
    }
    Ok(created)
}

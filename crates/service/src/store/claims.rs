use models::{Claim, ClaimStatus, ItemStatus};
use tracing::{debug, info, instrument, warn};

use super::RecordStore;
use crate::errors::ServiceError;
use crate::ids::CLAIM_PREFIX;
use crate::storage::{Collection, CollectionStorage};

impl<S: CollectionStorage> RecordStore<S> {
    /// Record a pending claim. Neither the user nor the item is looked up.
    #[instrument(skip(self))]
    pub async fn file_claim(&mut self, user_id: u64, item_id: &str) -> Result<String, ServiceError> {
        self.ensure_writable(Collection::Claims)?;
        let claim_id = self.ids.generate(CLAIM_PREFIX, self.claims.iter().map(|c| c.claim_id.as_str()))?;
        self.claims.push(Claim::pending(claim_id.clone(), user_id, item_id.to_string()));
        self.persist_or_undo(|store| {
            store.claims.pop();
        })
        .await?;
        info!(event = "claim_filed", %claim_id, user_id, %item_id, "claim filed");
        Ok(claim_id)
    }

    /// Approve the first claim with `claim_id` and mark every item it
    /// references as claimed.
    ///
    /// Returns `Ok(false)` without touching anything when no claim matches.
    /// A claim whose item does not exist is still approved.
    #[instrument(skip(self))]
    pub async fn approve_claim(&mut self, claim_id: &str) -> Result<bool, ServiceError> {
        let Some(idx) = self.claims.iter().position(|c| c.claim_id == claim_id) else {
            debug!(event = "claim_not_found", "no claim to approve");
            return Ok(false);
        };
        self.ensure_writable(Collection::Claims)?;
        self.ensure_writable(Collection::Items)?;

        let previous = self.claims[idx].status;
        self.claims[idx].status = ClaimStatus::Approved;
        let item_id = self.claims[idx].item_id.clone();

        let mut touched = Vec::new();
        for (pos, item) in self.items.iter_mut().enumerate() {
            if item.item_id == item_id {
                touched.push((pos, item.status));
                item.status = ItemStatus::Claimed;
            }
        }
        if touched.is_empty() {
            warn!(event = "dangling_item_reference", %item_id, "approved claim references no known item");
        }

        self.persist_or_undo(move |store| {
            store.claims[idx].status = previous;
            for (pos, status) in touched {
                store.items[pos].status = status;
            }
        })
        .await?;
        info!(event = "claim_approved", %item_id, "claim approved");
        Ok(true)
    }
}

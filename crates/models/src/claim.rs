use std::fmt;

use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ClaimStatus {
    Pending,
    Approved,
}

impl fmt::Display for ClaimStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ClaimStatus::Pending => f.write_str("pending"),
            ClaimStatus::Approved => f.write_str("approved"),
        }
    }
}

/// A user's request to take ownership of a catalog item.
///
/// Neither `user_id` nor `item_id` is checked against the other collections.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claim {
    pub claim_id: String,
    pub user_id: u64,
    pub item_id: String,
    pub status: ClaimStatus,
}

impl Claim {
    pub fn pending(claim_id: String, user_id: u64, item_id: String) -> Self {
        Self { claim_id, user_id, item_id, status: ClaimStatus::Pending }
    }
}

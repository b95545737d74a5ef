use std::fmt;

use serde::{Deserialize, Serialize};

/// Whether an item was lost or found.
///
/// The store keeps whatever the caller hands it: values other than
/// `lost`/`found` survive a round trip through [`ItemKind::Other`].
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ItemKind {
    Lost,
    Found,
    Other(String),
}

impl ItemKind {
    pub fn as_str(&self) -> &str {
        match self {
            ItemKind::Lost => "lost",
            ItemKind::Found => "found",
            ItemKind::Other(s) => s,
        }
    }
}

impl From<String> for ItemKind {
    fn from(s: String) -> Self {
        match s.as_str() {
            "lost" => ItemKind::Lost,
            "found" => ItemKind::Found,
            _ => ItemKind::Other(s),
        }
    }
}

impl From<&str> for ItemKind {
    fn from(s: &str) -> Self {
        ItemKind::from(s.to_string())
    }
}

impl From<ItemKind> for String {
    fn from(kind: ItemKind) -> Self {
        match kind {
            ItemKind::Other(s) => s,
            known => known.as_str().to_string(),
        }
    }
}

impl fmt::Display for ItemKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Lifecycle of a reported item. Only `Reported -> Claimed` is driven today.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ItemStatus {
    Reported,
    Claimed,
    Approved,
    Returned,
}

impl fmt::Display for ItemStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ItemStatus::Reported => "reported",
            ItemStatus::Claimed => "claimed",
            ItemStatus::Approved => "approved",
            ItemStatus::Returned => "returned",
        };
        f.write_str(s)
    }
}

/// An entry in the shared lost-and-found catalog.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportedItem {
    pub item_id: String,
    pub name: String,
    pub description: String,
    pub location: String,
    pub item_type: ItemKind,
    pub status: ItemStatus,
}

/// Caller-supplied fields for a new report; identifier and status are
/// assigned by the store.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ItemReport {
    pub name: String,
    pub description: String,
    pub location: String,
    pub item_type: ItemKind,
}

impl ItemReport {
    pub fn new(
        name: impl Into<String>,
        description: impl Into<String>,
        location: impl Into<String>,
        item_type: impl Into<ItemKind>,
    ) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            location: location.into(),
            item_type: item_type.into(),
        }
    }

    pub fn into_item(self, item_id: String) -> ReportedItem {
        ReportedItem {
            item_id,
            name: self.name,
            description: self.description,
            location: self.location,
            item_type: self.item_type,
            status: ItemStatus::Reported,
        }
    }
}

//! Plain-text lines for records shown in the menus.

use models::{Claim, ReportedItem};

pub fn item_line(item: &ReportedItem) -> String {
    format!(
        "Item ID: {}, Name: {}, Location: {}, Type: {}, Status: {}",
        item.item_id, item.name, item.location, item.item_type, item.status
    )
}

/// Used under a per-type heading, where the type column would be redundant.
pub fn item_line_without_type(item: &ReportedItem) -> String {
    format!(
        "Item ID: {}, Name: {}, Location: {}, Status: {}",
        item.item_id, item.name, item.location, item.status
    )
}

pub fn claim_line(claim: &Claim) -> String {
    format!(
        "Claim ID: {}, User ID: {}, Item ID: {}, Status: {}",
        claim.claim_id, claim.user_id, claim.item_id, claim.status
    )
}

/// "lost" -> "Lost"
pub fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

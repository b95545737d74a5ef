//! Record types shared by every layer of the lost-and-found tracker.
//!
//! Each record serializes to a flat JSON object whose keys appear in field
//! declaration order, matching the layout of the persisted collections.

pub mod user;
pub mod item;
pub mod claim;

pub use claim::{Claim, ClaimStatus};
pub use item::{ItemKind, ItemReport, ItemStatus, ReportedItem};
pub use user::{Role, User};

//! Service layer for the lost-and-found tracker.
//! - `storage`: stateless collection persistence (JSON files or in-memory).
//! - `bootstrap`: first-run seeding of missing collections.
//! - `ids`: human-readable, collision-checked identifiers.
//! - `store`: the in-memory record store that every console action goes through.

pub mod errors;
pub mod storage;
pub mod bootstrap;
pub mod ids;
pub mod store;
#[cfg(test)]
pub mod test_support;

pub use errors::ServiceError;
pub use store::RecordStore;

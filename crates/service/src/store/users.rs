use models::User;
use tracing::{debug, info, instrument};

use super::RecordStore;
use crate::storage::CollectionStorage;

impl<S: CollectionStorage> RecordStore<S> {
    /// Exact match on email and password; the first matching account wins.
    #[instrument(skip(self, email, password), fields(email = %email))]
    pub fn authenticate(&self, email: &str, password: &str) -> Option<User> {
        let found = self
            .users
            .iter()
            .find(|u| u.email == email && u.password == password)
            .cloned();
        match &found {
            Some(user) => info!(event = "login", user_id = user.id, role = %user.role, "user authenticated"),
            None => debug!(event = "login_failed", "no account matches credentials"),
        }
        found
    }
}

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("storage error: {0}")]
    Storage(String),
    #[error("corrupt collection {collection}: {reason}")]
    Corrupt { collection: String, reason: String },
    #[error("collection {0} was only partly loaded; repair {0}.json and restart before changing it")]
    PartlyLoaded(String),
    #[error("no free identifiers left for prefix {0}")]
    IdSpaceExhausted(String),
}

impl ServiceError {
    pub fn storage(e: impl std::fmt::Display) -> Self { Self::Storage(e.to_string()) }
}

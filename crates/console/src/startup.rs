use std::sync::Arc;

use common::utils::logging::{init_logging_default, init_logging_json};
use configs::{AppConfig, LogFormat};
use service::{ids::IdGenerator, storage::JsonFileStorage, RecordStore};
use tokio::io::{stdin, stdout, BufReader};
use tracing::info;

use crate::errors::StartupError;
use crate::session::Session;

/// Install the tracing subscriber in the configured format.
pub fn init_logging(format: LogFormat) {
    match format {
        LogFormat::Compact => init_logging_default(),
        LogFormat::Json => init_logging_json(),
    }
}

/// Load and validate configuration, mapping failures to a startup error.
pub fn load_config() -> Result<AppConfig, StartupError> {
    AppConfig::load_and_validate().map_err(|e| StartupError::InvalidConfig(e.to_string()))
}

/// Open the on-disk store (creating the data directory on first run) and run
/// one console session on stdin/stdout.
pub async fn run(cfg: AppConfig) -> anyhow::Result<()> {
    let storage = Arc::new(JsonFileStorage::from_config(&cfg.storage).await?);
    let mut store = RecordStore::open(storage, IdGenerator::from_config(&cfg.ids)).await?;
    info!(data_dir = %cfg.storage.data_dir, "starting console session");

    Session::new(&mut store, BufReader::new(stdin()), stdout()).run().await?;
    Ok(())
}

use std::path::Path;

use anyhow::anyhow;
use anyhow::Result;
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub storage: StorageConfig,
    #[serde(default)]
    pub ids: IdConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct StorageConfig {
    #[serde(default = "default_data_dir")]
    pub data_dir: String,
    /// Write each collection to a temp file and rename it into place.
    #[serde(default = "default_atomic_writes")]
    pub atomic_writes: bool,
    /// Refuse to start on an unparsable collection instead of treating it as empty.
    #[serde(default)]
    pub fail_on_corrupt: bool,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self { data_dir: default_data_dir(), atomic_writes: true, fail_on_corrupt: false }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct IdConfig {
    /// Width of the numeric part of `ITEM-` / `CLM-` identifiers.
    #[serde(default = "default_id_digits")]
    pub digits: u32,
    #[serde(default = "default_id_attempts")]
    pub max_attempts: u32,
}

impl Default for IdConfig {
    fn default() -> Self {
        Self { digits: default_id_digits(), max_attempts: default_id_attempts() }
    }
}

#[derive(Debug, Clone, Copy, Deserialize, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Compact,
    Json,
}

#[derive(Debug, Clone, Deserialize, Default)]
pub struct LoggingConfig {
    #[serde(default)]
    pub format: LogFormat,
}

fn default_data_dir() -> String { "data".into() }
fn default_atomic_writes() -> bool { true }
fn default_id_digits() -> u32 { 4 }
fn default_id_attempts() -> u32 { 64 }

/// `CONFIG_PATH`, falling back to `config.toml` in the working directory.
pub fn config_path() -> String {
    std::env::var("CONFIG_PATH").unwrap_or_else(|_| "config.toml".to_string())
}

pub fn load_from_file(path: &str) -> Result<AppConfig> {
    let content = std::fs::read_to_string(path)?;
    parse(&content)
}

pub fn parse(content: &str) -> Result<AppConfig> {
    let cfg: AppConfig = toml::from_str(content)?;
    Ok(cfg)
}

impl AppConfig {
    /// Load `CONFIG_PATH` (or `config.toml`); a missing file means defaults.
    pub fn load_and_validate() -> Result<Self> {
        let path = config_path();
        let mut cfg = if Path::new(&path).exists() { load_from_file(&path)? } else { AppConfig::default() };
        cfg.normalize_and_validate()?;
        Ok(cfg)
    }

    pub fn normalize_and_validate(&mut self) -> Result<()> {
        self.storage.normalize_from_env();
        self.ids.validate()?;
        Ok(())
    }
}

impl StorageConfig {
    pub fn normalize_from_env(&mut self) {
        if let Ok(dir) = std::env::var("DLFS_DATA_DIR") {
            if !dir.trim().is_empty() {
                self.data_dir = dir;
            }
        }
        if self.data_dir.trim().is_empty() {
            self.data_dir = default_data_dir();
        }
    }
}

impl IdConfig {
    pub fn validate(&self) -> Result<()> {
        if !(1..=9).contains(&self.digits) {
            return Err(anyhow!("ids.digits must be within 1..=9"));
        }
        if self.max_attempts == 0 {
            return Err(anyhow!("ids.max_attempts must be >= 1"));
        }
        Ok(())
    }
}

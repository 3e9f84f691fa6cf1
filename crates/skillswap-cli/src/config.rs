use std::path::PathBuf;

use anyhow::{Context, Result, bail};

use skillswap_crypto::MessageCipher;

pub const DB_PATH_VAR: &str = "SKILLSWAP_DB_PATH";
pub const KEY_VAR: &str = "SKILLSWAP_ENCRYPTION_KEY";

/// Settings read from the environment (after `.env` has been loaded).
#[derive(Debug, Clone)]
pub struct Config {
    pub db_path: PathBuf,
    encryption_key: Option<String>,
}

impl Config {
    pub fn from_env() -> Self {
        let db_path = std::env::var(DB_PATH_VAR)
            .unwrap_or_else(|_| "skillswap.db".into())
            .into();
        let encryption_key = std::env::var(KEY_VAR)
            .ok()
            .filter(|key| !key.trim().is_empty());

        Self {
            db_path,
            encryption_key,
        }
    }

    /// The message cipher for the configured key.
    pub fn cipher(&self) -> Result<MessageCipher> {
        let Some(key) = &self.encryption_key else {
            bail!("{} is not set", KEY_VAR);
        };
        MessageCipher::from_base64(key).with_context(|| format!("{} is not a valid key", KEY_VAR))
    }
}

//! Environment-driven service settings, read once at startup.

use std::env;
use std::path::PathBuf;

use thiserror::Error;

pub const DEFAULT_PORT: u16 = 31310;
pub const DEFAULT_DB_PATH: &str = "enx.db";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("'ENX_SIGNATURE_KEY_FILENAME' env is not set")]
    MissingSignatureKeyPath,

    #[error("Invalid ENX_PORT value: {0}")]
    InvalidPort(String),
}

#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    /// Base URL prefixed to package download links in the catalog.
    pub base_url: String,
    pub db_path: PathBuf,
    /// PEM EC private key used to sign every package. Required; the
    /// service refuses to start without it.
    pub signature_key_path: PathBuf,
    pub verification_key_id: String,
    pub verification_key_version: String,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        let port = match env::var("ENX_PORT") {
            Ok(value) => value
                .parse()
                .map_err(|_| ConfigError::InvalidPort(value.clone()))?,
            Err(_) => DEFAULT_PORT,
        };
        let signature_key_path = env::var("ENX_SIGNATURE_KEY_FILENAME")
            .map(PathBuf::from)
            .map_err(|_| ConfigError::MissingSignatureKeyPath)?;
        let base_url =
            env::var("ENX_BASE_URL").unwrap_or_else(|_| format!("http://localhost:{port}"));
        let db_path = env::var("ENX_DB_PATH")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from(DEFAULT_DB_PATH));
        let verification_key_id =
            env::var("ENX_VERIFICATION_KEY_ID").unwrap_or_else(|_| "440".to_string());
        let verification_key_version =
            env::var("ENX_VERIFICATION_KEY_VERSION").unwrap_or_else(|_| "v1".to_string());

        Ok(Self {
            port,
            base_url,
            db_path,
            signature_key_path,
            verification_key_id,
            verification_key_version,
        })
    }
}

//! Application configuration.
//!
//! Handles loading configuration from environment variables and .env files.

use dotenv::dotenv;
use std::env;
use std::path::PathBuf;

use crate::constants::storage;
use crate::error::{Error, Result};

/// Configuration for the application.
#[derive(Debug, Clone)]
pub struct Config {
    /// The application name
    app_name: String,
    /// The application version
    app_version: String,
    /// Directory the chapter store reads from (the notes vault)
    pub vault_path: PathBuf,
    /// Vault-relative directory holding one folder per book
    pub bible_root: String,
    /// Chapter file extension, without the dot
    pub extension: String,
}

impl Config {
    /// Get the application name.
    #[must_use]
    pub fn app_name(&self) -> &str {
        &self.app_name
    }

    /// Get the application version.
    #[must_use]
    pub fn app_version(&self) -> &str {
        &self.app_version
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            app_name: env!("CARGO_PKG_NAME").to_string(),
            app_version: env!("CARGO_PKG_VERSION").to_string(),
            vault_path: PathBuf::from("."),
            bible_root: storage::DEFAULT_BIBLE_ROOT.to_string(),
            extension: storage::DEFAULT_EXTENSION.to_string(),
        }
    }
}

impl Config {
    /// Load configuration from environment variables
    pub fn load() -> Result<Self> {
        // Try to load .env file if present
        dotenv().ok();

        let mut config = Self::default();

        if let Ok(path) = env::var("BIBLE_VAULT") {
            let p = PathBuf::from(shellexpand::tilde(&path).to_string());
            if !p.is_dir() {
                return Err(Error::config(
                    format!("BIBLE_VAULT {} is not a directory", p.display()),
                    "Point BIBLE_VAULT at the folder that contains your bible root",
                ));
            }
            config.vault_path = p;
        }

        if let Ok(root) = env::var("BIBLE_ROOT") {
            let root = root.trim().trim_end_matches('/');
            if !root.is_empty() {
                config.bible_root = root.to_string();
            }
        }

        if let Ok(ext) = env::var("BIBLE_EXTENSION") {
            let ext = ext.trim().trim_start_matches('.');
            if !ext.is_empty() {
                config.extension = ext.to_string();
            }
        }

        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::expect_used, clippy::unwrap_used, clippy::panic)]

    use super::*;

    #[test]
    fn defaults_match_vault_layout() {
        let config = Config::default();
        assert_eq!(config.bible_root, "esvbible");
        assert_eq!(config.extension, "md");
        assert_eq!(config.vault_path, PathBuf::from("."));
        assert_eq!(config.app_name(), "inline-scripture");
    }
}

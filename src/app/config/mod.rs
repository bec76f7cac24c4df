use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info};

pub mod sections;

pub use sections::{AccessConfig, ChainConfig, GalleryConfig, StorageConfig};

use crate::app::keys::KeyConfig;

pub const ENV_STORAGE_URL: &str = "GATEFOLD_STORAGE_URL";
pub const ENV_STORAGE_KEY: &str = "GATEFOLD_STORAGE_KEY";
pub const ENV_ADMIN_ADDRESS: &str = "GATEFOLD_ADMIN_ADDRESS";
pub const ENV_RPC_URL: &str = "GATEFOLD_RPC_URL";
pub const ENV_WALLET_ADDRESS: &str = "GATEFOLD_WALLET_ADDRESS";
pub const ENV_PROJECT_ID: &str = "GATEFOLD_PROJECT_ID";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("could not read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid config {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
    #[error("missing storage configuration: set `storage.{0}` or {1}")]
    MissingStorage(&'static str, &'static str),
}

/// Storage endpoint and access key, both present.
#[derive(Debug, Clone, PartialEq)]
pub struct StorageCredentials {
    pub url: String,
    pub key: String,
}

/// Everything read from `config.toml` and the environment.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub chain: ChainConfig,
    pub storage: StorageConfig,
    pub access: AccessConfig,
    pub gallery: GalleryConfig,
    pub keys: KeyConfig,
}

impl AppConfig {
    pub fn get_config_dir() -> PathBuf {
        dirs::config_dir()
            .or_else(|| dirs::home_dir().map(|h| h.join(".config")))
            .unwrap_or_else(|| PathBuf::from("."))
            .join("gatefold")
    }

    pub fn get_config_path() -> PathBuf {
        Self::get_config_dir().join("config.toml")
    }

    /// Reads `path`. A missing file yields the defaults.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            debug!(path = %path.display(), "no config file, using defaults");
            return Ok(Self::default());
        }
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config = toml::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        info!(path = %path.display(), "config loaded");
        Ok(config)
    }

    /// Overlays `GATEFOLD_*` variables. `lookup` is `std::env::var` in practice.
    pub fn apply_env<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |name: &str| lookup(name).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

        if let Some(url) = get(ENV_STORAGE_URL) {
            self.storage.url = Some(url);
        }
        if let Some(key) = get(ENV_STORAGE_KEY) {
            self.storage.key = Some(key);
        }
        if let Some(admins) = get(ENV_ADMIN_ADDRESS) {
            self.access.admin_addresses = admins
                .split(',')
                .map(|a| a.trim().to_string())
                .filter(|a| !a.is_empty())
                .collect();
        }
        if let Some(rpc) = get(ENV_RPC_URL) {
            self.chain.rpc_url = rpc;
        }
        if let Some(address) = get(ENV_WALLET_ADDRESS) {
            self.access.wallet_address = Some(address);
        }
        if let Some(project) = get(ENV_PROJECT_ID) {
            self.access.walletconnect_project_id = Some(project);
        }
    }

    pub fn storage_credentials(&self) -> Result<StorageCredentials, ConfigError> {
        let non_empty = |v: &Option<String>| v.as_deref().map(str::trim).filter(|s| !s.is_empty()).map(String::from);
        let url = non_empty(&self.storage.url).ok_or(ConfigError::MissingStorage("url", ENV_STORAGE_URL))?;
        let key = non_empty(&self.storage.key).ok_or(ConfigError::MissingStorage("key", ENV_STORAGE_KEY))?;
        Ok(StorageCredentials { url, key })
    }

    pub fn download_dir(&self) -> PathBuf {
        self.gallery
            .download_dir
            .clone()
            .or_else(dirs::download_dir)
            .or_else(|| dirs::home_dir().map(|h| h.join("Downloads")))
            .unwrap_or_else(|| PathBuf::from("."))
    }

    /// Per-request limit for chain calls, listings and previews.
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.chain.request_timeout_secs.max(1))
    }

    pub fn download_timeout(&self) -> Option<Duration> {
        match self.gallery.download_timeout_secs {
            0 => None,
            secs => Some(Duration::from_secs(secs)),
        }
    }

    pub fn to_toml_string(&self) -> Result<String, toml::ser::Error> {
        toml::to_string_pretty(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gallery::ViewMode;
    use std::collections::HashMap;

    fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| map.get(name).cloned()
    }

    #[test]
    fn test_missing_file_is_default() {
        let dir = tempfile::tempdir().unwrap();
        let config = AppConfig::load_from(&dir.path().join("absent.toml")).unwrap();
        assert_eq!(config, AppConfig::default());
    }

    #[test]
    fn test_partial_file_merges_with_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(
            &path,
            r#"
[storage]
url = "https://abc.supabase.co"

[gallery]
view_mode = "tiles"

[keys]
download = "D"
"#,
        )
        .unwrap();

        let config = AppConfig::load_from(&path).unwrap();
        assert_eq!(config.storage.url.as_deref(), Some("https://abc.supabase.co"));
        assert_eq!(config.storage.bucket, sections::DEFAULT_BUCKET);
        assert_eq!(config.gallery.view_mode, ViewMode::Tiles);
        assert_eq!(config.keys.download, "D");
        assert_eq!(config.keys.quit, "q");
        assert_eq!(config.chain.rpc_url, sections::DEFAULT_RPC_URL);
    }

    #[test]
    fn test_bad_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "[gallery]\nview_mode = 3\n").unwrap();
        assert!(matches!(AppConfig::load_from(&path), Err(ConfigError::Parse { .. })));
    }

    #[test]
    fn test_env_overrides_file() {
        let mut config = AppConfig::default();
        config.storage.url = Some("https://file.example".into());
        config.apply_env(env(&[
            (ENV_STORAGE_URL, "https://env.example"),
            (ENV_STORAGE_KEY, "anon-key"),
            (ENV_ADMIN_ADDRESS, "0xAAA, 0xBBB ,"),
            (ENV_WALLET_ADDRESS, "  "),
        ]));

        assert_eq!(config.storage.url.as_deref(), Some("https://env.example"));
        assert_eq!(config.access.admin_addresses, vec!["0xAAA", "0xBBB"]);
        assert_eq!(config.access.wallet_address, None, "blank values are ignored");
        assert_eq!(
            config.storage_credentials().unwrap(),
            StorageCredentials {
                url: "https://env.example".into(),
                key: "anon-key".into()
            }
        );
    }

    #[test]
    fn test_missing_storage_is_reported() {
        let mut config = AppConfig::default();
        assert!(matches!(
            config.storage_credentials(),
            Err(ConfigError::MissingStorage("url", _))
        ));
        config.storage.url = Some("https://abc.supabase.co".into());
        config.storage.key = Some("   ".into());
        assert!(matches!(
            config.storage_credentials(),
            Err(ConfigError::MissingStorage("key", _))
        ));
    }

    #[test]
    fn test_downloads_get_their_own_timeout() {
        let mut config = AppConfig::default();
        assert_eq!(config.request_timeout(), Duration::from_secs(20));
        assert_eq!(config.download_timeout(), Some(Duration::from_secs(600)));

        config.gallery.download_timeout_secs = 0;
        config.chain.request_timeout_secs = 0;
        assert_eq!(config.download_timeout(), None);
        assert_eq!(config.request_timeout(), Duration::from_secs(1));
    }

    #[test]
    fn test_generated_config_round_trips() {
        let text = AppConfig::default().to_toml_string().unwrap();
        let parsed: AppConfig = toml::from_str(&text).unwrap();
        assert_eq!(parsed, AppConfig::default());
    }
}

use crate::gallery::ViewMode;
use crate::storage::DEFAULT_PAGE_LIMIT;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

pub const DEFAULT_RPC_URL: &str = "https://eth.llamarpc.com";
pub const DEFAULT_CONTRACT: &str = "0xF9e631014Ce1759d9B76Ce074D496c3da633BA12";
pub const DEFAULT_BUCKET: &str = "fuji-x-photos-v1";

/// `[chain]`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChainConfig {
    pub rpc_url: String,
    pub contract: String,
    pub request_timeout_secs: u64,
}

impl Default for ChainConfig {
    fn default() -> Self {
        Self {
            rpc_url: DEFAULT_RPC_URL.to_string(),
            contract: DEFAULT_CONTRACT.to_string(),
            request_timeout_secs: 20,
        }
    }
}

/// `[storage]`. `url` and `key` have no defaults and must be supplied.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub key: Option<String>,
    pub bucket: String,
    pub prefix: String,
    pub page_limit: usize,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            url: None,
            key: None,
            bucket: DEFAULT_BUCKET.to_string(),
            prefix: String::new(),
            page_limit: DEFAULT_PAGE_LIMIT,
        }
    }
}

/// `[access]`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AccessConfig {
    pub admin_addresses: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub wallet_address: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub walletconnect_project_id: Option<String>,
}

/// `[gallery]`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GalleryConfig {
    pub view_mode: ViewMode,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub download_dir: Option<PathBuf>,
    /// Drag distance one terminal row counts for.
    pub drag_units_per_row: f32,
    /// Longest side of decoded previews, in pixels.
    pub preview_max_dim: u32,
    pub max_concurrent_previews: usize,
    /// Decoded previews kept in memory before the least recently drawn go.
    pub preview_cache_size: usize,
    /// Whole-transfer limit for saving an original. 0 means no limit.
    pub download_timeout_secs: u64,
}

impl Default for GalleryConfig {
    fn default() -> Self {
        Self {
            view_mode: ViewMode::Grid,
            download_dir: None,
            drag_units_per_row: 20.0,
            preview_max_dim: 480,
            max_concurrent_previews: 4,
            preview_cache_size: 96,
            download_timeout_secs: 600,
        }
    }
}

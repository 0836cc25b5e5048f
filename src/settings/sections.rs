use serde::{Deserialize, Serialize};

use crate::utils::http::DEFAULT_TIMEOUT;

fn default_listen_address() -> String {
    "127.0.0.1".to_string()
}

fn default_listen_port() -> u16 {
    25500
}

fn default_max_concurrent_threads() -> usize {
    4
}

fn default_info_log_level() -> String {
    "info".to_string()
}

fn default_user_agent() -> String {
    "ProSub/1.0".to_string()
}

fn default_cache_ttl() -> u64 {
    3600
}

fn default_fetch_timeout() -> u64 {
    DEFAULT_TIMEOUT
}

fn default_subconverter_host() -> String {
    "api.v1.mk".to_string()
}

fn default_nodes_key() -> String {
    "prosub_nodes_v1".to_string()
}

fn default_profiles_key() -> String {
    "prosub_profiles_v1".to_string()
}

/// Server settings section
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerSettings {
    pub listen_address: String,
    pub listen_port: u16,
    pub max_concur_threads: usize,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            listen_address: default_listen_address(),
            listen_port: default_listen_port(),
            max_concur_threads: default_max_concurrent_threads(),
        }
    }
}

/// Common settings section
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CommonSettings {
    pub log_level: String,
    /// JSON file with `nodes` and `profiles` arrays imported at start-up
    pub data_file: Option<String>,
}

impl Default for CommonSettings {
    fn default() -> Self {
        Self {
            log_level: default_info_log_level(),
            data_file: None,
        }
    }
}

/// Subscription download settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SubscriptionSettings {
    pub user_agent: String,
    /// Seconds a downloaded subscription stays cached
    pub cache_ttl: u64,
    /// Per-request timeout in seconds
    pub fetch_timeout: u64,
}

impl Default for SubscriptionSettings {
    fn default() -> Self {
        Self {
            user_agent: default_user_agent(),
            cache_ttl: default_cache_ttl(),
            fetch_timeout: default_fetch_timeout(),
        }
    }
}

/// External converter settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ConverterSettings {
    pub subconverter_host: String,
}

impl Default for ConverterSettings {
    fn default() -> Self {
        Self {
            subconverter_host: default_subconverter_host(),
        }
    }
}

/// Storage key names
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageSettings {
    pub nodes_key: String,
    pub profiles_key: String,
}

impl Default for StorageSettings {
    fn default() -> Self {
        Self {
            nodes_key: default_nodes_key(),
            profiles_key: default_profiles_key(),
        }
    }
}

/// On-disk layout of the settings file, shared by the TOML and YAML forms.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FileSettings {
    pub server: ServerSettings,
    pub common: CommonSettings,
    pub subscription: SubscriptionSettings,
    pub converter: ConverterSettings,
    pub storage: StorageSettings,
}

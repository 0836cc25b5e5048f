use std::path::Path;
use std::time::Duration;

use log::debug;

use super::sections::FileSettings;
use super::SettingsError;

/// Settings structure to hold global configuration
#[derive(Debug, Clone)]
pub struct Settings {
    // Server
    pub listen_address: String,
    pub listen_port: u16,
    pub max_concur_threads: usize,

    pub log_level: String,
    pub data_file: Option<String>,

    // Subscription downloads
    pub user_agent: String,
    pub cache_ttl: u64,
    pub fetch_timeout: u64,

    pub subconverter_host: String,

    // Storage keys
    pub nodes_key: String,
    pub profiles_key: String,
}

impl Default for Settings {
    fn default() -> Self {
        Settings::from(FileSettings::default())
    }
}

impl From<FileSettings> for Settings {
    fn from(file: FileSettings) -> Self {
        let listen_address = if file.server.listen_address.trim().is_empty() {
            "127.0.0.1".to_string()
        } else {
            file.server.listen_address
        };

        Self {
            listen_address,
            listen_port: file.server.listen_port,
            max_concur_threads: file.server.max_concur_threads.max(1),
            log_level: file.common.log_level,
            data_file: file.common.data_file.filter(|path| !path.trim().is_empty()),
            user_agent: file.subscription.user_agent,
            cache_ttl: file.subscription.cache_ttl,
            fetch_timeout: file.subscription.fetch_timeout,
            subconverter_host: file.converter.subconverter_host,
            nodes_key: file.storage.nodes_key,
            profiles_key: file.storage.profiles_key,
        }
    }
}

/// Longest accepted subscription cache lifetime, in seconds (30 days).
pub const MAX_CACHE_TTL: u64 = 30 * 24 * 3600;
/// Longest accepted outbound fetch timeout, in seconds.
pub const MAX_FETCH_TIMEOUT: u64 = 300;

impl Settings {
    /// Create a new settings instance with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses settings content, trying TOML first and then YAML.
    pub fn from_content(content: &str) -> Result<Self, SettingsError> {
        let file = match toml::from_str::<FileSettings>(content) {
            Ok(file) => file,
            Err(toml_err) => {
                debug!("Settings content is not TOML ({}), trying YAML", toml_err);
                serde_yaml::from_str(content)?
            }
        };
        Settings::from(file).validate()
    }

    /// Loads settings from `path`. The extension picks the format; any other
    /// extension falls back to content detection.
    pub async fn load_from_file(path: impl AsRef<Path>) -> Result<Self, SettingsError> {
        let path = path.as_ref();
        let content = tokio::fs::read_to_string(path).await?;

        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(str::to_ascii_lowercase);
        let file: FileSettings = match extension.as_deref() {
            Some("toml") => toml::from_str(&content)?,
            Some("yaml") | Some("yml") => serde_yaml::from_str(&content)?,
            _ => return Settings::from_content(&content),
        };
        Settings::from(file).validate()
    }

    fn validate(self) -> Result<Self, SettingsError> {
        if self.listen_port == 0 {
            return Err(SettingsError::Format("listen_port must be non-zero".to_string()));
        }
        if self.nodes_key.is_empty() || self.profiles_key.is_empty() {
            return Err(SettingsError::Format("storage keys must not be empty".to_string()));
        }
        if self.cache_ttl > MAX_CACHE_TTL {
            return Err(SettingsError::Format(format!(
                "cache_ttl must be at most {} seconds, got {}",
                MAX_CACHE_TTL, self.cache_ttl
            )));
        }
        if !(1..=MAX_FETCH_TIMEOUT).contains(&self.fetch_timeout) {
            return Err(SettingsError::Format(format!(
                "fetch_timeout must be between 1 and {} seconds, got {}",
                MAX_FETCH_TIMEOUT, self.fetch_timeout
            )));
        }
        Ok(self)
    }

    pub fn cache_ttl(&self) -> Duration {
        Duration::from_secs(self.cache_ttl)
    }

    pub fn fetch_timeout(&self) -> Duration {
        Duration::from_secs(self.fetch_timeout)
    }

    pub fn listen_on(&self) -> String {
        format!("{}:{}", self.listen_address, self.listen_port)
    }
}

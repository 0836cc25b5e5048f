//! Settings module for prosub
//!
//! Settings are read from a TOML or YAML file made of the sections in
//! [`sections`] and flattened into [`Settings`].

pub mod sections;
pub mod settings_struct;

use thiserror::Error;

pub use sections::FileSettings;
pub use settings_struct::{Settings, MAX_CACHE_TTL, MAX_FETCH_TIMEOUT};

#[derive(Error, Debug)]
pub enum SettingsError {
    #[error("Failed to read settings: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid TOML settings: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("Invalid YAML settings: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Invalid settings: {0}")]
    Format(String),
}

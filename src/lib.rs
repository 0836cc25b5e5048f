pub mod generator;
pub mod interfaces;
pub mod models;
pub mod parser;
pub mod rulesets;
pub mod settings;
pub mod utils;
pub mod vfs;
#[cfg(feature = "web-api")]
pub mod web_handlers;

#[cfg(test)]
mod test_support;

// Re-export the main descriptor types for easier access
pub use models::{OutputFormat, ProtocolKind, ProxyDescriptor, ResolvedNode};

pub use interfaces::{generate_subscription, SubscriptionResult};
pub use settings::Settings;

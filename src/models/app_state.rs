use crate::rulesets::RuleSetTable;
use crate::settings::Settings;
use crate::utils::http_std::ReqwestClient;
use crate::vfs::MemoryKvStore;

/// Application state shared by the subscription endpoint
///
/// Generic over the key-value store and the HTTP client so tests can swap
/// in their own collaborators.
#[derive(Debug)]
pub struct AppState<K = MemoryKvStore, H = ReqwestClient> {
    /// Global application settings
    pub config: Settings,

    /// Node, profile and subscription-cache storage
    pub store: K,

    /// Client for subscription downloads and the external converter
    pub http: H,

    /// Predefined rule sets, built once at start-up
    pub rule_sets: RuleSetTable,
}

impl<K, H> AppState<K, H> {
    /// Create a new AppState instance
    pub fn new(config: Settings, store: K, http: H) -> Self {
        Self {
            config,
            store,
            http,
            rule_sets: RuleSetTable::predefined(),
        }
    }
}

use log::{error, info, warn};
use thiserror::Error;

use crate::generator::{CompileError, Compiled, CompiledConfig, ConfigCompiler};
use crate::models::{AppState, ProfileRecord};
use crate::parser::{NodeResolver, SubscriptionCache};
use crate::utils::http::{is_hop_by_hop, HttpClient, HttpResponse};
use crate::utils::url::url_encode;
use crate::vfs::{get_json, KvError, KvStore};

/// Body served when a profile resolves to no nodes
pub const NO_NODES_PLACEHOLDER: &str = "// No nodes found for this profile.";
pub const PROFILE_NOT_FOUND: &str = "Profile not found";

const TEXT_PLAIN: &str = "text/plain; charset=utf-8";

#[derive(Error, Debug)]
pub enum SubscribeError {
    #[error("Storage error: {0}")]
    Storage(#[from] KvError),

    #[error("Compile error: {0}")]
    Compile(#[from] CompileError),
}

/// Result of a subscription request, ready to be written out by a server
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubscriptionResult {
    pub status: u16,
    pub headers: Vec<(String, String)>,
    pub body: Vec<u8>,
}

impl SubscriptionResult {
    fn text(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            headers: vec![("Content-Type".to_string(), TEXT_PLAIN.to_string())],
            body: body.into().into_bytes(),
        }
    }

    pub fn not_found() -> Self {
        Self::text(404, PROFILE_NOT_FOUND)
    }

    pub fn no_nodes() -> Self {
        Self::text(200, NO_NODES_PLACEHOLDER)
    }

    pub fn failed(err: &SubscribeError) -> Self {
        Self::text(500, format!("Backend Error: {}", err))
    }

    /// A locally compiled configuration offered as a download named after the profile.
    pub fn config(profile_name: &str, config: CompiledConfig) -> Self {
        let disposition = format!(
            "attachment; filename=\"{}.{}\"",
            url_encode(profile_name),
            config.file_extension
        );
        Self {
            status: 200,
            headers: vec![
                ("Content-Type".to_string(), config.content_type.to_string()),
                ("Content-Disposition".to_string(), disposition),
            ],
            body: config.body.into_bytes(),
        }
    }

    /// The external converter's response, minus connection-level headers.
    pub fn proxied(response: HttpResponse) -> Self {
        Self {
            status: response.status,
            headers: response
                .headers
                .into_iter()
                .filter(|(name, _)| !is_hop_by_hop(name))
                .collect(),
            body: response.body,
        }
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }

    pub fn text_body(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }
}

/// Looks up a stored profile by id.
pub async fn find_profile<K: KvStore>(
    store: &K,
    profiles_key: &str,
    profile_id: &str,
) -> Result<Option<ProfileRecord>, KvError> {
    let profiles: Vec<ProfileRecord> = get_json(store, profiles_key).await?.unwrap_or_default();
    Ok(profiles.into_iter().find(|profile| profile.id == profile_id))
}

async fn subscribe<K: KvStore, H: HttpClient>(
    state: &AppState<K, H>,
    profile_id: &str,
    request_headers: &[(String, String)],
) -> Result<SubscriptionResult, SubscribeError> {
    let settings = &state.config;

    let Some(profile) = find_profile(&state.store, &settings.profiles_key, profile_id).await?
    else {
        warn!("Profile not found: {}", profile_id);
        return Ok(SubscriptionResult::not_found());
    };

    let cache = SubscriptionCache::new(
        &state.store,
        &state.http,
        &settings.user_agent,
        settings.cache_ttl(),
    );
    let resolver = NodeResolver::new(&state.store, cache, &settings.nodes_key);
    let nodes = resolver.resolve(&profile).await?;
    if nodes.is_empty() {
        info!("Profile {} has no nodes", profile.id);
        return Ok(SubscriptionResult::no_nodes());
    }

    let compiler = ConfigCompiler::new(&state.rule_sets, &state.http, &settings.subconverter_host);
    let result = match compiler.compile(&nodes, &profile, request_headers).await? {
        Compiled::Config(config) => SubscriptionResult::config(&profile.name, config),
        Compiled::Delegated(response) => SubscriptionResult::proxied(response),
    };
    Ok(result)
}

/// Compiles the subscription of profile `profile_id`.
///
/// Never fails: a missing profile is a 404, a profile without nodes a
/// placeholder, and any unexpected error a 500 carrying its description.
pub async fn generate_subscription<K: KvStore, H: HttpClient>(
    state: &AppState<K, H>,
    profile_id: &str,
    request_headers: &[(String, String)],
) -> SubscriptionResult {
    match subscribe(state, profile_id, request_headers).await {
        Ok(result) => result,
        Err(e) => {
            error!("Subscription generation failed for {}: {}", profile_id, e);
            SubscriptionResult::failed(&e)
        }
    }
}

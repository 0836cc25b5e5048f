use std::time::Duration;

use log::{debug, warn};

use crate::utils::base64::decode_subscription_body;
use crate::utils::http::{FetchError, HttpClient, HttpResponse};
use crate::vfs::KvStore;

/// Key prefix of cached subscription bodies
pub const SUB_CACHE_PREFIX: &str = "sub-cache:";

/// Default lifetime of a cached subscription body
pub const DEFAULT_CACHE_TTL: Duration = Duration::from_secs(3600);

pub fn cache_key(url: &str) -> String {
    format!("{}{}", SUB_CACHE_PREFIX, url)
}

/// Read-through / write-through cache of decoded subscription bodies.
///
/// Concurrent misses on the same URL are not coalesced; each fetches and the
/// last write wins.
pub struct SubscriptionCache<'a, K, H> {
    store: &'a K,
    http: &'a H,
    user_agent: &'a str,
    ttl: Duration,
}

impl<'a, K: KvStore, H: HttpClient> SubscriptionCache<'a, K, H> {
    pub fn new(store: &'a K, http: &'a H, user_agent: &'a str, ttl: Duration) -> Self {
        Self {
            store,
            http,
            user_agent,
            ttl,
        }
    }

    /// Returns the decoded body of the subscription at `url`, fetching and
    /// caching it on a miss. `None` when the fetch fails or the remote
    /// answers with a non-success status.
    pub async fn get_or_fetch(&self, url: &str) -> Option<String> {
        let key = cache_key(url);

        match self.store.get(&key).await {
            Ok(Some(cached)) => {
                debug!("Subscription cache hit: {}", url);
                return Some(cached);
            }
            Ok(None) => debug!("Subscription cache miss: {}", url),
            Err(e) => warn!("Subscription cache read failed for {}: {}", url, e),
        }

        let response = match self.fetch(url).await {
            Ok(response) => response,
            Err(e) => {
                warn!("Cannot download subscription {}: {}", url, e);
                return None;
            }
        };

        let body = decode_subscription_body(&response.text());
        if let Err(e) = self.store.put(&key, body.clone(), Some(self.ttl)).await {
            warn!("Subscription cache write failed for {}: {}", url, e);
        }
        Some(body)
    }

    async fn fetch(&self, url: &str) -> Result<HttpResponse, FetchError> {
        let headers = [("User-Agent".to_string(), self.user_agent.to_string())];
        let response = self.http.get(url, &headers).await?;
        if !response.is_success() {
            return Err(FetchError::Status(response.status));
        }
        Ok(response)
    }
}

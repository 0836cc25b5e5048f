use std::collections::HashSet;

use futures::future::join_all;
use log::{debug, info};

use crate::models::{NodeRecord, ProfileRecord, ResolvedNode};
use crate::parser::sub_cache::SubscriptionCache;
use crate::utils::http::HttpClient;
use crate::vfs::{get_json, KvError, KvStore};

/// Expands a profile's node selection into a flat list of concrete nodes.
pub struct NodeResolver<'a, K, H> {
    store: &'a K,
    cache: SubscriptionCache<'a, K, H>,
    nodes_key: &'a str,
}

impl<'a, K: KvStore, H: HttpClient> NodeResolver<'a, K, H> {
    pub fn new(store: &'a K, cache: SubscriptionCache<'a, K, H>, nodes_key: &'a str) -> Self {
        Self {
            store,
            cache,
            nodes_key,
        }
    }

    /// Loads the stored nodes selected by `profile`, in storage order.
    pub async fn selected_nodes(&self, profile: &ProfileRecord) -> Result<Vec<NodeRecord>, KvError> {
        let all_nodes: Vec<NodeRecord> = get_json(self.store, self.nodes_key)
            .await?
            .unwrap_or_default();
        let wanted: HashSet<&str> = profile.node_ids.iter().map(String::as_str).collect();

        Ok(all_nodes
            .into_iter()
            .filter(|node| wanted.contains(node.id.as_str()))
            .collect())
    }

    /// Resolves every selected node concurrently.
    ///
    /// Subscription nodes contribute one entry per non-empty line of their
    /// body; an unreachable subscription contributes nothing. The result
    /// keeps the storage order of the selected nodes.
    pub async fn resolve(&self, profile: &ProfileRecord) -> Result<Vec<ResolvedNode>, KvError> {
        let nodes = self.selected_nodes(profile).await?;
        debug!(
            "Resolving {} node(s) for profile {}",
            nodes.len(),
            profile.id
        );

        let contributions = join_all(nodes.iter().map(|node| self.resolve_node(node))).await;
        let resolved: Vec<ResolvedNode> = contributions.into_iter().flatten().collect();

        info!(
            "Profile {} resolved to {} node(s)",
            profile.id,
            resolved.len()
        );
        Ok(resolved)
    }

    async fn resolve_node(&self, node: &NodeRecord) -> Vec<ResolvedNode> {
        if !node.is_subscription() {
            return vec![ResolvedNode::from(node)];
        }

        match self.cache.get_or_fetch(&node.url).await {
            Some(body) => split_subscription(&node.name, &body),
            None => Vec::new(),
        }
    }
}

/// Splits a decoded subscription body into named nodes, one per non-empty
/// line. Indices count only the kept lines.
pub fn split_subscription(name: &str, body: &str) -> Vec<ResolvedNode> {
    body.split('\n')
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .enumerate()
        .map(|(index, line)| ResolvedNode::new(format!("{}-{}", name, index), line))
        .collect()
}

//! Stored node and profile records, as written by the management layer.

use serde::{Deserialize, Serialize};

/// A user-managed entry: either a single share-link or a subscription URL.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NodeRecord {
    pub id: String,
    #[serde(default)]
    pub name: String,
    pub url: String,
}

impl NodeRecord {
    pub fn new(id: impl Into<String>, name: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            url: url.into(),
        }
    }

    /// Whether this node points at a remote subscription feed rather than a proxy.
    pub fn is_subscription(&self) -> bool {
        is_subscription_url(&self.url)
    }
}

pub fn is_subscription_url(url: &str) -> bool {
    let url = url.trim_start();
    let prefix = |p: &str| {
        url.get(..p.len())
            .is_some_and(|head| head.eq_ignore_ascii_case(p))
    };
    prefix("http://") || prefix("https://")
}

/// A named group of nodes compiled into one client configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileRecord {
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub node_ids: Vec<String>,
    #[serde(default)]
    pub selected_rule_sets: Vec<String>,
    #[serde(default)]
    pub user_custom_rules: Vec<String>,
    #[serde(default = "default_output_format")]
    pub output_format: String,
}

fn default_output_format() -> String {
    "clash".to_string()
}

impl Default for ProfileRecord {
    fn default() -> Self {
        Self {
            id: String::new(),
            name: String::new(),
            node_ids: Vec::new(),
            selected_rule_sets: Vec::new(),
            user_custom_rules: Vec::new(),
            output_format: default_output_format(),
        }
    }
}

/// A concrete proxy entry produced during resolution. Never persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedNode {
    pub name: String,
    pub url: String,
}

impl ResolvedNode {
    pub fn new(name: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            url: url.into(),
        }
    }
}

impl From<&NodeRecord> for ResolvedNode {
    fn from(node: &NodeRecord) -> Self {
        Self {
            name: node.name.clone(),
            url: node.url.clone(),
        }
    }
}

/// Contents of a seed data file: the node and profile collections.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SeedData {
    #[serde(default)]
    pub nodes: Vec<NodeRecord>,
    #[serde(default)]
    pub profiles: Vec<ProfileRecord>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_profile_deserializes_from_camel_case() {
        let json = r#"{
            "id": "p1",
            "name": "Home",
            "nodeIds": ["a", "b"],
            "selectedRuleSets": ["Ads"],
            "userCustomRules": ["DOMAIN,example.com,DIRECT"],
            "outputFormat": "Clash"
        }"#;
        let profile: ProfileRecord = serde_json::from_str(json).unwrap();
        assert_eq!(profile.node_ids, vec!["a", "b"]);
        assert_eq!(profile.selected_rule_sets, vec!["Ads"]);
        assert_eq!(profile.user_custom_rules.len(), 1);
        assert_eq!(profile.output_format, "Clash");
    }

    #[test]
    fn test_profile_missing_lists_default_to_empty() {
        let profile: ProfileRecord = serde_json::from_str(r#"{"id": "p2"}"#).unwrap();
        assert!(profile.node_ids.is_empty());
        assert!(profile.selected_rule_sets.is_empty());
        assert_eq!(profile.output_format, "clash");
    }

    #[test]
    fn test_subscription_detection() {
        assert!(NodeRecord::new("1", "sub", "https://example.com/sub").is_subscription());
        assert!(NodeRecord::new("2", "sub", "HTTP://example.com/sub").is_subscription());
        assert!(!NodeRecord::new("3", "ss", "ss://abc@host:1").is_subscription());
        assert!(!is_subscription_url("httpfoo://x"));
    }
}

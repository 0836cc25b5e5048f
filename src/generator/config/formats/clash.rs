use std::collections::BTreeMap;

use log::debug;

use crate::generator::config::group::group_generate;
use crate::generator::exports::proxy_to_clash::proxy_to_clash;
use crate::generator::yaml::clash::{ClashProxy, ClashYamlOutput, RuleProvider};
use crate::models::{ProfileRecord, ResolvedNode};
use crate::parser::explodes::explode_node;
use crate::rulesets::RuleSetTable;

const ACL4SSR_BASE: &str = "https://cdn.jsdelivr.net/gh/ACL4SSR/ACL4SSR@latest/Clash";

fn rule_providers() -> BTreeMap<String, RuleProvider> {
    [
        ("ads", "BanAD"),
        ("apple", "Apple"),
        ("microsoft", "Microsoft"),
    ]
    .into_iter()
    .map(|(id, list)| {
        (
            id.to_string(),
            RuleProvider::http_domain(
                &format!("{}/{}.list", ACL4SSR_BASE, list),
                &format!("./ruleset/{}.list", id),
            ),
        )
    })
    .collect()
}

/// Builds the Clash document for `nodes`.
///
/// Nodes that do not parse, or whose protocol Clash cannot express, are
/// left out of both `proxies` and the proxy groups.
pub fn proxy_to_clash_yaml(
    nodes: &[ResolvedNode],
    profile: &ProfileRecord,
    rule_sets: &RuleSetTable,
) -> ClashYamlOutput {
    let proxies: Vec<ClashProxy> = nodes
        .iter()
        .filter_map(explode_node)
        .filter_map(|node| proxy_to_clash(&node))
        .collect();
    debug!(
        "Clash: {} of {} node(s) projected",
        proxies.len(),
        nodes.len()
    );
    let proxy_names: Vec<String> = proxies.iter().map(|p| p.name().to_string()).collect();

    ClashYamlOutput {
        port: 7890,
        socks_port: 7891,
        allow_lan: true,
        mode: "rule".to_string(),
        log_level: "info".to_string(),
        external_controller: "127.0.0.1:9090".to_string(),
        proxy_groups: group_generate(&proxy_names),
        proxies,
        rule_providers: rule_providers(),
        rules: rule_sets.assemble(&profile.user_custom_rules, &profile.selected_rule_sets),
    }
}

/// Convert resolved nodes to a Clash YAML configuration
pub fn proxy_to_clash_string(
    nodes: &[ResolvedNode],
    profile: &ProfileRecord,
    rule_sets: &RuleSetTable,
) -> Result<String, serde_yaml::Error> {
    serde_yaml::to_string(&proxy_to_clash_yaml(nodes, profile, rule_sets))
}

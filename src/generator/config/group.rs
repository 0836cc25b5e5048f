use crate::generator::yaml::clash::ClashProxyGroup;

/// Name of the main selector group that proxied rules target.
pub const PROXY_GROUP: &str = "🚀 PROXY";
/// Name of the group listing every proxy.
pub const SELECT_GROUP: &str = "SELECT";

/// Generates the fixed proxy-group topology around `proxy_names`.
///
/// Only `🚀 PROXY` and `SELECT` list the proxies themselves; every other
/// group chooses between built-in policies and `🚀 PROXY`.
pub fn group_generate(proxy_names: &[String]) -> Vec<ClashProxyGroup> {
    let main = ["SELECT", "DIRECT"]
        .into_iter()
        .map(str::to_string)
        .chain(proxy_names.iter().cloned());
    let select = proxy_names
        .iter()
        .cloned()
        .chain(std::iter::once("DIRECT".to_string()));

    vec![
        ClashProxyGroup::select(PROXY_GROUP, main),
        ClashProxyGroup::select(SELECT_GROUP, select),
        ClashProxyGroup::select("🍎 Apple", ["DIRECT", PROXY_GROUP]),
        ClashProxyGroup::select("Ⓜ️ Microsoft", ["DIRECT", PROXY_GROUP]),
        ClashProxyGroup::select("📲 Telegram", [PROXY_GROUP, "DIRECT"]),
        ClashProxyGroup::select("谷歌Goolge", [PROXY_GROUP, "DIRECT"]),
        ClashProxyGroup::select("国外网站", [PROXY_GROUP, "DIRECT"]),
        ClashProxyGroup::select("广告拦截", ["REJECT", "DIRECT"]),
        ClashProxyGroup::select("漏网之鱼", [PROXY_GROUP, "DIRECT"]),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_group_topology() {
        let names = vec!["a".to_string(), "b".to_string()];
        let groups = group_generate(&names);

        assert_eq!(groups.len(), 9);
        assert_eq!(groups[0].name, PROXY_GROUP);
        assert_eq!(groups[0].proxies, ["SELECT", "DIRECT", "a", "b"]);
        assert_eq!(groups[1].proxies, ["a", "b", "DIRECT"]);
        assert!(groups.iter().all(|g| g.group_type == "select"));
        assert_eq!(groups[8].name, "漏网之鱼");
    }

    #[test]
    fn test_group_topology_without_proxies() {
        let groups = group_generate(&[]);
        assert_eq!(groups[0].proxies, ["SELECT", "DIRECT"]);
        assert_eq!(groups[1].proxies, ["DIRECT"]);
    }
}

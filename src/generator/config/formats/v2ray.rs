use log::debug;
use serde_json::{json, Value};

use crate::generator::exports::proxy_to_v2ray::proxy_to_v2ray;
use crate::models::ResolvedNode;
use crate::parser::explodes::explode_node;

/// Builds the V2Ray client document for `nodes`.
///
/// The catch-all routing rule targets the first projected outbound, or
/// `direct` when nothing could be projected.
pub fn proxy_to_v2ray_json(nodes: &[ResolvedNode]) -> Value {
    let projected: Vec<Value> = nodes
        .iter()
        .filter_map(explode_node)
        .filter_map(|node| proxy_to_v2ray(&node))
        .collect();
    debug!(
        "V2Ray: {} of {} node(s) projected",
        projected.len(),
        nodes.len()
    );

    let default_tag = projected
        .first()
        .and_then(|outbound| outbound["tag"].as_str())
        .unwrap_or("direct")
        .to_string();

    let mut outbounds = vec![
        json!({ "tag": "direct", "protocol": "freedom", "settings": {} }),
        json!({ "tag": "block", "protocol": "blackhole", "settings": {} }),
    ];
    outbounds.extend(projected);

    json!({
        "inbounds": [{
            "port": 10808,
            "listen": "127.0.0.1",
            "protocol": "socks",
            "settings": { "auth": "noauth", "udp": true }
        }],
        "outbounds": outbounds,
        "routing": {
            "domainStrategy": "AsIs",
            "rules": [
                { "type": "field", "ip": ["geoip:private"], "outboundTag": "direct" },
                { "type": "field", "domain": ["geosite:cn"], "outboundTag": "direct" },
                { "type": "field", "ip": ["geoip:cn"], "outboundTag": "direct" },
                { "type": "field", "port": "0-65535", "outboundTag": default_tag }
            ]
        }
    })
}

/// Convert resolved nodes to a pretty-printed V2Ray JSON configuration
pub fn proxy_to_v2ray_string(nodes: &[ResolvedNode]) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(&proxy_to_v2ray_json(nodes))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_outbounds_routes_to_direct() {
        let config = proxy_to_v2ray_json(&[ResolvedNode::new("bad", "nope://x")]);

        assert_eq!(config["outbounds"].as_array().unwrap().len(), 2);
        assert_eq!(config["routing"]["rules"][3]["outboundTag"], "direct");
        assert_eq!(config["inbounds"][0]["port"], 10808);
        assert_eq!(config["inbounds"][0]["settings"]["auth"], "noauth");
    }

    #[test]
    fn test_catch_all_targets_first_outbound() {
        let config = proxy_to_v2ray_json(&[
            ResolvedNode::new("first", "trojan://pw@a.example.com:443"),
            ResolvedNode::new("second", "trojan://pw@b.example.com:443"),
        ]);

        let outbounds = config["outbounds"].as_array().unwrap();
        assert_eq!(outbounds.len(), 4);
        assert_eq!(outbounds[0]["tag"], "direct");
        assert_eq!(outbounds[1]["tag"], "block");
        assert_eq!(outbounds[2]["tag"], "first");
        assert_eq!(config["routing"]["rules"][3]["outboundTag"], "first");
        assert_eq!(config["routing"]["rules"][3]["port"], "0-65535");
    }

    #[test]
    fn test_output_is_pretty_json() {
        let text = proxy_to_v2ray_string(&[]).unwrap();
        assert!(text.starts_with("{\n  "));
        let parsed: Value = serde_json::from_str(&text).unwrap();
        assert_eq!(parsed["routing"]["domainStrategy"], "AsIs");
    }
}

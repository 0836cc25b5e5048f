use serde_json::{json, Map, Value};

use crate::models::{ProtocolKind, ProxyAuth, ProxyDescriptor};

fn stream_settings(node: &ProxyDescriptor) -> Value {
    let mut stream = Map::new();
    stream.insert("network".to_string(), json!(node.transport.as_str()));
    stream.insert(
        "security".to_string(),
        json!(if node.tls { "tls" } else { "none" }),
    );
    if node.tls {
        stream.insert(
            "tlsSettings".to_string(),
            json!({ "serverName": node.tls_server_name() }),
        );
    }
    if node.is_ws() {
        let mut ws = json!({ "path": node.ws_path.as_deref().unwrap_or("/") });
        if let Some(host) = node.ws_host.as_deref().filter(|h| !h.is_empty()) {
            ws["headers"] = json!({ "Host": host });
        }
        stream.insert("wsSettings".to_string(), ws);
    }
    Value::Object(stream)
}

/// Projects a descriptor onto a V2Ray outbound object tagged with its name.
///
/// Returns `None` under the same conditions as the Clash projection.
pub fn proxy_to_v2ray(node: &ProxyDescriptor) -> Option<Value> {
    let (protocol, settings) = match (node.kind, &node.auth) {
        (
            ProtocolKind::VMess,
            ProxyAuth::Uuid {
                uuid,
                alter_id,
                cipher,
            },
        ) => (
            "vmess",
            json!({
                "vnext": [{
                    "address": node.server,
                    "port": node.port,
                    "users": [{ "id": uuid, "alterId": alter_id, "security": cipher }]
                }]
            }),
        ),
        (ProtocolKind::Vless, ProxyAuth::Uuid { uuid, cipher, .. }) => (
            "vless",
            json!({
                "vnext": [{
                    "address": node.server,
                    "port": node.port,
                    "users": [{ "id": uuid, "encryption": cipher }]
                }]
            }),
        ),
        (ProtocolKind::Trojan, ProxyAuth::Password { password }) => (
            "trojan",
            json!({
                "servers": [{ "address": node.server, "port": node.port, "password": password }]
            }),
        ),
        (ProtocolKind::Shadowsocks, ProxyAuth::Cipher { cipher, password }) => (
            "shadowsocks",
            json!({
                "servers": [{
                    "address": node.server,
                    "port": node.port,
                    "method": cipher,
                    "password": password
                }]
            }),
        ),
        _ => return None,
    };

    Some(json!({
        "tag": node.name,
        "protocol": protocol,
        "settings": settings,
        "streamSettings": stream_settings(node),
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::explode;

    #[test]
    fn test_trojan_outbound() {
        let node = explode("trojan://pw@jp.example.com:443?sni=edge.example.com#JP").unwrap();
        let outbound = proxy_to_v2ray(&node).unwrap();

        assert_eq!(outbound["tag"], "JP");
        assert_eq!(outbound["protocol"], "trojan");
        assert_eq!(outbound["settings"]["servers"][0]["password"], "pw");
        assert_eq!(outbound["settings"]["servers"][0]["port"], 443);
        assert_eq!(outbound["streamSettings"]["security"], "tls");
        assert_eq!(
            outbound["streamSettings"]["tlsSettings"]["serverName"],
            "edge.example.com"
        );
        assert!(outbound["streamSettings"].get("wsSettings").is_none());
    }

    #[test]
    fn test_shadowsocks_outbound_has_no_tls() {
        let link = format!(
            "ss://{}@1.2.3.4:8388#SS",
            crate::utils::base64::base64_encode("aes-128-gcm:pw")
        );
        let outbound = proxy_to_v2ray(&explode(&link).unwrap()).unwrap();

        assert_eq!(outbound["protocol"], "shadowsocks");
        assert_eq!(outbound["settings"]["servers"][0]["method"], "aes-128-gcm");
        assert_eq!(outbound["streamSettings"]["network"], "tcp");
        assert_eq!(outbound["streamSettings"]["security"], "none");
        assert!(outbound["streamSettings"].get("tlsSettings").is_none());
    }

    #[test]
    fn test_vless_ws_outbound() {
        let node = explode("vless://id@sg.example.com:443?security=tls&path=%2Fv#SG").unwrap();
        let outbound = proxy_to_v2ray(&node).unwrap();

        assert_eq!(outbound["settings"]["vnext"][0]["users"][0]["encryption"], "none");
        assert_eq!(outbound["streamSettings"]["wsSettings"]["path"], "/v");
        assert_eq!(
            outbound["streamSettings"]["wsSettings"]["headers"]["Host"],
            "sg.example.com"
        );
    }

    #[test]
    fn test_unsupported_is_absent() {
        let mut node = explode("trojan://pw@jp.example.com:443").unwrap();
        node.kind = ProtocolKind::Unsupported;
        assert!(proxy_to_v2ray(&node).is_none());
    }
}

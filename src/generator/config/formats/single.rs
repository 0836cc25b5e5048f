use serde_json::{json, Map, Value};

use crate::models::{ProtocolKind, ProxyAuth, ProxyDescriptor};
use crate::utils::base64::base64_encode;
use crate::utils::url::{host_port, url_encode};

fn query_string(params: &[(&str, &str)]) -> String {
    params
        .iter()
        .map(|(key, value)| format!("{}={}", key, url_encode(value)))
        .collect::<Vec<_>>()
        .join("&")
}

fn vmess_uri(node: &ProxyDescriptor, uuid: &str, alter_id: u16, cipher: &str) -> String {
    let mut fields = Map::new();
    fields.insert("v".to_string(), json!("2"));
    fields.insert("ps".to_string(), json!(node.name));
    fields.insert("add".to_string(), json!(node.server));
    fields.insert("port".to_string(), json!(node.port.to_string()));
    fields.insert("id".to_string(), json!(uuid));
    fields.insert("aid".to_string(), json!(alter_id.to_string()));
    fields.insert("scy".to_string(), json!(cipher));
    fields.insert("net".to_string(), json!(node.transport.as_str()));
    fields.insert("type".to_string(), json!("none"));
    fields.insert("tls".to_string(), json!(if node.tls { "tls" } else { "" }));
    if let Some(path) = &node.ws_path {
        fields.insert("path".to_string(), json!(path));
    }
    if let Some(host) = &node.ws_host {
        fields.insert("host".to_string(), json!(host));
    }
    if let Some(sni) = &node.server_name {
        fields.insert("sni".to_string(), json!(sni));
    }
    format!("vmess://{}", base64_encode(&Value::Object(fields).to_string()))
}

fn vless_uri(node: &ProxyDescriptor, uuid: &str, encryption: &str) -> String {
    let security = if node.tls { "tls" } else { "none" };
    let mut params = vec![
        ("encryption", encryption),
        ("security", security),
        ("type", node.transport.as_str()),
        ("sni", node.tls_server_name()),
    ];
    if let Some(path) = &node.ws_path {
        params.push(("path", path));
    }
    format!(
        "vless://{}@{}?{}#{}",
        url_encode(uuid),
        host_port(&node.server, node.port),
        query_string(&params),
        url_encode(&node.name)
    )
}

fn trojan_uri(node: &ProxyDescriptor, password: &str) -> String {
    let mut params = vec![
        ("sni", node.tls_server_name()),
        ("type", node.transport.as_str()),
    ];
    if let Some(path) = &node.ws_path {
        params.push(("path", path));
    }
    if let Some(host) = &node.ws_host {
        params.push(("host", host));
    }
    format!(
        "trojan://{}@{}?{}#{}",
        url_encode(password),
        host_port(&node.server, node.port),
        query_string(&params),
        url_encode(&node.name)
    )
}

fn ss_uri(node: &ProxyDescriptor, cipher: &str, password: &str) -> String {
    // Format: ss://BASE64(method:password)@server:port#remark
    format!(
        "ss://{}@{}#{}",
        base64_encode(&format!("{}:{}", cipher, password)),
        host_port(&node.server, node.port),
        url_encode(&node.name)
    )
}

/// Convert a descriptor back to its share-link.
///
/// Parsing the produced link yields the same descriptor. `None` for
/// unsupported descriptors.
pub fn proxy_to_single(node: &ProxyDescriptor) -> Option<String> {
    match (node.kind, &node.auth) {
        (
            ProtocolKind::VMess,
            ProxyAuth::Uuid {
                uuid,
                alter_id,
                cipher,
            },
        ) => Some(vmess_uri(node, uuid, *alter_id, cipher)),
        (ProtocolKind::Vless, ProxyAuth::Uuid { uuid, cipher, .. }) => {
            Some(vless_uri(node, uuid, cipher))
        }
        (ProtocolKind::Trojan, ProxyAuth::Password { password }) => {
            Some(trojan_uri(node, password))
        }
        (ProtocolKind::Shadowsocks, ProxyAuth::Cipher { cipher, password }) => {
            Some(ss_uri(node, cipher, password))
        }
        _ => None,
    }
}

use std::collections::HashMap;

use url::Url;

use super::common::{pick_name, Exploded};
use crate::models::{ProtocolKind, ProxyAuth, ProxyDescriptor, Transport};
use crate::utils::url::{strip_ipv6_brackets, url_decode};

/// Parse a VLESS link into a descriptor
///
/// Format: `vless://uuid@host:port?type=ws&security=tls&sni=...&path=...#remark`.
/// The transport defaults to ws and the path to `/`.
pub(crate) fn explode_vless(vless: &str) -> Option<Exploded> {
    let url = Url::parse(vless).ok()?;

    let uuid = url_decode(url.username());
    if uuid.is_empty() {
        return None;
    }
    let server = url
        .host_str()
        .map(strip_ipv6_brackets)
        .filter(|h| !h.is_empty())?
        .to_string();
    let port = url.port().filter(|p| *p != 0)?;

    let params: HashMap<String, String> = url.query_pairs().into_owned().collect();
    let param = |key: &str| params.get(key).filter(|v| !v.is_empty()).cloned();

    let transport = Transport::from_network(param("type").as_deref().unwrap_or("ws"));
    let tls = param("security").is_some_and(|s| s == "tls");
    let server_name = param("sni").unwrap_or_else(|| server.clone());

    let (ws_path, ws_host) = if transport == Transport::Ws {
        (
            Some(param("path").unwrap_or_else(|| "/".to_string())),
            Some(server_name.clone()),
        )
    } else {
        (None, None)
    };

    let fragment = url
        .fragment()
        .map(|f| url_decode(f).trim().to_string())
        .filter(|f| !f.is_empty());
    let (name, name_source) = pick_name(None, fragment, &server, port);

    Some(Exploded {
        descriptor: ProxyDescriptor {
            name,
            kind: ProtocolKind::Vless,
            server,
            port,
            transport,
            tls,
            server_name: Some(server_name),
            auth: ProxyAuth::Uuid {
                uuid,
                alter_id: 0,
                cipher: param("encryption").unwrap_or_else(|| "none".to_string()),
            },
            ws_path,
            ws_host,
        },
        name_source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_explode_vless_ws_tls() {
        let link = "vless://b831381d-6324-4d53-ad4f-8cda48b30811@sg.example.com:443?type=ws&security=tls&sni=cdn.example.com&path=%2Fvless#SG%20VLESS";
        let node = explode_vless(link).unwrap().descriptor;

        assert_eq!(node.kind, ProtocolKind::Vless);
        assert_eq!(node.name, "SG VLESS");
        assert_eq!(node.server, "sg.example.com");
        assert_eq!(node.port, 443);
        assert!(node.tls);
        assert_eq!(node.transport, Transport::Ws);
        assert_eq!(node.server_name.as_deref(), Some("cdn.example.com"));
        assert_eq!(node.ws_path.as_deref(), Some("/vless"));
        assert_eq!(node.ws_host.as_deref(), Some("cdn.example.com"));
    }

    #[test]
    fn test_explode_vless_defaults() {
        let link = "vless://b831381d-6324-4d53-ad4f-8cda48b30811@1.2.3.4:8443";
        let node = explode_vless(link).unwrap().descriptor;

        // transport defaults to ws with a root path, sni to the hostname
        assert_eq!(node.transport, Transport::Ws);
        assert!(!node.tls);
        assert_eq!(node.server_name.as_deref(), Some("1.2.3.4"));
        assert_eq!(node.ws_path.as_deref(), Some("/"));
        assert_eq!(node.ws_host.as_deref(), Some("1.2.3.4"));
        assert_eq!(node.name, "1.2.3.4:8443");
    }

    #[test]
    fn test_explode_vless_tcp_has_no_ws_fields() {
        let link = "vless://uuid@example.com:443?type=tcp&security=tls";
        let node = explode_vless(link).unwrap().descriptor;
        assert_eq!(node.transport, Transport::Tcp);
        assert_eq!(node.ws_path, None);
        assert_eq!(node.ws_host, None);
    }

    #[test]
    fn test_explode_vless_requires_uuid_and_port() {
        assert!(explode_vless("vless://example.com:443").is_none());
        assert!(explode_vless("vless://uuid@example.com").is_none());
    }
}

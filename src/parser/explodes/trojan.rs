use std::collections::HashMap;

use url::Url;

use super::common::{pick_name, Exploded};
use crate::models::{ProtocolKind, ProxyAuth, ProxyDescriptor, Transport};
use crate::utils::url::{strip_ipv6_brackets, url_decode};

/// Parse a Trojan link into a descriptor
///
/// Format: `trojan://password@host[:port]?sni=...[&type=ws&path=...&host=...]#remark`.
/// TLS is always enabled; the port defaults to 443.
pub(crate) fn explode_trojan(trojan: &str) -> Option<Exploded> {
    let url = Url::parse(trojan).ok()?;

    let password = url_decode(url.username());
    if password.is_empty() {
        return None;
    }
    let server = url
        .host_str()
        .map(strip_ipv6_brackets)
        .filter(|h| !h.is_empty())?
        .to_string();
    let port = url.port().unwrap_or(443);
    if port == 0 {
        return None;
    }

    let params: HashMap<String, String> = url.query_pairs().into_owned().collect();
    let param = |key: &str| params.get(key).filter(|v| !v.is_empty()).cloned();

    // Check for both "sni" and "peer" parameters
    let server_name = param("sni")
        .or_else(|| param("peer"))
        .unwrap_or_else(|| server.clone());

    let transport = Transport::from_network(param("type").as_deref().unwrap_or("tcp"));
    let (ws_path, ws_host) = if transport == Transport::Ws {
        (
            Some(param("path").unwrap_or_else(|| "/".to_string())),
            Some(param("host").unwrap_or_else(|| server_name.clone())),
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
            kind: ProtocolKind::Trojan,
            server,
            port,
            transport,
            tls: true,
            server_name: Some(server_name),
            auth: ProxyAuth::Password { password },
            ws_path,
            ws_host,
        },
        name_source,
    })
}

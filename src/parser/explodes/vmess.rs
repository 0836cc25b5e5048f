use serde_json::Value;

use super::common::{pick_name, Exploded};
use crate::models::{ProtocolKind, ProxyAuth, ProxyDescriptor, Transport};
use crate::utils::base64::base64_decode;
use crate::utils::url::{split_fragment, strip_ipv6_brackets};

/// Reads a field that clients write either as a string or as a number.
fn json_field(json: &Value, key: &str) -> Option<String> {
    match json.get(key)? {
        Value::String(s) => {
            let s = s.trim();
            (!s.is_empty()).then(|| s.to_string())
        }
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

/// Parse a VMess link into a descriptor
///
/// Format: `vmess://BASE64(json)`, where the JSON carries `add`, `port` and
/// `id` (required) plus the optional `aid`, `scy`, `tls`, `net`, `path`,
/// `host`, `sni` and `ps` fields.
pub(crate) fn explode_vmess(vmess: &str) -> Option<Exploded> {
    let encoded = vmess.get("vmess://".len()..)?;
    let (encoded, fragment) = split_fragment(encoded);

    let decoded = base64_decode(encoded)?;
    let json: Value = serde_json::from_str(&decoded).ok()?;

    let server = strip_ipv6_brackets(&json_field(&json, "add")?).to_string();
    let port = json_field(&json, "port")?.parse::<u16>().ok()?;
    let uuid = json_field(&json, "id")?;
    if port == 0 {
        return None;
    }

    let alter_id = json_field(&json, "aid")
        .and_then(|aid| aid.parse::<u16>().ok())
        .unwrap_or(0);
    let cipher = json_field(&json, "scy").unwrap_or_else(|| "auto".to_string());
    let tls = json_field(&json, "tls").is_some_and(|tls| tls == "tls");
    let transport = Transport::from_network(&json_field(&json, "net").unwrap_or_default());

    let (ws_path, ws_host) = if transport == Transport::Ws {
        (json_field(&json, "path"), json_field(&json, "host"))
    } else {
        (None, None)
    };

    let ps = json_field(&json, "ps");
    let (name, name_source) = pick_name(ps.as_deref(), fragment, &server, port);

    Some(Exploded {
        descriptor: ProxyDescriptor {
            name,
            kind: ProtocolKind::VMess,
            server,
            port,
            transport,
            tls,
            server_name: json_field(&json, "sni"),
            auth: ProxyAuth::Uuid {
                uuid,
                alter_id,
                cipher,
            },
            ws_path,
            ws_host,
        },
        name_source,
    })
}

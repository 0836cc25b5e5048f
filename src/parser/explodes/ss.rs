use super::common::{pick_name, split_host_port, Exploded};
use crate::models::{ProtocolKind, ProxyAuth, ProxyDescriptor, Transport};
use crate::utils::base64::base64_decode;
use crate::utils::url::{split_fragment, url_decode};

/// Splits `cipher:password`. The password may itself contain colons.
fn split_credentials(credentials: &str) -> Option<(String, String)> {
    let (cipher, password) = credentials.split_once(':')?;
    if cipher.is_empty() {
        return None;
    }
    Some((cipher.to_string(), password.to_string()))
}

/// Decodes the userinfo of a SIP002 link: Base64 first, then plain percent-encoded.
fn decode_userinfo(userinfo: &str) -> Option<(String, String)> {
    let userinfo = url_decode(userinfo);
    base64_decode(&userinfo)
        .and_then(|decoded| split_credentials(&decoded))
        .or_else(|| split_credentials(&userinfo))
}

/// Parse a Shadowsocks link into a descriptor
///
/// Both encodings are accepted:
/// * SIP002: `ss://BASE64(method:password)@server:port[/?plugin=...]#remark`
/// * Legacy: `ss://BASE64(method:password@server:port)#remark`
pub(crate) fn explode_ss(ss: &str) -> Option<Exploded> {
    let content = ss.get("ss://".len()..)?;
    let (content, fragment) = split_fragment(content);

    // Query parameters (plugins) are not carried into the descriptor
    let content = match content.find('?') {
        Some(pos) => &content[..pos],
        None => content,
    };
    let content = content.trim().trim_end_matches('/');

    let ((cipher, password), (server, port)) = match content.rsplit_once('@') {
        Some((userinfo, server_port)) => (decode_userinfo(userinfo)?, split_host_port(server_port)?),
        None => {
            let decoded = base64_decode(content)?;
            let (credentials, server_port) = decoded.rsplit_once('@')?;
            (split_credentials(credentials)?, split_host_port(server_port)?)
        }
    };

    let (name, name_source) = pick_name(None, fragment, &server, port);

    Some(Exploded {
        descriptor: ProxyDescriptor {
            name,
            kind: ProtocolKind::Shadowsocks,
            server,
            port,
            transport: Transport::Tcp,
            tls: false,
            server_name: None,
            auth: ProxyAuth::Cipher { cipher, password },
            ws_path: None,
            ws_host: None,
        },
        name_source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::base64::base64_encode;

    fn cipher_of(node: &ProxyDescriptor) -> (&str, &str) {
        match &node.auth {
            ProxyAuth::Cipher { cipher, password } => (cipher, password),
            other => panic!("unexpected auth {:?}", other),
        }
    }

    #[test]
    fn test_explode_ss_sip002() {
        // Y2hhY2hhMjAtaWV0Zi1wb2x5MTMwNTpwYXNzd29yZA== is chacha20-ietf-poly1305:password
        let link = "ss://Y2hhY2hhMjAtaWV0Zi1wb2x5MTMwNTpwYXNzd29yZA==@example.com:8388#Test%20Server";
        let node = explode_ss(link).unwrap().descriptor;

        assert_eq!(node.kind, ProtocolKind::Shadowsocks);
        assert_eq!(node.name, "Test Server");
        assert_eq!(node.server, "example.com");
        assert_eq!(node.port, 8388);
        assert_eq!(cipher_of(&node), ("chacha20-ietf-poly1305", "password"));
    }

    #[test]
    fn test_explode_ss_legacy_whole_payload() {
        let link = format!(
            "ss://{}#Legacy",
            base64_encode("aes-256-gcm:secret@10.0.0.1:443")
        );
        let node = explode_ss(&link).unwrap().descriptor;

        assert_eq!(node.name, "Legacy");
        assert_eq!(node.server, "10.0.0.1");
        assert_eq!(node.port, 443);
        assert_eq!(cipher_of(&node), ("aes-256-gcm", "secret"));
    }

    #[test]
    fn test_explode_ss_with_plugin_query() {
        let link = "ss://Y2hhY2hhMjAtaWV0Zi1wb2x5MTMwNTpwYXNzd29yZA==@example.com:8388/?plugin=obfs-local%3Bobfs%3Dhttp#Obfs";
        let node = explode_ss(link).unwrap().descriptor;
        assert_eq!(node.port, 8388);
        assert_eq!(node.name, "Obfs");
    }

    #[test]
    fn test_explode_ss_with_plain_credentials() {
        let node = explode_ss("ss://aes-256-gcm:password123@example.com:8388")
            .unwrap()
            .descriptor;
        assert_eq!(cipher_of(&node), ("aes-256-gcm", "password123"));
    }

    #[test]
    fn test_explode_ss_password_with_at_and_colon() {
        // legacy form, password "p@ss:word"
        let link = format!("ss://{}", base64_encode("aes-128-gcm:p@ss:word@host.net:1234"));
        let node = explode_ss(&link).unwrap().descriptor;
        assert_eq!(node.server, "host.net");
        assert_eq!(cipher_of(&node), ("aes-128-gcm", "p@ss:word"));
    }

    #[test]
    fn test_explode_ss_ipv6() {
        let link = "ss://Y2hhY2hhMjAtaWV0Zi1wb2x5MTMwNTpwYXNzd29yZA==@[2001:db8::1]:8388";
        let node = explode_ss(link).unwrap().descriptor;
        assert_eq!(node.server, "2001:db8::1");
        assert_eq!(node.port, 8388);
        assert_eq!(node.name, "[2001:db8::1]:8388");
    }

    #[test]
    fn test_explode_ss_malformed() {
        assert!(explode_ss("ss://").is_none());
        assert!(explode_ss("ss://%%%@host:1").is_none());
        assert!(explode_ss("ss://Y2hhY2hhMjA=@example.com:notaport").is_none());
    }
}

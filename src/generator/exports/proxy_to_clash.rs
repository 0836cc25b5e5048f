use crate::generator::yaml::clash::{ClashProxy, CommonProxyOptions, WsOptions};
use crate::models::{ProtocolKind, ProxyAuth, ProxyDescriptor};

fn ws_opts(node: &ProxyDescriptor) -> Option<WsOptions> {
    node.is_ws()
        .then(|| WsOptions::new(node.ws_path.as_deref(), node.ws_host.as_deref()))
}

/// Projects a descriptor onto a Clash proxy entry.
///
/// Returns `None` for unsupported descriptors and for credentials that do
/// not match the protocol.
pub fn proxy_to_clash(node: &ProxyDescriptor) -> Option<ClashProxy> {
    let common = CommonProxyOptions::builder(node.name.clone(), node.server.clone(), node.port);

    match (node.kind, &node.auth) {
        (
            ProtocolKind::VMess,
            ProxyAuth::Uuid {
                uuid,
                alter_id,
                cipher,
            },
        ) => Some(ClashProxy::VMess {
            common: common.tls(node.tls).skip_cert_verify(true).build(),
            uuid: uuid.clone(),
            alter_id: *alter_id,
            cipher: cipher.clone(),
            network: Some(node.transport.as_str().to_string()),
            ws_opts: ws_opts(node),
        }),
        (ProtocolKind::Vless, ProxyAuth::Uuid { uuid, .. }) => Some(ClashProxy::Vless {
            common: common.tls(node.tls).skip_cert_verify(true).build(),
            uuid: uuid.clone(),
            network: Some(node.transport.as_str().to_string()),
            servername: Some(node.tls_server_name().to_string()),
            ws_opts: ws_opts(node),
        }),
        (ProtocolKind::Trojan, ProxyAuth::Password { password }) => Some(ClashProxy::Trojan {
            common: common
                .skip_cert_verify(true)
                .sni(node.tls_server_name().to_string())
                .build(),
            password: password.clone(),
            network: node.is_ws().then(|| "ws".to_string()),
            ws_opts: ws_opts(node),
        }),
        (ProtocolKind::Shadowsocks, ProxyAuth::Cipher { cipher, password }) => {
            Some(ClashProxy::Shadowsocks {
                common: common.build(),
                cipher: cipher.clone(),
                password: password.clone(),
            })
        }
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::explode;

    #[test]
    fn test_vmess_ws_projection() {
        let link = format!(
            "vmess://{}",
            crate::utils::base64::base64_encode(
                r#"{"ps":"HK","add":"hk.example.com","port":"443","id":"uuid-1","aid":"0","net":"ws","path":"/ray","host":"cdn.example.com","tls":"tls"}"#
            )
        );
        let proxy = proxy_to_clash(&explode(&link).unwrap()).unwrap();

        match proxy {
            ClashProxy::VMess {
                common,
                uuid,
                cipher,
                network,
                ws_opts,
                ..
            } => {
                assert_eq!(common.name, "HK");
                assert_eq!(common.tls, Some(true));
                assert_eq!(common.skip_cert_verify, Some(true));
                assert_eq!(uuid, "uuid-1");
                assert_eq!(cipher, "auto");
                assert_eq!(network.as_deref(), Some("ws"));
                let ws_opts = ws_opts.unwrap();
                assert_eq!(ws_opts.path, "/ray");
                assert_eq!(ws_opts.headers.get("Host").map(String::as_str), Some("cdn.example.com"));
            }
            other => panic!("unexpected proxy {:?}", other),
        }
    }

    #[test]
    fn test_trojan_projection_uses_sni() {
        let node = explode("trojan://pw@jp.example.com:443?sni=edge.example.com#JP").unwrap();
        match proxy_to_clash(&node).unwrap() {
            ClashProxy::Trojan {
                common,
                password,
                network,
                ..
            } => {
                assert_eq!(common.sni.as_deref(), Some("edge.example.com"));
                assert_eq!(password, "pw");
                assert_eq!(network, None);
            }
            other => panic!("unexpected proxy {:?}", other),
        }
    }

    #[test]
    fn test_ipv6_server_projects_without_brackets() {
        let node = explode("trojan://pw@[2001:db8::1]:443#V6").unwrap();
        let proxy = proxy_to_clash(&node).unwrap();
        assert_eq!(proxy.common().server, "2001:db8::1");
        assert_eq!(proxy.common().sni.as_deref(), Some("2001:db8::1"));

        let yaml = serde_yaml::to_string(&proxy).unwrap();
        assert!(!yaml.contains("[2001:db8::1]"), "{}", yaml);
    }

    #[test]
    fn test_vless_projection() {
        let node = explode("vless://id@sg.example.com:443?type=ws&security=tls&sni=cdn.example.com&path=%2Fv#SG").unwrap();
        match proxy_to_clash(&node).unwrap() {
            ClashProxy::Vless {
                servername,
                ws_opts,
                ..
            } => {
                assert_eq!(servername.as_deref(), Some("cdn.example.com"));
                assert_eq!(ws_opts.unwrap().path, "/v");
            }
            other => panic!("unexpected proxy {:?}", other),
        }
    }

    #[test]
    fn test_mismatched_credentials_are_dropped() {
        let mut node = explode("trojan://pw@jp.example.com:443").unwrap();
        node.kind = ProtocolKind::Shadowsocks;
        assert!(proxy_to_clash(&node).is_none());

        node.kind = ProtocolKind::Unsupported;
        assert!(proxy_to_clash(&node).is_none());
    }
}

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

fn is_empty_option_string(s: &Option<String>) -> bool {
    s.as_deref().is_none_or(str::is_empty)
}

/// Represents a complete Clash configuration output
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct ClashYamlOutput {
    pub port: u16,
    pub socks_port: u16,
    pub allow_lan: bool,
    pub mode: String,
    pub log_level: String,
    pub external_controller: String,

    pub proxies: Vec<ClashProxy>,
    pub proxy_groups: Vec<ClashProxyGroup>,
    pub rule_providers: BTreeMap<String, RuleProvider>,
    pub rules: Vec<String>,
}

/// Common proxy options that can be used across different proxy types
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct CommonProxyOptions {
    pub name: String,
    pub server: String,
    pub port: u16,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tls: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub skip_cert_verify: Option<bool>,
    #[serde(skip_serializing_if = "is_empty_option_string")]
    pub sni: Option<String>,
}

impl CommonProxyOptions {
    pub fn new(name: String, server: String, port: u16) -> Self {
        Self {
            name,
            server,
            port,
            tls: None,
            skip_cert_verify: None,
            sni: None,
        }
    }

    pub fn builder(name: String, server: String, port: u16) -> CommonProxyOptionsBuilder {
        CommonProxyOptionsBuilder {
            common: Self::new(name, server, port),
        }
    }
}

/// Builder for CommonProxyOptions
pub struct CommonProxyOptionsBuilder {
    common: CommonProxyOptions,
}

impl CommonProxyOptionsBuilder {
    pub fn tls(mut self, value: bool) -> Self {
        self.common.tls = Some(value);
        self
    }

    pub fn skip_cert_verify(mut self, value: bool) -> Self {
        self.common.skip_cert_verify = Some(value);
        self
    }

    pub fn sni(mut self, value: String) -> Self {
        self.common.sni = Some(value);
        self
    }

    pub fn build(self) -> CommonProxyOptions {
        self.common
    }
}

/// `ws-opts` of a websocket proxy
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WsOptions {
    pub path: String,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub headers: BTreeMap<String, String>,
}

impl WsOptions {
    pub fn new(path: Option<&str>, host: Option<&str>) -> Self {
        let mut headers = BTreeMap::new();
        if let Some(host) = host.filter(|h| !h.is_empty()) {
            headers.insert("Host".to_string(), host.to_string());
        }
        Self {
            path: path.unwrap_or("/").to_string(),
            headers,
        }
    }
}

/// Represents a single proxy in Clash configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum ClashProxy {
    #[serde(rename = "ss")]
    Shadowsocks {
        #[serde(flatten)]
        common: CommonProxyOptions,
        cipher: String,
        password: String,
    },
    #[serde(rename = "vmess")]
    VMess {
        #[serde(flatten)]
        common: CommonProxyOptions,
        uuid: String,
        #[serde(rename = "alterId")]
        alter_id: u16,
        cipher: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        network: Option<String>,
        #[serde(rename = "ws-opts", skip_serializing_if = "Option::is_none")]
        ws_opts: Option<WsOptions>,
    },
    #[serde(rename = "vless")]
    Vless {
        #[serde(flatten)]
        common: CommonProxyOptions,
        uuid: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        network: Option<String>,
        #[serde(skip_serializing_if = "is_empty_option_string")]
        servername: Option<String>,
        #[serde(rename = "ws-opts", skip_serializing_if = "Option::is_none")]
        ws_opts: Option<WsOptions>,
    },
    #[serde(rename = "trojan")]
    Trojan {
        #[serde(flatten)]
        common: CommonProxyOptions,
        password: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        network: Option<String>,
        #[serde(rename = "ws-opts", skip_serializing_if = "Option::is_none")]
        ws_opts: Option<WsOptions>,
    },
}

impl ClashProxy {
    pub fn common(&self) -> &CommonProxyOptions {
        match self {
            ClashProxy::Shadowsocks { common, .. }
            | ClashProxy::VMess { common, .. }
            | ClashProxy::Vless { common, .. }
            | ClashProxy::Trojan { common, .. } => common,
        }
    }

    pub fn name(&self) -> &str {
        &self.common().name
    }
}

/// A `select` group in the `proxy-groups` section
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClashProxyGroup {
    pub name: String,
    #[serde(rename = "type")]
    pub group_type: String,
    pub proxies: Vec<String>,
}

impl ClashProxyGroup {
    pub fn select<I, S>(name: &str, proxies: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            name: name.to_string(),
            group_type: "select".to_string(),
            proxies: proxies.into_iter().map(Into::into).collect(),
        }
    }
}

/// An entry of the `rule-providers` section
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RuleProvider {
    #[serde(rename = "type")]
    pub provider_type: String,
    pub behavior: String,
    pub url: String,
    pub path: String,
    pub interval: u32,
}

impl RuleProvider {
    /// A domain list fetched over HTTP and refreshed daily.
    pub fn http_domain(url: &str, path: &str) -> Self {
        Self {
            provider_type: "http".to_string(),
            behavior: "domain".to_string(),
            url: url.to_string(),
            path: path.to_string(),
            interval: 86400,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_proxy_serializes_with_type_tag() {
        let proxy = ClashProxy::Trojan {
            common: CommonProxyOptions::builder("jp".to_string(), "jp.example.com".to_string(), 443)
                .skip_cert_verify(true)
                .sni("jp.example.com".to_string())
                .build(),
            password: "secret".to_string(),
            network: None,
            ws_opts: None,
        };
        let yaml = serde_yaml::to_string(&proxy).unwrap();

        assert!(yaml.contains("type: trojan"));
        assert!(yaml.contains("skip-cert-verify: true"));
        assert!(yaml.contains("sni: jp.example.com"));
        assert!(!yaml.contains("network"));
        assert_eq!(proxy.name(), "jp");
    }

    #[test]
    fn test_ws_options_host_header() {
        let opts = WsOptions::new(Some("/ray"), Some("cdn.example.com"));
        let yaml = serde_yaml::to_string(&opts).unwrap();
        assert!(yaml.contains("path: /ray"));
        assert!(yaml.contains("Host: cdn.example.com"));

        let bare = WsOptions::new(None, None);
        assert_eq!(bare.path, "/");
        assert!(bare.headers.is_empty());
    }
}

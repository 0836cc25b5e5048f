//! Proxy descriptor definitions
//!
//! Contains the canonical, protocol-agnostic representation of one proxy
//! endpoint that every parser produces and every generator consumes.

/// Represents the protocol of a proxy.
/// This is the canonical enum used for protocol identification across the application.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProtocolKind {
    VMess,
    Vless,
    Trojan,
    Shadowsocks,
    Unsupported,
}

impl ProtocolKind {
    /// Maps a share-link scheme (the part before `://`) to a protocol.
    pub fn from_scheme(scheme: &str) -> Self {
        match scheme.to_ascii_lowercase().as_str() {
            "vmess" => ProtocolKind::VMess,
            "vless" => ProtocolKind::Vless,
            "trojan" => ProtocolKind::Trojan,
            "ss" => ProtocolKind::Shadowsocks,
            _ => ProtocolKind::Unsupported,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ProtocolKind::VMess => "vmess",
            ProtocolKind::Vless => "vless",
            ProtocolKind::Trojan => "trojan",
            ProtocolKind::Shadowsocks => "ss",
            ProtocolKind::Unsupported => "unsupported",
        }
    }
}

/// Transport layer carried under the proxy protocol.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Transport {
    Tcp,
    Ws,
    /// Any other network name (grpc, h2, quic, ...), kept verbatim
    Other(String),
}

impl Transport {
    /// Maps a `net`/`type` value to a transport. Empty means tcp.
    pub fn from_network(network: &str) -> Self {
        match network.trim().to_ascii_lowercase().as_str() {
            "" | "tcp" => Transport::Tcp,
            "ws" => Transport::Ws,
            other => Transport::Other(other.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Transport::Tcp => "tcp",
            Transport::Ws => "ws",
            Transport::Other(name) => name,
        }
    }
}

/// Credentials of a proxy, shaped by its protocol.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProxyAuth {
    /// VMess and VLESS
    Uuid {
        uuid: String,
        alter_id: u16,
        cipher: String,
    },
    /// Trojan
    Password { password: String },
    /// Shadowsocks
    Cipher { cipher: String, password: String },
}

/// Canonical parsed proxy.
///
/// A descriptor of kind [`ProtocolKind::Unsupported`] is never produced by
/// the parsers; unsupported input yields `None` instead.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProxyDescriptor {
    pub name: String,
    pub kind: ProtocolKind,
    pub server: String,
    pub port: u16,
    pub transport: Transport,
    pub tls: bool,
    /// SNI / Host override
    pub server_name: Option<String>,
    pub auth: ProxyAuth,
    /// Only set when `transport` is [`Transport::Ws`]
    pub ws_path: Option<String>,
    /// Only set when `transport` is [`Transport::Ws`]
    pub ws_host: Option<String>,
}

impl ProxyDescriptor {
    pub fn is_ws(&self) -> bool {
        self.transport == Transport::Ws
    }

    /// Server name presented during the TLS handshake.
    pub fn tls_server_name(&self) -> &str {
        self.server_name.as_deref().unwrap_or(&self.server)
    }
}

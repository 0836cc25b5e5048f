use log::debug;

use crate::models::{ProtocolKind, ProxyDescriptor, ResolvedNode};
use crate::utils::url::{host_port, strip_ipv6_brackets};

/// Where the display name of an exploded descriptor came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum NameSource {
    /// An explicit name inside the payload (vmess `ps`)
    Payload,
    /// The `#fragment` of the share-link
    Fragment,
    /// Derived from server and port
    Fallback,
}

pub(crate) struct Exploded {
    pub descriptor: ProxyDescriptor,
    pub name_source: NameSource,
}

/// Picks the display name for a descriptor: payload name, then fragment,
/// then `server:port`.
pub(crate) fn pick_name(
    payload: Option<&str>,
    fragment: Option<String>,
    server: &str,
    port: u16,
) -> (String, NameSource) {
    if let Some(name) = payload.map(str::trim).filter(|s| !s.is_empty()) {
        return (name.to_string(), NameSource::Payload);
    }
    match fragment {
        Some(name) => (name, NameSource::Fragment),
        None => (host_port(server, port), NameSource::Fallback),
    }
}

/// Parses a `host:port` authority. The port must be in 1..=65535 and IPv6
/// hosts come back without brackets.
pub(crate) fn split_host_port(authority: &str) -> Option<(String, u16)> {
    let (host, port) = authority.trim().rsplit_once(':')?;
    let port = port.trim_end_matches('/').parse::<u16>().ok()?;
    let host = strip_ipv6_brackets(host);
    if host.is_empty() || port == 0 {
        return None;
    }
    Some((host.to_string(), port))
}

fn explode_with_source(link: &str) -> Option<Exploded> {
    let link = link.trim();
    let (scheme, _) = link.split_once("://")?;

    match ProtocolKind::from_scheme(scheme) {
        ProtocolKind::VMess => super::vmess::explode_vmess(link),
        ProtocolKind::Vless => super::vless::explode_vless(link),
        ProtocolKind::Trojan => super::trojan::explode_trojan(link),
        ProtocolKind::Shadowsocks => super::ss::explode_ss(link),
        ProtocolKind::Unsupported => {
            debug!("Unsupported share-link scheme: {}", scheme);
            None
        }
    }
}

/// Explode a share-link into a [`ProxyDescriptor`]
///
/// Detects the scheme and calls the matching parser. Malformed input, unknown
/// schemes and decode failures all yield `None`; this function never panics.
pub fn explode(link: &str) -> Option<ProxyDescriptor> {
    explode_with_source(link).map(|exploded| exploded.descriptor)
}

/// Explode a resolved node, applying its name.
///
/// An explicit in-payload name wins over the node name; the node name wins
/// over the link fragment and the fallback.
pub fn explode_node(node: &ResolvedNode) -> Option<ProxyDescriptor> {
    let exploded = match explode_with_source(&node.url) {
        Some(exploded) => exploded,
        None => {
            debug!("Skipping node '{}': unparsable share-link", node.name);
            return None;
        }
    };

    let mut descriptor = exploded.descriptor;
    if exploded.name_source != NameSource::Payload && !node.name.trim().is_empty() {
        descriptor.name = node.name.clone();
    }
    Some(descriptor)
}

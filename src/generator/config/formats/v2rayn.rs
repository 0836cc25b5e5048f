use crate::models::ResolvedNode;
use crate::utils::base64::base64_encode;

/// Joins the raw node URLs with `\n`, one per line.
pub fn node_list(nodes: &[ResolvedNode]) -> String {
    nodes
        .iter()
        .map(|node| node.url.as_str())
        .collect::<Vec<_>>()
        .join("\n")
}

/// Convert resolved nodes to a V2RayN subscription: the Base64 of the node list.
///
/// URLs are passed through unparsed, so every node is kept.
pub fn proxy_to_v2rayn(nodes: &[ResolvedNode]) -> String {
    base64_encode(&node_list(nodes))
}

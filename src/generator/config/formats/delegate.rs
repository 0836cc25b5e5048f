use log::info;
use url::Url;

use super::v2rayn::proxy_to_v2rayn;
use crate::models::ResolvedNode;
use crate::utils::http::{is_hop_by_hop, FetchError, HttpClient, HttpResponse};

/// Builds the external converter request
/// `https://<host>/sub?target=<format>&url=data:text/plain;base64,<nodes>&filename=<name>`.
pub fn delegate_url(
    converter_host: &str,
    target: &str,
    nodes: &[ResolvedNode],
    filename: &str,
) -> Result<Url, url::ParseError> {
    let mut url = Url::parse(&format!("https://{}/sub", converter_host))?;
    let data_uri = format!("data:text/plain;base64,{}", proxy_to_v2rayn(nodes));
    url.query_pairs_mut()
        .append_pair("target", target)
        .append_pair("url", &data_uri)
        .append_pair("filename", filename);
    Ok(url)
}

/// Headers of the incoming request that may be relayed to another host.
///
/// `Accept-Encoding` is left to the HTTP client, which only advertises the
/// encodings it can decode.
pub fn forwardable_headers(headers: &[(String, String)]) -> Vec<(String, String)> {
    headers
        .iter()
        .filter(|(name, _)| {
            !is_hop_by_hop(name) && !name.eq_ignore_ascii_case("accept-encoding")
        })
        .cloned()
        .collect()
}

/// Sends the converter request with the caller's headers and returns the
/// converter's response, whatever its status.
pub async fn forward<H: HttpClient>(
    http: &H,
    url: &Url,
    request_headers: &[(String, String)],
) -> Result<HttpResponse, FetchError> {
    info!("Forwarding to subconverter: {}", url);
    http.get(url.as_str(), &forwardable_headers(request_headers))
        .await
}

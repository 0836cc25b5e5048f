use std::time::Duration;

use log::debug;
use reqwest::Client;

use super::http::{FetchError, HttpClient, HttpResponse, DEFAULT_TIMEOUT};

/// [`HttpClient`] backed by a shared reqwest connection pool.
#[derive(Debug, Clone)]
pub struct ReqwestClient {
    client: Client,
}

impl ReqwestClient {
    /// Builds a client whose every request is bounded by `timeout`.
    pub fn new(timeout: Duration) -> Result<Self, FetchError> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| FetchError::Client(e.to_string()))?;
        Ok(Self { client })
    }
}

impl Default for ReqwestClient {
    fn default() -> Self {
        Self {
            client: Client::builder()
                .timeout(Duration::from_secs(DEFAULT_TIMEOUT))
                .build()
                .unwrap_or_default(),
        }
    }
}

impl HttpClient for ReqwestClient {
    async fn get(
        &self,
        url: &str,
        headers: &[(String, String)],
    ) -> Result<HttpResponse, FetchError> {
        // Build request with headers if specified
        let mut request_builder = self.client.get(url);
        for (key, value) in headers {
            request_builder = request_builder.header(key.as_str(), value.as_str());
        }

        let response = request_builder
            .send()
            .await
            .map_err(|e| FetchError::Request(e.to_string()))?;

        let status = response.status().as_u16();
        let resp_headers = response
            .headers()
            .iter()
            .filter_map(|(key, value)| {
                value
                    .to_str()
                    .ok()
                    .map(|v| (key.to_string(), v.to_string()))
            })
            .collect();

        let body = response
            .bytes()
            .await
            .map_err(|e| FetchError::Body(e.to_string()))?;
        debug!("GET {} -> {} ({} bytes)", url, status, body.len());

        Ok(HttpResponse {
            status,
            headers: resp_headers,
            body: body.to_vec(),
        })
    }
}

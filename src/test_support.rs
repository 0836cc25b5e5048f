//! Canned HTTP responses for unit tests.

use std::collections::HashMap;
use std::sync::Mutex;

use crate::utils::http::{FetchError, HttpClient, HttpResponse};

#[derive(Default)]
pub(crate) struct StubHttpClient {
    routes: HashMap<String, HttpResponse>,
    calls: Mutex<Vec<(String, Vec<(String, String)>)>>,
}

impl StubHttpClient {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn route(mut self, url: &str, response: HttpResponse) -> Self {
        self.routes.insert(url.to_string(), response);
        self
    }

    pub(crate) fn calls_to(&self, url: &str) -> usize {
        self.calls
            .lock()
            .unwrap()
            .iter()
            .filter(|(called, _)| called == url)
            .count()
    }

    pub(crate) fn last_call(&self) -> Option<(String, Vec<(String, String)>)> {
        self.calls.lock().unwrap().last().cloned()
    }
}

impl HttpClient for StubHttpClient {
    async fn get(
        &self,
        url: &str,
        headers: &[(String, String)],
    ) -> Result<HttpResponse, FetchError> {
        self.calls
            .lock()
            .unwrap()
            .push((url.to_string(), headers.to_vec()));
        match self.routes.get(url) {
            Some(response) => Ok(response.clone()),
            None => Err(FetchError::Request(format!("connection refused: {}", url))),
        }
    }
}

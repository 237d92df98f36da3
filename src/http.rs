// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use std::time::Duration;

use async_trait::async_trait;
use bytes::Bytes;
use reqwest::header::CACHE_CONTROL;

use crate::error::TransportError;

/// Client-side cache directive attached to a request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CacheDirective {
    /// Send no Cache-Control header
    #[default]
    None,
    /// Accept a cached response that is stale by at most the given duration
    MaxStale(Duration),
}

impl CacheDirective {
    /// The Cache-Control header value for this directive, if any
    pub fn header_value(&self) -> Option<String> {
        match self {
            Self::None => None,
            Self::MaxStale(age) => Some(format!("max-stale={}", age.as_secs())),
        }
    }
}

/// HTTP response with status and the fully read body
#[derive(Debug, Clone)]
pub struct HttpResponse {
    /// HTTP status code
    pub status: u16,
    /// Response body
    pub body: Bytes,
}

impl HttpResponse {
    /// Whether the status is in the 2xx range
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// HTTP client abstraction for testability
#[async_trait]
pub trait HttpClient: Send + Sync {
    /// Issue a GET request and read the whole body.
    ///
    /// Non-2xx statuses are returned as responses, only failures to obtain
    /// a response at all are errors.
    async fn get(&self, url: &str, cache: CacheDirective) -> Result<HttpResponse, TransportError>;
}

/// Default HTTP client implementation using reqwest
#[derive(Clone)]
pub struct ReqwestClient {
    client: reqwest::Client,
}

impl ReqwestClient {
    /// Create a new ReqwestClient with default settings
    pub fn new() -> Self {
        Self {
            client: reqwest::Client::new(),
        }
    }

    /// Create a new ReqwestClient with a custom reqwest::Client
    pub fn with_client(client: reqwest::Client) -> Self {
        Self { client }
    }
}

impl Default for ReqwestClient {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl HttpClient for ReqwestClient {
    async fn get(&self, url: &str, cache: CacheDirective) -> Result<HttpResponse, TransportError> {
        let mut request = self.client.get(url);
        if let Some(value) = cache.header_value() {
            request = request.header(CACHE_CONTROL, value);
        }

        // The response is consumed here, so the connection goes back to the
        // pool (or is closed) before we return on any path.
        let response = request.send().await?;
        let status = response.status().as_u16();
        let body = response.bytes().await?;

        Ok(HttpResponse { status, body })
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reqwest_client_can_be_created() {
        let _client = ReqwestClient::new();
        let _client_default = ReqwestClient::default();
    }

    #[test]
    fn reqwest_client_can_be_cloned() {
        let client = ReqwestClient::new();
        let _cloned = client.clone();
    }

    #[test]
    fn max_stale_renders_seconds() {
        let one_day = CacheDirective::MaxStale(Duration::from_secs(24 * 60 * 60));
        assert_eq!(one_day.header_value(), Some("max-stale=86400".to_string()));
        assert_eq!(CacheDirective::None.header_value(), None);
    }

    #[test]
    fn success_range_is_2xx() {
        let response = |status| HttpResponse {
            status,
            body: Bytes::new(),
        };
        assert!(response(200).is_success());
        assert!(response(204).is_success());
        assert!(!response(304).is_success());
        assert!(!response(400).is_success());
        assert!(!response(500).is_success());
    }
}

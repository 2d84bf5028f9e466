//! HTTP GET with redirect capture.
//!
//! Collaborators reach the network through the [`HttpClient`] trait so tests
//! can substitute fakes. The default implementation, [`CurlClient`], uses the
//! curl crate (libcurl) on tokio's blocking pool.

mod curl_client;
mod parse;

pub use curl_client::CurlClient;

use async_trait::async_trait;
use std::collections::HashMap;
use std::time::Duration;

use crate::error::UpstreamError;

/// Completed HTTP exchange (after following redirects).
#[derive(Debug, Clone, Default)]
pub struct HttpResponse {
    /// Status of the final response.
    pub status: u32,
    /// Number of redirects followed to reach the final response.
    pub redirect_count: u32,
    /// URL of the final response, if it differs from the request.
    pub final_url: Option<String>,
    /// `Content-Type` of the final response.
    pub content_type: Option<String>,
    pub body: Vec<u8>,
    /// True when the body was cut at the configured size limit.
    pub truncated: bool,
}

impl HttpResponse {
    /// Body decoded as UTF-8, replacing invalid sequences.
    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Minimal GET client used by the page fetch, registry lookup and search probe.
#[async_trait]
pub trait HttpClient: Send + Sync {
    /// GETs `url`, following redirects, bounded by `timeout`.
    ///
    /// Any completed response is `Ok`, whatever its status; callers decide
    /// which statuses they accept.
    async fn get(
        &self,
        url: &str,
        headers: &HashMap<String, String>,
        timeout: Duration,
    ) -> Result<HttpResponse, UpstreamError>;
}

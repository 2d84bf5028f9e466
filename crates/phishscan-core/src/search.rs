//! Search-engine `site:` probe.

use std::collections::HashMap;
use std::time::Duration;

use crate::config::EndpointConfig;
use crate::error::UpstreamError;
use crate::fetch::HttpClient;

/// Whether the search engine reports results for the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IndexStatus {
    Indexed,
    NotIndexed,
}

/// Results URL for `host` built from the configured template.
pub fn search_url(template: &str, host: &str) -> String {
    template.replace("{host}", host)
}

/// Fetches the results page and looks for the "no results" marker.
///
/// Any completed response is inspected, whatever its status: the engine may
/// answer with an error page, which is then judged by the marker alone.
pub async fn probe_index(
    http: &dyn HttpClient,
    endpoints: &EndpointConfig,
    host: &str,
    timeout: Duration,
) -> Result<IndexStatus, UpstreamError> {
    let url = search_url(&endpoints.search_url_template, host);
    let resp = http.get(&url, &HashMap::new(), timeout).await?;
    let marker = endpoints.search_no_results_marker.as_str();
    if !marker.is_empty() && resp.text().contains(marker) {
        Ok(IndexStatus::NotIndexed)
    } else {
        Ok(IndexStatus::Indexed)
    }
}

//! The shared page snapshot.
//!
//! One GET per extraction produces a [`PageSnapshot`]; every content
//! heuristic reads it by shared reference. The HTML is parsed once into a
//! [`DomDigest`] holding only what the heuristics inspect, so the snapshot is
//! plain owned data (`Send + Sync`) and outlives the parser's tree.

mod dom;

pub use dom::DomDigest;

use serde::Serialize;

use crate::fetch::HttpResponse;

/// Captured fetch result, read-only after construction.
#[derive(Debug, Clone, Default)]
pub struct PageSnapshot {
    pub status: u32,
    pub redirect_count: u32,
    pub final_url: Option<String>,
    pub content_type: Option<String>,
    /// The body was cut at the configured size limit.
    pub truncated: bool,
    /// Decoded body as received.
    pub body: String,
    /// `body` lowercased once for the case-insensitive marker checks.
    pub body_lower: String,
    pub dom: DomDigest,
}

impl PageSnapshot {
    pub fn from_html(status: u32, redirect_count: u32, body: String) -> Self {
        let dom = DomDigest::parse(&body);
        let body_lower = body.to_lowercase();
        Self {
            status,
            redirect_count,
            final_url: None,
            content_type: None,
            truncated: false,
            body,
            body_lower,
            dom,
        }
    }

    pub fn from_response(resp: &HttpResponse) -> Self {
        let mut snap = Self::from_html(resp.status, resp.redirect_count, resp.text());
        snap.final_url = resp.final_url.clone();
        snap.content_type = resp.content_type.clone();
        snap.truncated = resp.truncated;
        snap
    }

    /// Transfer facts reported alongside the vector.
    pub fn summary(&self) -> PageSummary {
        PageSummary {
            status: self.status,
            redirect_count: self.redirect_count,
            final_url: self.final_url.clone(),
            content_type: self.content_type.clone(),
            truncated: self.truncated,
        }
    }
}

/// What the page fetch saw, without the body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PageSummary {
    pub status: u32,
    pub redirect_count: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub final_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content_type: Option<String>,
    pub truncated: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn snapshot_from_response_keeps_transfer_facts() {
        let resp = HttpResponse {
            status: 200,
            redirect_count: 2,
            final_url: Some("https://example.com/final".to_string()),
            content_type: Some("text/html".to_string()),
            body: b"<html><body><IFRAME src='x'></IFRAME>MailTo:</body></html>".to_vec(),
            truncated: true,
        };
        let snap = PageSnapshot::from_response(&resp);
        assert_eq!(snap.redirect_count, 2);
        assert_eq!(
            snap.summary(),
            PageSummary {
                status: 200,
                redirect_count: 2,
                final_url: Some("https://example.com/final".to_string()),
                content_type: Some("text/html".to_string()),
                truncated: true,
            }
        );
        assert!(snap.body_lower.contains("mailto:"));
        assert_eq!(snap.dom.iframe_count, 1);
    }

    #[test]
    fn snapshot_is_shareable_across_threads() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<PageSnapshot>();
    }
}

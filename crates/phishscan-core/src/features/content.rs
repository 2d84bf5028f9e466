//! Heuristics over the shared page snapshot.
//!
//! Every function takes `Option<&PageSnapshot>`; `None` (fetch failed or
//! timed out) yields the feature's fallback.

use super::signal::{Evaluation, Feature, Signal};
use crate::config::{RatioBands, ThresholdConfig};
use crate::page::PageSnapshot;
use crate::url_model::{is_absolute_http, is_off_host};

fn with_page(
    feature: Feature,
    page: Option<&PageSnapshot>,
    f: impl FnOnce(&PageSnapshot) -> Signal,
) -> Evaluation {
    match page {
        Some(p) => Evaluation::Computed(f(p)),
        None => feature.fell_back(),
    }
}

/// Maps an off-host percentage onto the configured bands.
pub fn classify_ratio(off_host: usize, total: usize, bands: RatioBands) -> Signal {
    if total == 0 {
        return Signal::Legitimate;
    }
    let pct = off_host as f64 / total as f64 * 100.0;
    if pct < bands.low {
        Signal::Legitimate
    } else if pct <= bands.high {
        Signal::Suspicious
    } else {
        Signal::Phishing
    }
}

fn off_host_count<'a>(links: impl IntoIterator<Item = &'a String>, host: &str) -> usize {
    links.into_iter().filter(|l| is_off_host(l, host)).count()
}

pub fn favicon(page: Option<&PageSnapshot>, host: &str) -> Evaluation {
    with_page(Feature::Favicon, page, |p| {
        Signal::phishing_if(
            p.dom
                .favicon_href
                .as_deref()
                .map(|h| is_off_host(h, host))
                .unwrap_or(false),
        )
    })
}

/// Off-host share of img/video/audio sources.
pub fn request_url(page: Option<&PageSnapshot>, host: &str, bands: RatioBands) -> Evaluation {
    with_page(Feature::RequestUrl, page, |p| {
        let total = p.dom.media_sources.len();
        classify_ratio(off_host_count(&p.dom.media_sources, host), total, bands)
    })
}

/// Off-host share of anchor hrefs.
pub fn url_of_anchor(page: Option<&PageSnapshot>, host: &str, bands: RatioBands) -> Evaluation {
    with_page(Feature::UrlOfAnchor, page, |p| {
        let total = p.dom.anchor_hrefs.len();
        classify_ratio(off_host_count(&p.dom.anchor_hrefs, host), total, bands)
    })
}

/// Off-host share among absolute meta/script/link references only.
pub fn links_in_tags(page: Option<&PageSnapshot>, host: &str, bands: RatioBands) -> Evaluation {
    with_page(Feature::LinksInTags, page, |p| {
        let absolute: Vec<&String> = p
            .dom
            .tag_links
            .iter()
            .filter(|l| is_absolute_http(l))
            .collect();
        classify_ratio(off_host_count(absolute.iter().copied(), host), absolute.len(), bands)
    })
}

/// Server form handler: decided by the first form that is blank or off-host.
pub fn server_form_handler(page: Option<&PageSnapshot>, host: &str) -> Evaluation {
    with_page(Feature::ServerFormHandler, page, |p| {
        for action in &p.dom.form_actions {
            if action.is_empty() || action == "about:blank" {
                return Signal::Phishing;
            }
            if is_off_host(action, host) {
                return Signal::Suspicious;
            }
        }
        Signal::Legitimate
    })
}

pub fn submitting_to_email(page: Option<&PageSnapshot>) -> Evaluation {
    with_page(Feature::SubmittingToEmail, page, |p| {
        Signal::phishing_if(p.body_lower.contains("mailto:"))
    })
}

/// No redirects legitimate, one or two suspicious, more phishing.
pub fn redirect(page: Option<&PageSnapshot>) -> Evaluation {
    with_page(Feature::Redirect, page, |p| match p.redirect_count {
        0 => Signal::Legitimate,
        1 | 2 => Signal::Suspicious,
        _ => Signal::Phishing,
    })
}

pub fn on_mouseover(page: Option<&PageSnapshot>) -> Evaluation {
    with_page(Feature::OnMouseover, page, |p| {
        Signal::phishing_if(p.body_lower.contains("onmouseover"))
    })
}

/// Right-click blocking script.
pub fn right_click(page: Option<&PageSnapshot>) -> Evaluation {
    with_page(Feature::RightClick, page, |p| {
        Signal::phishing_if(
            p.body.contains("event.button==2") || p.body_lower.contains("contextmenu"),
        )
    })
}

pub fn popup_window(page: Option<&PageSnapshot>) -> Evaluation {
    with_page(Feature::PopupWindow, page, |p| {
        Signal::phishing_if(p.body.contains("window.open") || p.body_lower.contains("popup"))
    })
}

pub fn iframe(page: Option<&PageSnapshot>) -> Evaluation {
    with_page(Feature::Iframe, page, |p| {
        Signal::phishing_if(p.dom.iframe_count > 0)
    })
}

/// All eleven content features.
pub fn evaluate(
    page: Option<&PageSnapshot>,
    host: &str,
    thresholds: &ThresholdConfig,
) -> Vec<(Feature, Evaluation)> {
    vec![
        (Feature::Favicon, favicon(page, host)),
        (Feature::RequestUrl, request_url(page, host, thresholds.media)),
        (Feature::UrlOfAnchor, url_of_anchor(page, host, thresholds.anchors)),
        (Feature::LinksInTags, links_in_tags(page, host, thresholds.tag_links)),
        (Feature::ServerFormHandler, server_form_handler(page, host)),
        (Feature::SubmittingToEmail, submitting_to_email(page)),
        (Feature::Redirect, redirect(page)),
        (Feature::OnMouseover, on_mouseover(page)),
        (Feature::RightClick, right_click(page)),
        (Feature::PopupWindow, popup_window(page)),
        (Feature::Iframe, iframe(page)),
    ]
}

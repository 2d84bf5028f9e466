//! HTML digest built with the `scraper` crate.

use scraper::{Html, Selector};

/// Attributes the content heuristics need, extracted in document order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DomDigest {
    /// `href` of the first `<link>` whose `rel` names an icon, verbatim.
    pub favicon_href: Option<String>,
    /// Non-empty `src` of img/video/audio elements.
    pub media_sources: Vec<String>,
    /// `href` of every anchor that has one (possibly empty).
    pub anchor_hrefs: Vec<String>,
    /// Non-empty `href`/`src` values on meta/script/link elements.
    pub tag_links: Vec<String>,
    /// `action` of every form, verbatim; a missing attribute reads as empty.
    pub form_actions: Vec<String>,
    pub iframe_count: usize,
}

impl DomDigest {
    pub fn parse(html: &str) -> Self {
        let document = Html::parse_document(html);

        let favicon_href = select(&document, "link[rel]")
            .into_iter()
            .find(|el| {
                el.value()
                    .attr("rel")
                    .map(|rel| rel.split_whitespace().any(|t| t.eq_ignore_ascii_case("icon")))
                    .unwrap_or(false)
            })
            .and_then(|el| el.value().attr("href"))
            .map(str::to_string);

        let media_sources = attr_values(&document, "img[src], video[src], audio[src]", "src")
            .into_iter()
            .filter(|s| !s.is_empty())
            .collect();

        let anchor_hrefs = attr_values(&document, "a[href]", "href");

        let mut tag_links = Vec::new();
        for el in select(&document, "meta, script, link") {
            for attr in ["href", "src"] {
                if let Some(v) = el.value().attr(attr) {
                    let v = v.trim();
                    if !v.is_empty() {
                        tag_links.push(v.to_string());
                    }
                }
            }
        }

        let form_actions = select(&document, "form")
            .into_iter()
            .map(|el| el.value().attr("action").unwrap_or("").to_string())
            .collect();

        let iframe_count = select(&document, "iframe").len();

        Self {
            favicon_href,
            media_sources,
            anchor_hrefs,
            tag_links,
            form_actions,
            iframe_count,
        }
    }
}

fn select<'a>(document: &'a Html, css: &str) -> Vec<scraper::ElementRef<'a>> {
    match Selector::parse(css) {
        Ok(selector) => document.select(&selector).collect(),
        Err(e) => {
            tracing::warn!(css, "invalid selector: {:?}", e);
            Vec::new()
        }
    }
}

fn attr_values(document: &Html, css: &str, attr: &str) -> Vec<String> {
    select(document, css)
        .into_iter()
        .filter_map(|el| el.value().attr(attr).map(|v| v.trim().to_string()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    const PAGE: &str = r#"<!doctype html>
<html><head>
  <meta property="og:image" content="x">
  <link rel="stylesheet" href="https://cdn.other.test/site.css">
  <link rel="shortcut icon" href="https://icons.other.test/fav.ico">
  <script src="/app.js"></script>
  <script>var inline = 1;</script>
</head><body>
  <img src="/logo.png"><img src=""><video src="https://media.other.test/v.mp4"></video>
  <a href="/home">home</a><a href="https://other.test/">x</a><a name="anchor">no href</a>
  <form action=""></form><form action="https://collect.other.test/post"></form><form></form>
  <iframe src="https://frame.other.test/"></iframe>
</body></html>"#;

    #[test]
    fn digest_collects_attributes_in_order() {
        let d = DomDigest::parse(PAGE);
        assert_eq!(
            d.favicon_href.as_deref(),
            Some("https://icons.other.test/fav.ico")
        );
        assert_eq!(
            d.media_sources,
            vec!["/logo.png", "https://media.other.test/v.mp4"]
        );
        assert_eq!(d.anchor_hrefs, vec!["/home", "https://other.test/"]);
        assert_eq!(
            d.tag_links,
            vec![
                "https://cdn.other.test/site.css",
                "https://icons.other.test/fav.ico",
                "/app.js"
            ]
        );
        assert_eq!(d.form_actions, vec!["", "https://collect.other.test/post", ""]);
        assert_eq!(d.iframe_count, 1);
    }

    #[test]
    fn icon_rel_matches_plain_icon() {
        let d = DomDigest::parse(r#"<link rel="Icon" href="/favicon.ico">"#);
        assert_eq!(d.favicon_href.as_deref(), Some("/favicon.ico"));
    }

    #[test]
    fn only_the_first_icon_link_counts() {
        let d = DomDigest::parse(
            r#"<link rel="icon" href=""><link rel="shortcut icon" href="https://icons.other.test/x.ico">"#,
        );
        assert_eq!(d.favicon_href.as_deref(), Some(""));
        let d = DomDigest::parse(r#"<link rel="icon"><link rel="icon" href="/b.ico">"#);
        assert_eq!(d.favicon_href, None);
    }

    #[test]
    fn form_actions_are_not_trimmed() {
        let d = DomDigest::parse(r#"<form action=" "></form><form action="about:blank"></form>"#);
        assert_eq!(d.form_actions, vec![" ", "about:blank"]);
    }

    #[test]
    fn empty_and_garbage_input() {
        assert_eq!(DomDigest::parse(""), DomDigest::default());
        let d = DomDigest::parse("<<<not html at all>>>");
        assert!(d.anchor_hrefs.is_empty());
        assert_eq!(d.iframe_count, 0);
    }
}

//! Rendering of extraction reports on stdout.

use anyhow::Result;
use phishscan_core::page::PageSummary;
use phishscan_core::{ExtractionReport, FeatureVector};
use serde::Serialize;
use std::io;

/// `extract --format json`: the ordered feature map, or the whole report when verbose.
pub fn json_single(report: &ExtractionReport, verbose: bool) -> Result<String> {
    let text = if verbose {
        serde_json::to_string_pretty(report)?
    } else {
        serde_json::to_string_pretty(&report.features)?
    };
    Ok(text)
}

/// `extract --format csv`: header line plus one value row.
pub fn write_csv_single<W: io::Write>(out: W, features: &FeatureVector) -> Result<()> {
    let mut wtr = csv::Writer::from_writer(out);
    wtr.write_record(FeatureVector::names())?;
    wtr.write_record(features.values().iter().map(|v| v.to_string()))?;
    wtr.flush()?;
    Ok(())
}

/// Batch CSV table: a `url` column followed by the features in model order.
pub struct CsvBatch<W: io::Write> {
    wtr: csv::Writer<W>,
}

impl<W: io::Write> CsvBatch<W> {
    /// Writes the header row.
    pub fn new(out: W) -> Result<Self> {
        let mut wtr = csv::Writer::from_writer(out);
        let mut header = vec!["url"];
        header.extend(FeatureVector::names());
        wtr.write_record(&header)?;
        Ok(Self { wtr })
    }

    pub fn row(&mut self, url: &str, features: &FeatureVector) -> Result<()> {
        let mut record = vec![url.to_string()];
        record.extend(features.values().iter().map(|v| v.to_string()));
        self.wtr.write_record(&record)?;
        Ok(())
    }

    pub fn finish(mut self) -> Result<()> {
        self.wtr.flush()?;
        Ok(())
    }
}

#[derive(Serialize)]
struct BatchLine<'a> {
    url: &'a str,
    features: &'a FeatureVector,
}

/// One compact JSON object per line.
pub fn json_batch_line(url: &str, features: &FeatureVector) -> Result<String> {
    Ok(serde_json::to_string(&BatchLine { url, features })?)
}

/// One-line description of the page fetch for `--verbose` on stderr.
pub fn describe_page(page: Option<&PageSummary>) -> String {
    let Some(p) = page else {
        return "page: not fetched".to_string();
    };
    let mut line = format!("page: HTTP {}, {} redirect(s)", p.status, p.redirect_count);
    if let Some(url) = &p.final_url {
        line.push_str(&format!(", final {}", url));
    }
    if let Some(ct) = &p.content_type {
        line.push_str(&format!(", {}", ct));
    }
    if p.truncated {
        line.push_str(", body truncated");
    }
    line
}

/// Non-empty, non-comment lines of a batch file, trimmed.
pub fn batch_urls(contents: &str) -> Vec<String> {
    contents
        .lines()
        .map(str::trim)
        .filter(|l| !l.is_empty() && !l.starts_with('#'))
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use phishscan_core::features::Evaluation;
    use phishscan_core::{Feature, Signal};

    fn legit_vector() -> FeatureVector {
        FeatureVector::from_evaluations(
            Feature::ALL
                .iter()
                .map(|f| (*f, Evaluation::Computed(Signal::Legitimate))),
        )
    }

    #[test]
    fn single_csv_has_header_and_row() {
        let mut buf = Vec::new();
        write_csv_single(&mut buf, &legit_vector()).unwrap();
        let text = String::from_utf8(buf).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].starts_with("having_IP_Address,URL_Length,"));
        assert_eq!(lines[1].split(',').count(), 30);
    }

    #[test]
    fn batch_csv_quotes_urls_with_separators() {
        let mut buf = Vec::new();
        let mut table = CsvBatch::new(&mut buf).unwrap();
        table.row("http://a.com/x", &legit_vector()).unwrap();
        table.row("http://a.com/?q=1,2", &legit_vector()).unwrap();
        table.row("http://a.com/\"q\"", &legit_vector()).unwrap();
        table.finish().unwrap();

        let text = String::from_utf8(buf).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 4);
        assert!(lines[0].starts_with("url,having_IP_Address,"));
        assert!(lines[0].ends_with(",Statistical_report"));
        assert!(lines[1].starts_with("http://a.com/x,1,1,"));
        assert!(lines[2].starts_with("\"http://a.com/?q=1,2\",1,"));
        assert!(lines[3].starts_with("\"http://a.com/\"\"q\"\"\",1,"));
    }

    #[test]
    fn batch_json_line_is_compact_and_ordered() {
        let line = json_batch_line("http://a.com/", &legit_vector()).unwrap();
        assert!(!line.contains('\n'));
        assert!(line.starts_with(r#"{"url":"http://a.com/","features":{"having_IP_Address":1,"#));
    }

    #[test]
    fn page_description_mentions_truncation() {
        let page = PageSummary {
            status: 200,
            redirect_count: 1,
            final_url: Some("https://b.test/".to_string()),
            content_type: None,
            truncated: true,
        };
        assert_eq!(
            describe_page(Some(&page)),
            "page: HTTP 200, 1 redirect(s), final https://b.test/, body truncated"
        );
        assert_eq!(describe_page(None), "page: not fetched");
    }

    #[test]
    fn batch_urls_skip_blank_and_comments() {
        let contents = "# suspicious list\nhttp://a.com/\n\n   \n  https://b.org/login  \n#http://c.net\n";
        assert_eq!(
            batch_urls(contents),
            vec!["http://a.com/".to_string(), "https://b.org/login".to_string()]
        );
    }
}

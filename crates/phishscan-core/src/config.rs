use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Per-collaborator timeouts in seconds (`[timeouts]` in config.toml).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TimeoutConfig {
    /// Shared page GET (including redirects).
    pub page_fetch_secs: f64,
    /// Registry (RDAP) lookup.
    pub registry_secs: f64,
    /// DNS resolution of the host.
    pub dns_secs: f64,
    /// Search-engine `site:` probe.
    pub search_secs: f64,
    /// Deadline for the whole extraction; anything still pending falls back.
    pub overall_secs: f64,
}

impl Default for TimeoutConfig {
    fn default() -> Self {
        Self {
            page_fetch_secs: 5.0,
            registry_secs: 5.0,
            dns_secs: 5.0,
            search_secs: 5.0,
            overall_secs: 12.0,
        }
    }
}

impl TimeoutConfig {
    pub fn page_fetch(&self) -> Duration {
        secs(self.page_fetch_secs)
    }

    pub fn registry(&self) -> Duration {
        secs(self.registry_secs)
    }

    pub fn dns(&self) -> Duration {
        secs(self.dns_secs)
    }

    pub fn search(&self) -> Duration {
        secs(self.search_secs)
    }

    pub fn overall(&self) -> Duration {
        secs(self.overall_secs)
    }
}

/// Upper bound for any configured timeout (one day).
pub const MAX_TIMEOUT: Duration = Duration::from_secs(24 * 60 * 60);

/// Non-positive and NaN read as zero; anything above [`MAX_TIMEOUT`],
/// infinity included, is capped.
fn secs(v: f64) -> Duration {
    if v.is_nan() || v <= 0.0 {
        return Duration::ZERO;
    }
    Duration::try_from_secs_f64(v)
        .unwrap_or(MAX_TIMEOUT)
        .min(MAX_TIMEOUT)
}

/// Lower/upper percentage bounds for a ratio heuristic.
///
/// `pct < low` is legitimate, `pct <= high` suspicious, anything above phishing.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RatioBands {
    pub low: f64,
    pub high: f64,
}

impl RatioBands {
    pub const fn new(low: f64, high: f64) -> Self {
        Self { low, high }
    }
}

/// Heuristic thresholds (`[thresholds]` in config.toml).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ThresholdConfig {
    /// Minimum registration span (expiration - creation) in days.
    pub min_registration_days: i64,
    /// Minimum domain age in days.
    pub min_domain_age_days: i64,
    /// Off-host share of img/video/audio sources.
    pub media: RatioBands,
    /// Off-host share of anchor hrefs.
    pub anchors: RatioBands,
    /// Off-host share of absolute meta/script/link references.
    pub tag_links: RatioBands,
}

impl Default for ThresholdConfig {
    fn default() -> Self {
        Self {
            min_registration_days: 365,
            min_domain_age_days: 180,
            media: RatioBands::new(22.0, 61.0),
            anchors: RatioBands::new(31.0, 67.0),
            tag_links: RatioBands::new(17.0, 81.0),
        }
    }
}

/// Remote services queried by the network evaluators (`[endpoints]`).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EndpointConfig {
    /// RDAP bootstrap base; the lookup GETs `<base>/domain/<name>`.
    pub rdap_base_url: String,
    /// Search results URL; `{host}` is replaced by the page host.
    pub search_url_template: String,
    /// Text the results page contains when the site is not indexed.
    pub search_no_results_marker: String,
}

impl Default for EndpointConfig {
    fn default() -> Self {
        Self {
            rdap_base_url: "https://rdap.org".to_string(),
            search_url_template: "https://www.google.com/search?q=site:{host}".to_string(),
            search_no_results_marker: "did not match any documents".to_string(),
        }
    }
}

/// Global configuration loaded from `~/.config/phishscan/config.toml`.
///
/// One immutable value is built per process and shared by every extraction.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ScanConfig {
    /// User-Agent sent with every HTTP request.
    pub user_agent: String,
    /// Maximum redirects followed by the page fetch.
    pub max_redirects: u32,
    /// Response bodies are cut at this size.
    pub max_body_bytes: usize,
    /// Concurrent extractions in batch mode.
    pub batch_parallelism: usize,
    /// Host substrings that identify URL shortening services.
    pub shorteners: Vec<String>,
    pub timeouts: TimeoutConfig,
    pub thresholds: ThresholdConfig,
    pub endpoints: EndpointConfig,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            user_agent: "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36".to_string(),
            max_redirects: 10,
            max_body_bytes: 4 * 1024 * 1024,
            batch_parallelism: 4,
            shorteners: ["bit.ly", "goo.gl", "tinyurl", "t.co", "ow.ly", "is.gd", "buff.ly"]
                .iter()
                .map(|s| s.to_string())
                .collect(),
            timeouts: TimeoutConfig::default(),
            thresholds: ThresholdConfig::default(),
            endpoints: EndpointConfig::default(),
        }
    }
}

pub fn config_path() -> Result<PathBuf> {
    let xdg_dirs = xdg::BaseDirectories::with_prefix("phishscan")?;
    Ok(xdg_dirs.place_config_file("config.toml")?)
}

/// Load configuration from disk, creating a default file if none exists.
pub fn load_or_init() -> Result<ScanConfig> {
    let path = config_path()?;
    if !path.exists() {
        let default_cfg = ScanConfig::default();
        let toml = toml::to_string_pretty(&default_cfg)?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&path, toml)?;
        tracing::info!("created default config at {}", path.display());
        return Ok(default_cfg);
    }

    load_from_path(&path)
}

/// Load configuration from an explicit file. Missing keys take their defaults.
pub fn load_from_path(path: &Path) -> Result<ScanConfig> {
    let data = fs::read_to_string(path)
        .with_context(|| format!("reading config {}", path.display()))?;
    let cfg: ScanConfig =
        toml::from_str(&data).with_context(|| format!("parsing config {}", path.display()))?;
    Ok(cfg)
}

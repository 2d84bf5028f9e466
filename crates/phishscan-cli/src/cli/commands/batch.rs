//! `phishscan batch` – feature vectors for every URL in a file.

use anyhow::{bail, Context, Result};
use phishscan_core::config::ScanConfig;
use phishscan_core::Extractor;
use std::path::Path;
use std::sync::Arc;

use crate::cli::output;
use crate::cli::OutputFormat;

pub async fn run_batch(cfg: ScanConfig, path: &Path, format: OutputFormat) -> Result<()> {
    let contents = std::fs::read_to_string(path)
        .with_context(|| format!("reading URL list {}", path.display()))?;
    let urls = output::batch_urls(&contents);
    if urls.is_empty() {
        bail!("no URLs in {}", path.display());
    }
    tracing::info!(count = urls.len(), jobs = cfg.batch_parallelism, "batch started");

    let extractor = Extractor::live(Arc::new(cfg));
    let results = extractor.extract_many(&urls).await;

    let mut table = match format {
        OutputFormat::Csv => Some(output::CsvBatch::new(std::io::stdout().lock())?),
        OutputFormat::Json => None,
    };
    let mut skipped = 0usize;
    for (url, result) in &results {
        match result {
            Ok(report) => match table.as_mut() {
                Some(t) => t.row(url, &report.features)?,
                None => println!("{}", output::json_batch_line(url, &report.features)?),
            },
            Err(e) => {
                skipped += 1;
                eprintln!("skipping: {}", e);
            }
        }
    }
    if let Some(t) = table {
        t.finish()?;
    }

    tracing::info!(total = results.len(), skipped, "batch complete");
    if skipped == results.len() {
        bail!("none of the {} URL(s) could be parsed", skipped);
    }
    Ok(())
}

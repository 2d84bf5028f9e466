//! `phishscan extract` – feature vector for a single URL.

use anyhow::Result;
use phishscan_core::config::ScanConfig;
use phishscan_core::Extractor;
use std::sync::Arc;

use crate::cli::output;
use crate::cli::OutputFormat;

pub async fn run_extract(
    cfg: ScanConfig,
    url: &str,
    format: OutputFormat,
    verbose: bool,
) -> Result<()> {
    let extractor = Extractor::live(Arc::new(cfg));
    let report = extractor.extract(url).await?;

    match format {
        OutputFormat::Json => println!("{}", output::json_single(&report, verbose)?),
        OutputFormat::Csv => {
            output::write_csv_single(std::io::stdout().lock(), &report.features)?;
            if verbose {
                eprintln!("{}", output::describe_page(report.page.as_ref()));
                eprintln!(
                    "fell back: {} ({} ms)",
                    if report.fallbacks.is_empty() {
                        "none".to_string()
                    } else {
                        report.fallbacks.join(", ")
                    },
                    report.elapsed_ms
                );
            }
        }
    }
    Ok(())
}

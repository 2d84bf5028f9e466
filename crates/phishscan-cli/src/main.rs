use clap::Parser;
use phishscan_core::logging;

mod cli;

use crate::cli::Cli;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    // File logging under the XDG state dir; stderr if that fails. Never stdout.
    logging::init(cli.log_filter.as_deref());

    if let Err(err) = cli.run().await {
        eprintln!("phishscan error: {:#}", err);
        std::process::exit(1);
    }
}

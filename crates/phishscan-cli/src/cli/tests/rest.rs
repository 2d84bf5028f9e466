//! Tests for features, completions and global options.

use super::parse;
use crate::cli::{Cli, CliCommand};
use clap::Parser;
use clap_complete::Shell;

#[test]
fn cli_parse_features() {
    assert!(matches!(
        parse(&["phishscan", "features"]),
        CliCommand::Features
    ));
}

#[test]
fn cli_parse_completions() {
    match parse(&["phishscan", "completions", "zsh"]) {
        CliCommand::Completions { shell } => assert_eq!(shell, Shell::Zsh),
        _ => panic!("expected Completions"),
    }
}

#[test]
fn cli_parse_global_config_after_subcommand() {
    let cli = Cli::try_parse_from([
        "phishscan",
        "extract",
        "http://a.com/",
        "--config",
        "/tmp/p.toml",
    ])
    .unwrap();
    assert_eq!(
        cli.config.as_deref(),
        Some(std::path::Path::new("/tmp/p.toml"))
    );
}

#[test]
fn cli_parse_log_filter() {
    let cli = Cli::try_parse_from(["phishscan", "--log-filter", "warn", "features"]).unwrap();
    assert_eq!(cli.log_filter.as_deref(), Some("warn"));
    let cli = Cli::try_parse_from(["phishscan", "features"]).unwrap();
    assert!(cli.log_filter.is_none());
}

#[test]
fn cli_rejects_unknown_format() {
    assert!(Cli::try_parse_from(["phishscan", "extract", "http://a.com/", "--format", "xml"])
        .is_err());
}

#[test]
fn cli_rejects_unknown_subcommand() {
    assert!(Cli::try_parse_from(["phishscan", "status"]).is_err());
}

//! Tests for command-line parsing.

use clap::Parser;
use dmarc_survey::{Config, LogFormat, LogLevel};
use std::path::PathBuf;

#[test]
fn test_cli_defaults() {
    let config = Config::try_parse_from(["dmarc_survey", "domains.txt"]).unwrap();
    assert_eq!(config.file, PathBuf::from("domains.txt"));
    assert_eq!(config.max_concurrency, 450);
    assert_eq!(config.timeout_seconds, 10);
    assert_eq!(config.edns_payload_size, 1440);
    assert_eq!(config.resolvers, vec!["1.1.1.1:53", "8.8.8.8:53"]);
    assert_eq!(config.progress_interval, 1);
    assert_eq!(
        log::LevelFilter::from(config.log_level),
        log::LevelFilter::Info
    );
}

#[test]
fn test_cli_all_options() {
    let config = Config::try_parse_from([
        "dmarc_survey",
        "-",
        "--log-level",
        "debug",
        "--log-format",
        "json",
        "--max-concurrency",
        "100",
        "--timeout-seconds",
        "30",
        "--edns-payload-size",
        "1232",
        "--resolver",
        "9.9.9.9:53",
        "--progress-interval",
        "500",
    ])
    .unwrap();

    assert!(config.reads_stdin());
    assert_eq!(config.log_level, LogLevel::Debug);
    assert_eq!(config.log_format, LogFormat::Json);
    assert_eq!(config.max_concurrency, 100);
    assert_eq!(config.timeout_seconds, 30);
    assert_eq!(config.edns_payload_size, 1232);
    assert_eq!(config.resolvers, vec!["9.9.9.9:53"]);
    assert_eq!(config.progress_interval, 500);
    assert!(config.validate().is_ok());
}

#[test]
fn test_cli_rejects_unknown_log_level() {
    assert!(Config::try_parse_from(["dmarc_survey", "d.txt", "--log-level", "loud"]).is_err());
}

#[test]
fn test_cli_rejects_non_numeric_concurrency() {
    assert!(
        Config::try_parse_from(["dmarc_survey", "d.txt", "--max-concurrency", "many"]).is_err()
    );
}

#[test]
fn test_cli_rejects_oversized_payload() {
    assert!(
        Config::try_parse_from(["dmarc_survey", "d.txt", "--edns-payload-size", "70000"]).is_err()
    );
}

//! Configuration types and CLI options.
//!
//! This module defines enums and structs used for command-line argument parsing
//! and configuration.

use std::path::PathBuf;
use std::time::Duration;

use clap::{Parser, ValueEnum};

use crate::config::constants::{
    DEFAULT_EDNS_PAYLOAD_SIZE, DEFAULT_MAX_CONCURRENCY, DEFAULT_PROGRESS_INTERVAL,
    DEFAULT_RESOLVERS, DEFAULT_TIMEOUT_SECS, MIN_EDNS_PAYLOAD_SIZE,
};
use crate::dns::parse_endpoint;
use crate::error_handling::InitializationError;

/// Logging level for the application.
///
/// Controls the verbosity of log output, from most restrictive (Error) to most
/// verbose (Trace).
#[derive(Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum LogLevel {
    /// Only error messages
    Error,
    /// Error and warning messages
    Warn,
    /// Error, warning, and informational messages
    Info,
    /// All messages except trace
    Debug,
    /// All messages including trace
    Trace,
}

impl From<LogLevel> for log::LevelFilter {
    fn from(l: LogLevel) -> Self {
        match l {
            LogLevel::Error => log::LevelFilter::Error,
            LogLevel::Warn => log::LevelFilter::Warn,
            LogLevel::Info => log::LevelFilter::Info,
            LogLevel::Debug => log::LevelFilter::Debug,
            LogLevel::Trace => log::LevelFilter::Trace,
        }
    }
}

/// Log output format.
///
/// - `Plain`: Human-readable format with colors (default)
/// - `Json`: Structured JSON format for machine parsing
#[derive(Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum LogFormat {
    /// Human-readable format with colors (default)
    Plain,
    /// Structured JSON format for machine parsing
    Json,
}

fn default_resolvers() -> Vec<String> {
    DEFAULT_RESOLVERS.iter().map(|r| r.to_string()).collect()
}

/// Survey configuration.
///
/// Parsed from the command line by `clap`, or constructed programmatically
/// through `Default`.
///
/// # Examples
///
/// ```no_run
/// use dmarc_survey::Config;
/// use std::path::PathBuf;
///
/// let config = Config {
///     file: PathBuf::from("domains.txt"),
///     max_concurrency: 100,
///     ..Default::default()
/// };
/// ```
///
/// ```bash
/// # Survey with the default resolvers
/// dmarc_survey domains.txt
///
/// # Read from stdin, query Quad9 only
/// cat domains.txt | dmarc_survey - --resolver 9.9.9.9:53
/// ```
#[derive(Debug, Clone, Parser)]
#[command(
    name = "dmarc_survey",
    about = "Counts DMARC adoption and policies for a list of domains."
)]
pub struct Config {
    /// File with one domain per line (`-` reads stdin)
    #[arg(value_parser)]
    pub file: PathBuf,

    /// Log level: error|warn|info|debug|trace
    #[arg(long, value_enum, default_value_t = LogLevel::Info)]
    pub log_level: LogLevel,

    /// Log format: plain|json
    #[arg(long, value_enum, default_value_t = LogFormat::Plain)]
    pub log_format: LogFormat,

    /// Maximum number of DNS queries in flight
    #[arg(long, default_value_t = DEFAULT_MAX_CONCURRENCY)]
    pub max_concurrency: usize,

    /// Per-attempt DNS timeout in seconds
    #[arg(long, default_value_t = DEFAULT_TIMEOUT_SECS)]
    pub timeout_seconds: u64,

    /// Advertised EDNS0 UDP payload size in bytes
    #[arg(long, default_value_t = DEFAULT_EDNS_PAYLOAD_SIZE)]
    pub edns_payload_size: u16,

    /// Upstream resolver (`ip:port` or bare IP); repeat to build the round-robin list
    #[arg(long = "resolver", default_values_t = default_resolvers())]
    pub resolvers: Vec<String>,

    /// Log progress every N dispatched domains
    #[arg(long, default_value_t = DEFAULT_PROGRESS_INTERVAL)]
    pub progress_interval: usize,
}

impl Config {
    /// Per-attempt query timeout as a `Duration`.
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_seconds)
    }

    /// Returns true when domains should be read from stdin.
    pub fn reads_stdin(&self) -> bool {
        self.file.as_os_str() == "-"
    }

    /// Checks the configuration before anything is dispatched.
    ///
    /// # Errors
    ///
    /// Returns `InitializationError::InvalidConfig` for out-of-range values and
    /// `InitializationError::InvalidResolver` for an endpoint that does not parse.
    pub fn validate(&self) -> Result<(), InitializationError> {
        if self.max_concurrency == 0 {
            return Err(InitializationError::InvalidConfig(
                "max_concurrency must be at least 1".to_string(),
            ));
        }
        if self.timeout_seconds == 0 {
            return Err(InitializationError::InvalidConfig(
                "timeout_seconds must be at least 1".to_string(),
            ));
        }
        if self.progress_interval == 0 {
            return Err(InitializationError::InvalidConfig(
                "progress_interval must be at least 1".to_string(),
            ));
        }
        if self.edns_payload_size < MIN_EDNS_PAYLOAD_SIZE {
            return Err(InitializationError::InvalidConfig(format!(
                "edns_payload_size must be at least {MIN_EDNS_PAYLOAD_SIZE}, got {}",
                self.edns_payload_size
            )));
        }
        if self.resolvers.is_empty() {
            return Err(InitializationError::InvalidConfig(
                "at least one resolver is required".to_string(),
            ));
        }
        for resolver in &self.resolvers {
            parse_endpoint(resolver)?;
        }
        Ok(())
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            file: PathBuf::from("domains.txt"),
            log_level: LogLevel::Info,
            log_format: LogFormat::Plain,
            max_concurrency: DEFAULT_MAX_CONCURRENCY,
            timeout_seconds: DEFAULT_TIMEOUT_SECS,
            edns_payload_size: DEFAULT_EDNS_PAYLOAD_SIZE,
            resolvers: default_resolvers(),
            progress_interval: DEFAULT_PROGRESS_INTERVAL,
        }
    }
}

//! Domain input source.
//!
//! Reads domains line by line from a file or stdin. Lines are trimmed; blank
//! lines and `#` comments are skipped. Nothing else is validated: a malformed
//! domain is dispatched and simply fails resolution.

use std::path::Path;

use log::{error, warn};
use tokio::io::{AsyncBufRead, AsyncBufReadExt, BufReader, Lines};

use crate::error_handling::InitializationError;

/// Consecutive read errors after which the input is treated as exhausted.
const MAX_CONSECUTIVE_READ_ERRORS: usize = 10;

/// Extracts the domain from one input line, if the line holds one.
pub fn parse_domain_line(line: &str) -> Option<&str> {
    let trimmed = line.trim();
    if trimmed.is_empty() || trimmed.starts_with('#') {
        None
    } else {
        Some(trimmed)
    }
}

/// Line-oriented stream of domains.
pub struct DomainSource {
    lines: Lines<Box<dyn AsyncBufRead + Unpin + Send>>,
}

impl DomainSource {
    /// Opens `path`, or stdin when `path` is `-`.
    ///
    /// # Errors
    ///
    /// Returns `InitializationError::InputError` if the file cannot be opened.
    pub async fn open(path: &Path) -> Result<Self, InitializationError> {
        if path.as_os_str() == "-" {
            log::info!("Reading domains from stdin");
            return Ok(Self::from_reader(BufReader::new(tokio::io::stdin())));
        }
        let file = tokio::fs::File::open(path)
            .await
            .map_err(|source| InitializationError::InputError {
                path: path.display().to_string(),
                source,
            })?;
        Ok(Self::from_reader(BufReader::new(file)))
    }

    /// Wraps any buffered async reader.
    pub fn from_reader<R>(reader: R) -> Self
    where
        R: AsyncBufRead + Unpin + Send + 'static,
    {
        let boxed: Box<dyn AsyncBufRead + Unpin + Send> = Box::new(reader);
        Self {
            lines: boxed.lines(),
        }
    }

    /// Returns the next domain, or `None` at end of input.
    ///
    /// Unreadable lines are logged and skipped.
    pub async fn next_domain(&mut self) -> Option<String> {
        let mut consecutive_errors = 0;
        loop {
            match self.lines.next_line().await {
                Ok(Some(line)) => {
                    consecutive_errors = 0;
                    if let Some(domain) = parse_domain_line(&line) {
                        return Some(domain.to_string());
                    }
                }
                Ok(None) => return None,
                Err(e) => {
                    consecutive_errors += 1;
                    if consecutive_errors >= MAX_CONSECUTIVE_READ_ERRORS {
                        error!("Giving up on input after {consecutive_errors} consecutive read errors: {e}");
                        return None;
                    }
                    warn!("Failed to read line from input: {e}");
                }
            }
        }
    }
}

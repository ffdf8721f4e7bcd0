// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Application configuration.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::{DruckwartError, Result};

/// Environment variable naming the default target printer URI.
pub const PRINTER_URI_VAR: &str = "DRUCKWART_PRINTER_URI";

/// Environment variable overriding the status poll cadence, in seconds.
pub const POLL_INTERVAL_VAR: &str = "DRUCKWART_POLL_INTERVAL_SECS";

/// Default cadence of the status poller.
const DEFAULT_POLL_INTERVAL_SECS: u64 = 5;

/// Runtime settings for the orchestrator and poller.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Default target printer URI (e.g. `ipp://host:631/printers/Office`).
    /// Required — the orchestrator refuses construction without it.
    pub printer_uri: String,
    /// Seconds between status poll ticks.
    pub poll_interval_secs: u64,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            printer_uri: String::new(),
            poll_interval_secs: DEFAULT_POLL_INTERVAL_SECS,
        }
    }
}

impl AppConfig {
    /// Read configuration from the process environment.
    ///
    /// A missing printer URI is a fatal configuration error; a missing or
    /// unparsable poll interval falls back to the default cadence.
    pub fn from_env() -> Result<Self> {
        let printer_uri = std::env::var(PRINTER_URI_VAR)
            .ok()
            .filter(|v| !v.trim().is_empty())
            .ok_or(DruckwartError::MissingPrinterUri)?;

        let poll_interval_secs = std::env::var(POLL_INTERVAL_VAR)
            .ok()
            .and_then(|v| v.trim().parse().ok())
            .unwrap_or(DEFAULT_POLL_INTERVAL_SECS);

        Ok(Self {
            printer_uri,
            poll_interval_secs,
        })
    }

    /// Poll cadence as a [`Duration`].
    pub fn poll_interval(&self) -> Duration {
        Duration::from_secs(self.poll_interval_secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_has_no_printer_uri() {
        let config = AppConfig::default();
        assert!(config.printer_uri.is_empty());
        assert_eq!(config.poll_interval(), Duration::from_secs(5));
    }

    #[test]
    fn poll_interval_reflects_override() {
        let config = AppConfig {
            printer_uri: "ipp://localhost:631/printers/Office".into(),
            poll_interval_secs: 30,
        };
        assert_eq!(config.poll_interval(), Duration::from_secs(30));
    }
}

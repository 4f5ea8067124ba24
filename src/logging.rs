// ABOUTME: Logging configuration and structured logging setup for observability
// ABOUTME: Configures log levels, output format, and env-filter based overrides
//
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Structured logging configuration built on `tracing-subscriber`.
//!
//! The proxy emits `tracing` events throughout: auth failures at `warn`,
//! tool dispatch at `info` with tool name and duration, filter stage
//! internals at `debug`. This module owns subscriber installation.

use std::env;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Output format for log events
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    /// Machine-readable JSON lines
    Json,
    /// Human-readable single-line output
    Compact,
    /// Human-readable multi-line output for development
    Pretty,
}

/// Logging configuration
#[derive(Debug, Clone)]
pub struct LoggingConfig {
    /// Default log level when `RUST_LOG` is not set
    pub level: String,
    /// Output format (json, compact, pretty)
    pub format: LogFormat,
    /// Include source file and line numbers
    pub include_location: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_owned(),
            format: LogFormat::Compact,
            include_location: false,
        }
    }
}

impl LoggingConfig {
    /// Build configuration from environment variables.
    ///
    /// `AGENTCLOAK_LOG_FORMAT` selects the format (`json`, `pretty`,
    /// anything else means compact); `RUST_LOG` keeps its usual meaning
    /// through `EnvFilter`.
    #[must_use]
    pub fn from_env() -> Self {
        let format = match env::var("AGENTCLOAK_LOG_FORMAT").as_deref() {
            Ok("json") => LogFormat::Json,
            Ok("pretty") => LogFormat::Pretty,
            _ => LogFormat::Compact,
        };
        Self {
            level: env::var("AGENTCLOAK_LOG_LEVEL").unwrap_or_else(|_| "info".to_owned()),
            format,
            include_location: false,
        }
    }

    /// Install the global subscriber for this configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if a global subscriber is already installed.
    pub fn init(&self) -> anyhow::Result<()> {
        let filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(self.level.clone()));

        match self.format {
            LogFormat::Json => {
                tracing_subscriber::registry()
                    .with(filter)
                    .with(
                        fmt::layer()
                            .json()
                            .with_file(self.include_location)
                            .with_line_number(self.include_location),
                    )
                    .try_init()?;
            }
            LogFormat::Compact => {
                tracing_subscriber::registry()
                    .with(filter)
                    .with(
                        fmt::layer()
                            .compact()
                            .with_file(self.include_location)
                            .with_line_number(self.include_location),
                    )
                    .try_init()?;
            }
            LogFormat::Pretty => {
                tracing_subscriber::registry()
                    .with(filter)
                    .with(fmt::layer().pretty())
                    .try_init()?;
            }
        }
        Ok(())
    }
}

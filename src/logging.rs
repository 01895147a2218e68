// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Log level and format settings, installed once at start-up.

use std::fmt;
use std::str::FromStr;
use tracing_subscriber::EnvFilter;

/// Verbosity accepted through `LOG_LEVEL`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogLevel {
    /// Errors only
    Quiet,
    #[default]
    Info,
    Debug,
}

impl LogLevel {
    fn directive(self) -> &'static str {
        match self {
            LogLevel::Quiet => "error",
            LogLevel::Info => "info",
            LogLevel::Debug => "debug",
        }
    }
}

impl FromStr for LogLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "quiet" | "error" => Ok(LogLevel::Quiet),
            "info" => Ok(LogLevel::Info),
            "debug" => Ok(LogLevel::Debug),
            other => Err(format!("unknown log level '{}'", other)),
        }
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            LogLevel::Quiet => "quiet",
            LogLevel::Info => "info",
            LogLevel::Debug => "debug",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

impl FromStr for LogFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "text" | "" => Ok(LogFormat::Text),
            "json" => Ok(LogFormat::Json),
            other => Err(format!("unknown log format '{}'", other)),
        }
    }
}

/// Logging configuration handed to the binary at start-up
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LogSettings {
    pub level: LogLevel,
    pub format: LogFormat,
    /// Raw `LOG_LEVEL` value that could not be parsed, reported after init
    pub rejected_level: Option<String>,
}

impl LogSettings {
    /// Filter scoped to this crate; dependencies log at warn, or error when quiet
    pub fn filter(&self) -> EnvFilter {
        let dependencies = match self.level {
            LogLevel::Quiet => "error",
            _ => "warn",
        };
        EnvFilter::new(format!(
            "{},{}={}",
            dependencies,
            env!("CARGO_CRATE_NAME"),
            self.level.directive()
        ))
    }

    /// Install the global subscriber. Call once.
    pub fn init(&self) {
        let builder = tracing_subscriber::fmt().with_env_filter(self.filter());
        match self.format {
            LogFormat::Text => builder.init(),
            LogFormat::Json => builder.json().init(),
        }

        if let Some(raw) = &self.rejected_level {
            tracing::warn!("Invalid LOG_LEVEL '{}', defaulting to {}", raw, self.level);
        }
    }
}

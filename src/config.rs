// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0
use crate::constants::{defaults, env as keys};
use crate::logging::{LogFormat, LogLevel, LogSettings};
use anyhow::{anyhow, bail, Context, Result};
use std::env;
use std::fmt;
use std::time::Duration;
use url::Url;

/// Bridge configuration loaded from environment variables
#[derive(Clone)]
pub struct Config {
    /// Base URL of the source vault API, with scheme and without trailing slash
    pub vault_host: String,
    pub vault_id: String,
    pub vault_token: String,
    /// Base URL of the destination store API, with scheme and without trailing slash
    pub store_host: String,
    pub store_api_key: String,
    pub store_api_secret: String,
    pub log: LogSettings,
    /// Raw `SYNC_INTERVAL`, parsed only when daemon mode asks for it
    pub sync_interval_raw: Option<String>,
    /// Timeout applied to every outbound request
    pub request_timeout: Duration,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration through an arbitrary key lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let required = |key: &str| -> Result<String> {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
                .with_context(|| format!("{} environment variable not set", key))
        };

        let vault_host = normalize_host(&required(keys::VAULT_HOST)?)
            .with_context(|| format!("{} is not a valid URL", keys::VAULT_HOST))?;
        let vault_id = required(keys::VAULT_ID)?;
        let vault_token = required(keys::VAULT_TOKEN)?;
        let store_host = normalize_host(&required(keys::STORE_HOST)?)
            .with_context(|| format!("{} is not a valid URL", keys::STORE_HOST))?;
        let store_api_key = required(keys::STORE_API_KEY)?;
        let store_api_secret = required(keys::STORE_API_SECRET)?;

        let mut log = LogSettings::default();
        if let Some(raw) = lookup(keys::LOG_LEVEL).filter(|v| !v.trim().is_empty()) {
            match raw.parse::<LogLevel>() {
                Ok(level) => log.level = level,
                Err(_) => log.rejected_level = Some(raw),
            }
        }
        if let Some(raw) = lookup(keys::LOG_FORMAT) {
            log.format = raw
                .parse::<LogFormat>()
                .map_err(|e| anyhow!(e))
                .with_context(|| format!("{} is invalid", keys::LOG_FORMAT))?;
        }

        let sync_interval_raw = lookup(keys::SYNC_INTERVAL).filter(|v| !v.trim().is_empty());
        let request_timeout = parse_duration(
            &lookup(keys::REQUEST_TIMEOUT)
                .unwrap_or_else(|| defaults::REQUEST_TIMEOUT.to_string()),
        )
        .with_context(|| format!("{} is invalid", keys::REQUEST_TIMEOUT))?;

        Ok(Config {
            vault_host,
            vault_id,
            vault_token,
            store_host,
            store_api_key,
            store_api_secret,
            log,
            sync_interval_raw,
            request_timeout,
        })
    }

    /// Interval between runs in daemon mode, `SYNC_INTERVAL` or the default
    pub fn sync_interval(&self) -> Result<Duration> {
        let raw = self.sync_interval_raw.as_deref().unwrap_or(defaults::SYNC_INTERVAL);
        parse_duration(raw).with_context(|| format!("{} is invalid", keys::SYNC_INTERVAL))
    }
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("vault_host", &self.vault_host)
            .field("vault_id", &self.vault_id)
            .field("vault_token", &"<redacted>")
            .field("store_host", &self.store_host)
            .field("store_api_key", &"<redacted>")
            .field("store_api_secret", &"<redacted>")
            .field("log", &self.log)
            .field("sync_interval_raw", &self.sync_interval_raw)
            .field("request_timeout", &self.request_timeout)
            .finish()
    }
}

/// Prepend `http://` when no scheme is given and strip trailing slashes
pub fn normalize_host(raw: &str) -> Result<String> {
    let trimmed = raw.trim();
    let with_scheme = if trimmed.starts_with("http://") || trimmed.starts_with("https://") {
        trimmed.to_string()
    } else {
        format!("http://{}", trimmed)
    };
    let normalized = with_scheme.trim_end_matches('/').to_string();

    let parsed = Url::parse(&normalized).with_context(|| format!("invalid URL '{}'", raw))?;
    if parsed.host_str().is_none() {
        bail!("URL '{}' has no host", raw);
    }

    Ok(normalized)
}

/// Parse durations such as `30s`, `5m`, `1h30m` or `500ms`
pub fn parse_duration(value: &str) -> Result<Duration> {
    let value = value.trim();
    if value.is_empty() {
        bail!("Invalid duration '': expected format like 1h, 30m, 45s");
    }

    let mut total = Duration::ZERO;
    let mut rest = value;
    while !rest.is_empty() {
        let digits = rest.find(|c: char| !c.is_ascii_digit()).unwrap_or(rest.len());
        if digits == 0 {
            bail!("Invalid duration '{}': expected a number before each unit", value);
        }
        let (number, tail) = rest.split_at(digits);
        let quantity: u64 = number
            .parse()
            .map_err(|err| anyhow!("Invalid duration '{}': {}", value, err))?;

        let unit_len = tail.find(|c: char| c.is_ascii_digit()).unwrap_or(tail.len());
        let (unit, next) = tail.split_at(unit_len);
        let part = match unit {
            "h" => Duration::from_secs(quantity.saturating_mul(3600)),
            "m" => Duration::from_secs(quantity.saturating_mul(60)),
            "s" => Duration::from_secs(quantity),
            "ms" => Duration::from_millis(quantity),
            "" => bail!("Invalid duration '{}': missing unit (h, m, s, ms)", value),
            other => bail!(
                "Invalid duration unit '{}': expected one of h (hours), m (minutes), s (seconds), ms (milliseconds)",
                other
            ),
        };
        total += part;
        rest = next;
    }

    if total.is_zero() {
        bail!("Invalid duration '{}': must be positive", value);
    }

    Ok(total)
}

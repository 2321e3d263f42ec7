//! Application settings loaded via OrthoConfig.
//!
//! Values come from `REVIEWS_*` environment variables, matching CLI flags, or
//! a configuration file. The settings are loaded once in `main` and passed on
//! explicitly.

use std::net::SocketAddr;
use std::str::FromStr;
use std::time::Duration;

use ortho_config::OrthoConfig;
use serde::Deserialize;

use crate::domain::assignment::ReassignmentPolicy;
use crate::outbound::persistence::PoolConfig;

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";
const DEFAULT_POOL_MAX_SIZE: u32 = 10;
const DEFAULT_POOL_CONNECTION_TIMEOUT_SECS: u64 = 30;
const DEFAULT_REQUEST_TIMEOUT_MS: u64 = 5_000;
const DEFAULT_SHUTDOWN_TIMEOUT_SECS: u64 = 15;

/// Log output flavour and runtime profile.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunMode {
    /// Human-readable logs.
    Debug,
    /// JSON logs.
    Release,
}

impl RunMode {
    /// Mode matching the current build profile.
    pub const fn for_build() -> Self {
        if cfg!(debug_assertions) {
            Self::Debug
        } else {
            Self::Release
        }
    }
}

impl FromStr for RunMode {
    type Err = SettingsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "debug" => Ok(Self::Debug),
            "release" => Ok(Self::Release),
            other => Err(SettingsError::InvalidMode {
                value: other.to_owned(),
            }),
        }
    }
}

/// Settings values that parse but make no sense.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SettingsError {
    /// `mode` is neither `debug` nor `release`.
    #[error("mode must be debug or release, got {value:?}")]
    InvalidMode { value: String },
    /// `bind_addr` is not a socket address.
    #[error("bind_addr must be host:port, got {value:?}")]
    InvalidBindAddr { value: String },
    /// A duration or size setting is zero.
    #[error("{field} must be greater than zero")]
    Zero { field: &'static str },
}

/// Configuration for the reviewer assignment service.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "REVIEWS")]
pub struct AppSettings {
    /// `debug` or `release`; defaults to the build profile.
    pub mode: Option<String>,
    /// Listen address.
    pub bind_addr: Option<String>,
    /// PostgreSQL URL. Without it the service keeps state in memory.
    pub database_url: Option<String>,
    /// Maximum pooled connections.
    pub pool_max_size: Option<u32>,
    /// Seconds to wait for a pooled connection.
    pub pool_connection_timeout_secs: Option<u64>,
    /// Per-request deadline in milliseconds.
    pub request_timeout_ms: Option<u64>,
    /// Seconds granted to in-flight requests on shutdown.
    pub shutdown_timeout_secs: Option<u64>,
    /// Let inactive team members replace reviewers.
    #[ortho_config(default = false)]
    pub reassign_include_inactive: bool,
    /// Do not apply embedded migrations at start-up.
    #[ortho_config(default = false)]
    pub skip_migrations: bool,
}

fn positive(value: Option<u64>, default: u64, field: &'static str) -> Result<u64, SettingsError> {
    match value.unwrap_or(default) {
        0 => Err(SettingsError::Zero { field }),
        value => Ok(value),
    }
}

impl AppSettings {
    /// Resolved run mode.
    pub fn run_mode(&self) -> Result<RunMode, SettingsError> {
        self.mode
            .as_deref()
            .map_or(Ok(RunMode::for_build()), RunMode::from_str)
    }

    /// Resolved listen address.
    pub fn bind_addr(&self) -> Result<SocketAddr, SettingsError> {
        let raw = self.bind_addr.as_deref().unwrap_or(DEFAULT_BIND_ADDR);
        raw.parse().map_err(|_| SettingsError::InvalidBindAddr {
            value: raw.to_owned(),
        })
    }

    /// Pool configuration when a database URL is set.
    pub fn pool_config(&self) -> Result<Option<PoolConfig>, SettingsError> {
        let Some(url) = self.database_url.as_deref().filter(|url| !url.trim().is_empty()) else {
            return Ok(None);
        };
        let max_size = positive(
            self.pool_max_size.map(u64::from),
            u64::from(DEFAULT_POOL_MAX_SIZE),
            "pool_max_size",
        )?;
        let timeout = positive(
            self.pool_connection_timeout_secs,
            DEFAULT_POOL_CONNECTION_TIMEOUT_SECS,
            "pool_connection_timeout_secs",
        )?;
        Ok(Some(
            PoolConfig::new(url)
                .with_max_size(u32::try_from(max_size).unwrap_or(u32::MAX))
                .with_connection_timeout(Duration::from_secs(timeout)),
        ))
    }

    /// Deadline applied to each HTTP request.
    pub fn request_timeout(&self) -> Result<Duration, SettingsError> {
        positive(
            self.request_timeout_ms,
            DEFAULT_REQUEST_TIMEOUT_MS,
            "request_timeout_ms",
        )
        .map(Duration::from_millis)
    }

    /// Graceful shutdown window.
    pub fn shutdown_timeout(&self) -> Duration {
        Duration::from_secs(
            self.shutdown_timeout_secs
                .unwrap_or(DEFAULT_SHUTDOWN_TIMEOUT_SECS),
        )
    }

    /// Replacement pool policy for reassignment.
    pub fn reassignment_policy(&self) -> ReassignmentPolicy {
        ReassignmentPolicy {
            include_inactive: self.reassign_include_inactive,
        }
    }
}

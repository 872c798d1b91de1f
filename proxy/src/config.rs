//! Proxy Configuration
//!
//! Loads configuration from environment variables.

use anyhow::{Context, Result};
use std::env;

use crate::permissions::PermissionSet;

/// Logging configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogConfig {
    /// `tracing` env-filter directive (e.g., "`stripe_proxy=debug`")
    pub filter: String,

    /// Emit JSON log lines instead of plain text
    pub json: bool,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            filter: "stripe_proxy=info".into(),
            json: true,
        }
    }
}

/// Proxy configuration loaded from environment variables.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Logging setup
    pub log: LogConfig,

    /// Permissions granted to callers that present no permission blob
    pub default_permission: PermissionSet,
}

impl Config {
    /// Load configuration from a `.env` file (if present) and the environment.
    pub fn load() -> Result<Self> {
        dotenvy::dotenv().ok();
        Self::from_env()
    }

    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self> {
        let defaults = LogConfig::default();

        let json = match env::var("PROXY_LOG_JSON") {
            Ok(v) => parse_bool(&v)
                .with_context(|| format!("PROXY_LOG_JSON: invalid value {v:?}"))?,
            Err(_) => defaults.json,
        };

        let mut default_permission = match env::var("PROXY_DEFAULT_PERMISSION") {
            Ok(v) => parse_wire_hex(&v)
                .context("PROXY_DEFAULT_PERMISSION is not a valid permission")?,
            Err(_) => PermissionSet::none(),
        };

        if let Ok(grants) = env::var("PROXY_DEFAULT_GRANTS") {
            let extra: PermissionSet = grants
                .parse()
                .context("PROXY_DEFAULT_GRANTS is not a valid grant list")?;
            for (resource, access) in extra.grants() {
                default_permission.set_access(access, [resource]);
            }
        }

        Ok(Self {
            log: LogConfig {
                filter: env::var("PROXY_LOG").unwrap_or(defaults.filter),
                json,
            },
            default_permission,
        })
    }

    /// Create a default configuration for testing.
    #[must_use]
    pub fn default_for_test() -> Self {
        Self {
            log: LogConfig {
                filter: "stripe_proxy=debug".into(),
                json: false,
            },
            default_permission: PermissionSet::none(),
        }
    }
}

/// Parses the hex rendering of the 4-byte wire form, e.g. `"00000010"`.
pub fn parse_wire_hex(value: &str) -> Result<PermissionSet> {
    let bytes = hex::decode(value.trim()).context("expected hex digits")?;
    Ok(PermissionSet::decode(&bytes)?)
}

/// Renders a permission set as hex of its wire form.
#[must_use]
pub fn to_wire_hex(perms: PermissionSet) -> String {
    hex::encode(perms.encode())
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

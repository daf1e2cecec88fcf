//! Optional application configuration loaded from `config.json` at the
//! data root. Missing file means defaults; a malformed file is reported
//! and ignored rather than aborting startup.

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::data_paths::DataPaths;

/// Environment variable overriding the strict-cash setting
pub const STRICT_CASH_ENV: &str = "PAPERTRADE_STRICT_CASH";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// When set, buys are checked against the cash remaining out of the
    /// starting balance instead of the total portfolio value.
    pub strict_cash: bool,
}

impl AppConfig {
    /// Load configuration from `config.json` if present.
    pub fn load(data_paths: &DataPaths) -> Self {
        let path = data_paths.config_file();
        if !path.exists() {
            return Self::default();
        }

        let content = match std::fs::read_to_string(&path) {
            Ok(content) => content,
            Err(e) => {
                warn!("Failed to read {}: {}", path.display(), e);
                return Self::default();
            }
        };

        match serde_json::from_str(&content) {
            Ok(config) => config,
            Err(e) => {
                warn!("Ignoring malformed {}: {}", path.display(), e);
                Self::default()
            }
        }
    }
}

/// Resolve the strict-cash setting. Precedence: CLI flag, then the
/// `PAPERTRADE_STRICT_CASH` environment variable, then `config.json`.
pub fn resolve_strict_cash(cli_flag: bool, config: &AppConfig) -> bool {
    if cli_flag {
        return true;
    }
    if let Ok(value) = std::env::var(STRICT_CASH_ENV) {
        return parse_flag(&value);
    }
    config.strict_cash
}

fn parse_flag(value: &str) -> bool {
    matches!(
        value.trim().to_ascii_lowercase().as_str(),
        "1" | "true" | "yes" | "on"
    )
}

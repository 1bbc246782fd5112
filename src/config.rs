//! Relay configuration loaded from environment variables.
//!
//! All settings come from environment variables (or a `.env` file via
//! `dotenvy`). Unset variables fall back to defaults; set but unparsable
//! values for the address or delivery mode are startup errors.

use std::net::SocketAddr;

use crate::error::RelayError;
use crate::service::DeliveryMode;

/// Default bind address.
pub const DEFAULT_LISTEN_ADDR: &str = "0.0.0.0:8000";

/// Log output format.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LogFormat {
    /// Human-readable lines.
    #[default]
    Pretty,
    /// One JSON object per line.
    Json,
}

/// Top-level relay configuration.
///
/// Loaded once at startup via [`RelayConfig::from_env`].
#[derive(Debug, Clone)]
pub struct RelayConfig {
    /// Socket address to bind the HTTP server to (e.g. `0.0.0.0:8000`).
    pub listen_addr: SocketAddr,

    /// Rendering of routed messages.
    pub delivery_mode: DeliveryMode,

    /// Whether to install a permissive CORS layer.
    pub cors_allow_any: bool,

    /// Log output format.
    pub log_format: LogFormat,
}

impl Default for RelayConfig {
    fn default() -> Self {
        Self {
            listen_addr: SocketAddr::from(([0, 0, 0, 0], 8000)),
            delivery_mode: DeliveryMode::default(),
            cors_allow_any: true,
            log_format: LogFormat::default(),
        }
    }
}

impl RelayConfig {
    /// Loads configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv().ok()` to optionally load a `.env` file.
    ///
    /// # Errors
    ///
    /// Returns [`RelayError::Config`] if `LISTEN_ADDR` or `DELIVERY_MODE`
    /// is set but invalid.
    pub fn from_env() -> Result<Self, RelayError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds configuration from an arbitrary key lookup.
    ///
    /// # Errors
    ///
    /// Returns [`RelayError::Config`] if `LISTEN_ADDR` or `DELIVERY_MODE`
    /// is set but invalid.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, RelayError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let listen_addr: SocketAddr = lookup("LISTEN_ADDR")
            .unwrap_or_else(|| DEFAULT_LISTEN_ADDR.to_string())
            .parse()
            .map_err(|e| RelayError::Config(format!("invalid LISTEN_ADDR: {e}")))?;

        let delivery_mode = match lookup("DELIVERY_MODE") {
            Some(raw) => raw.parse()?,
            None => DeliveryMode::default(),
        };

        let cors_allow_any = parse_bool(lookup("CORS_ALLOW_ANY").as_deref(), true);

        let log_format = match lookup("LOG_FORMAT").as_deref() {
            Some("json") | Some("JSON") => LogFormat::Json,
            _ => LogFormat::Pretty,
        };

        Ok(Self {
            listen_addr,
            delivery_mode,
            cors_allow_any,
            log_format,
        })
    }
}

/// Parses a boolean flag. Accepts `"true"`, `"1"`, `"false"`, `"0"`
/// (upper or lower case). Returns `default` otherwise.
fn parse_bool(value: Option<&str>, default: bool) -> bool {
    match value {
        Some("true") | Some("TRUE") | Some("1") => true,
        Some("false") | Some("FALSE") | Some("0") => false,
        _ => default,
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn load(pairs: &[(&str, &str)]) -> Result<RelayConfig, RelayError> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        RelayConfig::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn defaults_when_unset() {
        let Ok(cfg) = load(&[]) else {
            panic!("defaults should load");
        };
        assert_eq!(cfg.listen_addr, RelayConfig::default().listen_addr);
        assert_eq!(cfg.delivery_mode, DeliveryMode::Text);
        assert!(cfg.cors_allow_any);
        assert_eq!(cfg.log_format, LogFormat::Pretty);
    }

    #[test]
    fn reads_overrides() {
        let Ok(cfg) = load(&[
            ("LISTEN_ADDR", "127.0.0.1:9001"),
            ("DELIVERY_MODE", "structured"),
            ("CORS_ALLOW_ANY", "0"),
            ("LOG_FORMAT", "json"),
        ]) else {
            panic!("overrides should load");
        };
        assert_eq!(cfg.listen_addr.port(), 9001);
        assert_eq!(cfg.delivery_mode, DeliveryMode::Structured);
        assert!(!cfg.cors_allow_any);
        assert_eq!(cfg.log_format, LogFormat::Json);
    }

    #[test]
    fn rejects_bad_address() {
        assert!(matches!(
            load(&[("LISTEN_ADDR", "not-an-addr")]),
            Err(RelayError::Config(_))
        ));
    }

    #[test]
    fn rejects_bad_delivery_mode() {
        assert!(matches!(
            load(&[("DELIVERY_MODE", "fax")]),
            Err(RelayError::Config(_))
        ));
    }

    #[test]
    fn bool_parsing_falls_back() {
        assert!(parse_bool(Some("yes"), true));
        assert!(!parse_bool(None, false));
        assert!(parse_bool(Some("TRUE"), false));
    }
}

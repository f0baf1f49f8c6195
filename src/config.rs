//! Connection timing configuration.

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Default keepalive interval (writer-idle threshold).
pub const DEFAULT_KEEPALIVE_INTERVAL: Duration = Duration::from_secs(180);

/// Default deadline for the websocket upgrade.
pub const DEFAULT_HANDSHAKE_TIMEOUT: Duration = Duration::from_secs(15);

/// Idle-timer thresholds for one connection.
///
/// `None` disables a threshold ("never fire"). Reader-idle firings only
/// produce a liveness warning; writer-idle and all-idle firings send a
/// keepalive ping, which is what keeps intermediary proxies from closing a
/// quiet socket.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct IdleConfig {
    pub reader: Option<Duration>,
    pub writer: Option<Duration>,
    pub all: Option<Duration>,
}

impl Default for IdleConfig {
    fn default() -> Self {
        Self {
            reader: None,
            writer: Some(DEFAULT_KEEPALIVE_INTERVAL),
            all: None,
        }
    }
}

impl IdleConfig {
    /// All thresholds off; no idle events will ever fire.
    pub fn disabled() -> Self {
        Self {
            reader: None,
            writer: None,
            all: None,
        }
    }

    pub fn is_disabled(&self) -> bool {
        self.reader.is_none() && self.writer.is_none() && self.all.is_none()
    }
}

/// Settings used when opening a connection.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ConnectionConfig {
    /// Deadline for the websocket upgrade.
    #[serde(default = "default_handshake_timeout")]
    pub handshake_timeout: Duration,
    #[serde(default)]
    pub idle: IdleConfig,
}

impl Default for ConnectionConfig {
    fn default() -> Self {
        Self {
            handshake_timeout: DEFAULT_HANDSHAKE_TIMEOUT,
            idle: IdleConfig::default(),
        }
    }
}

fn default_handshake_timeout() -> Duration {
    DEFAULT_HANDSHAKE_TIMEOUT
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_pings_on_writer_idle_only() {
        let config = IdleConfig::default();
        assert_eq!(config.reader, None);
        assert_eq!(config.writer, Some(DEFAULT_KEEPALIVE_INTERVAL));
        assert_eq!(config.all, None);
        assert!(!config.is_disabled());
    }

    #[test]
    fn disabled_means_no_thresholds() {
        assert!(IdleConfig::disabled().is_disabled());
    }

    #[test]
    fn default_connection_config_has_upgrade_deadline() {
        let config = ConnectionConfig::default();
        assert_eq!(config.handshake_timeout, DEFAULT_HANDSHAKE_TIMEOUT);
    }
}

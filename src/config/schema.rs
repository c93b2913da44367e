/// Configuration schema and defaults for fleetdash.
///
/// Sections: `[server]`, `[backend]`, `[refresh]`, `[chat]` and `[logging]`.
/// Every field has a built-in default, so a config file only needs the
/// values it wants to change.
use std::time::Duration;

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Top-level config
// ---------------------------------------------------------------------------

/// Maps directly to `~/.fleetdash/config.toml` and `.fleetdash.toml`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DashConfig {
    pub server: ServerConfig,
    pub backend: BackendConfig,
    pub refresh: RefreshConfig,
    pub chat: ChatConfig,
    pub logging: LoggingConfig,
}

// ---------------------------------------------------------------------------
// [server]
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Address the operator UI binds to.
    pub listen: String,
    /// Open the dashboard in the default browser on `serve`.
    pub open_browser: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            listen: "127.0.0.1:7777".to_string(),
            open_browser: true,
        }
    }
}

// ---------------------------------------------------------------------------
// [backend]
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BackendConfig {
    /// Base URL of the agent backend serving `/api/*`.
    pub base_url: String,
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            base_url: "http://127.0.0.1:8877".to_string(),
        }
    }
}

// ---------------------------------------------------------------------------
// [refresh]
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RefreshConfig {
    /// Active-tab refresh period.
    pub primary_ms: u64,
    /// Intelligence report refresh period.
    pub intelligence_ms: u64,
}

impl RefreshConfig {
    /// Timer periods, floored at 100 ms so a typo cannot spin the loop.
    pub fn periods(&self) -> (Duration, Duration) {
        (
            Duration::from_millis(self.primary_ms.max(100)),
            Duration::from_millis(self.intelligence_ms.max(100)),
        )
    }
}

impl Default for RefreshConfig {
    fn default() -> Self {
        Self {
            primary_ms: 5000,
            intelligence_ms: 30000,
        }
    }
}

// ---------------------------------------------------------------------------
// [chat]
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChatConfig {
    /// Target filter used when a send names no agent.
    pub default_target: String,
}

impl Default for ChatConfig {
    fn default() -> Self {
        Self {
            default_target: crate::chat::ALL_AGENTS.to_string(),
        }
    }
}

// ---------------------------------------------------------------------------
// [logging]
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Whether the activity log is written.
    pub enabled: bool,
    /// Activity log path. `~` is expanded to the home directory.
    pub path: String,
    /// Print one line per operator request to stdout.
    pub access_log: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            path: "~/.fleetdash/activity.jsonl".to_string(),
            access_log: true,
        }
    }
}

impl DashConfig {
    /// Annotated default config written by `fleetdash config init`.
    pub fn default_toml() -> String {
        r#"# fleetdash configuration
#
# Configuration hierarchy (highest precedence wins):
#   1. Environment variables (FLEETDASH_*)
#   2. Project config (.fleetdash.toml in current directory)
#   3. User global config (~/.fleetdash/config.toml)
#   4. Built-in defaults

[server]
listen = "127.0.0.1:7777"
open_browser = true

[backend]
base_url = "http://127.0.0.1:8877"   # agent backend serving /api/*

[refresh]
primary_ms = 5000                     # active tab
intelligence_ms = 30000               # intelligence report

[chat]
default_target = "all"                # all | garves | soren | shelby | atlas | mercury | sentinel

[logging]
enabled = true
path = "~/.fleetdash/activity.jsonl"
access_log = true
"#
        .to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_toml_parses_back_to_defaults() {
        let config: DashConfig = toml::from_str(&DashConfig::default_toml()).unwrap();
        assert_eq!(config, DashConfig::default());
    }

    #[test]
    fn partial_file_keeps_other_defaults() {
        let config: DashConfig = toml::from_str("[refresh]\nprimary_ms = 2000\n").unwrap();
        assert_eq!(config.refresh.primary_ms, 2000);
        assert_eq!(config.refresh.intelligence_ms, 30000);
        assert_eq!(config.server.listen, "127.0.0.1:7777");
    }

    #[test]
    fn periods_have_a_floor() {
        let refresh = RefreshConfig {
            primary_ms: 0,
            intelligence_ms: 30000,
        };
        assert_eq!(refresh.periods().0, Duration::from_millis(100));
    }
}

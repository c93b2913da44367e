//! Health monitor (Sentinel) payloads.

use serde::Deserialize;

use super::lenient;

/// `GET /api/sentinel`
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct HealthSnapshot {
    #[serde(deserialize_with = "lenient::text")]
    pub status: String,
    #[serde(deserialize_with = "lenient::text")]
    pub last_scan: String,
    #[serde(deserialize_with = "lenient::entries")]
    pub agents: Vec<(String, AgentHealth)>,
    #[serde(deserialize_with = "lenient::list")]
    pub alerts: Vec<Alert>,
    #[serde(deserialize_with = "lenient::list")]
    pub fixes: Vec<Fix>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct AgentHealth {
    #[serde(deserialize_with = "lenient::flag")]
    pub healthy: bool,
    #[serde(deserialize_with = "lenient::text")]
    pub last_seen: String,
    #[serde(deserialize_with = "lenient::text")]
    pub message: String,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct Alert {
    /// `critical`, `warning` or `info`.
    #[serde(deserialize_with = "lenient::text")]
    pub severity: String,
    #[serde(deserialize_with = "lenient::text")]
    pub agent: String,
    #[serde(deserialize_with = "lenient::text")]
    pub message: String,
    #[serde(deserialize_with = "lenient::text")]
    pub time: String,
}

/// An automatic remediation Sentinel applied.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct Fix {
    #[serde(deserialize_with = "lenient::text")]
    pub agent: String,
    #[serde(deserialize_with = "lenient::text")]
    pub action: String,
    #[serde(deserialize_with = "lenient::text")]
    pub result: String,
    #[serde(deserialize_with = "lenient::text")]
    pub time: String,
}

//! Fleet overview and per-agent KPI payloads.

use serde::Deserialize;

use super::lenient;

/// `GET /api/overview`
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct Overview {
    #[serde(deserialize_with = "lenient::entries")]
    pub agents: Vec<(String, AgentStatus)>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct AgentStatus {
    #[serde(deserialize_with = "lenient::flag")]
    pub running: bool,
    #[serde(deserialize_with = "lenient::text")]
    pub status: String,
    #[serde(deserialize_with = "lenient::number")]
    pub uptime: f64,
    #[serde(deserialize_with = "lenient::text")]
    pub summary: String,
}

/// `GET /api/agent/{agent}/kpis`
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct Kpis {
    #[serde(deserialize_with = "lenient::list")]
    pub kpis: Vec<Kpi>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct Kpi {
    #[serde(deserialize_with = "lenient::text")]
    pub name: String,
    #[serde(deserialize_with = "lenient::number")]
    pub value: f64,
    #[serde(deserialize_with = "lenient::text")]
    pub unit: String,
    #[serde(deserialize_with = "lenient::opt_number")]
    pub target: Option<f64>,
}

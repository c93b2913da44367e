//! Task coordinator (Shelby) payloads.

use serde::Deserialize;

use super::lenient;

/// `GET /api/shelby`
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct CoordinatorSnapshot {
    #[serde(deserialize_with = "lenient::list")]
    pub tasks: Vec<Task>,
    #[serde(deserialize_with = "lenient::number")]
    pub active_agents: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct Task {
    #[serde(deserialize_with = "lenient::text")]
    pub id: String,
    #[serde(deserialize_with = "lenient::text")]
    pub agent: String,
    #[serde(deserialize_with = "lenient::text")]
    pub text: String,
    #[serde(deserialize_with = "lenient::text")]
    pub status: String,
    #[serde(deserialize_with = "lenient::text")]
    pub priority: String,
    #[serde(deserialize_with = "lenient::text")]
    pub created: String,
}

/// `GET /api/shelby/schedule`
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct Schedule {
    #[serde(deserialize_with = "lenient::list")]
    pub entries: Vec<ScheduleEntry>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct ScheduleEntry {
    #[serde(deserialize_with = "lenient::text")]
    pub time: String,
    #[serde(deserialize_with = "lenient::text")]
    pub agent: String,
    #[serde(deserialize_with = "lenient::text")]
    pub task: String,
    #[serde(deserialize_with = "lenient::text")]
    pub status: String,
}

/// `GET /api/shelby/economics`
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct Economics {
    #[serde(deserialize_with = "lenient::number")]
    pub revenue: f64,
    #[serde(deserialize_with = "lenient::number")]
    pub costs: f64,
    /// Falls back to `revenue - costs` when the backend omits it.
    #[serde(deserialize_with = "lenient::opt_number")]
    pub net: Option<f64>,
    #[serde(deserialize_with = "lenient::entries")]
    pub per_agent: Vec<(String, AgentEconomics)>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct AgentEconomics {
    #[serde(deserialize_with = "lenient::number")]
    pub revenue: f64,
    #[serde(deserialize_with = "lenient::number")]
    pub cost: f64,
}

/// `GET /api/shelby/activity-brief`
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct ActivityBrief {
    #[serde(deserialize_with = "lenient::text")]
    pub summary: String,
    #[serde(deserialize_with = "lenient::text_list")]
    pub highlights: Vec<String>,
    #[serde(deserialize_with = "lenient::text")]
    pub generated: String,
}

/// `GET /api/shelby/system`. Loads are 0–1 fractions.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct SystemStatus {
    #[serde(deserialize_with = "lenient::number")]
    pub cpu: f64,
    #[serde(deserialize_with = "lenient::number")]
    pub memory: f64,
    #[serde(deserialize_with = "lenient::number")]
    pub disk: f64,
    #[serde(deserialize_with = "lenient::number")]
    pub uptime_seconds: f64,
    #[serde(deserialize_with = "lenient::number")]
    pub processes: f64,
}

/// `GET /api/shelby/assessments`
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct Assessments {
    #[serde(deserialize_with = "lenient::list")]
    pub assessments: Vec<Assessment>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct Assessment {
    #[serde(deserialize_with = "lenient::text")]
    pub agent: String,
    #[serde(deserialize_with = "lenient::number")]
    pub score: f64,
    #[serde(deserialize_with = "lenient::text")]
    pub grade: String,
    #[serde(deserialize_with = "lenient::text")]
    pub notes: String,
}

//! Research agent (Atlas) payloads.

use serde::Deserialize;

use super::lenient;

/// `GET /api/atlas`
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct ResearchSnapshot {
    #[serde(deserialize_with = "lenient::text")]
    pub state: String,
    #[serde(deserialize_with = "lenient::number")]
    pub cycle: f64,
    #[serde(deserialize_with = "lenient::text")]
    pub last_cycle: String,
    #[serde(deserialize_with = "lenient::list")]
    pub findings: Vec<Finding>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct Finding {
    #[serde(deserialize_with = "lenient::text")]
    pub topic: String,
    #[serde(deserialize_with = "lenient::text")]
    pub summary: String,
    #[serde(deserialize_with = "lenient::text")]
    pub agent: String,
    #[serde(deserialize_with = "lenient::number")]
    pub confidence: f64,
}

/// `GET /api/atlas/costs`
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct Costs {
    #[serde(deserialize_with = "lenient::number")]
    pub total_usd: f64,
    #[serde(deserialize_with = "lenient::number")]
    pub today_usd: f64,
    #[serde(deserialize_with = "lenient::number")]
    pub budget_usd: f64,
    #[serde(deserialize_with = "lenient::scores")]
    pub by_provider: Vec<(String, f64)>,
}

/// `GET /api/atlas/background/status`
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct BackgroundStatus {
    #[serde(deserialize_with = "lenient::flag")]
    pub running: bool,
    #[serde(deserialize_with = "lenient::number")]
    pub cycles: f64,
    #[serde(deserialize_with = "lenient::text")]
    pub started_at: String,
    #[serde(deserialize_with = "lenient::opt_text")]
    pub last_error: Option<String>,
}

/// `GET /api/atlas/competitors`
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct Competitors {
    #[serde(deserialize_with = "lenient::list")]
    pub competitors: Vec<Competitor>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct Competitor {
    #[serde(deserialize_with = "lenient::text")]
    pub name: String,
    #[serde(deserialize_with = "lenient::text")]
    pub category: String,
    #[serde(deserialize_with = "lenient::text")]
    pub threat: String,
    #[serde(deserialize_with = "lenient::text")]
    pub notes: String,
}

/// `GET /api/atlas/live-research`
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct LiveResearch {
    #[serde(deserialize_with = "lenient::flag")]
    pub active: bool,
    #[serde(deserialize_with = "lenient::text")]
    pub query: String,
    /// 0–1.
    #[serde(deserialize_with = "lenient::number")]
    pub progress: f64,
    #[serde(deserialize_with = "lenient::text_list")]
    pub sources: Vec<String>,
}

/// `GET /api/atlas/learning/{agent}`
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct Learning {
    #[serde(deserialize_with = "lenient::list")]
    pub lessons: Vec<Lesson>,
    #[serde(deserialize_with = "lenient::list")]
    pub improvements: Vec<Improvement>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct Lesson {
    #[serde(deserialize_with = "lenient::text")]
    pub lesson: String,
    #[serde(deserialize_with = "lenient::text")]
    pub source: String,
    #[serde(deserialize_with = "lenient::flag")]
    pub applied: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct Improvement {
    #[serde(deserialize_with = "lenient::text")]
    pub id: String,
    #[serde(deserialize_with = "lenient::text")]
    pub title: String,
    #[serde(deserialize_with = "lenient::flag")]
    pub acknowledged: bool,
}

//! Brand-safety reviewer (Mercury) payloads.

use serde::Deserialize;

use super::lenient;

/// `GET /api/mercury`
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct ReviewSnapshot {
    #[serde(deserialize_with = "lenient::number")]
    pub posts_today: f64,
    #[serde(deserialize_with = "lenient::number")]
    pub posts_total: f64,
    #[serde(deserialize_with = "lenient::list")]
    pub review_queue: Vec<Review>,
    #[serde(deserialize_with = "lenient::list")]
    pub recent_posts: Vec<Post>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct Review {
    #[serde(deserialize_with = "lenient::text")]
    pub id: String,
    #[serde(deserialize_with = "lenient::text")]
    pub platform: String,
    #[serde(deserialize_with = "lenient::text")]
    pub text: String,
    /// Brand-safety score, 0–100.
    #[serde(deserialize_with = "lenient::opt_number")]
    pub score: Option<f64>,
    #[serde(deserialize_with = "lenient::text")]
    pub verdict: String,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct Post {
    #[serde(deserialize_with = "lenient::text")]
    pub platform: String,
    #[serde(deserialize_with = "lenient::text")]
    pub text: String,
    #[serde(deserialize_with = "lenient::text")]
    pub posted_at: String,
    #[serde(deserialize_with = "lenient::number")]
    pub engagement: f64,
}

/// `GET /api/mercury/plan`
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct Plan {
    #[serde(deserialize_with = "lenient::list")]
    pub plan: Vec<PlanEntry>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct PlanEntry {
    #[serde(deserialize_with = "lenient::text")]
    pub day: String,
    #[serde(deserialize_with = "lenient::text")]
    pub platform: String,
    #[serde(deserialize_with = "lenient::text")]
    pub topic: String,
    #[serde(deserialize_with = "lenient::text")]
    pub status: String,
}

/// `GET /api/mercury/knowledge`
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct Knowledge {
    #[serde(deserialize_with = "lenient::number")]
    pub total: f64,
    #[serde(deserialize_with = "lenient::list")]
    pub entries: Vec<KnowledgeEntry>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct KnowledgeEntry {
    #[serde(deserialize_with = "lenient::text")]
    pub topic: String,
    #[serde(deserialize_with = "lenient::text")]
    pub insight: String,
}

//! Content agent (Soren) payloads.

use serde::Deserialize;

use super::lenient;

/// `GET /api/soren`
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct ContentSnapshot {
    #[serde(deserialize_with = "lenient::object")]
    pub stats: ContentStats,
    #[serde(deserialize_with = "lenient::list")]
    pub queue: Vec<QueueItem>,
    /// Approved items awaiting posting.
    #[serde(deserialize_with = "lenient::list")]
    pub outbox: Vec<QueueItem>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct ContentStats {
    #[serde(deserialize_with = "lenient::number")]
    pub generated: f64,
    #[serde(deserialize_with = "lenient::number")]
    pub approved: f64,
    #[serde(deserialize_with = "lenient::number")]
    pub rejected: f64,
    #[serde(deserialize_with = "lenient::number")]
    pub posted: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct QueueItem {
    #[serde(deserialize_with = "lenient::text")]
    pub id: String,
    #[serde(deserialize_with = "lenient::text")]
    pub title: String,
    #[serde(deserialize_with = "lenient::text")]
    pub caption: String,
    #[serde(deserialize_with = "lenient::text")]
    pub platform: String,
    /// `pending`, `generated`, `approved`, `rejected` or `posted`.
    #[serde(deserialize_with = "lenient::text")]
    pub status: String,
    #[serde(deserialize_with = "lenient::text")]
    pub created: String,
    #[serde(deserialize_with = "lenient::flag")]
    pub has_media: bool,
}

//! Unified intelligence report (`GET /api/intelligence`).
//!
//! The payload is an object keyed by agent, plus a `team` aggregate with the
//! same shape:
//!
//! ```json
//! { "team": {"overall": 82, "dimensions": {"speed": 80}, "title": "Fleet"},
//!   "garves": {"overall": 70, "dimensions": {...}, "title": "Market Brain"} }
//! ```
//!
//! Dimension order is document order; the radar draws axes in that order.

use serde::Deserialize;
use serde_json::Value;

use super::Agent;
use super::lenient;

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct Intelligence {
    #[serde(deserialize_with = "lenient::number")]
    pub overall: f64,
    #[serde(deserialize_with = "lenient::scores")]
    pub dimensions: Vec<(String, f64)>,
    #[serde(deserialize_with = "lenient::text")]
    pub title: String,
}

impl Intelligence {
    pub fn level(&self) -> &'static str {
        level(self.overall)
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct IntelligenceReport {
    pub team: Option<Intelligence>,
    pub agents: Vec<(String, Intelligence)>,
}

impl IntelligenceReport {
    pub fn from_value(value: &Value) -> Self {
        let mut report = Self::default();
        let Value::Object(map) = value else {
            return report;
        };

        for (key, entry) in map {
            if !entry.is_object() {
                continue;
            }
            let intel: Intelligence = lenient::parse(entry);
            if key == "team" {
                report.team = Some(intel);
            } else {
                report.agents.push((key.clone(), intel));
            }
        }
        report
    }

    pub fn agent(&self, agent: Agent) -> Option<&Intelligence> {
        self.agents
            .iter()
            .find(|(key, _)| key == agent.key())
            .map(|(_, intel)| intel)
    }
}

/// Named tier for an overall score.
pub fn level(overall: f64) -> &'static str {
    if overall >= 90.0 {
        "GENIUS"
    } else if overall >= 75.0 {
        "EXPERT"
    } else if overall >= 60.0 {
        "SKILLED"
    } else if overall >= 40.0 {
        "LEARNING"
    } else {
        "NOVICE"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn splits_team_from_agents() {
        let report = IntelligenceReport::from_value(&json!({
            "team": {"overall": 82, "dimensions": {"speed": 80, "accuracy": 90}},
            "garves": {"overall": 70, "dimensions": {"risk": 60}, "title": "Market Brain"},
            "version": 3,
        }));
        let team = report.team.as_ref().unwrap();
        assert_eq!(team.overall, 82.0);
        assert_eq!(team.dimensions.len(), 2);
        assert_eq!(report.agents.len(), 1);
        assert_eq!(report.agent(Agent::Garves).unwrap().title, "Market Brain");
        assert!(report.agent(Agent::Soren).is_none());
    }

    #[test]
    fn level_boundaries() {
        assert_eq!(level(95.0), "GENIUS");
        assert_eq!(level(90.0), "GENIUS");
        assert_eq!(level(89.9), "EXPERT");
        assert_eq!(level(75.0), "EXPERT");
        assert_eq!(level(60.0), "SKILLED");
        assert_eq!(level(40.0), "LEARNING");
        assert_eq!(level(0.0), "NOVICE");
    }

    #[test]
    fn non_object_report_is_empty() {
        let report = IntelligenceReport::from_value(&json!(null));
        assert!(report.team.is_none());
        assert!(report.agents.is_empty());
    }
}

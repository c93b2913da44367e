//! Typed view models for backend payloads.
//!
//! Each agent exposes its own JSON shape; nothing is unified into one schema.
//! Every struct here is `#[serde(default)]` and every field goes through a
//! [`lenient`] helper, so parsing any payload is total. Absent data becomes
//! `None`, zero or blank rather than an error.

pub mod chat;
pub mod content;
pub mod coordinator;
pub mod health;
pub mod intel;
pub mod lenient;
pub mod overview;
pub mod research;
pub mod review;
pub mod trading;

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// One backend subsystem with a status endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Agent {
    Garves,
    Soren,
    Shelby,
    Atlas,
    Mercury,
    Sentinel,
}

impl Agent {
    pub const ALL: [Agent; 6] = [
        Agent::Garves,
        Agent::Soren,
        Agent::Shelby,
        Agent::Atlas,
        Agent::Mercury,
        Agent::Sentinel,
    ];

    pub fn key(self) -> &'static str {
        match self {
            Self::Garves => "garves",
            Self::Soren => "soren",
            Self::Shelby => "shelby",
            Self::Atlas => "atlas",
            Self::Mercury => "mercury",
            Self::Sentinel => "sentinel",
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::Garves => "Garves",
            Self::Soren => "Soren",
            Self::Shelby => "Shelby",
            Self::Atlas => "Atlas",
            Self::Mercury => "Mercury",
            Self::Sentinel => "Sentinel",
        }
    }

    pub fn role(self) -> &'static str {
        match self {
            Self::Garves => "Trading",
            Self::Soren => "Content",
            Self::Shelby => "Coordination",
            Self::Atlas => "Research",
            Self::Mercury => "Brand review",
            Self::Sentinel => "Health",
        }
    }

    /// Accent color used for this agent's radar meter.
    pub fn color(self) -> &'static str {
        match self {
            Self::Garves => "#3fb950",
            Self::Soren => "#bc8cff",
            Self::Shelby => "#58a6ff",
            Self::Atlas => "#39d2c0",
            Self::Mercury => "#d29922",
            Self::Sentinel => "#f85149",
        }
    }
}

impl fmt::Display for Agent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for Agent {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Agent::ALL
            .into_iter()
            .find(|a| a.key().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| anyhow::anyhow!("unknown agent: {s}"))
    }
}

/// Primary status payload of one agent, tagged by agent kind.
#[derive(Debug, Clone, PartialEq)]
pub enum AgentSnapshot {
    Trading(trading::TradingSnapshot),
    Content(content::ContentSnapshot),
    Coordinator(coordinator::CoordinatorSnapshot),
    Research(research::ResearchSnapshot),
    Review(review::ReviewSnapshot),
    Health(health::HealthSnapshot),
}

impl AgentSnapshot {
    /// Parse the primary endpoint payload for `agent`.
    pub fn parse(agent: Agent, value: &Value) -> Self {
        use lenient::parse;
        match agent {
            Agent::Garves => Self::Trading(parse(value)),
            Agent::Soren => Self::Content(parse(value)),
            Agent::Shelby => Self::Coordinator(parse(value)),
            Agent::Atlas => Self::Research(parse(value)),
            Agent::Mercury => Self::Review(parse(value)),
            Agent::Sentinel => Self::Health(parse(value)),
        }
    }

    pub fn agent(&self) -> Agent {
        match self {
            Self::Trading(_) => Agent::Garves,
            Self::Content(_) => Agent::Soren,
            Self::Coordinator(_) => Agent::Shelby,
            Self::Research(_) => Agent::Atlas,
            Self::Review(_) => Agent::Mercury,
            Self::Health(_) => Agent::Sentinel,
        }
    }
}

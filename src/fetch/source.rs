//! Polled data sources: endpoint, owned region and failure policy.

use crate::model::Agent;

pub const INTELLIGENCE_PATH: &str = "/api/intelligence";
pub const CHAT_HISTORY_PATH: &str = "/api/chat/history";
pub const CHAT_PATH: &str = "/api/chat";

/// What a region shows when its fetch fails.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailurePolicy {
    /// Replace the region with `Error: <message>`.
    ShowError,
    /// Leave the last good render in place.
    KeepPrevious,
}

/// One polled endpoint. Each source renders into exactly one region.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Source {
    Overview,
    /// The agent's main status endpoint.
    Primary(Agent),
    Kpis(Agent),
    Regime,
    Logs,
    Report4h,
    ShelbySchedule,
    ShelbyEconomics,
    ShelbyBrief,
    ShelbySystem,
    ShelbyAssessments,
    AtlasCosts,
    AtlasBackground,
    AtlasCompetitors,
    AtlasLive,
    AtlasLearning(Agent),
    MercuryPlan,
    MercuryKnowledge,
}

impl Source {
    pub fn path(self) -> String {
        match self {
            Self::Overview => "/api/overview".into(),
            Self::Primary(Agent::Garves) => "/api/trades".into(),
            Self::Primary(agent) => format!("/api/{}", agent.key()),
            Self::Kpis(agent) => format!("/api/agent/{}/kpis", agent.key()),
            Self::Regime => "/api/garves/regime".into(),
            Self::Logs => "/api/logs".into(),
            Self::Report4h => "/api/garves/report-4h".into(),
            Self::ShelbySchedule => "/api/shelby/schedule".into(),
            Self::ShelbyEconomics => "/api/shelby/economics".into(),
            Self::ShelbyBrief => "/api/shelby/activity-brief".into(),
            Self::ShelbySystem => "/api/shelby/system".into(),
            Self::ShelbyAssessments => "/api/shelby/assessments".into(),
            Self::AtlasCosts => "/api/atlas/costs".into(),
            Self::AtlasBackground => "/api/atlas/background/status".into(),
            Self::AtlasCompetitors => "/api/atlas/competitors".into(),
            Self::AtlasLive => "/api/atlas/live-research".into(),
            Self::AtlasLearning(agent) => format!("/api/atlas/learning/{}", agent.key()),
            Self::MercuryPlan => "/api/mercury/plan".into(),
            Self::MercuryKnowledge => "/api/mercury/knowledge".into(),
        }
    }

    /// Stable element id of the region this source owns.
    pub fn region(self) -> String {
        match self {
            Self::Overview => "overview-agents".into(),
            Self::Primary(agent) => format!("{}-{}", agent.key(), primary_suffix(agent)),
            Self::Kpis(agent) => format!("{}-kpis", agent.key()),
            Self::Regime => "garves-regime".into(),
            Self::Logs => "garves-logs".into(),
            Self::Report4h => "garves-report".into(),
            Self::ShelbySchedule => "shelby-schedule".into(),
            Self::ShelbyEconomics => "shelby-economics".into(),
            Self::ShelbyBrief => "shelby-brief".into(),
            Self::ShelbySystem => "shelby-system".into(),
            Self::ShelbyAssessments => "shelby-assessments".into(),
            Self::AtlasCosts => "atlas-costs".into(),
            Self::AtlasBackground => "atlas-background".into(),
            Self::AtlasCompetitors => "atlas-competitors".into(),
            Self::AtlasLive => "atlas-live".into(),
            Self::AtlasLearning(_) => "atlas-learning".into(),
            Self::MercuryPlan => "mercury-plan".into(),
            Self::MercuryKnowledge => "mercury-knowledge".into(),
        }
    }

    pub fn policy(self) -> FailurePolicy {
        match self {
            Self::Overview | Self::Primary(_) => FailurePolicy::ShowError,
            _ => FailurePolicy::KeepPrevious,
        }
    }
}

fn primary_suffix(agent: Agent) -> &'static str {
    match agent {
        Agent::Garves => "trades",
        Agent::Soren => "queue",
        Agent::Shelby => "tasks",
        Agent::Atlas => "research",
        Agent::Mercury => "posts",
        Agent::Sentinel => "health",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trading_primary_uses_trades_endpoint() {
        assert_eq!(Source::Primary(Agent::Garves).path(), "/api/trades");
        assert_eq!(Source::Primary(Agent::Soren).path(), "/api/soren");
        assert_eq!(Source::Primary(Agent::Garves).region(), "garves-trades");
    }

    #[test]
    fn parameterized_paths() {
        assert_eq!(Source::Kpis(Agent::Atlas).path(), "/api/agent/atlas/kpis");
        assert_eq!(
            Source::AtlasLearning(Agent::Mercury).path(),
            "/api/atlas/learning/mercury"
        );
        assert_eq!(Source::Kpis(Agent::Atlas).region(), "atlas-kpis");
    }

    #[test]
    fn only_primary_panels_show_errors() {
        assert_eq!(Source::Overview.policy(), FailurePolicy::ShowError);
        assert_eq!(
            Source::Primary(Agent::Sentinel).policy(),
            FailurePolicy::ShowError
        );
        assert_eq!(Source::Logs.policy(), FailurePolicy::KeepPrevious);
        assert_eq!(Source::Kpis(Agent::Garves).policy(), FailurePolicy::KeepPrevious);
    }
}

//! Tab and refresh scheduler.
//!
//! ```text
//!  select_tab ──┐                 ┌──▶ Job (one per Source) ──▶ worker
//!  primary 5s ──┼──▶ Controller ──┤
//!  intel  30s ──┘        ▲        └──▶ View (cached meters, status strip)
//!                        │
//!                 deliver(ticket, result)
//! ```
//!
//! The controller never performs I/O. It hands out [`Job`]s and takes the
//! outcomes back through [`Controller::deliver`], which decides per ticket
//! whether the result is still current.

pub mod controller;

use std::fmt;
use std::str::FromStr;
use std::time::{Duration, Instant};

use crate::actions::Action;
use crate::fetch::{Request, Source};
use crate::model::Agent;
use crate::model::intel::IntelligenceReport;

pub use controller::{Controller, intelligence_job, run_jobs, tab_regions};

// ---------------------------------------------------------------------------
// Tabs
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Tab {
    #[default]
    Overview,
    Garves,
    Soren,
    Shelby,
    Atlas,
    Mercury,
    Sentinel,
    Chat,
}

impl Tab {
    pub const ALL: [Tab; 8] = [
        Tab::Overview,
        Tab::Garves,
        Tab::Soren,
        Tab::Shelby,
        Tab::Atlas,
        Tab::Mercury,
        Tab::Sentinel,
        Tab::Chat,
    ];

    pub fn key(self) -> &'static str {
        match self {
            Self::Overview => "overview",
            Self::Chat => "chat",
            other => other.agent().map_or("overview", Agent::key),
        }
    }

    /// The agent this tab belongs to, if any.
    pub fn agent(self) -> Option<Agent> {
        match self {
            Self::Garves => Some(Agent::Garves),
            Self::Soren => Some(Agent::Soren),
            Self::Shelby => Some(Agent::Shelby),
            Self::Atlas => Some(Agent::Atlas),
            Self::Mercury => Some(Agent::Mercury),
            Self::Sentinel => Some(Agent::Sentinel),
            Self::Overview | Self::Chat => None,
        }
    }

    /// Sources polled on each refresh pass while this tab is active.
    pub fn sources(self, learning_agent: Agent) -> Vec<Source> {
        let Some(agent) = self.agent() else {
            return match self {
                Self::Overview => vec![Source::Overview],
                _ => Vec::new(),
            };
        };
        let mut sources = vec![Source::Primary(agent)];
        sources.extend(match agent {
            Agent::Garves => vec![Source::Regime, Source::Logs, Source::Report4h],
            Agent::Soren | Agent::Sentinel => vec![],
            Agent::Shelby => vec![
                Source::ShelbySchedule,
                Source::ShelbyEconomics,
                Source::ShelbyBrief,
                Source::ShelbySystem,
                Source::ShelbyAssessments,
            ],
            Agent::Atlas => vec![
                Source::AtlasCosts,
                Source::AtlasBackground,
                Source::AtlasCompetitors,
                Source::AtlasLive,
                Source::AtlasLearning(learning_agent),
            ],
            Agent::Mercury => vec![Source::MercuryPlan, Source::MercuryKnowledge],
        });
        sources.push(Source::Kpis(agent));
        sources
    }
}

impl fmt::Display for Tab {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for Tab {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Tab::ALL
            .into_iter()
            .find(|t| t.key().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| anyhow::anyhow!("unknown tab: {s}"))
    }
}

// ---------------------------------------------------------------------------
// Timers
// ---------------------------------------------------------------------------

/// A repeating deadline. Missed periods are skipped, not replayed.
#[derive(Debug, Clone, Copy)]
pub struct Timer {
    period: Duration,
    next_due: Instant,
}

impl Timer {
    pub fn new(period: Duration, now: Instant) -> Self {
        Self {
            period,
            next_due: now + period,
        }
    }

    pub fn period(&self) -> Duration {
        self.period
    }

    pub fn next_due(&self) -> Instant {
        self.next_due
    }

    /// Consume one firing if due.
    pub fn fire(&mut self, now: Instant) -> bool {
        if now < self.next_due {
            return false;
        }
        self.next_due += self.period;
        if self.next_due <= now {
            self.next_due = now + self.period;
        }
        true
    }
}

// ---------------------------------------------------------------------------
// Dashboard state
// ---------------------------------------------------------------------------

pub struct DashboardState {
    pub active_tab: Tab,
    pub primary: Timer,
    pub intelligence_timer: Timer,
    /// Last good report, replaced wholesale on each successful fetch.
    pub intelligence: Option<IntelligenceReport>,
    /// Agent whose Atlas learning feed is polled.
    pub learning_agent: Agent,
    /// Bumped on every tab switch.
    pub epoch: u64,
    /// Bumped on every refresh pass.
    pub pass: u64,
}

impl DashboardState {
    pub fn new(primary: Duration, intelligence: Duration, now: Instant) -> Self {
        Self {
            active_tab: Tab::default(),
            primary: Timer::new(primary, now),
            intelligence_timer: Timer::new(intelligence, now),
            intelligence: None,
            learning_agent: Agent::Garves,
            epoch: 0,
            pass: 0,
        }
    }
}

// ---------------------------------------------------------------------------
// Jobs
// ---------------------------------------------------------------------------

/// What a finished request was for.
#[derive(Debug, Clone, PartialEq)]
pub enum Ticket {
    Source { epoch: u64, pass: u64, source: Source },
    Intelligence,
    ChatHistory,
    /// Transcript reload after a send that did not echo the history back.
    ChatResync(u64),
    /// A chat send, numbered in issue order.
    ChatSend(u64),
    Action(Action),
}

impl Ticket {
    /// Short label for logs.
    pub fn describe(&self) -> String {
        match self {
            Self::Source { source, .. } => source.region(),
            Self::Intelligence => "intelligence".into(),
            Self::ChatHistory | Self::ChatResync(_) => "chat-history".into(),
            Self::ChatSend(_) => "chat-send".into(),
            Self::Action(action) => format!("action {}", action.label()),
        }
    }
}

/// One request to run off the event loop.
#[derive(Debug, Clone, PartialEq)]
pub struct Job {
    pub ticket: Ticket,
    pub request: Request,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tab_parses_by_key() {
        assert_eq!("Atlas".parse::<Tab>().unwrap(), Tab::Atlas);
        assert_eq!(" chat ".parse::<Tab>().unwrap(), Tab::Chat);
        assert!("settings".parse::<Tab>().is_err());
        for tab in Tab::ALL {
            assert_eq!(tab.key().parse::<Tab>().unwrap(), tab);
        }
    }

    #[test]
    fn agent_tabs_end_with_kpis() {
        let sources = Tab::Garves.sources(Agent::Garves);
        assert_eq!(sources.first(), Some(&Source::Primary(Agent::Garves)));
        assert_eq!(sources.last(), Some(&Source::Kpis(Agent::Garves)));
        assert_eq!(sources.len(), 5);
        assert!(Tab::Chat.sources(Agent::Garves).is_empty());
    }

    #[test]
    fn atlas_polls_selected_learning_agent() {
        let sources = Tab::Atlas.sources(Agent::Mercury);
        assert!(sources.contains(&Source::AtlasLearning(Agent::Mercury)));
    }

    #[test]
    fn timer_skips_missed_periods() {
        let t0 = Instant::now();
        let mut timer = Timer::new(Duration::from_secs(5), t0);
        assert!(!timer.fire(t0 + Duration::from_secs(4)));
        assert!(timer.fire(t0 + Duration::from_secs(23)));
        assert_eq!(timer.next_due(), t0 + Duration::from_secs(28));
        assert!(!timer.fire(t0 + Duration::from_secs(24)));
    }
}

//! The controller owns all dashboard state and lives on the event loop.

use std::collections::HashMap;
use std::time::{Duration, Instant};

use anyhow::Result;
use serde_json::Value;

use super::{DashboardState, Job, Tab, Ticket};
use crate::actions::Action;
use crate::chat::{ALL_AGENTS, ChatSession};
use crate::fetch::source::{CHAT_HISTORY_PATH, INTELLIGENCE_PATH};
use crate::fetch::{FailurePolicy, Request, Source, Transport};
use crate::model::Agent;
use crate::model::intel::IntelligenceReport;
use crate::model::lenient;
use crate::render::{self, Widget};
use crate::view::View;

pub const OVERVIEW_TEAM: &str = "overview-team";
pub const ACTION_STATUS: &str = "action-status";
pub const CHAT_LOG: &str = "chat-log";

/// Region showing an agent's radar meter.
pub fn intel_region(agent: Agent) -> String {
    format!("{}-intel", agent.key())
}

/// Regions shown on one tab's panel, in page order.
pub fn tab_regions(tab: Tab) -> Vec<String> {
    let mut ids = Vec::new();
    match tab {
        Tab::Overview => ids.push(OVERVIEW_TEAM.to_string()),
        Tab::Chat => ids.push(CHAT_LOG.to_string()),
        _ => ids.extend(tab.agent().map(intel_region)),
    }
    // The learning region id does not depend on the agent.
    ids.extend(tab.sources(Agent::Garves).into_iter().map(Source::region));
    ids
}

/// Every region the page mounts.
pub fn all_regions() -> Vec<String> {
    let mut ids = vec![ACTION_STATUS.to_string()];
    for tab in Tab::ALL {
        ids.extend(tab_regions(tab));
    }
    ids
}

pub struct Controller {
    state: DashboardState,
    view: View,
    chat: ChatSession,
    /// Last refresh pass written into each region.
    applied: HashMap<String, u64>,
    chat_target: String,
}

impl Controller {
    pub fn new(primary: Duration, intelligence: Duration, now: Instant) -> Self {
        let mut controller = Self {
            state: DashboardState::new(primary, intelligence, now),
            view: View::with_regions(all_regions()),
            chat: ChatSession::new(),
            applied: HashMap::new(),
            chat_target: ALL_AGENTS.to_string(),
        };
        controller.render_intelligence_regions(true);
        controller.render_chat();
        controller
    }

    /// Default target for chat sends that name none.
    pub fn with_chat_target(mut self, target: &str) -> Self {
        self.chat_target = target.to_string();
        self
    }

    pub fn state(&self) -> &DashboardState {
        &self.state
    }

    pub fn view(&self) -> &View {
        &self.view
    }

    pub fn chat(&self) -> &ChatSession {
        &self.chat
    }

    /// First refresh pass and the first intelligence fetch.
    pub fn start(&mut self) -> Vec<Job> {
        let mut jobs = self.refresh_pass();
        jobs.push(intelligence_job());
        jobs
    }

    /// Earliest instant at which a timer wants to fire.
    pub fn next_deadline(&self) -> Instant {
        self.state
            .primary
            .next_due()
            .min(self.state.intelligence_timer.next_due())
    }

    pub fn poll_timers(&mut self, now: Instant) -> Vec<Job> {
        let mut jobs = Vec::new();
        if self.state.primary.fire(now) {
            jobs.extend(self.refresh_pass());
        }
        if self.state.intelligence_timer.fire(now) {
            jobs.push(intelligence_job());
        }
        jobs
    }

    /// Switch tabs: render cached meters now, then one refresh pass.
    pub fn select_tab(&mut self, tab: Tab) -> Vec<Job> {
        self.state.active_tab = tab;
        self.state.epoch += 1;

        if self.state.intelligence.is_some() {
            self.render_intelligence_regions(false);
        }

        let mut jobs = Vec::new();
        if tab == Tab::Chat
            && let Some(request) = self.chat.history_request()
        {
            jobs.push(Job {
                ticket: Ticket::ChatHistory,
                request,
            });
        }
        jobs.extend(self.refresh_pass());
        jobs
    }

    /// Choose whose learning feed Atlas shows and fetch it if visible.
    pub fn set_learning_agent(&mut self, agent: Agent) -> Vec<Job> {
        self.state.learning_agent = agent;
        if self.state.active_tab != Tab::Atlas {
            return Vec::new();
        }
        self.state.pass += 1;
        vec![self.source_job(Source::AtlasLearning(agent))]
    }

    /// Validate an operator action. Invalid input is reported in the status
    /// strip and never reaches the network.
    pub fn dispatch_action(&mut self, action: Action) -> Result<Vec<Job>> {
        match action.request() {
            Ok(request) => Ok(vec![Job {
                ticket: Ticket::Action(action),
                request,
            }]),
            Err(err) => {
                self.view
                    .replace(ACTION_STATUS, render::error(&format!("{err:#}")));
                Err(err)
            }
        }
    }

    /// Begin a chat send. Blank messages produce no job.
    pub fn send_chat(&mut self, message: &str, target: Option<&str>) -> Vec<Job> {
        let target = target.unwrap_or(self.chat_target.as_str()).to_string();
        let Some((send, request)) = self.chat.begin_send(message, &target) else {
            return Vec::new();
        };
        self.render_chat();
        vec![Job {
            ticket: Ticket::ChatSend(send),
            request,
        }]
    }

    /// Apply a finished request. Returns follow-up jobs.
    pub fn deliver(&mut self, ticket: Ticket, result: Result<Value, String>) -> Vec<Job> {
        match ticket {
            Ticket::Source {
                epoch,
                pass,
                source,
            } => {
                self.deliver_source(epoch, pass, source, result);
                Vec::new()
            }
            Ticket::Intelligence => {
                if let Ok(value) = result {
                    self.state.intelligence = Some(IntelligenceReport::from_value(&value));
                    self.render_intelligence_regions(false);
                }
                Vec::new()
            }
            Ticket::ChatHistory => {
                match result {
                    Ok(value) => self.chat.history_loaded(lenient::parse(&value)),
                    Err(msg) => self.chat.history_failed(msg),
                }
                self.render_chat();
                Vec::new()
            }
            Ticket::ChatSend(send) => match result {
                Ok(value) if value.get("messages").is_some() => {
                    self.chat.send_succeeded(send, lenient::parse(&value));
                    self.render_chat();
                    Vec::new()
                }
                Ok(_) => vec![Job {
                    ticket: Ticket::ChatResync(send),
                    request: Request::Get(CHAT_HISTORY_PATH.to_string()),
                }],
                Err(msg) => {
                    self.chat.send_failed(send, msg);
                    self.render_chat();
                    Vec::new()
                }
            },
            Ticket::ChatResync(send) => {
                match result {
                    Ok(value) => self.chat.send_succeeded(send, lenient::parse(&value)),
                    Err(msg) => self.chat.send_failed(send, msg),
                }
                self.render_chat();
                Vec::new()
            }
            Ticket::Action(action) => {
                let label = action.label();
                let status = match &result {
                    Ok(_) => render::action_status(Ok(&label)),
                    Err(msg) => render::action_status(Err(msg)),
                };
                self.view.replace(ACTION_STATUS, status);
                self.refresh_pass()
            }
        }
    }

    fn deliver_source(
        &mut self,
        epoch: u64,
        pass: u64,
        source: Source,
        result: Result<Value, String>,
    ) {
        if epoch != self.state.epoch {
            return;
        }
        if let Source::AtlasLearning(agent) = source
            && agent != self.state.learning_agent
        {
            return;
        }
        let region = source.region();
        if self.applied.get(&region).is_some_and(|&last| last > pass) {
            return;
        }

        let html = match result {
            Ok(value) => render::render_source(source, &value),
            Err(msg) => match source.policy() {
                FailurePolicy::ShowError => render::error(&msg),
                FailurePolicy::KeepPrevious => return,
            },
        };
        if self.view.replace(&region, html) {
            self.applied.insert(region, pass);
        }
    }

    fn refresh_pass(&mut self) -> Vec<Job> {
        self.state.pass += 1;
        self.state
            .active_tab
            .sources(self.state.learning_agent)
            .into_iter()
            .map(|source| self.source_job(source))
            .collect()
    }

    fn source_job(&self, source: Source) -> Job {
        Job {
            ticket: Ticket::Source {
                epoch: self.state.epoch,
                pass: self.state.pass,
                source,
            },
            request: Request::Get(source.path()),
        }
    }

    /// Overview team panel plus the active agent's meter. `all` renders every
    /// meter, used once at startup to show the pending state.
    fn render_intelligence_regions(&mut self, all: bool) {
        let report = self.state.intelligence.as_ref();
        let team = match report {
            Some(report) => render::intel::team(report),
            None => Widget::Note("Intelligence pending".into()),
        };
        self.view.replace(OVERVIEW_TEAM, render::render(&team));

        let agents: Vec<Agent> = if all {
            Agent::ALL.to_vec()
        } else {
            self.state.active_tab.agent().into_iter().collect()
        };
        for agent in agents {
            let meter = render::intel::meter(agent, report.and_then(|r| r.agent(agent)));
            self.view
                .replace(&intel_region(agent), render::render(&meter));
        }
    }

    fn render_chat(&mut self) {
        self.view
            .replace(CHAT_LOG, render::chat::transcript(&self.chat));
    }
}

/// Fetch of the unified intelligence report.
pub fn intelligence_job() -> Job {
    Job {
        ticket: Ticket::Intelligence,
        request: Request::Get(INTELLIGENCE_PATH.to_string()),
    }
}

/// Run jobs to completion on the calling thread, follow-ups included.
pub fn run_jobs(controller: &mut Controller, transport: &dyn Transport, jobs: Vec<Job>) {
    let mut queue = std::collections::VecDeque::from(jobs);
    while let Some(job) = queue.pop_front() {
        let result = job
            .request
            .execute(transport)
            .map_err(|err| format!("{err:#}"));
        queue.extend(controller.deliver(job.ticket, result));
    }
}

//! Render pipeline: one total function per region, JSON in and markup out.
//!
//! Rendering is stateless. The same payload always yields the same markup,
//! so callers may re-render from cache at any time.

pub mod atlas;
pub mod chat;
pub mod garves;
pub mod intel;
pub mod mercury;
pub mod overview;
pub mod sentinel;
pub mod shelby;
pub mod soren;
pub mod widget;

use serde_json::Value;

use crate::fetch::Source;
use crate::model::{AgentSnapshot, lenient::parse};

pub use widget::{Widget, render};

/// Project a primary agent payload into its panel.
pub fn snapshot(s: &AgentSnapshot) -> Widget {
    match s {
        AgentSnapshot::Trading(t) => garves::trades(t),
        AgentSnapshot::Content(c) => soren::queue(c),
        AgentSnapshot::Coordinator(c) => shelby::tasks(c),
        AgentSnapshot::Research(r) => atlas::research(r),
        AgentSnapshot::Review(r) => mercury::posts(r),
        AgentSnapshot::Health(h) => sentinel::health(h),
    }
}

/// Widget for the region owned by `source`.
pub fn source_widget(source: Source, value: &Value) -> Widget {
    match source {
        Source::Overview => overview::agents(&parse(value)),
        Source::Primary(agent) => snapshot(&AgentSnapshot::parse(agent, value)),
        Source::Kpis(_) => overview::kpis(&parse(value)),
        Source::Regime => garves::regime(&parse(value)),
        Source::Logs => garves::logs(&parse(value)),
        Source::Report4h => garves::report(&parse(value)),
        Source::ShelbySchedule => shelby::schedule(&parse(value)),
        Source::ShelbyEconomics => shelby::economics(&parse(value)),
        Source::ShelbyBrief => shelby::brief(&parse(value)),
        Source::ShelbySystem => shelby::system(&parse(value)),
        Source::ShelbyAssessments => shelby::assessments(&parse(value)),
        Source::AtlasCosts => atlas::costs(&parse(value)),
        Source::AtlasBackground => atlas::background(&parse(value)),
        Source::AtlasCompetitors => atlas::competitors(&parse(value)),
        Source::AtlasLive => atlas::live(&parse(value)),
        Source::AtlasLearning(agent) => atlas::learning(agent, &parse(value)),
        Source::MercuryPlan => mercury::plan(&parse(value)),
        Source::MercuryKnowledge => mercury::knowledge(&parse(value)),
    }
}

pub fn render_source(source: Source, value: &Value) -> String {
    render(&source_widget(source, value))
}

/// Literal `Error: <message>` fragment.
pub fn error(message: &str) -> String {
    render(&Widget::Error(message.to_string()))
}

/// Outcome line for the `action-status` strip.
pub fn action_status(outcome: Result<&str, &str>) -> String {
    match outcome {
        Ok(label) => render(&Widget::Note(format!("ok: {label}"))),
        Err(message) => error(message),
    }
}

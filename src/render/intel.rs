//! Intelligence meters: the team radar on the overview and one per agent tab.

use crate::model::Agent;
use crate::model::intel::{Intelligence, IntelligenceReport};
use crate::radar::RadarChart;
use crate::utils::format::title_case;

use super::widget::{Cell, Stat, Table, Tone, Widget};

pub const TEAM_RADAR_SIZE: f64 = 220.0;
pub const AGENT_RADAR_SIZE: f64 = 160.0;
const TEAM_COLOR: &str = "#58a6ff";

fn radar(intel: &Intelligence, size: f64, color: &str) -> Widget {
    let values: Vec<f64> = intel.dimensions.iter().map(|(_, v)| *v).collect();
    let labels: Vec<String> = intel
        .dimensions
        .iter()
        .map(|(k, _)| title_case(k))
        .collect();
    Widget::Svg(
        RadarChart::new(size, &values, color)
            .with_labels(&labels)
            .to_svg(),
    )
}

fn level_cell(overall: f64) -> Cell {
    let tone = if overall >= 75.0 {
        Tone::Good
    } else if overall >= 40.0 {
        Tone::Caution
    } else {
        Tone::Bad
    };
    Cell::new(crate::model::intel::level(overall), tone)
}

/// Radar meter for one agent tab. `None` means no report has arrived yet.
pub fn meter(agent: Agent, intel: Option<&Intelligence>) -> Widget {
    let Some(intel) = intel else {
        return Widget::Note("Intelligence pending".into());
    };
    let title = if intel.title.is_empty() {
        agent.name().to_string()
    } else {
        intel.title.clone()
    };
    Widget::Stack(vec![
        radar(intel, AGENT_RADAR_SIZE, agent.color()),
        Widget::Stats(vec![
            Stat::new("Title", title),
            Stat::new("Overall", Cell::count(intel.overall)),
            Stat::new("Level", level_cell(intel.overall)),
        ]),
    ])
}

/// Team aggregate radar plus the per-agent overall list.
pub fn team(report: &IntelligenceReport) -> Widget {
    let mut parts = Vec::new();
    match &report.team {
        Some(team) => {
            parts.push(radar(team, TEAM_RADAR_SIZE, TEAM_COLOR));
            parts.push(Widget::Stats(vec![
                Stat::new("Team IQ", Cell::count(team.overall)),
                Stat::new("Level", level_cell(team.overall)),
            ]));
        }
        None => parts.push(Widget::Note("No team aggregate".into())),
    }

    let rows = report
        .agents
        .iter()
        .map(|(key, intel)| {
            let name = key
                .parse::<Agent>()
                .map_or_else(|_| key.clone(), |a| a.name().to_string());
            vec![
                Cell::from(name),
                Cell::from(intel.title.as_str()),
                Cell::count(intel.overall),
                level_cell(intel.overall),
            ]
        })
        .collect();
    parts.push(Widget::Table(Table {
        columns: vec!["Agent", "Title", "Overall", "Level"],
        rows,
        empty: "No agent scores",
    }));
    Widget::Stack(parts)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::widget::render;
    use serde_json::json;

    #[test]
    fn meter_pending_without_report() {
        assert_eq!(
            meter(Agent::Atlas, None),
            Widget::Note("Intelligence pending".into())
        );
    }

    #[test]
    fn meter_uses_agent_color_and_labels() {
        let report = IntelligenceReport::from_value(&json!({
            "soren": {"overall": 61, "dimensions": {"tone_match": 70, "speed": 40, "reach": 55}}
        }));
        let html = render(&meter(Agent::Soren, report.agent(Agent::Soren)));
        assert!(html.contains(Agent::Soren.color()));
        assert!(html.contains(">Tone Match<"));
        assert!(html.contains("SKILLED"));
        assert!(html.contains(r#"width="160.0""#));
    }

    #[test]
    fn team_lists_agents_with_levels() {
        let report = IntelligenceReport::from_value(&json!({
            "team": {"overall": 91, "dimensions": {"a": 1, "b": 2, "c": 3}},
            "mercury": {"overall": 20, "title": "Gatekeeper"}
        }));
        let html = render(&team(&report));
        assert!(html.contains("GENIUS"));
        assert!(html.contains(r#"<span class="bad">NOVICE</span>"#));
        assert!(html.contains("Mercury"));
        assert!(html.contains(r#"width="220.0""#));
    }
}

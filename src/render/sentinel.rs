//! Health monitor panel.

use crate::actions::Action;
use crate::model::health::HealthSnapshot;

use super::widget::{Button, Cell, Stat, Table, Tone, Widget};

const MAX_ALERTS: usize = 20;
const MAX_FIXES: usize = 20;

pub fn health(s: &HealthSnapshot) -> Widget {
    let healthy = s.agents.iter().filter(|(_, h)| h.healthy).count();

    let agents = s
        .agents
        .iter()
        .map(|(name, h)| {
            vec![
                Cell::from(name.as_str()),
                if h.healthy {
                    Cell::new("healthy", Tone::Good)
                } else {
                    Cell::new("unhealthy", Tone::Bad)
                },
                Cell::or_dash(&h.last_seen),
                Cell::or_dash(&h.message),
            ]
        })
        .collect();

    let alerts = s
        .alerts
        .iter()
        .take(MAX_ALERTS)
        .map(|a| {
            vec![
                Cell::or_dash(&a.time),
                Cell::new(a.severity.to_uppercase(), severity_tone(&a.severity)),
                Cell::or_dash(&a.agent),
                Cell::or_dash(&a.message),
            ]
        })
        .collect();

    let fixes = s
        .fixes
        .iter()
        .take(MAX_FIXES)
        .map(|f| {
            vec![
                Cell::or_dash(&f.time),
                Cell::or_dash(&f.agent),
                Cell::or_dash(&f.action),
                Cell::status(&f.result),
            ]
        })
        .collect();

    Widget::Stack(vec![
        Widget::Stats(vec![
            Stat::new("Status", Cell::status(&s.status)),
            Stat::new("Healthy agents", format!("{healthy}/{}", s.agents.len())),
            Stat::new("Open alerts", s.alerts.len().to_string()),
            Stat::new("Last scan", Cell::or_dash(&s.last_scan)),
        ]),
        Widget::Buttons(vec![
            Button::new("Run scan", Action::SentinelScan),
            Button::new("Report bug", Action::SentinelBug { text: String::new() })
                .with_prompt("Describe the bug"),
        ]),
        Widget::section(
            "Agents",
            Widget::Table(Table {
                columns: vec!["Agent", "State", "Last seen", "Message"],
                rows: agents,
                empty: "No agents monitored",
            }),
        ),
        Widget::section(
            "Alerts",
            Widget::Table(Table {
                columns: vec!["Time", "Severity", "Agent", "Message"],
                rows: alerts,
                empty: "No alerts",
            }),
        ),
        Widget::section(
            "Auto-fixes",
            Widget::Table(Table {
                columns: vec!["Time", "Agent", "Action", "Result"],
                rows: fixes,
                empty: "No fixes applied",
            }),
        ),
    ])
}

fn severity_tone(severity: &str) -> Tone {
    match severity.to_ascii_lowercase().as_str() {
        "critical" | "error" | "high" => Tone::Bad,
        "warning" | "warn" | "medium" => Tone::Caution,
        "info" | "low" => Tone::Muted,
        _ => Tone::Plain,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::lenient::parse;
    use crate::render::widget::render;
    use serde_json::json;

    #[test]
    fn counts_healthy_agents() {
        let s: HealthSnapshot = parse(&json!({
            "status": "ok",
            "agents": {"garves": {"healthy": true}, "soren": {"healthy": false, "message": "timeout"}},
            "alerts": [{"severity": "critical", "agent": "soren", "message": "<b>down</b>"}]
        }));
        let html = render(&health(&s));
        assert!(html.contains("1/2"));
        assert!(html.contains(r#"<span class="bad">CRITICAL</span>"#));
        assert!(html.contains("&lt;b&gt;down&lt;/b&gt;"));
    }

    #[test]
    fn bug_report_asks_for_description() {
        let html = render(&health(&HealthSnapshot::default()));
        assert!(html.contains(r#"data-prompt="Describe the bug""#));
        assert!(html.contains("&quot;sentinel-scan&quot;"));
        assert!(html.contains("0/0"));
    }
}

//! Fleet overview cards and the per-agent KPI strip.

use crate::model::Agent;
use crate::model::overview::{Kpis, Overview};
use crate::utils::format::{self, truncate};

use super::widget::{Card, Cell, Stat, Tone, Widget};

pub fn agents(o: &Overview) -> Widget {
    let cards = o
        .agents
        .iter()
        .map(|(key, status)| {
            let title = match key.parse::<Agent>() {
                Ok(agent) => format!("{} · {}", agent.name(), agent.role()),
                Err(_) => key.clone(),
            };
            let state = if status.running {
                Cell::new("running", Tone::Good)
            } else if status.status.is_empty() {
                Cell::new("stopped", Tone::Bad)
            } else {
                Cell::status(&status.status)
            };
            let uptime = if status.uptime > 0.0 {
                Cell::from(format!("up {}", format::format_uptime(status.uptime)))
            } else {
                Cell::new(format::PLACEHOLDER, Tone::Muted)
            };
            Card {
                title,
                meta: vec![state, uptime],
                body: truncate(&status.summary, 240),
                ..Default::default()
            }
        })
        .collect();

    let running = o.agents.iter().filter(|(_, s)| s.running).count();
    Widget::Stack(vec![
        Widget::Stats(vec![Stat::new(
            "Agents running",
            format!("{running}/{}", o.agents.len()),
        )]),
        Widget::Cards {
            items: cards,
            empty: "No agents reporting",
        },
    ])
}

pub fn kpis(k: &Kpis) -> Widget {
    if k.kpis.is_empty() {
        return Widget::Note("No KPIs reported".into());
    }
    Widget::Stats(
        k.kpis
            .iter()
            .map(|kpi| {
                let text = if kpi.unit.is_empty() {
                    trim_number(kpi.value)
                } else {
                    format!("{} {}", trim_number(kpi.value), kpi.unit)
                };
                let tone = match kpi.target {
                    Some(target) if kpi.value >= target => Tone::Good,
                    Some(_) => Tone::Caution,
                    None => Tone::Plain,
                };
                Stat::new(kpi.name.clone(), Cell::new(text, tone))
            })
            .collect(),
    )
}

/// Integers print bare, fractions keep two decimals.
fn trim_number(value: f64) -> String {
    if !value.is_finite() {
        format::PLACEHOLDER.to_string()
    } else if value.fract() == 0.0 {
        format!("{value:.0}")
    } else {
        format!("{value:.2}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::lenient::parse;
    use crate::render::widget::render;
    use serde_json::json;

    #[test]
    fn known_agents_get_display_names() {
        let o: Overview = parse(&json!({"agents": {
            "garves": {"running": true, "uptime": 7200},
            "custom": {"status": "error"}
        }}));
        let html = render(&agents(&o));
        assert!(html.contains("Garves · "));
        assert!(html.contains("up 2h 0m"));
        assert!(html.contains(">custom<"));
        assert!(html.contains("1/2"));
    }

    #[test]
    fn kpi_target_sets_tone() {
        let k: Kpis = parse(&json!({"kpis": [
            {"name": "Posts", "value": 12, "target": 10},
            {"name": "Latency", "value": 0.25, "unit": "s", "target": 1}
        ]}));
        let html = render(&kpis(&k));
        assert!(html.contains(r#"<span class="good">12</span>"#));
        assert!(html.contains(r#"<span class="caution">0.25 s</span>"#));
    }
}

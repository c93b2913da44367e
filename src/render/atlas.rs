//! Research agent panels.

use crate::actions::{Action, is_path_safe};
use crate::model::Agent;
use crate::model::research::{
    BackgroundStatus, Competitors, Costs, Learning, LiveResearch, ResearchSnapshot,
};
use crate::utils::format::{self, truncate};

use super::widget::{Button, Card, Cell, Stat, Table, Tone, Widget};

pub fn research(s: &ResearchSnapshot) -> Widget {
    let findings = s
        .findings
        .iter()
        .map(|f| Card {
            title: if f.topic.is_empty() {
                "Untitled finding".into()
            } else {
                f.topic.clone()
            },
            meta: vec![
                Cell::or_dash(&f.agent),
                Cell::from(format!("conf {}", format::pct(f.confidence, 0))),
            ],
            body: truncate(&f.summary, 400),
            ..Default::default()
        })
        .collect();

    Widget::Stack(vec![
        Widget::Stats(vec![
            Stat::new("State", Cell::status(&s.state)),
            Stat::new("Cycle", Cell::count(s.cycle)),
            Stat::new("Last cycle", Cell::or_dash(&s.last_cycle)),
            Stat::new("Findings", s.findings.len().to_string()),
        ]),
        Widget::Buttons(vec![Button::new("Full report", Action::AtlasReport)]),
        Widget::Cards {
            items: findings,
            empty: "No findings yet",
        },
    ])
}

pub fn costs(c: &Costs) -> Widget {
    let used = format::ratio(c.total_usd * 100.0, c.budget_usd, 1);
    let budget_used = if used == format::PLACEHOLDER {
        Cell::new(used, Tone::Muted)
    } else {
        Cell::from(format!("{used}%"))
    };

    let mut parts = vec![Widget::Stats(vec![
        Stat::new("Today", Cell::money(c.today_usd)),
        Stat::new("Total", Cell::money(c.total_usd)),
        Stat::new("Budget", Cell::money(c.budget_usd)),
        Stat::new("Budget used", budget_used),
    ])];
    if c.budget_usd > 0.0 {
        parts.push(Widget::Progress(c.total_usd / c.budget_usd));
    }
    parts.push(Widget::Table(Table {
        columns: vec!["Provider", "Spend"],
        rows: c
            .by_provider
            .iter()
            .map(|(name, usd)| vec![Cell::from(name.as_str()), Cell::money(*usd)])
            .collect(),
        empty: "No provider spend recorded",
    }));
    Widget::Stack(parts)
}

pub fn background(b: &BackgroundStatus) -> Widget {
    let (state, button) = if b.running {
        (
            Cell::new("running", Tone::Good),
            Button::new("Stop", Action::AtlasBackgroundStop),
        )
    } else {
        (
            Cell::new("stopped", Tone::Muted),
            Button::new("Start", Action::AtlasBackgroundStart),
        )
    };

    let mut parts = vec![
        Widget::Stats(vec![
            Stat::new("Background", state),
            Stat::new("Cycles", Cell::count(b.cycles)),
            Stat::new("Started", Cell::or_dash(&b.started_at)),
        ]),
        Widget::Buttons(vec![button]),
    ];
    if let Some(err) = &b.last_error {
        parts.push(Widget::Note(format!("Last error: {err}")));
    }
    Widget::Stack(parts)
}

pub fn competitors(c: &Competitors) -> Widget {
    Widget::Table(Table {
        columns: vec!["Name", "Category", "Threat", "Notes"],
        rows: c
            .competitors
            .iter()
            .map(|x| {
                vec![
                    Cell::or_dash(&x.name),
                    Cell::or_dash(&x.category),
                    Cell::new(x.threat.clone(), threat_tone(&x.threat)),
                    Cell::from(truncate(&x.notes, 160)),
                ]
            })
            .collect(),
        empty: "No competitors tracked",
    })
}

fn threat_tone(threat: &str) -> Tone {
    match threat.to_ascii_lowercase().as_str() {
        "high" => Tone::Bad,
        "medium" => Tone::Caution,
        "low" => Tone::Good,
        _ => Tone::Plain,
    }
}

pub fn live(l: &LiveResearch) -> Widget {
    if !l.active {
        return Widget::Note("No live research running".into());
    }
    let mut parts = vec![
        Widget::Stats(vec![
            Stat::new("Query", Cell::or_dash(&l.query)),
            Stat::new("Progress", format::pct(l.progress, 0)),
        ]),
        Widget::Progress(l.progress),
    ];
    if !l.sources.is_empty() {
        parts.push(Widget::Lines(l.sources.clone()));
    }
    Widget::Stack(parts)
}

pub fn learning(agent: Agent, l: &Learning) -> Widget {
    let lessons = l
        .lessons
        .iter()
        .map(|x| {
            vec![
                Cell::or_dash(&x.lesson),
                Cell::or_dash(&x.source),
                if x.applied {
                    Cell::new("applied", Tone::Good)
                } else {
                    Cell::new("open", Tone::Caution)
                },
            ]
        })
        .collect();

    let improvements = l
        .improvements
        .iter()
        .map(|imp| Card {
            title: imp.title.clone(),
            meta: vec![if imp.acknowledged {
                Cell::new("acknowledged", Tone::Good)
            } else {
                Cell::new("new", Tone::Caution)
            }],
            buttons: if !imp.acknowledged && is_path_safe(&imp.id) {
                vec![Button::new(
                    "Acknowledge",
                    Action::AtlasAcknowledge { id: imp.id.clone() },
                )]
            } else {
                Vec::new()
            },
            ..Default::default()
        })
        .collect();

    Widget::Stack(vec![
        Widget::section(
            format!("Lessons for {}", agent.name()),
            Widget::Table(Table {
                columns: vec!["Lesson", "Source", "State"],
                rows: lessons,
                empty: "No lessons recorded",
            }),
        ),
        Widget::section(
            "Improvements",
            Widget::Stack(vec![
                Widget::Buttons(vec![Button::new(
                    "Generate improvements",
                    Action::AtlasImprovements,
                )]),
                Widget::Cards {
                    items: improvements,
                    empty: "No improvements proposed",
                },
            ]),
        ),
    ])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::lenient::parse;
    use crate::render::widget::render;
    use serde_json::json;

    #[test]
    fn background_button_matches_state() {
        let running: BackgroundStatus = parse(&json!({"running": true}));
        assert!(render(&background(&running)).contains("atlas-background-stop"));
        let stopped: BackgroundStatus = parse(&json!({"running": "no"}));
        assert!(render(&background(&stopped)).contains("atlas-background-start"));
    }

    #[test]
    fn budget_used_needs_a_budget() {
        let c: Costs = parse(&json!({"total_usd": 5}));
        let html = render(&costs(&c));
        assert!(html.contains(r#"<span class="muted">--</span>"#));
        assert!(!html.contains("progress"));

        let c: Costs = parse(&json!({"total_usd": 5, "budget_usd": 20}));
        assert!(render(&costs(&c)).contains("25.0%"));
    }

    #[test]
    fn acknowledged_improvements_have_no_button() {
        let l: Learning = parse(&json!({"improvements": [
            {"id": "i1", "title": "Tighten stops", "acknowledged": true},
            {"id": "i2", "title": "Widen sources"}
        ]}));
        let html = render(&learning(Agent::Garves, &l));
        assert_eq!(html.matches("atlas-acknowledge").count(), 1);
        assert!(html.contains("Lessons for Garves"));
    }
}

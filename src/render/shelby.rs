//! Task coordinator panels.

use crate::model::coordinator::{
    ActivityBrief, Assessments, CoordinatorSnapshot, Economics, Schedule, SystemStatus,
};
use crate::utils::format;

use super::widget::{Cell, Link, Stat, Table, Tone, Widget};

pub fn tasks(s: &CoordinatorSnapshot) -> Widget {
    let open = s
        .tasks
        .iter()
        .filter(|t| !matches!(t.status.to_ascii_lowercase().as_str(), "done" | "complete" | "completed"))
        .count();

    let rows = s
        .tasks
        .iter()
        .map(|t| {
            vec![
                Cell::or_dash(&t.agent),
                Cell::or_dash(&t.text),
                Cell::new(t.priority.clone(), priority_tone(&t.priority)),
                Cell::status(&t.status),
                Cell::or_dash(&t.created),
            ]
        })
        .collect();

    Widget::Stack(vec![
        Widget::Stats(vec![
            Stat::new("Open tasks", open.to_string()),
            Stat::new("Total tasks", s.tasks.len().to_string()),
            Stat::new("Active agents", Cell::count(s.active_agents)),
        ]),
        Widget::Table(Table {
            columns: vec!["Agent", "Task", "Priority", "Status", "Created"],
            rows,
            empty: "No tasks",
        }),
    ])
}

fn priority_tone(priority: &str) -> Tone {
    match priority.to_ascii_lowercase().as_str() {
        "high" | "urgent" | "critical" => Tone::Bad,
        "medium" | "normal" => Tone::Caution,
        _ => Tone::Muted,
    }
}

pub fn schedule(s: &Schedule) -> Widget {
    Widget::Table(Table {
        columns: vec!["Time", "Agent", "Task", "Status"],
        rows: s
            .entries
            .iter()
            .map(|e| {
                vec![
                    Cell::or_dash(&e.time),
                    Cell::or_dash(&e.agent),
                    Cell::or_dash(&e.task),
                    Cell::status(&e.status),
                ]
            })
            .collect(),
        empty: "Nothing scheduled",
    })
}

pub fn economics(e: &Economics) -> Widget {
    let net = e.net.unwrap_or(e.revenue - e.costs);
    let rows = e
        .per_agent
        .iter()
        .map(|(agent, a)| {
            vec![
                Cell::from(agent.as_str()),
                Cell::money(a.revenue),
                Cell::money(-a.cost),
                Cell::from(format::ratio(a.revenue, a.cost, 2)),
            ]
        })
        .collect();

    Widget::Stack(vec![
        Widget::Stats(vec![
            Stat::new("Revenue", Cell::money(e.revenue)),
            Stat::new("Costs", Cell::money(-e.costs)),
            Stat::new("Net", Cell::money(net)),
            Stat::new("ROI", format::ratio(e.revenue, e.costs, 2)),
        ]),
        Widget::Table(Table {
            columns: vec!["Agent", "Revenue", "Cost", "ROI"],
            rows,
            empty: "No per-agent breakdown",
        }),
        Widget::Links(vec![Link {
            label: "Export CSV",
            href: "/files/shelby/export".into(),
        }]),
    ])
}

pub fn brief(b: &ActivityBrief) -> Widget {
    if b.summary.is_empty() && b.highlights.is_empty() {
        return Widget::Note("No activity brief yet".into());
    }
    let mut parts = Vec::new();
    if !b.summary.is_empty() {
        parts.push(Widget::Text(b.summary.clone()));
    }
    if !b.highlights.is_empty() {
        parts.push(Widget::Lines(
            b.highlights.iter().map(|h| format!("• {h}")).collect(),
        ));
    }
    if !b.generated.is_empty() {
        parts.push(Widget::Note(format!("Generated {}", b.generated)));
    }
    Widget::Stack(parts)
}

pub fn system(s: &SystemStatus) -> Widget {
    Widget::Stack(vec![
        Widget::Stats(vec![
            Stat::new("CPU", load_cell(s.cpu)),
            Stat::new("Memory", load_cell(s.memory)),
            Stat::new("Disk", load_cell(s.disk)),
            Stat::new("Uptime", format::format_uptime(s.uptime_seconds)),
            Stat::new("Processes", Cell::count(s.processes)),
        ]),
        Widget::Progress(s.memory),
    ])
}

fn load_cell(fraction: f64) -> Cell {
    let tone = if fraction >= 0.9 {
        Tone::Bad
    } else if fraction >= 0.7 {
        Tone::Caution
    } else {
        Tone::Good
    };
    Cell::new(format::pct(fraction, 1), tone)
}

pub fn assessments(a: &Assessments) -> Widget {
    Widget::Table(Table {
        columns: vec!["Agent", "Score", "Grade", "Notes"],
        rows: a
            .assessments
            .iter()
            .map(|x| {
                vec![
                    Cell::or_dash(&x.agent),
                    Cell::new(format!("{:.0}", x.score), Tone::from_win_rate(x.score)),
                    Cell::or_dash(&x.grade),
                    Cell::or_dash(&x.notes),
                ]
            })
            .collect(),
        empty: "No assessments yet",
    })
}
